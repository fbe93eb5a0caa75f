//! On-disk state: catalog rows plus each user's owned card ids.
//!
//! Encoded with bincode. Layout mirrors the two persisted tables: cards,
//! and a user-to-card join.
//!
//! ## Concurrent Writers
//!
//! `save` writes a temp file beside the target and renames it into place,
//! so readers see either the old or the new state, never a partial file.
//! A read-modify-write cycle (load, open a pack, save) must also hold a
//! [`StateLock`], or two writers can each save over the other's changes.

use std::ffi::OsString;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::cards::{Card, CardId, CatalogStore, InMemoryCatalog};
use crate::collection::{CollectionStore, InMemoryCollectionStore, UserCollection};
use crate::core::UserId;
use crate::error::Result;

/// One user's owned cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRecord {
    pub user: UserId,
    pub cards: Vec<CardId>,
}

/// Full persisted state.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cards: Vec<Card>,
    pub collections: Vec<CollectionRecord>,
}

impl Snapshot {
    /// Read both stores into a snapshot.
    pub fn capture<C, S>(catalog: &C, collections: &S) -> Result<Self>
    where
        C: CatalogStore + ?Sized,
        S: CollectionStore + ?Sized,
    {
        let cards = catalog.all()?;
        let mut records = Vec::new();
        for user in collections.users()? {
            if let Some(collection) = collections.get(user)? {
                records.push(CollectionRecord {
                    user,
                    cards: collection.card_ids().collect(),
                });
            }
        }
        Ok(Self {
            cards,
            collections: records,
        })
    }

    /// Rebuild in-memory stores.
    ///
    /// Owned ids that no longer exist in the catalog are dropped.
    pub fn restore(self) -> Result<(InMemoryCatalog, InMemoryCollectionStore)> {
        let known: FxHashSet<CardId> = self.cards.iter().map(|c| c.id).collect();
        let catalog = InMemoryCatalog::from_cards(self.cards)?;

        let collections = self.collections.into_iter().map(|record| {
            let mut collection = UserCollection::new(record.user);
            for card in record.cards {
                if known.contains(&card) {
                    collection.insert(card);
                } else {
                    warn!(user = %record.user, %card, "dropping owned card missing from catalog");
                }
            }
            collection
        });

        Ok((catalog, InMemoryCollectionStore::from_collections(collections)))
    }

    /// Atomically replace the file at `path` with this snapshot.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(temp.as_file_mut());
            bincode::serialize_into(&mut writer, self)?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(path).map_err(|e| e.error)?;
        info!(
            path = %path.display(),
            cards = self.cards.len(),
            collections = self.collections.len(),
            "saved snapshot"
        );
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = BufReader::new(File::open(path)?);
        let snapshot: Self = bincode::deserialize_from(reader)?;
        info!(
            path = %path.display(),
            cards = snapshot.cards.len(),
            collections = snapshot.collections.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }
}

/// Exclusive lock guarding read-modify-write cycles on a state file.
///
/// Locks a `<state>.lock` sidecar rather than the state file itself, since
/// `save` swaps the state file's inode on every write. Released on drop.
#[derive(Debug)]
pub struct StateLock {
    file: File,
    path: PathBuf,
}

impl StateLock {
    /// Block until the lock for `state` is held.
    pub fn acquire(state: impl AsRef<Path>) -> Result<Self> {
        let path = Self::lock_path(state.as_ref());
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&path)?;
        file.lock_exclusive()?;
        debug!(path = %path.display(), "acquired state lock");
        Ok(Self { file, path })
    }

    /// Sidecar lock file for `state`.
    #[must_use]
    pub fn lock_path(state: &Path) -> PathBuf {
        let mut name = OsString::from(state.as_os_str());
        name.push(".lock");
        PathBuf::from(name)
    }
}

impl Drop for StateLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!(path = %self.path.display(), error = %e, "failed to release state lock");
        }
    }
}
