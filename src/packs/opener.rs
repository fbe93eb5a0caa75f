//! Pack opening engine.
//!
//! Draws `pack_size` distinct cards uniformly at random from the catalog
//! and unions them into the opening user's collection.
//!
//! ## Guarantees
//!
//! - A catalog smaller than the pack fails before touching any collection.
//! - The merge is atomic per user (delegated to the collection store).
//! - The returned pack lists every drawn card, owned before or not.
//!
//! Rarity plays no part in the draw.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{info, warn};

use crate::cards::{Card, CardId, CatalogStore};
use crate::collection::CollectionStore;
use crate::core::{PackConfig, PackRng, UserId};
use crate::error::{Error, Result};

/// Result of one pack opening.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackOpening {
    pub user: UserId,

    /// Drawn cards in draw order.
    pub cards: Vec<Card>,

    /// Drawn cards the user did not own before this pack.
    pub newly_added: SmallVec<[CardId; 8]>,

    /// Size of the user's collection after the merge.
    pub collection_size: usize,
}

impl PackOpening {
    /// Ids of the drawn cards, in draw order.
    pub fn card_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|c| c.id)
    }
}

/// Opens packs against a catalog and a collection store.
///
/// ## Example
///
/// ```
/// use ccg_catalog::cards::InMemoryCatalog;
/// use ccg_catalog::collection::{CollectionStore, InMemoryCollectionStore};
/// use ccg_catalog::core::{PackConfig, UserId};
/// use ccg_catalog::packs::PackOpener;
///
/// let mut catalog = InMemoryCatalog::new();
/// for name in ["A", "B", "C", "D", "E", "F"] {
///     catalog.register_auto(name).unwrap();
/// }
///
/// let opener = PackOpener::new(
///     catalog,
///     InMemoryCollectionStore::new(),
///     PackConfig::new().with_seed(7),
/// ).unwrap();
///
/// let pack = opener.open_pack(UserId::new(1)).unwrap();
/// assert_eq!(pack.cards.len(), 5);
/// assert_eq!(opener.collections().get_or_create(UserId::new(1)).unwrap().len(), 5);
/// ```
#[derive(Debug)]
pub struct PackOpener<C, S> {
    catalog: C,
    collections: S,
    config: PackConfig,
    rng: Mutex<PackRng>,
}

impl<C: CatalogStore, S: CollectionStore> PackOpener<C, S> {
    /// Create an engine. Fails if `config` is invalid.
    pub fn new(catalog: C, collections: S, config: PackConfig) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => PackRng::new(seed),
            None => PackRng::from_entropy(),
        };
        Ok(Self {
            catalog,
            collections,
            config,
            rng: Mutex::new(rng),
        })
    }

    #[must_use]
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    #[must_use]
    pub fn collections(&self) -> &S {
        &self.collections
    }

    #[must_use]
    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    /// Give back the stores, e.g. to persist them.
    pub fn into_stores(self) -> (C, S) {
        (self.catalog, self.collections)
    }

    /// Draw a pack from the catalog without touching any collection.
    pub fn draw(&self) -> Result<Vec<Card>> {
        let catalog = self.catalog.all()?;
        let required = self.config.pack_size;
        if catalog.len() < required {
            warn!(available = catalog.len(), required, "catalog too small for a pack");
            return Err(Error::InsufficientCatalog {
                required,
                available: catalog.len(),
            });
        }

        let mut rng = self.fork_rng()?;
        let picks = rng.sample_indices(catalog.len(), required);

        // Take picks out of the catalog without cloning; indices are distinct.
        let mut drawn: Vec<Option<Card>> = catalog.into_iter().map(Some).collect();
        Ok(picks.into_iter().filter_map(|i| drawn[i].take()).collect())
    }

    /// Open one pack for `user` and merge it into their collection.
    pub fn open_pack(&self, user: UserId) -> Result<PackOpening> {
        let cards = self.draw()?;
        let ids: SmallVec<[CardId; 8]> = cards.iter().map(|c| c.id).collect();

        let merge = self.collections.add_cards(user, &ids)?;
        info!(
            %user,
            drawn = cards.len(),
            new = merge.added.len(),
            owned = merge.collection.len(),
            "opened pack"
        );

        Ok(PackOpening {
            user,
            cards,
            newly_added: merge.added,
            collection_size: merge.collection.len(),
        })
    }

    /// The user's owned cards, in id order. Empty if they never opened a pack.
    pub fn owned_cards(&self, user: UserId) -> Result<Vec<Card>> {
        let Some(collection) = self.collections.get(user)? else {
            return Ok(Vec::new());
        };
        collection.card_ids().map(|id| self.catalog.get(id)).collect()
    }

    fn fork_rng(&self) -> Result<PackRng> {
        let mut rng = self.rng.lock().map_err(|_| Error::poisoned("pack rng"))?;
        Ok(rng.fork())
    }
}
