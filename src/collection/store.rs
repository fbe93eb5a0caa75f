//! Collection store: per-user owned-card sets.
//!
//! ## Concurrency
//!
//! `add_cards` is the only mutation. It must be atomic per user: two
//! concurrent merges for the same user may not lose each other's cards.
//! `InMemoryCollectionStore` keeps one mutex per user, so merges for the
//! same user serialize while different users proceed independently.

use std::sync::{Arc, Mutex, RwLock};

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;

use super::user_collection::UserCollection;
use crate::cards::CardId;
use crate::core::UserId;
use crate::error::{Error, Result};

/// Outcome of merging cards into a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionMerge {
    /// The collection after the merge.
    pub collection: UserCollection,
    /// Cards that were not owned before, in input order.
    pub added: SmallVec<[CardId; 8]>,
}

/// Read/write access to user collections.
pub trait CollectionStore: Send + Sync {
    /// Fetch the user's collection, creating an empty one on first use.
    fn get_or_create(&self, user: UserId) -> Result<UserCollection>;

    /// Fetch the user's collection without creating it.
    fn get(&self, user: UserId) -> Result<Option<UserCollection>>;

    /// Whether the user owns `card`. Users without a collection own nothing.
    fn owns_card(&self, user: UserId, card: CardId) -> Result<bool>;

    /// Union `cards` into the user's collection (get-or-create first).
    ///
    /// Atomic with respect to other calls for the same user.
    fn add_cards(&self, user: UserId, cards: &[CardId]) -> Result<CollectionMerge>;

    /// Users that have a collection, ascending.
    fn users(&self) -> Result<Vec<UserId>>;
}

impl<T: CollectionStore + ?Sized> CollectionStore for Arc<T> {
    fn get_or_create(&self, user: UserId) -> Result<UserCollection> {
        (**self).get_or_create(user)
    }

    fn get(&self, user: UserId) -> Result<Option<UserCollection>> {
        (**self).get(user)
    }

    fn owns_card(&self, user: UserId, card: CardId) -> Result<bool> {
        (**self).owns_card(user, card)
    }

    fn add_cards(&self, user: UserId, cards: &[CardId]) -> Result<CollectionMerge> {
        (**self).add_cards(user, cards)
    }

    fn users(&self) -> Result<Vec<UserId>> {
        (**self).users()
    }
}

type Slot = Arc<Mutex<UserCollection>>;

/// In-memory collection store with per-user locking.
#[derive(Debug, Default)]
pub struct InMemoryCollectionStore {
    slots: RwLock<FxHashMap<UserId, Slot>>,
}

impl InMemoryCollectionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from existing collections. Later duplicates replace earlier ones.
    pub fn from_collections(collections: impl IntoIterator<Item = UserCollection>) -> Self {
        let slots = collections
            .into_iter()
            .map(|c| (c.user, Arc::new(Mutex::new(c))))
            .collect();
        Self {
            slots: RwLock::new(slots),
        }
    }

    fn existing_slot(&self, user: UserId) -> Result<Option<Slot>> {
        let slots = self.slots.read().map_err(|_| Error::poisoned("collection map"))?;
        Ok(slots.get(&user).cloned())
    }

    fn slot(&self, user: UserId) -> Result<Slot> {
        if let Some(slot) = self.existing_slot(user)? {
            return Ok(slot);
        }

        let mut slots = self.slots.write().map_err(|_| Error::poisoned("collection map"))?;
        let slot = slots.entry(user).or_insert_with(|| {
            debug!(%user, "created collection");
            Arc::new(Mutex::new(UserCollection::new(user)))
        });
        Ok(Arc::clone(slot))
    }
}

impl CollectionStore for InMemoryCollectionStore {
    fn get_or_create(&self, user: UserId) -> Result<UserCollection> {
        let slot = self.slot(user)?;
        let collection = slot.lock().map_err(|_| Error::poisoned("collection"))?;
        Ok(collection.clone())
    }

    fn get(&self, user: UserId) -> Result<Option<UserCollection>> {
        let Some(slot) = self.existing_slot(user)? else {
            return Ok(None);
        };
        let collection = slot.lock().map_err(|_| Error::poisoned("collection"))?;
        Ok(Some(collection.clone()))
    }

    fn owns_card(&self, user: UserId, card: CardId) -> Result<bool> {
        Ok(self.get(user)?.is_some_and(|c| c.contains(card)))
    }

    fn add_cards(&self, user: UserId, cards: &[CardId]) -> Result<CollectionMerge> {
        let slot = self.slot(user)?;
        let mut collection = slot.lock().map_err(|_| Error::poisoned("collection"))?;

        let added: SmallVec<[CardId; 8]> = cards
            .iter()
            .copied()
            .filter(|&card| collection.insert(card))
            .collect();

        debug!(%user, added = added.len(), owned = collection.len(), "merged cards");
        Ok(CollectionMerge {
            collection: collection.clone(),
            added,
        })
    }

    fn users(&self) -> Result<Vec<UserId>> {
        let slots = self.slots.read().map_err(|_| Error::poisoned("collection map"))?;
        let mut users: Vec<UserId> = slots.keys().copied().collect();
        users.sort_unstable();
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn ids(raw: &[u32]) -> Vec<CardId> {
        raw.iter().copied().map(CardId::new).collect()
    }

    #[test]
    fn test_get_or_create_is_idempotent() {
        let store = InMemoryCollectionStore::new();
        let user = UserId::new(1);

        assert!(store.get(user).unwrap().is_none());
        let first = store.get_or_create(user).unwrap();
        let second = store.get_or_create(user).unwrap();

        assert!(first.is_empty());
        assert_eq!(first, second);
        assert_eq!(store.users().unwrap(), vec![user]);
    }

    #[test]
    fn test_owns_card_does_not_create() {
        let store = InMemoryCollectionStore::new();
        let user = UserId::new(1);

        assert!(!store.owns_card(user, CardId::new(1)).unwrap());
        assert!(store.users().unwrap().is_empty());
    }

    #[test]
    fn test_add_cards_reports_new_only() {
        let store = InMemoryCollectionStore::new();
        let user = UserId::new(1);

        let merge = store.add_cards(user, &ids(&[1, 2, 3])).unwrap();
        assert_eq!(merge.added.as_slice(), ids(&[1, 2, 3]).as_slice());

        let merge = store.add_cards(user, &ids(&[3, 4, 4, 1])).unwrap();
        assert_eq!(merge.added.as_slice(), ids(&[4]).as_slice());
        assert_eq!(merge.collection.len(), 4);

        assert!(store.owns_card(user, CardId::new(4)).unwrap());
        assert!(!store.owns_card(user, CardId::new(5)).unwrap());
    }

    #[test]
    fn test_users_are_isolated() {
        let store = InMemoryCollectionStore::new();

        store.add_cards(UserId::new(1), &ids(&[1])).unwrap();
        store.add_cards(UserId::new(2), &ids(&[2])).unwrap();

        assert!(!store.owns_card(UserId::new(1), CardId::new(2)).unwrap());
        assert!(!store.owns_card(UserId::new(2), CardId::new(1)).unwrap());
        assert_eq!(store.users().unwrap(), vec![UserId::new(1), UserId::new(2)]);
    }

    #[test]
    fn test_concurrent_merges_lose_nothing() {
        let store = Arc::new(InMemoryCollectionStore::new());
        let user = UserId::new(9);

        let handles: Vec<_> = (0..8u32)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..50u32 {
                        store.add_cards(user, &[CardId::new(t * 50 + i)]).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.get(user).unwrap().unwrap().len(), 400);
    }

    #[test]
    fn test_from_collections() {
        let mut collection = UserCollection::new(UserId::new(5));
        collection.insert(CardId::new(2));

        let store = InMemoryCollectionStore::from_collections([collection]);
        assert!(store.owns_card(UserId::new(5), CardId::new(2)).unwrap());
    }
}
