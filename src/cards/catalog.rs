//! Catalog store: the set of card definitions.
//!
//! `CatalogStore` is the read contract the search filter and the pack
//! engine depend on. `InMemoryCatalog` is the bundled implementation,
//! populated at startup (seeding or snapshot restore) and read-only after.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::definition::{Card, CardId};
use crate::error::{Error, Result};

/// Read access to the card catalog.
pub trait CatalogStore: Send + Sync {
    /// Every card, ordered by ascending id.
    fn all(&self) -> Result<Vec<Card>>;

    /// Look up a single card.
    ///
    /// Fails with [`Error::CardNotFound`] when the id is unknown.
    fn get(&self, id: CardId) -> Result<Card>;

    /// Number of cards in the catalog.
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<T: CatalogStore + ?Sized> CatalogStore for std::sync::Arc<T> {
    fn all(&self) -> Result<Vec<Card>> {
        (**self).all()
    }

    fn get(&self, id: CardId) -> Result<Card> {
        (**self).get(id)
    }

    fn len(&self) -> Result<usize> {
        (**self).len()
    }
}

/// In-memory catalog keyed by card id.
///
/// ## Example
///
/// ```
/// use ccg_catalog::cards::{CatalogStore, InMemoryCatalog};
///
/// let mut catalog = InMemoryCatalog::new();
/// let id = catalog.register_auto("Raigeki").unwrap();
///
/// assert_eq!(catalog.get(id).unwrap().name, "Raigeki");
/// ```
#[derive(Clone, Debug, Default)]
pub struct InMemoryCatalog {
    cards: FxHashMap<CardId, Card>,
    last_id: u32,
}

impl InMemoryCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from existing records.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Result<Self> {
        let mut catalog = Self::new();
        for card in cards {
            catalog.register(card)?;
        }
        Ok(catalog)
    }

    /// Register a card under its own id.
    pub fn register(&mut self, card: Card) -> Result<()> {
        if self.cards.contains_key(&card.id) {
            return Err(Error::DuplicateCard(card.id));
        }
        self.last_id = self.last_id.max(card.id.raw());
        debug!(card = %card.id, name = %card.name, "registered card");
        self.cards.insert(card.id, card);
        Ok(())
    }

    /// Register a common card with the next free id.
    ///
    /// Ids start at 1 and increase past any explicitly registered id.
    pub fn register_auto(&mut self, name: impl Into<String>) -> Result<CardId> {
        let id = self.next_id()?;
        self.last_id = id.raw();
        self.cards.insert(id, Card::new(id, name));
        Ok(id)
    }

    /// Id the next `register_auto` call will assign.
    ///
    /// Fails with [`Error::CardIdsExhausted`] once `u32::MAX` is taken.
    pub fn next_id(&self) -> Result<CardId> {
        self.last_id
            .checked_add(1)
            .map(CardId::new)
            .ok_or(Error::CardIdsExhausted(CardId::new(self.last_id)))
    }

    /// Check if a card ID is registered.
    #[must_use]
    pub fn contains(&self, id: CardId) -> bool {
        self.cards.contains_key(&id)
    }

    /// Iterate over cards in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    /// Find cards matching a predicate, in unspecified order.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &Card>
    where
        F: Fn(&Card) -> bool,
    {
        self.cards.values().filter(move |c| predicate(c))
    }
}

impl CatalogStore for InMemoryCatalog {
    fn all(&self) -> Result<Vec<Card>> {
        let mut cards: Vec<Card> = self.cards.values().cloned().collect();
        cards.sort_by_key(|c| c.id);
        Ok(cards)
    }

    fn get(&self, id: CardId) -> Result<Card> {
        self.cards.get(&id).cloned().ok_or(Error::CardNotFound(id))
    }

    fn len(&self) -> Result<usize> {
        Ok(self.cards.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut catalog = InMemoryCatalog::new();
        catalog.register(Card::new(CardId::new(1), "Raigeki")).unwrap();

        assert_eq!(catalog.get(CardId::new(1)).unwrap().name, "Raigeki");

        let err = catalog.get(CardId::new(99)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_register_auto() {
        let mut catalog = InMemoryCatalog::new();

        let id1 = catalog.register_auto("Card A").unwrap();
        let id2 = catalog.register_auto("Card B").unwrap();

        assert_eq!(id1, CardId::new(1));
        assert_eq!(id2, CardId::new(2));
        assert_eq!(catalog.len().unwrap(), 2);
    }

    #[test]
    fn test_register_auto_skips_explicit_ids() {
        let mut catalog = InMemoryCatalog::new();
        catalog.register(Card::new(CardId::new(10), "Explicit")).unwrap();

        assert_eq!(catalog.register_auto("After").unwrap(), CardId::new(11));
    }

    #[test]
    fn test_register_auto_after_highest_id() {
        let mut catalog = InMemoryCatalog::new();
        catalog.register(Card::new(CardId::new(u32::MAX), "Top")).unwrap();

        let err = catalog.register_auto("Overflow").unwrap_err();
        assert!(matches!(err, Error::CardIdsExhausted(id) if id == CardId::new(u32::MAX)));
        assert_eq!(catalog.len().unwrap(), 1);

        // explicit ids below the top are still accepted
        catalog.register(Card::new(CardId::new(7), "Below")).unwrap();
        assert_eq!(catalog.len().unwrap(), 2);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut catalog = InMemoryCatalog::new();
        catalog.register(Card::new(CardId::new(1), "Card A")).unwrap();

        let err = catalog.register(Card::new(CardId::new(1), "Card B")).unwrap_err();
        assert!(matches!(err, Error::DuplicateCard(id) if id == CardId::new(1)));
        assert_eq!(catalog.get(CardId::new(1)).unwrap().name, "Card A");
    }

    #[test]
    fn test_all_sorted_by_id() {
        let catalog = InMemoryCatalog::from_cards([
            Card::new(CardId::new(3), "C"),
            Card::new(CardId::new(1), "A"),
            Card::new(CardId::new(2), "B"),
        ])
        .unwrap();

        let names: Vec<_> = catalog.all().unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_find_with_predicate() {
        let mut catalog = InMemoryCatalog::new();
        catalog.register_auto("Cyber End Dragon").unwrap();
        catalog.register_auto("Raigeki").unwrap();

        let dragons: Vec<_> = catalog.find(|c| c.name.contains("Dragon")).collect();
        assert_eq!(dragons.len(), 1);
        assert_eq!(dragons[0].name, "Cyber End Dragon");
    }

    #[test]
    fn test_empty() {
        let catalog = InMemoryCatalog::new();
        assert!(catalog.is_empty().unwrap());
        assert!(catalog.all().unwrap().is_empty());
        assert!(!catalog.contains(CardId::new(1)));
    }

    #[test]
    fn test_shared_catalog_through_arc() {
        let mut catalog = InMemoryCatalog::new();
        let id = catalog.register_auto("Raigeki").unwrap();
        let shared = std::sync::Arc::new(catalog);

        assert_eq!(shared.get(id).unwrap().name, "Raigeki");
        assert_eq!(CatalogStore::len(&shared).unwrap(), 1);
    }
}
