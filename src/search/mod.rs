//! Catalog search.
//!
//! A query matches a card when its trimmed, lowercased text is a
//! substring of the card's name, description or rarity label. An empty
//! query matches everything. Results keep catalog order and never repeat
//! a card id.

use rustc_hash::FxHashSet;
use tracing::debug;

use crate::cards::{Card, CatalogStore};
use crate::error::Result;

/// A normalized search query.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    /// True for empty or whitespace-only input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// The normalized (trimmed, lowercase) text.
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    #[must_use]
    pub fn matches(&self, card: &Card) -> bool {
        card.matches(&self.needle)
    }
}

/// Filter `catalog` by `query`.
///
/// Results keep the first occurrence of each id, so an empty query returns
/// `catalog` unchanged only when its ids are unique (as `CatalogStore::all` guarantees).
pub fn search(query: &str, catalog: &[Card]) -> Vec<Card> {
    let query = SearchQuery::new(query);
    let mut seen = FxHashSet::default();

    let results: Vec<Card> = catalog
        .iter()
        .filter(|card| query.matches(card))
        .filter(|card| seen.insert(card.id))
        .cloned()
        .collect();

    debug!(query = query.needle(), hits = results.len(), "searched catalog");
    results
}

/// Read the whole catalog from `store` and filter it.
pub fn search_store<C: CatalogStore + ?Sized>(query: &str, store: &C) -> Result<Vec<Card>> {
    Ok(search(query, &store.all()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardId, InMemoryCatalog};

    fn catalog() -> Vec<Card> {
        vec![
            Card::new(CardId::new(1), "Cyber End Dragon").with_description("This is a card"),
            Card::new(CardId::new(2), "Cosmic Cyclone").with_description("This is a card"),
            Card::new(CardId::new(3), "Raigeki").with_description("Destroy all monsters"),
        ]
    }

    fn names(cards: &[Card]) -> Vec<&str> {
        cards.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_query_normalization() {
        let query = SearchQuery::new("  CyBeR ");
        assert_eq!(query.needle(), "cyber");
        assert!(!query.is_empty());
        assert!(SearchQuery::new(" \t\n").is_empty());
    }

    #[test]
    fn test_empty_query_returns_everything() {
        let cards = catalog();
        assert_eq!(search("", &cards), cards);
        assert_eq!(search("   ", &cards), cards);
    }

    #[test]
    fn test_match_on_name() {
        assert_eq!(names(&search("cyber", &catalog())), vec!["Cyber End Dragon"]);
        assert_eq!(names(&search("CYCLONE", &catalog())), vec!["Cosmic Cyclone"]);
    }

    #[test]
    fn test_match_on_description() {
        assert_eq!(names(&search("monsters", &catalog())), vec!["Raigeki"]);
    }

    #[test]
    fn test_match_on_rarity() {
        assert_eq!(search("common", &catalog()).len(), 3);
    }

    #[test]
    fn test_multi_field_match_listed_once() {
        let cards = vec![Card::new(CardId::new(1), "Common Card").with_description("common text")];
        assert_eq!(search("common", &cards).len(), 1);
    }

    #[test]
    fn test_duplicate_ids_removed() {
        let mut cards = catalog();
        cards.push(cards[0].clone());

        let hits = search("dragon", &cards);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_no_match() {
        assert!(search("exodia", &catalog()).is_empty());
    }

    #[test]
    fn test_search_store() {
        let store = InMemoryCatalog::from_cards(catalog()).unwrap();
        let hits = search_store("c", &store).unwrap();
        // every card matches "c" through its rarity label
        assert_eq!(names(&hits), vec!["Cyber End Dragon", "Cosmic Cyclone", "Raigeki"]);
    }
}
