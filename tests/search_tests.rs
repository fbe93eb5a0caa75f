//! Search filter tests.
//!
//! Covers the stock catalog examples and property tests over
//! arbitrary catalogs and queries.

use proptest::prelude::*;
use rustc_hash::FxHashSet;

use ccg_catalog::cards::{Card, CardId, CatalogStore};
use ccg_catalog::search::{search, search_store};
use ccg_catalog::seed::default_catalog;

// =============================================================================
// Stock Catalog
// =============================================================================

/// Test that "cyber" finds only Cyber End Dragon.
#[test]
fn test_search_cyber() {
    let catalog = default_catalog().unwrap();
    let hits = search_store("cyber", &catalog).unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Cyber End Dragon");
}

/// Test that an empty query lists the whole catalog in id order.
#[test]
fn test_search_empty_lists_catalog() {
    let catalog = default_catalog().unwrap();
    assert_eq!(search_store("", &catalog).unwrap(), catalog.all().unwrap());
    assert_eq!(search_store("  \t", &catalog).unwrap(), catalog.all().unwrap());
}

/// Test that the shared description matches every stock card once.
#[test]
fn test_search_description_matches_all() {
    let catalog = default_catalog().unwrap();
    let hits = search_store("THIS IS A CARD", &catalog).unwrap();
    assert_eq!(hits.len(), 5);
}

/// Test that surrounding whitespace is ignored.
#[test]
fn test_search_trims_query() {
    let catalog = default_catalog().unwrap();
    let hits = search_store("  raigeki  ", &catalog).unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id, CardId::new(4));
}

/// Test that inner whitespace is significant.
#[test]
fn test_search_inner_whitespace_kept() {
    let catalog = default_catalog().unwrap();
    assert_eq!(search_store("end dragon", &catalog).unwrap().len(), 1);
    assert!(search_store("enddragon", &catalog).unwrap().is_empty());
}

// =============================================================================
// Properties
// =============================================================================

fn arb_catalog() -> impl Strategy<Value = Vec<Card>> {
    prop::collection::vec(("[a-zA-Z ]{0,12}", "[a-zA-Z ]{0,20}"), 0..20).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, description))| {
                Card::new(CardId::new(i as u32 + 1), name).with_description(description)
            })
            .collect()
    })
}

fn contains_ci(card: &Card, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    card.name.to_lowercase().contains(&needle)
        || card.description.to_lowercase().contains(&needle)
        || card.rarity.label().contains(&needle)
}

proptest! {
    /// An empty query returns the catalog unchanged.
    #[test]
    fn prop_empty_query_is_identity(catalog in arb_catalog()) {
        prop_assert_eq!(search("", &catalog), catalog);
    }

    /// Every hit contains the query and every miss does not.
    #[test]
    fn prop_hits_are_exactly_matches(catalog in arb_catalog(), query in "[a-zA-Z ]{0,4}") {
        let hits = search(&query, &catalog);
        let hit_ids: FxHashSet<_> = hits.iter().map(|c| c.id).collect();

        for card in &catalog {
            prop_assert_eq!(hit_ids.contains(&card.id), contains_ci(card, &query));
        }
    }

    /// Results never repeat an id and keep catalog order.
    #[test]
    fn prop_no_duplicates_in_order(catalog in arb_catalog(), query in "[a-z]{0,2}") {
        let mut doubled = catalog.clone();
        doubled.extend(catalog.iter().cloned());

        let hits = search(&query, &doubled);
        let ids: Vec<_> = hits.iter().map(|c| c.id).collect();
        let unique: FxHashSet<_> = ids.iter().copied().collect();
        prop_assert_eq!(ids.len(), unique.len());

        let mut sorted = ids.clone();
        sorted.sort();
        prop_assert_eq!(ids, sorted);
    }
}
