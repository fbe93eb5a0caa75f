//! Catalog seeding.
//!
//! The stock catalog is five common cards whose art ships with the
//! presentation layer. Custom catalogs load from a JSON array:
//!
//! ```json
//! [{"name": "Raigeki", "rarity": "common", "image": "12580477.jpg", "description": "This is a card"}]
//! ```

use std::io::Read;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cards::{Card, CardId, InMemoryCatalog, Rarity};
use crate::error::Result;

/// One card to seed, before it has an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardSeed {
    pub name: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
}

impl CardSeed {
    fn new(name: &str, image: &str) -> Self {
        Self {
            name: name.to_string(),
            rarity: Rarity::Common,
            image: image.to_string(),
            description: "This is a card".to_string(),
        }
    }

    fn into_card(self, id: CardId) -> Card {
        Card {
            id,
            name: self.name,
            rarity: self.rarity,
            image: self.image,
            description: self.description,
        }
    }
}

/// The stock catalog.
#[must_use]
pub fn default_cards() -> Vec<CardSeed> {
    vec![
        CardSeed::new("Cyber End Dragon", "1546123.jpg"),
        CardSeed::new("Cosmic Cyclone", "8267140.jpg"),
        CardSeed::new("Infinite Impermenance", "10045474.jpg"),
        CardSeed::new("Raigeki", "12580477.jpg"),
        CardSeed::new("Spright Starter", "15443125.jpg"),
    ]
}

/// Parse a JSON array of seeds.
pub fn load_seeds<R: Read>(reader: R) -> Result<Vec<CardSeed>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Register `seeds` with fresh ids, in order. Returns the assigned ids.
pub fn seed_catalog(catalog: &mut InMemoryCatalog, seeds: Vec<CardSeed>) -> Result<Vec<CardId>> {
    info!(count = seeds.len(), "seeding catalog");

    let mut ids = Vec::with_capacity(seeds.len());
    for seed in seeds {
        let id = catalog.next_id()?;
        catalog.register(seed.into_card(id))?;
        ids.push(id);
    }
    Ok(ids)
}

/// A fresh catalog holding the stock cards.
pub fn default_catalog() -> Result<InMemoryCatalog> {
    let mut catalog = InMemoryCatalog::new();
    seed_catalog(&mut catalog, default_cards())?;
    Ok(catalog)
}
