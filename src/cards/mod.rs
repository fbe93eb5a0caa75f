//! Card system: records, rarity, and the catalog store.
//!
//! ## Key Types
//!
//! - `CardId`: Surrogate identifier for catalog cards
//! - `Rarity`: Categorical rarity (single-valued today)
//! - `Card`: Immutable catalog record
//! - `CatalogStore`: Read contract over the catalog
//! - `InMemoryCatalog`: Bundled catalog implementation

pub mod catalog;
pub mod definition;
pub mod rarity;

pub use catalog::{CatalogStore, InMemoryCatalog};
pub use definition::{Card, CardId};
pub use rarity::Rarity;
