//! # ccg-catalog
//!
//! Card catalog core for a trading-card-game site: browse and search the
//! catalog, and open random packs into per-user collections.
//!
//! ## Design Principles
//!
//! 1. **Explicit Stores**: Search and pack opening take a `CatalogStore`
//!    and a `CollectionStore` rather than reaching for global state.
//!
//! 2. **Explicit Users**: Every collection-touching call takes the
//!    authenticated `UserId` as a parameter.
//!
//! 3. **All-or-Nothing Packs**: A pack either merges every drawn card into
//!    the collection or fails before any mutation.
//!
//! ## Modules
//!
//! - `core`: User identity, pack RNG, configuration
//! - `cards`: Card records, rarity, catalog store
//! - `collection`: User collections and their store
//! - `search`: Substring search over the catalog
//! - `packs`: Pack opening engine
//! - `seed`: Stock catalog and JSON seed loading
//! - `snapshot`: Persisted state
//! - `service`: Request adapter for transport layers

pub mod core;
pub mod cards;
pub mod collection;
pub mod search;
pub mod packs;
pub mod seed;
pub mod snapshot;
pub mod service;
pub mod error;

// Re-export commonly used types
pub use crate::core::{PackConfig, PackRng, UserId, DEFAULT_PACK_SIZE};

pub use crate::cards::{Card, CardId, CatalogStore, InMemoryCatalog, Rarity};

pub use crate::collection::{
    CollectionMerge, CollectionStore, InMemoryCollectionStore, UserCollection,
};

pub use crate::search::{search, search_store, SearchQuery};

pub use crate::packs::{PackOpener, PackOpening};

pub use crate::seed::{default_cards, default_catalog, load_seeds, seed_catalog, CardSeed};

pub use crate::snapshot::{CollectionRecord, Snapshot, StateLock};

pub use crate::service::{CardService, Reply, Request};

pub use crate::error::{Error, Result};
