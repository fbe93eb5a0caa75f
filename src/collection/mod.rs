//! User collections: which cards each user owns.
//!
//! Collections are created lazily on a user's first pack opening and
//! only ever grow. Every owned id refers to a catalog card.

pub mod store;
pub mod user_collection;

pub use store::{CollectionMerge, CollectionStore, InMemoryCollectionStore};
pub use user_collection::UserCollection;
