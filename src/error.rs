//! Crate error type.
//!
//! Every fallible operation in the catalog returns [`Result`]. Store
//! failures are never retried here; they propagate to the caller.

use thiserror::Error;

use crate::cards::CardId;

/// Errors raised by the catalog, collection and pack subsystems.
#[derive(Error, Debug)]
pub enum Error {
    /// The requested card id does not exist in the catalog.
    #[error("{0} not found")]
    CardNotFound(CardId),

    /// The catalog holds fewer cards than a pack needs.
    #[error("catalog has {available} cards, a pack needs {required}")]
    InsufficientCatalog { required: usize, available: usize },

    /// A card with this id is already registered.
    #[error("{0} already registered")]
    DuplicateCard(CardId),

    /// No id is left above the highest registered card id.
    #[error("card ids exhausted above {0}")]
    CardIdsExhausted(CardId),

    /// A rarity label that is not one of the known rarities.
    #[error("unknown rarity: {0:?}")]
    UnknownRarity(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The backing store could not complete the operation.
    #[error("storage failure: {0}")]
    Storage(String),

    /// Seed data could not be parsed.
    #[error("invalid seed data: {0}")]
    Seed(#[from] serde_json::Error),

    /// Snapshot could not be encoded or decoded.
    #[error("snapshot codec error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the error means "no such card".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::CardNotFound(_))
    }

    pub(crate) fn poisoned(what: &str) -> Self {
        Error::Storage(format!("{what} lock poisoned"))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CardNotFound(CardId::new(7));
        assert_eq!(err.to_string(), "Card(7) not found");

        let err = Error::InsufficientCatalog { required: 5, available: 3 };
        assert_eq!(err.to_string(), "catalog has 3 cards, a pack needs 5");

        let err = Error::CardIdsExhausted(CardId::new(u32::MAX));
        assert_eq!(err.to_string(), "card ids exhausted above Card(4294967295)");

        let err = Error::UnknownRarity("mythic".to_string());
        assert!(err.to_string().contains("mythic"));
    }

    #[test]
    fn test_is_not_found() {
        assert!(Error::CardNotFound(CardId::new(1)).is_not_found());
        assert!(!Error::Storage("down".to_string()).is_not_found());
        assert!(!Error::InsufficientCatalog { required: 5, available: 0 }.is_not_found());
    }

    #[test]
    fn test_poisoned_is_storage() {
        let err = Error::poisoned("collection");
        assert!(matches!(err, Error::Storage(_)));
        assert!(err.to_string().contains("collection lock poisoned"));
    }
}
