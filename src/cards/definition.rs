//! Card records - the rows of the catalog.
//!
//! A `Card` is immutable once seeded. Collections refer to cards by
//! `CardId` only; the catalog owns the full record.

use serde::{Deserialize, Serialize};

use super::rarity::Rarity;

/// Surrogate identifier for a catalog card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A card in the catalog.
///
/// ## Example
///
/// ```
/// use ccg_catalog::cards::{Card, CardId, Rarity};
///
/// let raigeki = Card::new(CardId::new(4), "Raigeki")
///     .with_image("12580477.jpg")
///     .with_description("This is a card");
///
/// assert_eq!(raigeki.rarity, Rarity::Common);
/// assert!(raigeki.matches("raig"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,

    /// Display name.
    pub name: String,

    pub rarity: Rarity,

    /// Reference to the card art (file name, resolved by the presentation layer).
    pub image: String,

    /// Free-form card text.
    pub description: String,
}

impl Card {
    /// Create a common card with no image or description.
    #[must_use]
    pub fn new(id: CardId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            rarity: Rarity::default(),
            image: String::new(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Case-insensitive substring match on name, description or rarity label.
    ///
    /// `needle` must already be lowercase; an empty needle matches every card.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.rarity.label().contains(needle)
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
