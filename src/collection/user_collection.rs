//! A user's owned cards.

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::cards::CardId;
use crate::core::UserId;

/// The set of cards one user owns.
///
/// Backed by a persistent `im::OrdSet`, so handing a copy to a caller
/// is O(1) and iteration is in id order. Cards are only ever added.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCollection {
    pub user: UserId,
    cards: OrdSet<CardId>,
}

impl UserCollection {
    /// Create an empty collection.
    #[must_use]
    pub fn new(user: UserId) -> Self {
        Self {
            user,
            cards: OrdSet::new(),
        }
    }

    /// Add a card. Returns `true` if it was not already owned.
    pub fn insert(&mut self, card: CardId) -> bool {
        self.cards.insert(card).is_none()
    }

    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        self.cards.contains(&card)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Owned card ids in ascending order.
    pub fn card_ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().copied()
    }
}
