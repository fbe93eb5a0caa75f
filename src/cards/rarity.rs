//! Card rarity.
//!
//! Only the base rarity exists today, since every card image in the
//! catalog is the base printing. Pack draws ignore rarity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Categorical rarity of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
}

impl Rarity {
    /// Every known rarity, in display order.
    pub const ALL: [Rarity; 1] = [Rarity::Common];

    /// Stored label, the value search matches against.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Rarity::Common => "common",
        }
    }

    /// Human-readable name.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Rarity::Common => "Common",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Rarity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Rarity::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| Error::UnknownRarity(s.to_string()))
    }
}
