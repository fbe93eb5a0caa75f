//! Pack-opening configuration.
//!
//! Built in code with the `with_*` builders, or read from the
//! environment with [`PackConfig::from_env`]:
//!
//! - `CCG_PACK_SIZE`: cards per pack (default 5)
//! - `CCG_PACK_SEED`: fixed RNG seed (default: OS entropy)

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Cards drawn per pack.
pub const DEFAULT_PACK_SIZE: usize = 5;

pub const PACK_SIZE_VAR: &str = "CCG_PACK_SIZE";
pub const PACK_SEED_VAR: &str = "CCG_PACK_SEED";

/// Configuration for the pack engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackConfig {
    /// Distinct cards drawn per opening.
    pub pack_size: usize,

    /// Fixed seed for reproducible draws. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            pack_size: DEFAULT_PACK_SIZE,
            seed: None,
        }
    }
}

impl PackConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_pack_size(mut self, pack_size: usize) -> Self {
        self.pack_size = pack_size;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject configurations the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.pack_size == 0 {
            return Err(Error::Config("pack size must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Load from `CCG_PACK_SIZE` / `CCG_PACK_SEED`, defaulting unset values.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(size) = try_load::<usize>(PACK_SIZE_VAR)? {
            config.pack_size = size;
        } else {
            info!("{PACK_SIZE_VAR} not set, using default: {DEFAULT_PACK_SIZE}");
        }
        config.seed = try_load::<u64>(PACK_SEED_VAR)?;

        config.validate()?;
        Ok(config)
    }
}

fn try_load<T: FromStr>(key: &str) -> Result<Option<T>>
where
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        return Ok(None);
    };

    raw.trim().parse().map(Some).map_err(|e| {
        warn!("Invalid {key} value {raw:?}: {e}");
        Error::Config(format!("{key}={raw:?}: {e}"))
    })
}
