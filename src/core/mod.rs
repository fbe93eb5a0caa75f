//! Core types: user identity, pack RNG, configuration.

pub mod config;
pub mod rng;
pub mod user;

pub use config::{PackConfig, DEFAULT_PACK_SIZE};
pub use rng::{DrawIndices, PackRng};
pub use user::UserId;
