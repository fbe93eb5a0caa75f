//! Pack openings: random draws merged into user collections.

pub mod opener;

pub use opener::{PackOpener, PackOpening};
