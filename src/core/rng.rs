//! Random source for pack draws.
//!
//! ## Key Features
//!
//! - **Seedable**: Same seed produces identical draws (tests, replays)
//! - **Forkable**: Each pack opening draws from its own child stream
//!
//! Pack draws are a game mechanic, not a security control; ChaCha8 is
//! used for speed and reproducibility.
//!
//! ```
//! use ccg_catalog::core::PackRng;
//!
//! let mut rng = PackRng::new(42);
//! let picks = rng.sample_indices(10, 5);
//!
//! assert_eq!(picks.len(), 5);
//! ```

use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::SmallVec;

/// Golden-ratio increment spacing fork seeds apart.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Indices of one draw. Packs are small, so no heap allocation in the common case.
pub type DrawIndices = SmallVec<[usize; 8]>;

/// Seedable RNG with forking.
#[derive(Clone, Debug)]
pub struct PackRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl PackRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().gen())
    }

    /// Seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork an independent child stream.
    ///
    /// Each fork gets a different but deterministic seed.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(FORK_STRIDE));
        Self::new(fork_seed)
    }

    /// Draw `amount` distinct indices from `0..length`, uniformly without replacement.
    ///
    /// Returned in draw order. Panics if `amount > length`; callers check first.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> DrawIndices {
        index::sample(&mut self.inner, length, amount).into_iter().collect()
    }
}
