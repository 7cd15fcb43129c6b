//! Random sources driving the partitioners
//!
//! Every partitioner owns its generator; nothing here touches global or
//! thread-local state, so a seed fully determines a run.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform draws from an inclusive index range
///
/// Implemented for every [`rand::Rng`]. Tests can substitute a scripted
/// sequence to pin exact reservoir behavior.
pub trait IndexSource {
    /// Draw uniformly from `0..=upper`
    fn index_inclusive(&mut self, upper: u64) -> u64;
}

impl<R: Rng + ?Sized> IndexSource for R {
    fn index_inclusive(&mut self, upper: u64) -> u64 {
        self.random_range(0..=upper)
    }
}

/// Seeded generator used by default for all strategies
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Pick a fresh seed from the operating system
///
/// The chosen seed is reported back to the caller so a run can be repeated.
pub fn fresh_seed() -> u64 {
    rand::rng().random()
}
