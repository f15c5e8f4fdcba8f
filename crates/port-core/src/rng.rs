//! Simulation-level RNG wrapper.
//!
//! The simulator is single-threaded, so one `SmallRng` drives every draw.
//! Runs are reproducible only when a seed is supplied; otherwise the RNG is
//! seeded from OS entropy.

use rand::distributions::Distribution;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// Simulation-wide RNG for inter-arrival and service-time draws.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed from OS entropy.  Runs created this way are not reproducible.
    pub fn from_entropy() -> Self {
        SimRng(SmallRng::from_entropy())
    }

    /// `new(seed)` when a seed is given, `from_entropy()` otherwise.
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::new(s),
            None => Self::from_entropy(),
        }
    }

    /// Draw one value from `dist`.
    #[inline]
    pub fn sample<T, D: Distribution<T>>(&mut self, dist: &D) -> T {
        dist.sample(&mut self.0)
    }
}
