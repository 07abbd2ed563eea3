//! Random policy for testing and baselines.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::trait_::Policy;

/// Uniformly random continuous actions.
///
/// Each component is drawn independently from `[-1, 1]`. Used for sanity
/// checks and as a lower-bound baseline.
pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    /// Creates a new random policy with its own seeded generator.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn select_action(&mut self, _observation: &[f64]) -> [f64; 2] {
        [
            self.rng.gen_range(-1.0..=1.0),
            self.rng.gen_range(-1.0..=1.0),
        ]
    }

    fn name(&self) -> &str {
        "random"
    }
}
