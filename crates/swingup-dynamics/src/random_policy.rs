//! Uniform random exploration policy.
//!
//! Used to collect the first real-world transitions before any model
//! exists. It is exploratory, so its rollouts never enter the trial log.

use std::sync::{Mutex, PoisonError};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use smallvec::smallvec;
use swingup_core::{ActionVector, Observation, Policy};

/// Draws each action uniformly from `[-max_u, max_u]`.
///
/// The generator sits behind a `Mutex` so the policy satisfies the
/// `Sync` bound of [`Policy`]. Draw order, and therefore output, depends on
/// call order: deterministic in a single-threaded real rollout, not when
/// shared across Monte Carlo workers.
#[derive(Debug)]
pub struct RandomPolicy {
    max_u: f64,
    rng: Mutex<ChaCha8Rng>,
}

impl RandomPolicy {
    /// Build a seeded random policy.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `max_u` is negative or not finite.
    pub fn new(max_u: f64, seed: u64) -> Result<Self, String> {
        if !max_u.is_finite() || max_u < 0.0 {
            return Err(format!("max_u must be finite and >= 0, got {max_u}"));
        }
        Ok(Self {
            max_u,
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        })
    }

    /// Force bound.
    pub fn max_u(&self) -> f64 {
        self.max_u
    }
}

impl Policy for RandomPolicy {
    fn next(&self, _observation: &Observation) -> ActionVector {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        smallvec![rng.random_range(-self.max_u..=self.max_u)]
    }

    fn parameters(&self) -> Vec<f64> {
        Vec::new()
    }

    fn is_exploratory(&self) -> bool {
        true
    }
}
