//! Benchmark profiles and utilities for swingup.
//!
//! Provides pre-built workloads for benchmarking and examples:
//!
//! - [`reference_policy`]: a fixed linear policy with non-trivial output
//! - [`reference_model`]: the true-dynamics oracle with configurable noise
//! - [`reference_evaluator`]: 40-step horizon, configurable sample count
//! - [`random_parameters`]: seeded draws for a random-search loop

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use rand::Rng;
use swingup_dynamics::{LinearPolicy, OracleModel, DEFAULT_MAX_U, LINEAR_PARAMETER_COUNT};
use swingup_rollout::{ConfigError, MonteCarloConfig, MonteCarloEvaluator, RolloutConfig};

/// Parameters of [`reference_policy`]: `[w0..w4, bias]`.
pub const REFERENCE_PARAMETERS: [f64; LINEAR_PARAMETER_COUNT] =
    [0.6717, 0.2685, 0.0066, 0.6987, 0.4845, 3.1517];

/// Noise level used by the benchmark model.
pub const REFERENCE_VARIANCE: f64 = 0.01;

/// Build the reference linear policy.
pub fn reference_policy() -> LinearPolicy {
    LinearPolicy::from_array(REFERENCE_PARAMETERS, DEFAULT_MAX_U)
}

/// Build an oracle model over the default cart-pole.
///
/// # Errors
///
/// Returns `Err` if `variance` is negative or not finite.
pub fn reference_model(variance: f64) -> Result<OracleModel, String> {
    OracleModel::new(variance)
}

/// Build an evaluator with the default horizon and `samples` samples.
///
/// `workers` of `None` uses the global rayon pool.
///
/// # Errors
///
/// Returns [`ConfigError::ThreadPool`] if the dedicated pool cannot start.
pub fn reference_evaluator(
    samples: usize,
    seed: u64,
    workers: Option<usize>,
) -> Result<MonteCarloEvaluator, ConfigError> {
    MonteCarloEvaluator::new(
        RolloutConfig::default(),
        MonteCarloConfig {
            samples,
            seed,
            worker_count: workers,
        },
    )
}

/// Draw a linear-policy parameter vector uniformly from `[-scale, scale]`.
pub fn random_parameters<R: Rng + ?Sized>(
    rng: &mut R,
    scale: f64,
) -> [f64; LINEAR_PARAMETER_COUNT] {
    let scale = scale.abs();
    std::array::from_fn(|_| rng.random_range(-scale..=scale))
}
