//! Rollout execution and Monte Carlo policy evaluation.
//!
//! - [`RealRollout`]: drives a policy on the true cart-pole, records
//!   transitions for model fitting, and appends to the [`TrialLog`]
//! - [`ProbabilisticRollout`]: drives a policy through a learned
//!   [`ProbabilisticModel`](swingup_core::ProbabilisticModel) by sampling
//!   clipped Gaussian deltas
//! - [`MonteCarloEvaluator`]: averages many probabilistic rollouts in
//!   parallel with a deterministic, index-ordered reduction
//!
//! Randomness is always caller-seeded. See [`sampling`] for the per-sample
//! stream derivation.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod monte_carlo;
pub mod probabilistic;
pub mod real;
pub mod sampling;
pub mod summary;
pub mod trial_log;

pub use config::{
    ConfigError, MonteCarloConfig, RolloutConfig, DEFAULT_HORIZON, DEFAULT_SAMPLES, MAX_WORKERS,
};
pub use monte_carlo::{
    predict_policy, reduce_totals, sample_totals, EvaluateError, Evaluation, MonteCarloEvaluator,
};
pub use probabilistic::ProbabilisticRollout;
pub use real::{RealRollout, RealTrajectory};
pub use sampling::{clipped_gaussian, sample_stream, standard_normal};
pub use summary::RewardSummary;
pub use trial_log::{TrialEntry, TrialLog};
