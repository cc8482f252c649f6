//! Rollout and evaluator configuration, validation, and error types.
//!
//! [`RolloutConfig`] shapes a single trajectory; [`MonteCarloConfig`]
//! shapes a batch of model rollouts. Both are plain structs with defaults;
//! degenerate values are either corrected at this boundary (sample count,
//! worker count) or rejected with a [`ConfigError`] (step size).

use std::error::Error;
use std::fmt;

use swingup_dynamics::DEFAULT_DT;

/// Default number of steps per rollout.
pub const DEFAULT_HORIZON: usize = 40;

/// Default number of Monte Carlo samples per evaluation.
pub const DEFAULT_SAMPLES: usize = 100;

/// Upper bound on a dedicated worker pool.
pub const MAX_WORKERS: usize = 256;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating configuration.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// An evaluation was asked to average over zero samples.
    NoSamples,
    /// `dt` is NaN, infinite, zero, or negative.
    InvalidStepSize {
        /// The invalid value.
        value: f64,
    },
    /// The dedicated worker pool could not be built.
    ThreadPool {
        /// Description from the pool builder.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSamples => write!(f, "monte carlo evaluation requires at least 1 sample"),
            Self::InvalidStepSize { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::ThreadPool { reason } => write!(f, "worker pool: {reason}"),
        }
    }
}

impl Error for ConfigError {}

// ── RolloutConfig ──────────────────────────────────────────────────

/// Shape of a single rollout.
#[derive(Clone, Debug, PartialEq)]
pub struct RolloutConfig {
    /// Number of steps. Default: 40.
    pub horizon: usize,
    /// Integration step in seconds, used by real rollouts. Default: 0.1.
    pub dt: f64,
}

impl Default for RolloutConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            dt: DEFAULT_DT,
        }
    }
}

impl RolloutConfig {
    /// Default step size with a custom horizon.
    pub fn with_horizon(horizon: usize) -> Self {
        Self {
            horizon,
            ..Self::default()
        }
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidStepSize { value: self.dt });
        }
        Ok(())
    }
}

// ── MonteCarloConfig ───────────────────────────────────────────────

/// Shape of a Monte Carlo evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct MonteCarloConfig {
    /// Number of independent model rollouts averaged per evaluation.
    /// Default: 100. Zero is corrected to 1.
    pub samples: usize,
    /// Base seed of the evaluation seed schedule. Default: 0.
    pub seed: u64,
    /// Dedicated worker threads. `None` = the shared global pool.
    pub worker_count: Option<usize>,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            seed: 0,
            worker_count: None,
        }
    }
}

impl MonteCarloConfig {
    /// Sample count with the minimum of 1 enforced.
    pub fn resolved_samples(&self) -> usize {
        if self.samples == 0 {
            tracing::warn!("monte carlo sample count 0 raised to 1");
        }
        self.samples.max(1)
    }

    /// Dedicated pool size, clamped to `[1, MAX_WORKERS]`.
    pub fn resolved_worker_count(&self) -> Option<usize> {
        self.worker_count.map(|n| n.clamp(1, MAX_WORKERS))
    }
}
