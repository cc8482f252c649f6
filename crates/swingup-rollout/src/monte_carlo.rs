//! Parallel Monte Carlo policy evaluation.
//!
//! [`MonteCarloEvaluator`] estimates a policy's expected return under a
//! probabilistic model by averaging N independent model rollouts. It is the
//! objective an outer optimizer calls repeatedly.
//!
//! # Determinism
//!
//! Sample `i` of an evaluation seeded with `s` draws from
//! [`sample_stream(s, i)`](crate::sampling::sample_stream) and writes its
//! total into slot `i` of a buffer owned by the call. Once every worker
//! finishes, the buffer is reduced sequentially in index order. The result
//! depends only on `(policy, model, reward, horizon, N, s)`, never on how
//! rayon scheduled the samples.
//!
//! Evaluation `k` of an evaluator uses seed `base_seed ^ k`, so successive
//! calls draw fresh noise while the whole sequence stays reproducible.

use std::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use rayon::prelude::*;
use swingup_core::{Policy, ProbabilisticModel, RewardFunction, RolloutError};

use crate::config::{ConfigError, MonteCarloConfig, RolloutConfig};
use crate::probabilistic::ProbabilisticRollout;
use crate::sampling::sample_stream;

// ── Error type ──────────────────────────────────────────────────

/// Error from an evaluation, annotated with the failing sample.
#[derive(Debug, PartialEq)]
pub enum EvaluateError {
    /// The evaluation was misconfigured.
    Config(ConfigError),
    /// A sample's rollout aborted. The lowest failing index is reported.
    Sample {
        /// Index of the failing sample (0-based).
        sample_index: usize,
        /// The underlying rollout error.
        error: RolloutError,
    },
}

impl fmt::Display for EvaluateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config error: {e}"),
            Self::Sample {
                sample_index,
                error,
            } => write!(f, "sample {sample_index}: {error}"),
        }
    }
}

impl Error for EvaluateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Sample { error, .. } => Some(error),
        }
    }
}

impl From<ConfigError> for EvaluateError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ── Evaluation ──────────────────────────────────────────────────

/// Result of one Monte Carlo evaluation.
#[derive(Clone, Debug, PartialEq)]
pub struct Evaluation {
    /// Mean total reward across samples: the fitness.
    pub mean: f64,
    /// Sample standard deviation of the totals (0 for a single sample).
    pub std_dev: f64,
    /// Number of samples averaged.
    pub samples: usize,
    /// Seed the sample streams were derived from.
    pub seed: u64,
}

impl Evaluation {
    /// Standard error of [`mean`](Self::mean).
    pub fn std_error(&self) -> f64 {
        self.std_dev / (self.samples as f64).sqrt()
    }
}

/// Running mean and sample standard deviation, folded in slice order.
///
/// A slice of identical values reduces to exactly that value. Returns
/// `None` for an empty slice.
pub fn reduce_totals(totals: &[f64]) -> Option<(f64, f64)> {
    if totals.is_empty() {
        return None;
    }
    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (i, &x) in totals.iter().enumerate() {
        let delta = x - mean;
        mean += delta / (i + 1) as f64;
        m2 += delta * (x - mean);
    }
    let std_dev = if totals.len() > 1 {
        (m2 / (totals.len() - 1) as f64).sqrt()
    } else {
        0.0
    };
    Some((mean, std_dev))
}

/// Total reward of every sample, indexed by sample id.
///
/// Runs on the current rayon pool and blocks until all samples finish.
///
/// # Errors
///
/// [`ConfigError::NoSamples`] for `samples == 0`; otherwise the error of the
/// lowest-indexed failing sample.
pub fn sample_totals<P, M, R>(
    rollout: &ProbabilisticRollout,
    policy: &P,
    model: &M,
    reward: &R,
    samples: usize,
    seed: u64,
) -> Result<Vec<f64>, EvaluateError>
where
    P: Policy + ?Sized,
    M: ProbabilisticModel + ?Sized,
    R: RewardFunction + ?Sized,
{
    if samples == 0 {
        return Err(ConfigError::NoSamples.into());
    }

    let outcomes: Vec<Result<f64, RolloutError>> = (0..samples)
        .into_par_iter()
        .map(|index| {
            let mut rng = sample_stream(seed, index);
            rollout.total_reward(policy, model, reward, &mut rng)
        })
        .collect();

    outcomes
        .into_iter()
        .enumerate()
        .map(|(sample_index, outcome)| {
            outcome.map_err(|error| EvaluateError::Sample {
                sample_index,
                error,
            })
        })
        .collect()
}

/// Mean total reward of `samples` model rollouts of `horizon` steps.
///
/// Stateless entry point on the global rayon pool.
///
/// # Errors
///
/// Same as [`sample_totals`].
pub fn predict_policy<P, M, R>(
    policy: &P,
    model: &M,
    reward: &R,
    horizon: usize,
    samples: usize,
    seed: u64,
) -> Result<f64, EvaluateError>
where
    P: Policy + ?Sized,
    M: ProbabilisticModel + ?Sized,
    R: RewardFunction + ?Sized,
{
    let rollout = ProbabilisticRollout::new(RolloutConfig::with_horizon(horizon))?;
    let totals = sample_totals(&rollout, policy, model, reward, samples, seed)?;
    let (mean, _) = reduce_totals(&totals).ok_or(ConfigError::NoSamples)?;
    Ok(mean)
}

// ── MonteCarloEvaluator ─────────────────────────────────────────

/// Repeatable, parallel fitness estimator for an outer optimizer.
///
/// Policy, model, and reward are only ever read, concurrently, from all
/// workers. The evaluator itself is `Sync`; concurrent calls each take a
/// distinct evaluation index.
pub struct MonteCarloEvaluator {
    rollout: ProbabilisticRollout,
    samples: usize,
    base_seed: u64,
    evaluations: AtomicU64,
    pool: Option<rayon::ThreadPool>,
}

impl fmt::Debug for MonteCarloEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MonteCarloEvaluator")
            .field("horizon", &self.rollout.horizon())
            .field("samples", &self.samples)
            .field("base_seed", &self.base_seed)
            .field("evaluations", &self.evaluations())
            .field(
                "workers",
                &self.pool.as_ref().map(|p| p.current_num_threads()),
            )
            .finish()
    }
}

impl MonteCarloEvaluator {
    /// Build an evaluator.
    ///
    /// A sample count of 0 is raised to 1. A dedicated pool is built when
    /// `config.worker_count` is set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStepSize`] for a bad rollout config or
    /// [`ConfigError::ThreadPool`] if the dedicated pool cannot start.
    pub fn new(rollout: RolloutConfig, config: MonteCarloConfig) -> Result<Self, ConfigError> {
        let rollout = ProbabilisticRollout::new(rollout)?;
        let pool = match config.resolved_worker_count() {
            Some(n) => Some(
                rayon::ThreadPoolBuilder::new()
                    .num_threads(n)
                    .thread_name(|i| format!("swingup-mc-{i}"))
                    .build()
                    .map_err(|e| ConfigError::ThreadPool {
                        reason: e.to_string(),
                    })?,
            ),
            None => None,
        };
        Ok(Self {
            rollout,
            samples: config.resolved_samples(),
            base_seed: config.seed,
            evaluations: AtomicU64::new(0),
            pool,
        })
    }

    /// Samples averaged per evaluation.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Steps per sampled rollout.
    pub fn horizon(&self) -> usize {
        self.rollout.horizon()
    }

    /// Number of scheduled evaluations started so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations.load(Ordering::Relaxed)
    }

    /// Fitness of `policy`: the mean total reward of the next scheduled
    /// evaluation.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::Sample`] if any sampled rollout aborts.
    pub fn predict_policy<P, M, R>(
        &self,
        policy: &P,
        model: &M,
        reward: &R,
    ) -> Result<f64, EvaluateError>
    where
        P: Policy + ?Sized,
        M: ProbabilisticModel + ?Sized,
        R: RewardFunction + ?Sized,
    {
        self.evaluate(policy, model, reward).map(|e| e.mean)
    }

    /// Run the next scheduled evaluation (seed `base_seed ^ k`).
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::Sample`] if any sampled rollout aborts.
    pub fn evaluate<P, M, R>(
        &self,
        policy: &P,
        model: &M,
        reward: &R,
    ) -> Result<Evaluation, EvaluateError>
    where
        P: Policy + ?Sized,
        M: ProbabilisticModel + ?Sized,
        R: RewardFunction + ?Sized,
    {
        let k = self.evaluations.fetch_add(1, Ordering::Relaxed);
        self.evaluate_seeded(policy, model, reward, self.base_seed ^ k)
    }

    /// Run one evaluation at an explicit seed without advancing the
    /// schedule.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluateError::Sample`] if any sampled rollout aborts.
    pub fn evaluate_seeded<P, M, R>(
        &self,
        policy: &P,
        model: &M,
        reward: &R,
        seed: u64,
    ) -> Result<Evaluation, EvaluateError>
    where
        P: Policy + ?Sized,
        M: ProbabilisticModel + ?Sized,
        R: RewardFunction + ?Sized,
    {
        let run = || sample_totals(&self.rollout, policy, model, reward, self.samples, seed);
        let totals = match &self.pool {
            Some(pool) => pool.install(run)?,
            None => run()?,
        };
        let (mean, std_dev) = reduce_totals(&totals).ok_or(ConfigError::NoSamples)?;

        tracing::debug!(
            samples = self.samples,
            horizon = self.rollout.horizon(),
            seed,
            mean,
            std_dev,
            "monte carlo evaluation complete"
        );

        Ok(Evaluation {
            mean,
            std_dev,
            samples: self.samples,
            seed,
        })
    }
}
