//! Reusable dynamics-model fixtures.
//!
//! Four standard models for rollout and evaluator testing:
//!
//! - [`FixedModel`]: the same prediction for every query.
//! - [`MalformedModel`]: a mean vector of the wrong length.
//! - [`FailingModel`]: a negative variance after N calls.
//! - [`PositionLimitModel`]: a negative variance once the cart leaves a band.

use std::sync::atomic::{AtomicUsize, Ordering};

use swingup_core::{MeanVector, ModelPrediction, ModelQuery, ProbabilisticModel, StateDelta};

/// Predicts a fixed mean delta and variance regardless of the query.
pub struct FixedModel {
    pub mean: StateDelta,
    pub variance: f64,
}

impl FixedModel {
    pub fn new(mean: StateDelta, variance: f64) -> Self {
        Self { mean, variance }
    }

    /// Deterministic model: every sampled step equals `mean`.
    pub fn zero_variance(mean: StateDelta) -> Self {
        Self::new(mean, 0.0)
    }
}

impl ProbabilisticModel for FixedModel {
    fn predict(&self, _query: &ModelQuery) -> ModelPrediction {
        ModelPrediction::isotropic(self.mean, self.variance)
    }
}

/// Predicts a zero mean with `mean_len` components and zero variance.
pub struct MalformedModel {
    pub mean_len: usize,
}

impl MalformedModel {
    pub fn new(mean_len: usize) -> Self {
        Self { mean_len }
    }
}

impl ProbabilisticModel for MalformedModel {
    fn predict(&self, _query: &ModelQuery) -> ModelPrediction {
        ModelPrediction {
            mean: MeanVector::from_elem(0.0, self.mean_len),
            variance: 0.0,
        }
    }
}

/// Returns valid zero-variance predictions `succeed_count` times, then a
/// variance of -1 on every later call.
///
/// The counter is shared across threads, so under the Monte Carlo evaluator
/// the failing sample depends on scheduling; the error itself does not.
pub struct FailingModel {
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingModel {
    /// Create a model that succeeds `succeed_count` times then fails.
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `predict()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Reset the call counter.
    pub fn reset(&self) {
        self.call_count.store(0, Ordering::Relaxed);
    }
}

impl ProbabilisticModel for FailingModel {
    fn predict(&self, _query: &ModelQuery) -> ModelPrediction {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        let variance = if n >= self.succeed_count { -1.0 } else { 0.0 };
        ModelPrediction::isotropic([0.0; 4], variance)
    }
}

/// Like [`FixedModel`], but predicts a variance of -1 whenever the queried
/// cart position lies outside `[-limit, limit]`.
///
/// Stateless: whether a sampled rollout fails depends only on its own
/// trajectory, so under the Monte Carlo evaluator the failing samples are
/// fixed by the seed.
pub struct PositionLimitModel {
    pub mean: StateDelta,
    pub variance: f64,
    pub limit: f64,
}

impl PositionLimitModel {
    pub fn new(mean: StateDelta, variance: f64, limit: f64) -> Self {
        Self {
            mean,
            variance,
            limit,
        }
    }
}

impl ProbabilisticModel for PositionLimitModel {
    fn predict(&self, query: &ModelQuery) -> ModelPrediction {
        let variance = if query.observation().position().abs() > self.limit {
            -1.0
        } else {
            self.variance
        };
        ModelPrediction::isotropic(self.mean, variance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swingup_core::{to_observation, Action, PhysicalState};

    fn query() -> ModelQuery {
        ModelQuery::new(&to_observation(&PhysicalState::ZERO), Action(0.0))
    }

    #[test]
    fn failing_model_switches_after_budget() {
        let m = FailingModel::new(2);
        assert!(m.predict(&query()).std_dev().is_ok());
        assert!(m.predict(&query()).std_dev().is_ok());
        assert!(m.predict(&query()).std_dev().is_err());
        assert_eq!(m.calls(), 3);
        m.reset();
        assert_eq!(m.calls(), 0);
    }

    #[test]
    fn malformed_model_mean_length() {
        assert!(MalformedModel::new(3).predict(&query()).mean_delta().is_err());
        assert!(MalformedModel::new(4).predict(&query()).mean_delta().is_ok());
    }

    #[test]
    fn position_limit_model_fails_outside_band() {
        let m = PositionLimitModel::new([0.0; 4], 0.25, 1.0);
        let at = |x: f64| {
            let obs = to_observation(&PhysicalState::new(x, 0.0, 0.0, 0.0));
            m.predict(&ModelQuery::new(&obs, Action(0.0)))
        };
        assert_eq!(at(0.5).std_dev(), Ok(0.5));
        assert_eq!(at(-1.0).std_dev(), Ok(0.5));
        assert!(at(1.5).std_dev().is_err());
        assert!(at(-2.0).std_dev().is_err());
    }

    #[test]
    fn fixed_model_echoes_prediction() {
        let p = FixedModel::new([1.0, 2.0, 3.0, 4.0], 0.5).predict(&query());
        assert_eq!(p.mean_delta().unwrap(), [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(p.variance, 0.5);
    }
}
