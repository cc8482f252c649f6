//! Collaborator traits.
//!
//! The engine depends on these narrow capabilities only. Concrete policies
//! (linear, neural), regressors, and rewards are swappable implementations.
//!
//! [`Policy`], [`ProbabilisticModel`], and [`RewardFunction`] require
//! `Send + Sync`: the Monte Carlo evaluator shares one instance of each,
//! read-only, across all of its worker threads.

use crate::state::{Action, ActionVector, ModelPrediction, ModelQuery, Observation, PhysicalState};

/// Maps observations to control actions.
///
/// # Examples
///
/// ```
/// use smallvec::smallvec;
/// use swingup_core::{ActionVector, Observation, Policy};
///
/// /// Pushes against the cart velocity.
/// struct Damping(f64);
///
/// impl Policy for Damping {
///     fn next(&self, observation: &Observation) -> ActionVector {
///         smallvec![-self.0 * observation.velocity()]
///     }
///
///     fn parameters(&self) -> Vec<f64> {
///         vec![self.0]
///     }
/// }
///
/// let p = Damping(2.0);
/// assert!(!p.is_exploratory());
/// ```
pub trait Policy: Send + Sync {
    /// Action for the given observation.
    ///
    /// Must return exactly one component; rollouts reject anything else.
    fn next(&self, observation: &Observation) -> ActionVector;

    /// Current parameter vector, recorded in the trial log.
    fn parameters(&self) -> Vec<f64>;

    /// Whether this policy explores randomly instead of exploiting its
    /// parameters. Exploratory rollouts are never entered in the trial log.
    fn is_exploratory(&self) -> bool {
        false
    }
}

/// A learned dynamics model predicting the distribution of the next state
/// delta.
pub trait ProbabilisticModel: Send + Sync {
    /// Predict the state change for `query`.
    ///
    /// The mean must have exactly [`STATE_DIM`](crate::STATE_DIM)
    /// components and the variance must be `>= 0`.
    fn predict(&self, query: &ModelQuery) -> ModelPrediction;
}

/// Scores one state transition.
pub trait RewardFunction: Send + Sync {
    /// Reward for moving from `from` to `to` under `action`.
    fn reward(&self, from: &PhysicalState, action: Action, to: &PhysicalState) -> f64;
}

impl<F> RewardFunction for F
where
    F: Fn(&PhysicalState, Action, &PhysicalState) -> f64 + Send + Sync,
{
    fn reward(&self, from: &PhysicalState, action: Action, to: &PhysicalState) -> f64 {
        self(from, action, to)
    }
}

/// Optional per-step sink (e.g. a renderer).
///
/// Receives the state reached after each step, the action taken, and the
/// reward earned. Attaching an observer never changes rollout outputs.
pub trait StepObserver {
    /// Called once per step, after the reward is computed.
    fn observe(&mut self, state: &PhysicalState, action: Action, reward: f64);
}
