//! Rollouts through a learned probabilistic dynamics model.
//!
//! The true dynamics are replaced by samples from the model's predicted
//! delta distribution. State is the running sum of sampled deltas from the
//! all-zero start; it is never clamped or wrapped.
//!
//! Per step:
//!
//! 1. Observe the current state and query the policy.
//! 2. Ask the model for `(mean, variance)` at `(observation, action)`.
//! 3. For each of the four dimensions, draw `N(mean_i, σ²)` and clip it to
//!    `mean_i ± σ`.
//! 4. Add the clipped delta to the state and score the move.

use rand::Rng;
use swingup_core::{
    to_observation, Action, ModelQuery, PhysicalState, Policy, ProbabilisticModel,
    RewardFunction, RolloutError, StateDelta, StepObserver,
};

use crate::config::{ConfigError, RolloutConfig};
use crate::sampling::clipped_gaussian;

/// Fixed-horizon rollout through a [`ProbabilisticModel`].
#[derive(Clone, Debug)]
pub struct ProbabilisticRollout {
    config: RolloutConfig,
}

impl ProbabilisticRollout {
    /// Build a model rollout.
    ///
    /// Only `config.horizon` shapes the trajectory. The step size is implicit
    /// in the model's predicted deltas, so `config.dt` is never read here; it
    /// is still validated so that one [`RolloutConfig`] can drive both real
    /// and model rollouts.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStepSize`] for a non-positive `dt`.
    pub fn new(config: RolloutConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Number of steps per rollout.
    pub fn horizon(&self) -> usize {
        self.config.horizon
    }

    /// Run one trajectory and return its per-step rewards.
    ///
    /// `observer`, if given, sees the sampled state after every step.
    ///
    /// # Errors
    ///
    /// Returns [`RolloutError::Contract`] on an action or mean of the wrong
    /// dimension and [`RolloutError::Model`] on a negative or NaN variance.
    pub fn run<P, M, R, G>(
        &self,
        policy: &P,
        model: &M,
        reward: &R,
        rng: &mut G,
        mut observer: Option<&mut dyn StepObserver>,
    ) -> Result<Vec<f64>, RolloutError>
    where
        P: Policy + ?Sized,
        M: ProbabilisticModel + ?Sized,
        R: RewardFunction + ?Sized,
        G: Rng + ?Sized,
    {
        let mut rewards = Vec::with_capacity(self.config.horizon);
        self.drive(policy, model, reward, rng, |state, action, r| {
            rewards.push(r);
            if let Some(obs) = observer.as_deref_mut() {
                obs.observe(state, action, r);
            }
        })?;
        Ok(rewards)
    }

    /// Run one trajectory and return only its total reward.
    ///
    /// Same sampling sequence as [`run`](Self::run) for the same `rng`
    /// state, without allocating.
    ///
    /// # Errors
    ///
    /// Same as [`run`](Self::run).
    pub fn total_reward<P, M, R, G>(
        &self,
        policy: &P,
        model: &M,
        reward: &R,
        rng: &mut G,
    ) -> Result<f64, RolloutError>
    where
        P: Policy + ?Sized,
        M: ProbabilisticModel + ?Sized,
        R: RewardFunction + ?Sized,
        G: Rng + ?Sized,
    {
        let mut total = 0.0;
        self.drive(policy, model, reward, rng, |_, _, r| total += r)?;
        Ok(total)
    }

    fn drive<P, M, R, G, F>(
        &self,
        policy: &P,
        model: &M,
        reward: &R,
        rng: &mut G,
        mut on_step: F,
    ) -> Result<(), RolloutError>
    where
        P: Policy + ?Sized,
        M: ProbabilisticModel + ?Sized,
        R: RewardFunction + ?Sized,
        G: Rng + ?Sized,
        F: FnMut(&PhysicalState, Action, f64),
    {
        let mut state = PhysicalState::ZERO;
        for step in 0..self.config.horizon {
            let (action, next) = sample_step(policy, model, &state, rng, step)?;
            let r = reward.reward(&state, action, &next);
            on_step(&next, action, r);
            state = next;
        }
        Ok(())
    }
}

/// Query policy and model at `state` and sample the next state.
fn sample_step<P, M, G>(
    policy: &P,
    model: &M,
    state: &PhysicalState,
    rng: &mut G,
    step: usize,
) -> Result<(Action, PhysicalState), RolloutError>
where
    P: Policy + ?Sized,
    M: ProbabilisticModel + ?Sized,
    G: Rng + ?Sized,
{
    let observation = to_observation(state);
    let action = Action::from_components(&policy.next(&observation))
        .map_err(|error| RolloutError::Contract { step, error })?;

    let prediction = model.predict(&ModelQuery::new(&observation, action));
    let mean = prediction
        .mean_delta()
        .map_err(|error| RolloutError::Contract { step, error })?;
    let std_dev = prediction
        .std_dev()
        .map_err(|error| RolloutError::Model { step, error })?;

    let delta: StateDelta = std::array::from_fn(|i| clipped_gaussian(&mut *rng, mean[i], std_dev));
    Ok((action, state.advanced_by(&delta)))
}
