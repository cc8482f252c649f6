//! Ground-truth rollouts on the true cart-pole dynamics.
//!
//! [`RealRollout::execute`] drives a policy on [`CartPole`] for a fixed
//! horizon from the hanging rest state, recording every transition so the
//! outer system can fit its dynamics model on real data.

use swingup_core::{
    to_observation, Action, PhysicalState, Policy, RewardFunction, RolloutError, StepObserver,
    Transition,
};
use swingup_dynamics::CartPole;

use crate::config::{ConfigError, RolloutConfig};
use crate::summary::RewardSummary;
use crate::trial_log::TrialLog;

/// Output of a real rollout.
#[derive(Clone, Debug, PartialEq)]
pub struct RealTrajectory {
    /// One transition per step.
    pub transitions: Vec<Transition>,
    /// One reward per step.
    pub rewards: Vec<f64>,
}

impl RealTrajectory {
    /// Sum of per-step rewards, in step order.
    pub fn total_reward(&self) -> f64 {
        self.rewards.iter().sum()
    }

    /// Summary statistics of the reward sequence.
    pub fn summary(&self) -> RewardSummary {
        RewardSummary::from_rewards(&self.rewards)
    }
}

/// Fixed-horizon rollout on the true dynamics.
#[derive(Clone, Debug)]
pub struct RealRollout {
    config: RolloutConfig,
    dynamics: CartPole,
}

impl RealRollout {
    /// Rollout on the default cart-pole.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStepSize`] for a non-positive `dt`.
    pub fn new(config: RolloutConfig) -> Result<Self, ConfigError> {
        Self::with_dynamics(config, CartPole::default())
    }

    /// Rollout on explicit dynamics.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidStepSize`] for a non-positive `dt`.
    pub fn with_dynamics(config: RolloutConfig, dynamics: CartPole) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, dynamics })
    }

    /// The configuration in use.
    pub fn config(&self) -> &RolloutConfig {
        &self.config
    }

    /// Run `policy` for the configured horizon.
    ///
    /// Each step: observe, act, integrate one RK4 step, record the
    /// transition, score it. `observer`, if given, sees every step. When the
    /// policy is not exploratory, `(policy.parameters(), total reward)` is
    /// appended to `log` after the last step.
    ///
    /// # Errors
    ///
    /// Returns [`RolloutError::Contract`] if the policy emits an action with
    /// the wrong dimension. Nothing is logged and no partial trajectory is
    /// returned.
    pub fn execute<P, R>(
        &self,
        policy: &P,
        reward: &R,
        log: &mut TrialLog,
        mut observer: Option<&mut dyn StepObserver>,
    ) -> Result<RealTrajectory, RolloutError>
    where
        P: Policy + ?Sized,
        R: RewardFunction + ?Sized,
    {
        let horizon = self.config.horizon;
        let mut transitions = Vec::with_capacity(horizon);
        let mut rewards = Vec::with_capacity(horizon);
        let mut state = PhysicalState::ZERO;

        for step in 0..horizon {
            let observation = to_observation(&state);
            let action = Action::from_components(&policy.next(&observation))
                .map_err(|error| RolloutError::Contract { step, error })?;

            let next = self.dynamics.step(&state, action, self.config.dt);
            let r = reward.reward(&state, action, &next);

            transitions.push(Transition {
                observation,
                action,
                delta: next.delta_from(&state),
            });
            rewards.push(r);

            if let Some(obs) = observer.as_deref_mut() {
                obs.observe(&next, action, r);
            }
            state = next;
        }

        let trajectory = RealTrajectory {
            transitions,
            rewards,
        };
        let summary = trajectory.summary();
        tracing::info!(
            steps = summary.steps,
            total = summary.total,
            mean = summary.mean,
            min = summary.min,
            max = summary.max,
            last = summary.last,
            exploratory = policy.is_exploratory(),
            "real rollout complete"
        );

        if !policy.is_exploratory() {
            log.record(policy.parameters(), summary.total);
        }

        Ok(trajectory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swingup_dynamics::{CartPoleParams, LinearPolicy, SwingUpReward, DEFAULT_MAX_U};
    use swingup_test_utils::{ConstantPolicy, MalformedPolicy, RecordingObserver};

    fn rollout(horizon: usize) -> RealRollout {
        RealRollout::new(RolloutConfig::with_horizon(horizon)).unwrap()
    }

    #[test]
    fn produces_one_transition_and_reward_per_step() {
        let mut log = TrialLog::new();
        let traj = rollout(40)
            .execute(&ConstantPolicy::new(1.0), &SwingUpReward::default(), &mut log, None)
            .unwrap();
        assert_eq!(traj.transitions.len(), 40);
        assert_eq!(traj.rewards.len(), 40);
        assert!(traj.rewards.iter().all(|r| (0.0..=1.0).contains(r)));
    }

    #[test]
    fn first_transition_starts_from_rest() {
        let mut log = TrialLog::new();
        let traj = rollout(3)
            .execute(&ConstantPolicy::new(2.0), &SwingUpReward::default(), &mut log, None)
            .unwrap();
        let first = &traj.transitions[0];
        assert_eq!(first.observation.as_array(), &[0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(first.action, Action(2.0));

        let expected = CartPole::default()
            .step(&PhysicalState::ZERO, Action(2.0), 0.1)
            .delta_from(&PhysicalState::ZERO);
        assert_eq!(first.delta, expected);
    }

    #[test]
    fn deltas_chain_into_observations() {
        let mut log = TrialLog::new();
        let policy = LinearPolicy::from_parameters(&[0.5, 0.1, -0.3, 0.2, 0.7, 0.1], DEFAULT_MAX_U)
            .unwrap();
        let traj = rollout(10)
            .execute(&policy, &SwingUpReward::default(), &mut log, None)
            .unwrap();

        let mut state = PhysicalState::ZERO;
        for t in &traj.transitions {
            let obs = to_observation(&state);
            for i in 0..5 {
                assert!((obs.as_array()[i] - t.observation.as_array()[i]).abs() < 1e-12);
            }
            state = state.advanced_by(&t.delta);
        }
    }

    #[test]
    fn uses_configured_step_size_and_dynamics() {
        let config = RolloutConfig {
            horizon: 3,
            dt: 0.05,
        };
        let dynamics = CartPole::new(CartPoleParams {
            friction: 0.0,
            ..CartPoleParams::default()
        });
        let r = RealRollout::with_dynamics(config.clone(), dynamics).unwrap();
        assert_eq!(r.config(), &config);

        let mut log = TrialLog::new();
        let traj = r
            .execute(&ConstantPolicy::new(2.0), &SwingUpReward::default(), &mut log, None)
            .unwrap();
        let expected = dynamics
            .step(&PhysicalState::ZERO, Action(2.0), 0.05)
            .delta_from(&PhysicalState::ZERO);
        assert_eq!(traj.transitions[0].delta, expected);

        let bad = RolloutConfig {
            horizon: 3,
            dt: -0.1,
        };
        assert!(RealRollout::new(bad).is_err());
    }

    #[test]
    fn zero_horizon_is_empty_but_logged() {
        let mut log = TrialLog::new();
        let traj = rollout(0)
            .execute(&ConstantPolicy::new(1.0), &SwingUpReward::default(), &mut log, None)
            .unwrap();
        assert!(traj.transitions.is_empty());
        assert_eq!(log.len(), 1);
        assert_eq!(log.entries()[0].total_reward, 0.0);
    }

    #[test]
    fn malformed_action_aborts_without_logging() {
        let mut log = TrialLog::new();
        let err = rollout(5)
            .execute(&MalformedPolicy::new(2), &SwingUpReward::default(), &mut log, None)
            .unwrap_err();
        assert!(matches!(err, RolloutError::Contract { step: 0, .. }));
        assert!(log.is_empty());
    }

    #[test]
    fn observer_sees_every_step_without_changing_output() {
        let policy = ConstantPolicy::new(-1.5);
        let reward = SwingUpReward::default();
        let r = rollout(12);

        let mut log_a = TrialLog::new();
        let plain = r.execute(&policy, &reward, &mut log_a, None).unwrap();

        let mut log_b = TrialLog::new();
        let mut recorder = RecordingObserver::new();
        let observed = r
            .execute(&policy, &reward, &mut log_b, Some(&mut recorder))
            .unwrap();

        assert_eq!(plain, observed);
        assert_eq!(recorder.frames.len(), 12);
        for (frame, (&reward, t)) in recorder
            .frames
            .iter()
            .zip(plain.rewards.iter().zip(&plain.transitions))
        {
            assert_eq!(frame.reward, reward);
            assert_eq!(frame.action, t.action);
        }
    }
}
