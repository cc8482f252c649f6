//! Swingup: policy evaluation for the cart-pole swing-up task.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! swingup sub-crates. Adding `swingup` as a single dependency is enough for
//! an outer policy-search loop.
//!
//! # Quick start
//!
//! ```rust
//! use swingup::prelude::*;
//!
//! let policy = LinearPolicy::from_parameters(&[0.5, 0.0, 0.1, 0.3, 0.8, 0.0], DEFAULT_MAX_U)
//!     .unwrap();
//! let reward = SwingUpReward::default();
//!
//! // Fitness under a model: mean total reward of 32 sampled rollouts.
//! let model = OracleModel::new(0.01).unwrap();
//! let evaluator = MonteCarloEvaluator::new(
//!     RolloutConfig::default(),
//!     MonteCarloConfig { samples: 32, seed: 7, worker_count: None },
//! )
//! .unwrap();
//! let fitness = evaluator.predict_policy(&policy, &model, &reward).unwrap();
//! assert!((0.0..=40.0).contains(&fitness));
//!
//! // Ground truth: one rollout on the real dynamics, entered in the trial log.
//! let mut log = TrialLog::new();
//! let trajectory = RealRollout::new(RolloutConfig::default())
//!     .unwrap()
//!     .execute(&policy, &reward, &mut log, None)
//!     .unwrap();
//! assert_eq!(trajectory.transitions.len(), 40);
//! assert_eq!(log.len(), 1);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `swingup-core` | State vectors, codec, errors, collaborator traits |
//! | [`dynamics`] | `swingup-dynamics` | RK4, cart-pole physics, reward, reference policies |
//! | [`rollout`] | `swingup-rollout` | Real and model rollouts, Monte Carlo evaluator, trial log |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// State vectors, errors, and collaborator traits (`swingup-core`).
///
/// Implement [`types::Policy`], [`types::ProbabilisticModel`], or
/// [`types::RewardFunction`] to plug your own components into a rollout.
pub use swingup_core as types;

/// Cart-pole physics and reference collaborators (`swingup-dynamics`).
pub use swingup_dynamics as dynamics;

/// Rollouts and Monte Carlo evaluation (`swingup-rollout`).
///
/// [`rollout::RealRollout`] for ground-truth data collection,
/// [`rollout::MonteCarloEvaluator`] for fitness estimates under a model.
pub use swingup_rollout as rollout;

/// Common imports for typical swingup usage.
///
/// ```rust
/// use swingup::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use swingup_core::{
        to_observation, Action, ActionVector, ModelPrediction, ModelQuery, Observation,
        PhysicalState, Policy, ProbabilisticModel, RewardFunction, StepObserver, Transition,
    };

    // Errors
    pub use swingup_core::{ContractError, ModelError, RolloutError};
    pub use swingup_rollout::{ConfigError, EvaluateError};

    // Dynamics and reference collaborators
    pub use swingup_dynamics::{
        CartPole, CartPoleParams, Goal, LinearPolicy, OracleModel, RandomPolicy, SwingUpReward,
        DEFAULT_MAX_U,
    };

    // Rollouts
    pub use swingup_rollout::{
        predict_policy, Evaluation, MonteCarloConfig, MonteCarloEvaluator, ProbabilisticRollout,
        RealRollout, RealTrajectory, RolloutConfig, TrialLog,
    };
}
