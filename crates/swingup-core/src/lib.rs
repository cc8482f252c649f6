//! Core types and traits for the swingup policy-evaluation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! fixed-layout state vectors exchanged between rollouts, policies, and
//! dynamics models, the error taxonomy shared by every rollout, and the
//! narrow collaborator traits ([`Policy`], [`ProbabilisticModel`],
//! [`RewardFunction`], [`StepObserver`]) the engine depends on.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod error;
pub mod state;
pub mod traits;

pub use codec::to_observation;
pub use error::{ContractError, ModelError, RolloutError};
pub use state::{
    Action, ActionVector, MeanVector, ModelPrediction, ModelQuery, Observation, PhysicalState,
    StateDelta, Transition,
};
pub use traits::{Policy, ProbabilisticModel, RewardFunction, StepObserver};

/// Number of components in a [`PhysicalState`] (and in a [`StateDelta`]).
pub const STATE_DIM: usize = 4;

/// Number of components in an [`Observation`].
pub const OBSERVATION_DIM: usize = 5;

/// Number of components in an [`Action`].
pub const ACTION_DIM: usize = 1;

/// Number of components in a [`ModelQuery`] (observation followed by action).
pub const QUERY_DIM: usize = OBSERVATION_DIM + ACTION_DIM;
