//! Test utilities and mock collaborators for swingup development.
//!
//! Provides mock implementations of the core traits ([`Policy`],
//! [`StepObserver`], [`RewardFunction`](swingup_core::RewardFunction)) and,
//! in [`fixtures`], a set of deterministic dynamics models for driving
//! rollouts into known states and failure modes.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{FailingModel, FixedModel, MalformedModel, PositionLimitModel};

use std::sync::{Mutex, PoisonError};

use smallvec::{smallvec, SmallVec};
use swingup_core::{Action, ActionVector, Observation, PhysicalState, Policy, StepObserver};

/// Emits the same action for every observation.
pub struct ConstantPolicy {
    pub value: f64,
    exploratory: bool,
}

impl ConstantPolicy {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            exploratory: false,
        }
    }

    /// Same action, but flagged as exploratory (never logged).
    pub fn exploratory(value: f64) -> Self {
        Self {
            value,
            exploratory: true,
        }
    }
}

impl Policy for ConstantPolicy {
    fn next(&self, _observation: &Observation) -> ActionVector {
        smallvec![self.value]
    }

    fn parameters(&self) -> Vec<f64> {
        vec![self.value]
    }

    fn is_exploratory(&self) -> bool {
        self.exploratory
    }
}

/// Emits an action vector of the wrong length.
///
/// Every component is zero. A length of 1 is a valid action.
pub struct MalformedPolicy {
    pub len: usize,
}

impl MalformedPolicy {
    pub fn new(len: usize) -> Self {
        Self { len }
    }
}

impl Policy for MalformedPolicy {
    fn next(&self, _observation: &Observation) -> ActionVector {
        SmallVec::from_elem(0.0, self.len)
    }

    fn parameters(&self) -> Vec<f64> {
        Vec::new()
    }
}

/// Constant-action policy that remembers every observation it was shown.
pub struct RecordingPolicy {
    pub value: f64,
    seen: Mutex<Vec<Observation>>,
}

impl RecordingPolicy {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Observations received so far, in call order.
    pub fn observations(&self) -> Vec<Observation> {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Policy for RecordingPolicy {
    fn next(&self, observation: &Observation) -> ActionVector {
        self.seen
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(*observation);
        smallvec![self.value]
    }

    fn parameters(&self) -> Vec<f64> {
        vec![self.value]
    }
}

/// One step as seen by a [`StepObserver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub state: PhysicalState,
    pub action: Action,
    pub reward: f64,
}

/// Observer that stores every step it is shown.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub frames: Vec<Frame>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StepObserver for RecordingObserver {
    fn observe(&mut self, state: &PhysicalState, action: Action, reward: f64) {
        self.frames.push(Frame {
            state: *state,
            action,
            reward,
        });
    }
}

/// Unbounded reward equal to the cart position after the step.
///
/// Sensitive to every sampled position delta, so model noise shows up in
/// the totals.
pub fn position_reward(_from: &PhysicalState, _action: Action, to: &PhysicalState) -> f64 {
    to.position()
}
