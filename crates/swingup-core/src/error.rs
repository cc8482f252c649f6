//! Error types shared by every rollout.
//!
//! Organized by who broke the contract: the shapes exchanged with policies
//! and models ([`ContractError`]), the statistical validity of a model's
//! output ([`ModelError`]), and the rollout that observed the failure
//! ([`RolloutError`]).

use std::error::Error;
use std::fmt;

/// A collaborator produced a vector of the wrong size.
///
/// Always fatal. Vectors are never truncated or padded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContractError {
    /// A policy returned an action with the wrong number of components.
    ActionDimension {
        /// Required length.
        expected: usize,
        /// Length actually returned.
        actual: usize,
    },
    /// A model returned a mean with the wrong number of components.
    PredictionDimension {
        /// Required length.
        expected: usize,
        /// Length actually returned.
        actual: usize,
    },
    /// A parameter vector had the wrong number of components.
    ParameterDimension {
        /// Required length.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },
}

impl fmt::Display for ContractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActionDimension { expected, actual } => {
                write!(f, "action has {actual} components, expected {expected}")
            }
            Self::PredictionDimension { expected, actual } => {
                write!(
                    f,
                    "prediction mean has {actual} components, expected {expected}"
                )
            }
            Self::ParameterDimension { expected, actual } => {
                write!(f, "parameter vector has {actual} components, expected {expected}")
            }
        }
    }
}

impl Error for ContractError {}

/// A probabilistic model returned a statistically invalid prediction.
#[derive(Clone, Debug, PartialEq)]
pub enum ModelError {
    /// Variance was negative or NaN.
    InvalidVariance {
        /// The offending variance.
        variance: f64,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidVariance { variance } => {
                write!(f, "model variance must be >= 0, got {variance}")
            }
        }
    }
}

impl Error for ModelError {}

/// A rollout aborted. No partial trajectory is returned.
#[derive(Clone, Debug, PartialEq)]
pub enum RolloutError {
    /// A policy or model broke the dimension contract.
    Contract {
        /// Zero-based step at which the violation was detected.
        step: usize,
        /// The underlying violation.
        error: ContractError,
    },
    /// A model returned an invalid prediction.
    Model {
        /// Zero-based step at which the prediction was rejected.
        step: usize,
        /// The underlying model error.
        error: ModelError,
    },
}

impl RolloutError {
    /// Step at which the rollout aborted.
    pub fn step(&self) -> usize {
        match self {
            Self::Contract { step, .. } | Self::Model { step, .. } => *step,
        }
    }
}

impl fmt::Display for RolloutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contract { step, error } => write!(f, "step {step}: contract violation: {error}"),
            Self::Model { step, error } => write!(f, "step {step}: invalid model output: {error}"),
        }
    }
}

impl Error for RolloutError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Contract { error, .. } => Some(error),
            Self::Model { error, .. } => Some(error),
        }
    }
}
