//! Saturated linear state-feedback policy.
//!
//! `u = max_u · tanh(w · observation + bias)`. The parameter vector is the
//! five observation weights followed by the bias, so an outer optimizer
//! searches a 6-dimensional space.

use smallvec::smallvec;
use swingup_core::{ActionVector, ContractError, Observation, Policy, OBSERVATION_DIM};

/// Number of parameters of a [`LinearPolicy`].
pub const LINEAR_PARAMETER_COUNT: usize = OBSERVATION_DIM + 1;

/// Default force bound.
pub const DEFAULT_MAX_U: f64 = 10.0;

/// Linear feedback squashed into `[-max_u, max_u]`.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearPolicy {
    weights: [f64; OBSERVATION_DIM],
    bias: f64,
    max_u: f64,
}

impl LinearPolicy {
    /// Build from a flat parameter vector `[w0..w4, bias]`.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ParameterDimension`] unless `parameters` has
    /// exactly [`LINEAR_PARAMETER_COUNT`] entries.
    pub fn from_parameters(parameters: &[f64], max_u: f64) -> Result<Self, ContractError> {
        let mut policy = Self {
            weights: [0.0; OBSERVATION_DIM],
            bias: 0.0,
            max_u: max_u.abs(),
        };
        policy.set_parameters(parameters)?;
        Ok(policy)
    }

    /// Build from a fixed-size parameter array `[w0..w4, bias]`.
    pub fn from_array(parameters: [f64; LINEAR_PARAMETER_COUNT], max_u: f64) -> Self {
        let mut weights = [0.0; OBSERVATION_DIM];
        weights.copy_from_slice(&parameters[..OBSERVATION_DIM]);
        Self {
            weights,
            bias: parameters[OBSERVATION_DIM],
            max_u: max_u.abs(),
        }
    }

    /// All-zero policy: always outputs zero force.
    pub fn zeros(max_u: f64) -> Self {
        Self {
            weights: [0.0; OBSERVATION_DIM],
            bias: 0.0,
            max_u: max_u.abs(),
        }
    }

    /// Replace the parameters in place.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ParameterDimension`] on a length mismatch,
    /// leaving the policy unchanged.
    pub fn set_parameters(&mut self, parameters: &[f64]) -> Result<(), ContractError> {
        if parameters.len() != LINEAR_PARAMETER_COUNT {
            return Err(ContractError::ParameterDimension {
                expected: LINEAR_PARAMETER_COUNT,
                actual: parameters.len(),
            });
        }
        self.weights.copy_from_slice(&parameters[..OBSERVATION_DIM]);
        self.bias = parameters[OBSERVATION_DIM];
        Ok(())
    }

    /// Force bound.
    pub fn max_u(&self) -> f64 {
        self.max_u
    }
}

impl Policy for LinearPolicy {
    fn next(&self, observation: &Observation) -> ActionVector {
        let activation: f64 = self
            .weights
            .iter()
            .zip(observation.as_slice())
            .map(|(w, o)| w * o)
            .sum::<f64>()
            + self.bias;
        smallvec![self.max_u * activation.tanh()]
    }

    fn parameters(&self) -> Vec<f64> {
        let mut p = Vec::with_capacity(LINEAR_PARAMETER_COUNT);
        p.extend_from_slice(&self.weights);
        p.push(self.bias);
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swingup_core::{to_observation, PhysicalState};

    #[test]
    fn parameters_round_trip_through_flat_vector() {
        let params = [0.6717, 0.2685, 0.0066, 0.6987, 0.4845, 3.1517];
        let p = LinearPolicy::from_parameters(&params, DEFAULT_MAX_U).unwrap();
        assert_eq!(p.parameters(), params.to_vec());
        assert!(!p.is_exploratory());
    }

    #[test]
    fn array_constructor_matches_slice_constructor() {
        let params = [0.1, -0.2, 0.3, -0.4, 0.5, -0.6];
        let from_array = LinearPolicy::from_array(params, -4.0);
        let from_slice = LinearPolicy::from_parameters(&params, 4.0).unwrap();
        assert_eq!(from_array, from_slice);
        assert_eq!(from_array.max_u(), 4.0);
        assert_eq!(from_array.parameters(), params.to_vec());
    }

    #[test]
    fn rejects_wrong_parameter_count() {
        let err = LinearPolicy::from_parameters(&[1.0; 5], DEFAULT_MAX_U).unwrap_err();
        assert_eq!(
            err,
            ContractError::ParameterDimension {
                expected: 6,
                actual: 5
            }
        );

        let mut p = LinearPolicy::zeros(DEFAULT_MAX_U);
        assert!(p.set_parameters(&[1.0; 7]).is_err());
        assert_eq!(p.parameters(), vec![0.0; 6]);
    }

    #[test]
    fn output_is_saturated() {
        let p = LinearPolicy::from_parameters(&[100.0, 0.0, 0.0, 0.0, 0.0, 0.0], 10.0).unwrap();
        let far_right = to_observation(&PhysicalState::new(50.0, 0.0, 0.0, 0.0));
        let u = p.next(&far_right);
        assert_eq!(u.len(), 1);
        assert!(u[0] <= 10.0 && u[0] > 9.99, "u = {}", u[0]);
    }

    #[test]
    fn bias_alone_sets_constant_force() {
        let p = LinearPolicy::from_parameters(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.5], 2.0).unwrap();
        let u = p.next(&to_observation(&PhysicalState::new(1.0, 2.0, 3.0, 4.0)));
        assert!((u[0] - 2.0 * 0.5f64.tanh()).abs() < 1e-12);
    }

    #[test]
    fn zero_policy_outputs_zero() {
        let p = LinearPolicy::zeros(DEFAULT_MAX_U);
        let u = p.next(&to_observation(&PhysicalState::new(1.0, -1.0, 0.5, 2.0)));
        assert_eq!(u[0], 0.0);
    }
}
