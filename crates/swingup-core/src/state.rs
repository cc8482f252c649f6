//! Fixed-layout state vectors.
//!
//! Index layout of a [`PhysicalState`]:
//!
//! | Index | Meaning                |
//! |-------|------------------------|
//! | 0     | cart position          |
//! | 1     | cart velocity          |
//! | 2     | pole angular velocity  |
//! | 3     | pole angle             |
//!
//! An [`Observation`] replaces the angle with its `(cos, sin)` embedding so
//! that downstream regressors never see the wraparound discontinuity.

use smallvec::SmallVec;

use crate::error::{ContractError, ModelError};
use crate::{ACTION_DIM, OBSERVATION_DIM, QUERY_DIM, STATE_DIM};

/// Raw action vector as produced by a [`Policy`](crate::Policy).
///
/// Validated into an [`Action`] by [`Action::from_components`].
pub type ActionVector = SmallVec<[f64; ACTION_DIM]>;

/// Raw predicted mean as produced by a
/// [`ProbabilisticModel`](crate::ProbabilisticModel).
pub type MeanVector = SmallVec<[f64; STATE_DIM]>;

/// Component-wise difference between two physical states.
pub type StateDelta = [f64; STATE_DIM];

// ── PhysicalState ──────────────────────────────────────────────────

/// Cart-pole state: position, velocity, angular velocity, angle.
///
/// The angle is tracked unwrapped; nothing in the engine normalizes it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhysicalState(pub [f64; STATE_DIM]);

impl PhysicalState {
    /// All-zero state: cart centred at rest, pendulum hanging down.
    pub const ZERO: PhysicalState = PhysicalState([0.0; STATE_DIM]);

    /// Build a state from named components.
    pub fn new(position: f64, velocity: f64, angular_velocity: f64, angle: f64) -> Self {
        Self([position, velocity, angular_velocity, angle])
    }

    /// Cart position.
    pub fn position(&self) -> f64 {
        self.0[0]
    }

    /// Cart velocity.
    pub fn velocity(&self) -> f64 {
        self.0[1]
    }

    /// Pole angular velocity.
    pub fn angular_velocity(&self) -> f64 {
        self.0[2]
    }

    /// Pole angle (unwrapped).
    pub fn angle(&self) -> f64 {
        self.0[3]
    }

    /// Borrow the raw components.
    pub fn as_array(&self) -> &[f64; STATE_DIM] {
        &self.0
    }

    /// `self - before`, component-wise.
    pub fn delta_from(&self, before: &PhysicalState) -> StateDelta {
        std::array::from_fn(|i| self.0[i] - before.0[i])
    }

    /// `self + delta`, component-wise.
    pub fn advanced_by(&self, delta: &StateDelta) -> PhysicalState {
        PhysicalState(std::array::from_fn(|i| self.0[i] + delta[i]))
    }
}

impl From<[f64; STATE_DIM]> for PhysicalState {
    fn from(raw: [f64; STATE_DIM]) -> Self {
        Self(raw)
    }
}

// ── Observation ────────────────────────────────────────────────────

/// Policy- and model-facing projection of a [`PhysicalState`]:
/// `[position, velocity, angular_velocity, cos(angle), sin(angle)]`.
///
/// Always produced by [`to_observation`](crate::to_observation).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation(pub(crate) [f64; OBSERVATION_DIM]);

impl Observation {
    /// Cart position.
    pub fn position(&self) -> f64 {
        self.0[0]
    }

    /// Cart velocity.
    pub fn velocity(&self) -> f64 {
        self.0[1]
    }

    /// Pole angular velocity.
    pub fn angular_velocity(&self) -> f64 {
        self.0[2]
    }

    /// Cosine of the pole angle.
    pub fn cos_angle(&self) -> f64 {
        self.0[3]
    }

    /// Sine of the pole angle.
    pub fn sin_angle(&self) -> f64 {
        self.0[4]
    }

    /// Borrow the raw components.
    pub fn as_array(&self) -> &[f64; OBSERVATION_DIM] {
        &self.0
    }

    /// Borrow the raw components as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

// ── Action ─────────────────────────────────────────────────────────

/// Scalar control force applied to the cart.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Action(pub f64);

impl Action {
    /// The control force.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Validate a raw policy output.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::ActionDimension`] unless `components` has
    /// exactly [`ACTION_DIM`] entries. Never truncates or pads.
    pub fn from_components(components: &[f64]) -> Result<Self, ContractError> {
        match components {
            [u] => Ok(Self(*u)),
            _ => Err(ContractError::ActionDimension {
                expected: ACTION_DIM,
                actual: components.len(),
            }),
        }
    }
}

// ── Transition ─────────────────────────────────────────────────────

/// One recorded real-world step: what the policy saw, what it did, and how
/// the physical state changed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    /// Observation before the step.
    pub observation: Observation,
    /// Action taken.
    pub action: Action,
    /// State after minus state before.
    pub delta: StateDelta,
}

// ── ModelQuery ─────────────────────────────────────────────────────

/// Input to a probabilistic model: observation followed by action.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelQuery([f64; QUERY_DIM]);

impl ModelQuery {
    /// Concatenate an observation and an action.
    pub fn new(observation: &Observation, action: Action) -> Self {
        let mut raw = [0.0; QUERY_DIM];
        raw[..OBSERVATION_DIM].copy_from_slice(observation.as_slice());
        raw[OBSERVATION_DIM] = action.value();
        Self(raw)
    }

    /// The observation part.
    pub fn observation(&self) -> Observation {
        let mut raw = [0.0; OBSERVATION_DIM];
        raw.copy_from_slice(&self.0[..OBSERVATION_DIM]);
        Observation(raw)
    }

    /// The action part.
    pub fn action(&self) -> Action {
        Action(self.0[OBSERVATION_DIM])
    }

    /// Borrow the raw components as a slice.
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

// ── ModelPrediction ────────────────────────────────────────────────

/// Predicted state-change distribution: a mean delta with one variance
/// shared isotropically across all output dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct ModelPrediction {
    /// Predicted mean of the state delta.
    pub mean: MeanVector,
    /// Isotropic variance. Must be `>= 0`.
    pub variance: f64,
}

impl ModelPrediction {
    /// Build a prediction from a fixed-size mean.
    pub fn isotropic(mean: StateDelta, variance: f64) -> Self {
        Self {
            mean: SmallVec::from_buf(mean),
            variance,
        }
    }

    /// The mean as a fixed-size delta.
    ///
    /// # Errors
    ///
    /// Returns [`ContractError::PredictionDimension`] unless the mean has
    /// exactly [`STATE_DIM`] components.
    pub fn mean_delta(&self) -> Result<StateDelta, ContractError> {
        <StateDelta>::try_from(self.mean.as_slice()).map_err(|_| {
            ContractError::PredictionDimension {
                expected: STATE_DIM,
                actual: self.mean.len(),
            }
        })
    }

    /// Standard deviation derived from the variance.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::InvalidVariance`] for negative or NaN variance
    /// instead of taking the square root of it.
    pub fn std_dev(&self) -> Result<f64, ModelError> {
        if self.variance >= 0.0 {
            Ok(self.variance.sqrt())
        } else {
            Err(ModelError::InvalidVariance {
                variance: self.variance,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn state_accessors_follow_layout() {
        let s = PhysicalState::new(1.0, 2.0, 3.0, 4.0);
        assert_eq!(s.position(), 1.0);
        assert_eq!(s.velocity(), 2.0);
        assert_eq!(s.angular_velocity(), 3.0);
        assert_eq!(s.angle(), 4.0);
        assert_eq!(s.as_array(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn delta_and_advance_are_inverse() {
        let before = PhysicalState::new(0.5, -1.0, 2.0, 3.0);
        let after = PhysicalState::new(1.5, -0.5, 1.0, 3.25);
        let delta = after.delta_from(&before);
        assert_eq!(delta, [1.0, 0.5, -1.0, 0.25]);
        assert_eq!(before.advanced_by(&delta), after);
    }

    #[test]
    fn action_accepts_exactly_one_component() {
        assert_eq!(Action::from_components(&[2.5]), Ok(Action(2.5)));
        assert_eq!(
            Action::from_components(&[]),
            Err(ContractError::ActionDimension {
                expected: 1,
                actual: 0
            })
        );
        assert_eq!(
            Action::from_components(&[1.0, 2.0]),
            Err(ContractError::ActionDimension {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn query_concatenates_observation_and_action() {
        let obs = crate::to_observation(&PhysicalState::new(1.0, 2.0, 3.0, 0.0));
        let q = ModelQuery::new(&obs, Action(-4.0));
        assert_eq!(q.as_slice(), &[1.0, 2.0, 3.0, 1.0, 0.0, -4.0]);
        assert_eq!(q.observation(), obs);
        assert_eq!(q.action(), Action(-4.0));
    }

    #[test]
    fn prediction_rejects_wrong_mean_length() {
        let p = ModelPrediction {
            mean: smallvec![0.0, 0.0, 0.0],
            variance: 0.1,
        };
        assert_eq!(
            p.mean_delta(),
            Err(ContractError::PredictionDimension {
                expected: 4,
                actual: 3
            })
        );

        let p = ModelPrediction {
            mean: smallvec![0.0; 5],
            variance: 0.1,
        };
        assert!(p.mean_delta().is_err());
    }

    #[test]
    fn prediction_std_dev_is_sqrt_of_variance() {
        let p = ModelPrediction::isotropic([1.0, 2.0, 3.0, 4.0], 0.25);
        assert_eq!(p.mean_delta(), Ok([1.0, 2.0, 3.0, 4.0]));
        assert_eq!(p.std_dev(), Ok(0.5));
        assert_eq!(ModelPrediction::isotropic([0.0; 4], 0.0).std_dev(), Ok(0.0));
    }

    #[test]
    fn prediction_rejects_negative_and_nan_variance() {
        let neg = ModelPrediction::isotropic([0.0; 4], -1e-12);
        assert!(matches!(
            neg.std_dev(),
            Err(ModelError::InvalidVariance { .. })
        ));
        let nan = ModelPrediction::isotropic([0.0; 4], f64::NAN);
        assert!(nan.std_dev().is_err());
    }
}
