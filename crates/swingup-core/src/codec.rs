//! Projection from physical state to observation.

use crate::state::{Observation, PhysicalState};

/// Project a physical state onto its observation vector.
///
/// Pure and total. The angle is embedded as `(cos, sin)`; there is no
/// inverse, the unwrapped angle stays inside the [`PhysicalState`].
pub fn to_observation(state: &PhysicalState) -> Observation {
    let (sin, cos) = state.angle().sin_cos();
    Observation([
        state.position(),
        state.velocity(),
        state.angular_velocity(),
        cos,
        sin,
    ])
}

impl From<&PhysicalState> for Observation {
    fn from(state: &PhysicalState) -> Self {
        to_observation(state)
    }
}
