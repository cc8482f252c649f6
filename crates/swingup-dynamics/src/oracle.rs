//! A "probabilistic" model that knows the true dynamics.
//!
//! Predicts the exact RK4 state delta with a fixed isotropic variance.
//! Serves as a baseline for learned models and as a workload for
//! benchmarks: with zero variance, a model rollout under the oracle follows
//! the real trajectory.

use swingup_core::{ModelPrediction, ModelQuery, PhysicalState, ProbabilisticModel};

use crate::cartpole::{CartPole, DEFAULT_DT};

/// True-dynamics model with a configurable noise level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OracleModel {
    dynamics: CartPole,
    dt: f64,
    variance: f64,
}

impl OracleModel {
    /// Oracle over the default cart-pole and step size.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `variance` is negative or not finite.
    pub fn new(variance: f64) -> Result<Self, String> {
        Self::with_dynamics(CartPole::default(), DEFAULT_DT, variance)
    }

    /// Oracle over explicit dynamics and step size.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `variance` is negative or not finite, or if `dt` is
    /// not finite and positive.
    pub fn with_dynamics(dynamics: CartPole, dt: f64, variance: f64) -> Result<Self, String> {
        if !variance.is_finite() || variance < 0.0 {
            return Err(format!("variance must be finite and >= 0, got {variance}"));
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(format!("dt must be finite and positive, got {dt}"));
        }
        Ok(Self {
            dynamics,
            dt,
            variance,
        })
    }

    /// The predicted variance.
    pub fn variance(&self) -> f64 {
        self.variance
    }
}

impl ProbabilisticModel for OracleModel {
    fn predict(&self, query: &ModelQuery) -> ModelPrediction {
        let obs = query.observation();
        // The delta is invariant to full turns, so the wrapped angle is enough.
        let angle = obs.sin_angle().atan2(obs.cos_angle());
        let state = PhysicalState::new(obs.position(), obs.velocity(), obs.angular_velocity(), angle);
        let next = self.dynamics.step(&state, query.action(), self.dt);
        ModelPrediction::isotropic(next.delta_from(&state), self.variance)
    }
}
