//! Cart-pole equations of motion.
//!
//! Closed-form second-order ODE for a pole hinged on a cart moving along a
//! frictional track, with a horizontal control force `u` on the cart. The
//! pendulum hangs down at angle 0 and is upright at angle π.

use swingup_core::{Action, PhysicalState, STATE_DIM};

use crate::rk4::rk4_step;

/// Default integration step, in seconds.
pub const DEFAULT_DT: f64 = 0.1;

/// Physical constants of the cart-pole.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CartPoleParams {
    /// Pole length `l`. Default: 0.5.
    pub pole_length: f64,
    /// Pole mass `m`. Default: 0.5.
    pub pole_mass: f64,
    /// Cart mass `M`. Default: 0.5.
    pub cart_mass: f64,
    /// Gravitational acceleration `g`. Default: 9.82.
    pub gravity: f64,
    /// Track friction coefficient `b`. Default: 0.1.
    pub friction: f64,
}

impl Default for CartPoleParams {
    fn default() -> Self {
        Self {
            pole_length: 0.5,
            pole_mass: 0.5,
            cart_mass: 0.5,
            gravity: 9.82,
            friction: 0.1,
        }
    }
}

/// True cart-pole dynamics.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CartPole {
    params: CartPoleParams,
}

impl CartPole {
    /// Dynamics with explicit constants.
    pub fn new(params: CartPoleParams) -> Self {
        Self { params }
    }

    /// The physical constants in use.
    pub fn params(&self) -> &CartPoleParams {
        &self.params
    }

    /// Time derivative of `x` under control force `u`.
    pub fn derivative(&self, x: &[f64; STATE_DIM], u: f64) -> [f64; STATE_DIM] {
        let CartPoleParams {
            pole_length: l,
            pole_mass: m,
            cart_mass: big_m,
            gravity: g,
            friction: b,
        } = self.params;

        let (s, c) = x[3].sin_cos();
        let w2 = x[2] * x[2];

        let cart_acc = (2.0 * m * l * w2 * s + 3.0 * m * g * s * c + 4.0 * u - 4.0 * b * x[1])
            / (4.0 * (big_m + m) - 3.0 * m * c * c);
        let pole_acc = (-3.0 * m * l * w2 * s * c
            - 6.0 * (big_m + m) * g * s
            - 6.0 * (u - b * x[1]) * c)
            / (4.0 * l * (m + big_m) - 3.0 * m * l * c * c);

        [x[1], cart_acc, pole_acc, x[2]]
    }

    /// One RK4 step of size `dt`, holding `action` constant across stages.
    ///
    /// Neither position nor angle is clamped or wrapped.
    pub fn step(&self, state: &PhysicalState, action: Action, dt: f64) -> PhysicalState {
        let u = action.value();
        PhysicalState(rk4_step(state.as_array(), dt, |x| self.derivative(x, u)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn upright_equilibrium_has_zero_derivative() {
        let cp = CartPole::default();
        let dx = cp.derivative(&[0.0, 0.0, 0.0, PI], 0.0);
        for (i, d) in dx.iter().enumerate() {
            assert!(d.abs() < 1e-9, "component {i}: {d}");
        }
    }

    #[test]
    fn hanging_equilibrium_is_exact_fixed_point() {
        let cp = CartPole::default();
        assert_eq!(cp.derivative(&[0.0; 4], 0.0), [0.0; 4]);
        let next = cp.step(&PhysicalState::ZERO, Action(0.0), DEFAULT_DT);
        assert_eq!(next, PhysicalState::ZERO);
    }

    #[test]
    fn force_accelerates_cart_and_swings_pole_back() {
        let cp = CartPole::default();
        let dx = cp.derivative(&[0.0; 4], 1.0);
        // 4u / (4(M+m) - 3m) = 4 / 2.5
        assert!((dx[1] - 1.6).abs() < 1e-12, "cart acc {}", dx[1]);
        // -6u / (4l(m+M) - 3ml) = -6 / 1.25
        assert!((dx[2] + 4.8).abs() < 1e-12, "pole acc {}", dx[2]);

        let next = cp.step(&PhysicalState::ZERO, Action(1.0), DEFAULT_DT);
        assert!(next.velocity() > 0.0);
        assert!(next.position() > 0.0);
        assert!(next.angular_velocity() < 0.0);
    }

    #[test]
    fn custom_params_change_the_dynamics() {
        let frictionless = CartPole::new(CartPoleParams {
            friction: 0.0,
            ..CartPoleParams::default()
        });
        assert_eq!(frictionless.params().friction, 0.0);
        assert_eq!(frictionless.params().gravity, 9.82);
        assert_eq!(CartPole::default().params(), &CartPoleParams::default());

        // Without friction a coasting cart keeps its speed.
        let dx = frictionless.derivative(&[0.0, 1.0, 0.0, 0.0], 0.0);
        assert_eq!(dx[1], 0.0);
        assert_eq!(dx[2], 0.0);
    }

    #[test]
    fn friction_opposes_velocity() {
        let cp = CartPole::default();
        let dx = cp.derivative(&[0.0, 1.0, 0.0, 0.0], 0.0);
        assert!(dx[1] < 0.0);
        assert_eq!(dx[0], 1.0);
    }

    #[test]
    fn derivative_is_periodic_in_angle() {
        let cp = CartPole::default();
        let a = cp.derivative(&[0.3, -0.2, 1.1, 0.7], 2.0);
        let b = cp.derivative(&[0.3, -0.2, 1.1, 0.7 + 2.0 * PI], 2.0);
        for i in 0..4 {
            assert!((a[i] - b[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn angle_is_not_wrapped() {
        let cp = CartPole::default();
        let mut s = PhysicalState::new(0.0, 0.0, 40.0, 3.0);
        for _ in 0..5 {
            s = cp.step(&s, Action(0.0), DEFAULT_DT);
        }
        assert!(s.angle() > PI, "angle {}", s.angle());
    }
}
