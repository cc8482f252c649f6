//! Gaussian radial-basis swing-up reward.
//!
//! `r = exp(-0.5 / σc² · (dθ² + dθ̇² + dẋ² + dx²))`, measured from the state
//! reached against a [`Goal`]. The angular term uses the wrapped distance
//! from [`angle_dist`], so every upright configuration scores the same
//! regardless of how many turns the pole has made.

use std::f64::consts::{PI, TAU};

use swingup_core::{Action, PhysicalState, RewardFunction};

/// Fixed reward bandwidth σc.
pub const REWARD_BANDWIDTH: f64 = 0.25;

/// Signed angular distance from `a` to `b`, wrapped into `(-π, π]`.
///
/// # Examples
///
/// ```
/// use std::f64::consts::PI;
/// use swingup_dynamics::angle_dist;
///
/// assert_eq!(angle_dist(0.0, 0.0), 0.0);
/// assert_eq!(angle_dist(0.0, 3.0 * PI), angle_dist(0.0, PI));
/// assert!((angle_dist(0.0, 1.5 * PI) + 0.5 * PI).abs() < 1e-12);
/// ```
pub fn angle_dist(a: f64, b: f64) -> f64 {
    let theta = (b - a).rem_euclid(TAU);
    if theta > PI {
        theta - TAU
    } else {
        theta
    }
}

/// Target state of the swing-up task.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Goal {
    /// Target pole angle. Default: π (upright).
    pub angle: f64,
    /// Target pole angular velocity. Default: 0.
    pub angular_velocity: f64,
    /// Target cart velocity. Default: 0.
    pub velocity: f64,
    /// Target cart position. Default: 0.
    pub position: f64,
}

impl Default for Goal {
    fn default() -> Self {
        Self {
            angle: PI,
            angular_velocity: 0.0,
            velocity: 0.0,
            position: 0.0,
        }
    }
}

/// Radial-basis reward around a [`Goal`] with bandwidth [`REWARD_BANDWIDTH`].
///
/// Exactly 1 at the goal and strictly positive for moderate errors. The
/// exponent is `-8 · Σ` squared errors, so once the combined squared error
/// passes roughly 93 the result underflows to exactly `0.0` (e.g. a cart
/// 10 m from the goal position). Model rollouts never clamp position, so
/// zero rewards are expected far from the goal. The action is ignored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SwingUpReward {
    goal: Goal,
}

impl SwingUpReward {
    /// Reward around a custom goal.
    pub fn new(goal: Goal) -> Self {
        Self { goal }
    }

    /// The goal being rewarded.
    pub fn goal(&self) -> &Goal {
        &self.goal
    }
}

impl RewardFunction for SwingUpReward {
    fn reward(&self, _from: &PhysicalState, _action: Action, to: &PhysicalState) -> f64 {
        let da = angle_dist(to.angle(), self.goal.angle);
        let dw = to.angular_velocity() - self.goal.angular_velocity;
        let dv = to.velocity() - self.goal.velocity;
        let dx = to.position() - self.goal.position;

        let s_c_sq = REWARD_BANDWIDTH * REWARD_BANDWIDTH;
        (-0.5 / s_c_sq * (da * da + dw * dw + dv * dv + dx * dx)).exp()
    }
}
