//! Cart-pole physics, reward, and reference collaborators.
//!
//! - [`rk4_step`]: generic fixed-step RK4 over `[f64; N]`
//! - [`CartPole`]: true equations of motion integrated with RK4
//! - [`SwingUpReward`]: radial-basis reward around an upright [`Goal`]
//! - [`LinearPolicy`], [`RandomPolicy`]: reference [`Policy`](swingup_core::Policy)s
//! - [`OracleModel`]: true-dynamics [`ProbabilisticModel`](swingup_core::ProbabilisticModel)

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod cartpole;
pub mod linear_policy;
pub mod oracle;
pub mod random_policy;
pub mod reward;
pub mod rk4;

pub use cartpole::{CartPole, CartPoleParams, DEFAULT_DT};
pub use linear_policy::{LinearPolicy, DEFAULT_MAX_U, LINEAR_PARAMETER_COUNT};
pub use oracle::OracleModel;
pub use random_policy::RandomPolicy;
pub use reward::{angle_dist, Goal, SwingUpReward, REWARD_BANDWIDTH};
pub use rk4::rk4_step;
