//! Generic fixed-step 4th-order Runge-Kutta integration.

/// Advance `state` by one RK4 step of size `dt`.
///
/// `derivative` is a pure function of the state. Anything it needs to hold
/// constant across the four stages (a control input, physical constants)
/// is captured by the closure.
///
/// # Examples
///
/// ```
/// use swingup_dynamics::rk4_step;
///
/// // x' = -x, exact solution x(t) = exp(-t).
/// let next = rk4_step(&[1.0], 0.1, |x| [-x[0]]);
/// assert!((next[0] - (-0.1f64).exp()).abs() < 1e-6);
/// ```
pub fn rk4_step<const N: usize, F>(state: &[f64; N], dt: f64, derivative: F) -> [f64; N]
where
    F: Fn(&[f64; N]) -> [f64; N],
{
    let k1 = derivative(state);
    let k2 = derivative(&offset(state, &k1, 0.5 * dt));
    let k3 = derivative(&offset(state, &k2, 0.5 * dt));
    let k4 = derivative(&offset(state, &k3, dt));

    std::array::from_fn(|i| {
        state[i] + dt / 6.0 * (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i])
    })
}

/// `state + h * slope`.
fn offset<const N: usize>(state: &[f64; N], slope: &[f64; N], h: f64) -> [f64; N] {
    std::array::from_fn(|i| state[i] + h * slope[i])
}
