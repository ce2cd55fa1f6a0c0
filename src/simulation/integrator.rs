//! Fixed-step time integration for the N-body system
//!
//! One update per body per generation, using the net force from the
//! generation's tree:
//!
//! ```text
//! a_new = F / m
//! v_new = v_old + a_new dt
//! x_new = x_old + v_old dt + 1/2 a_new dt²
//! ```
//!
//! The position update deliberately uses the *old* velocity with the *new*
//! acceleration.

use super::forces::ForceModel;
use super::states::{Body, NVec2, Universe};

/// Next state of `b` under net force `force` over one step `dt`.
///
/// Everything is computed from the unmodified `b`; the result is a new value.
pub fn advance(b: &Body, force: NVec2, dt: f64) -> Body {
    let a = force / b.m;
    let v = b.v + a * dt;
    let x = b.x + b.v * dt + 0.5 * a * dt * dt;
    Body { x, v, a, m: b.m }
}

/// Advance every body of `sys` by `dt`, reading forces from `forces`.
///
/// Body `i` of the result depends only on body `i` of `sys` and the force
/// model, so ordering inside the loop does not matter.
pub fn step_bodies(sys: &Universe, forces: &impl ForceModel, dt: f64) -> Vec<Body> {
    sys.bodies()
        .iter()
        .enumerate()
        .map(|(i, b)| advance(b, forces.net_force(i, sys), dt))
        .collect()
}
