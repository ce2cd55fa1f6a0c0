//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - integration step size `dt`,
//! - Barnes–Hut opening threshold `theta`,
//! - gravitational constant and softening (`G`, `eps2`)

use crate::error::{Result, SimError};

/// Newtonian gravitational constant in SI units (m³ kg⁻¹ s⁻²)
pub const G_SI: f64 = 6.67408e-11;

#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    pub dt: f64, // step size
    pub theta: f64, // s/d threshold, 0 = exact
    pub G: f64, // gravitational constant
    pub eps2: f64, // softening, 0 = plain inverse square
}

impl Parameters {
    /// SI gravity, no softening
    pub fn new(dt: f64, theta: f64) -> Result<Self> {
        Self {
            dt,
            theta,
            G: G_SI,
            eps2: 0.0,
        }
        .validated()
    }

    /// Check every field, returning the parameters unchanged if they are usable
    pub fn validated(self) -> Result<Self> {
        if !self.dt.is_finite() {
            return Err(SimError::parameter("dt", format!("must be finite, got {}", self.dt)));
        }
        // theta = +inf is allowed: every internal node is approximated on sight
        if self.theta.is_nan() || self.theta < 0.0 {
            return Err(SimError::parameter("theta", format!("must be >= 0, got {}", self.theta)));
        }
        if !self.G.is_finite() {
            return Err(SimError::parameter("G", format!("must be finite, got {}", self.G)));
        }
        if !(self.eps2.is_finite() && self.eps2 >= 0.0) {
            return Err(SimError::parameter("eps2", format!("must be finite and >= 0, got {}", self.eps2)));
        }
        Ok(self)
    }
}
