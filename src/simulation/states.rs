//! Core state types for the 2D N-body simulation.
//!
//! - `Body`: a point mass with position, velocity and last acceleration
//! - `Universe`: one immutable snapshot, an ordered list of bodies inside
//!   a square of side `width` anchored at the origin
//!
//! A `Universe` can only be built through [`Universe::new`], which rejects
//! invalid widths and masses so the tree and integrator never see them.

use nalgebra::Vector2;

use crate::error::{Result, SimError};

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub a: NVec2, // acceleration from the last generation
    pub m: f64, // mass
}

impl Body {
    /// Acceleration starts at zero and is filled in by the integrator
    pub fn new(x: NVec2, v: NVec2, m: f64) -> Self {
        Self {
            x,
            v,
            a: NVec2::zeros(),
            m,
        }
    }

    /// True if the body lies inside `[0, width] x [0, width]`
    pub fn is_in_universe(&self, width: f64) -> bool {
        (0.0..=width).contains(&self.x.x) && (0.0..=width).contains(&self.x.y)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.iter().chain(self.v.iter()).chain(self.a.iter()).all(|c| c.is_finite())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Universe {
    bodies: Vec<Body>,
    width: f64,
}

impl Universe {
    /// Validate and wrap a set of bodies.
    ///
    /// Fails on a non-positive or non-finite width, a non-positive or
    /// non-finite mass, or any non-finite position/velocity/acceleration.
    pub fn new(bodies: Vec<Body>, width: f64) -> Result<Self> {
        if !(width.is_finite() && width > 0.0) {
            return Err(SimError::InvalidWidth(width));
        }
        for (index, b) in bodies.iter().enumerate() {
            if !(b.m.is_finite() && b.m > 0.0) {
                return Err(SimError::InvalidMass { index, mass: b.m });
            }
            if !b.is_finite() {
                return Err(SimError::NonFiniteBody { index });
            }
        }
        Ok(Self { bodies, width })
    }

    /// Same width, new bodies; the engine checks the bodies itself
    pub(crate) fn with_bodies(&self, bodies: Vec<Body>) -> Self {
        Self {
            bodies,
            width: self.width,
        }
    }

    /// Concatenate several groups of bodies (e.g. galaxies) into one universe
    pub fn from_groups<I>(groups: I, width: f64) -> Result<Self>
    where
        I: IntoIterator<Item = Vec<Body>>,
    {
        Self::new(groups.into_iter().flatten().collect(), width)
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    /// Mass-weighted mean position, `None` for an empty universe
    pub fn center_of_mass(&self) -> Option<NVec2> {
        if self.bodies.is_empty() {
            return None;
        }
        let weighted = self.bodies.iter().fold(NVec2::zeros(), |acc, b| acc + b.x * b.m);
        Some(weighted / self.total_mass())
    }

    /// Number of bodies that have drifted outside the bounding square
    pub fn escaped(&self) -> usize {
        self.bodies.iter().filter(|b| !b.is_in_universe(self.width)).count()
    }
}
