//! Configuration types for loading simulation scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! simulation scenario. A scenario consists of:
//!
//! - [`EngineConfig`]     – Barnes–Hut options (theta, depth ceiling, collision policy)
//! - [`ParametersConfig`] – step size, generation count and physical constants
//! - `width`              – side of the square universe, anchored at the origin
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   theta: 0.5
//!   barnes_hut: true        # optional, false -> direct O(n^2) sum
//!   max_depth: 64           # optional
//!   collision: "merge"      # optional, or "reject"
//!
//! parameters:
//!   generations: 1000
//!   dt: 1.0
//!   G: 6.67408e-11          # optional, SI by default
//!   eps2: 0.0               # optional softening
//!
//! width: 14.0
//!
//! bodies:
//!   - x: [ 1.0, 13.0 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 1.0
//!   - x: [ 2.0, 12.0 ]
//!     v: [ 0.0, 0.0 ]
//!     m: 2.0
//! ```
//!
//! The scenario builder maps this into runtime types and validates it.

use serde::Deserialize;

use crate::simulation::barnes_hut::{CollisionPolicy, TreeConfig};
use crate::simulation::params::G_SI;

/// What the tree does with bodies it cannot separate
/// `collision: "merge"` or `collision: "reject"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionConfig {
    #[default]
    #[serde(rename = "merge")] // keep them in one cluster leaf and carry on
    Merge,

    #[serde(rename = "reject")] // stop the run with an error
    Reject,
}

impl From<CollisionConfig> for CollisionPolicy {
    fn from(c: CollisionConfig) -> Self {
        match c {
            CollisionConfig::Merge => CollisionPolicy::Merge,
            CollisionConfig::Reject => CollisionPolicy::Reject,
        }
    }
}

/// Barnes–Hut engine configuration
#[derive(Deserialize, Debug, Clone)]
pub struct EngineConfig {
    pub theta: f64, // opening threshold, 0 = exact
    #[serde(default = "default_barnes_hut")]
    pub barnes_hut: bool, // `false` - direct N^2 summation
    #[serde(default = "default_max_depth")]
    pub max_depth: usize, // deepest level a leaf may sit at
    #[serde(default)]
    pub collision: CollisionConfig,
}

fn default_barnes_hut() -> bool {
    true
}

fn default_max_depth() -> usize {
    TreeConfig::default().max_depth
}

/// Step size, run length and physical constants
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    pub generations: usize, // number of steps after the initial snapshot
    pub dt: f64, // time step size
    #[serde(default = "default_g")]
    pub G: f64, // gravitational constant
    #[serde(default)]
    pub eps2: f64, // softening, prevents singular forces at tiny separations
}

fn default_g() -> f64 {
    G_SI
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position
    pub v: [f64; 2], // initial velocity
    pub m: f64, // mass
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub engine: EngineConfig,
    pub parameters: ParametersConfig,
    pub width: f64, // side of the universe square
    pub bodies: Vec<BodyConfig>,
}
