//! Error type shared by the simulation core.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("universe width must be positive and finite, got {0}")]
    InvalidWidth(f64),

    #[error("body {index} has invalid mass {mass}; masses must be positive and finite")]
    InvalidMass { index: usize, mass: f64 },

    #[error("body {index} has a non-finite position, velocity or acceleration")]
    NonFiniteBody { index: usize },

    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Two bodies kept landing in the same sub-quadrant down to the depth ceiling
    #[error("bodies {first} and {second} could not be separated within {depth} subdivisions")]
    DegeneratePosition {
        first: usize,
        second: usize,
        depth: usize,
    },

    /// Two distinct bodies outside the root square that halving cannot split,
    /// e.g. both left of the box at the same height
    #[error("bodies {first} and {second} lie outside the universe and could not be separated within {depth} subdivisions")]
    OutsideUniverse {
        first: usize,
        second: usize,
        depth: usize,
    },

    #[error("body {index} became non-finite in generation {generation}")]
    NonFiniteState { generation: usize, index: usize },
}

impl SimError {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
