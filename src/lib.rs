pub mod simulation;
pub mod configuration;
pub mod benchmark;
pub mod error;

pub use error::{Result, SimError};

pub use simulation::states::{Body, Universe, NVec2};
pub use simulation::quadrant::{Quadrant, SubQuad};
pub use simulation::barnes_hut::{QuadTree, Node, NodeId, Aggregate, TreeConfig, TreeStats, CollisionPolicy};
pub use simulation::forces::{ForceModel, DirectGravity, BarnesHutGravity, pairwise_force};
pub use simulation::integrator::{advance, step_bodies};
pub use simulation::params::{Parameters, G_SI};
pub use simulation::engine::Engine;
pub use simulation::scenario::Scenario;

pub use configuration::config::{EngineConfig, ParametersConfig, BodyConfig, ScenarioConfig, CollisionConfig};

pub use benchmark::benchmark::{bench_gravity, bench_step, max_force_error};
