//! Build fully-initialized simulation scenarios
//!
//! A `Scenario` bundles everything a run needs:
//! - engine settings (`Engine`)
//! - the initial snapshot (`Universe`)
//! - how many generations to advance
//!
//! Scenarios come either from a YAML `ScenarioConfig` or from one of the
//! built-in fixtures (Jupiter, a single galaxy, two colliding galaxies).

use crate::configuration::config::{BodyConfig, ScenarioConfig};
use crate::error::Result;
use crate::simulation::barnes_hut::TreeConfig;
use crate::simulation::engine::Engine;
use crate::simulation::fixtures::{self, GALAXY_WIDTH, JUPITER_WIDTH};
use crate::simulation::params::{Parameters, G_SI};
use crate::simulation::states::{Body, NVec2, Universe};

#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub universe: Universe,
    pub generations: usize,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self> {
        // Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
        let bodies: Vec<Body> = cfg
            .bodies
            .iter()
            .map(|bc: &BodyConfig| Body::new(NVec2::from(bc.x), NVec2::from(bc.v), bc.m))
            .collect();
        let universe = Universe::new(bodies, cfg.width)?;

        let p_cfg = cfg.parameters;
        let parameters = Parameters {
            dt: p_cfg.dt,
            theta: cfg.engine.theta,
            G: p_cfg.G,
            eps2: p_cfg.eps2,
        };

        let e_cfg = cfg.engine;
        let tree = TreeConfig {
            max_depth: e_cfg.max_depth,
            collision: e_cfg.collision.into(),
        };
        let mut engine = Engine::new(parameters, tree)?;
        if !e_cfg.barnes_hut {
            engine = engine.direct();
        }
        if engine.barnes_hut {
            engine.tree.validated(universe.width())?;
        }

        Ok(Self {
            engine,
            universe,
            generations: p_cfg.generations,
        })
    }

    /// Jupiter and its four large moons, one second per generation
    pub fn jupiter(generations: usize) -> Result<Self> {
        let universe = Universe::new(fixtures::jupiter_system(), JUPITER_WIDTH)?;
        Self::preset(universe, generations, 1.0)
    }

    /// One 500-star galaxy in the middle-right of a 1e23 m universe
    pub fn galaxy(generations: usize, seed: u64) -> Result<Self> {
        let g0 = fixtures::galaxy(500, 4.0e21, NVec2::new(7.0e22, 2.0e22), seed);
        let universe = Universe::from_groups([g0], GALAXY_WIDTH)?;
        Self::preset(universe, generations, 2.0e14)
    }

    /// Two galaxies pushed towards each other
    pub fn collision(generations: usize, seed: u64) -> Result<Self> {
        let mut g0 = fixtures::galaxy(500, 4.0e21, NVec2::new(4.0e22, 3.0e22), seed);
        let mut g1 = fixtures::galaxy(500, 4.0e21, NVec2::new(3.0e22, 3.0e22), seed.wrapping_add(1));

        fixtures::push(&mut g0, NVec2::new(-100.0, 200.0));
        fixtures::push(&mut g1, NVec2::new(200.0, -100.0));

        let universe = Universe::from_groups([g0, g1], GALAXY_WIDTH)?;
        Self::preset(universe, generations, 3.0e15)
    }

    fn preset(universe: Universe, generations: usize, dt: f64) -> Result<Self> {
        let parameters = Parameters {
            dt,
            theta: 0.5,
            G: G_SI,
            eps2: 0.0,
        };
        Ok(Self {
            engine: Engine::new(parameters, TreeConfig::default())?,
            universe,
            generations,
        })
    }

    /// Run the scenario to completion, returning every snapshot
    pub fn run(self) -> Result<Vec<Universe>> {
        self.engine.run(self.universe, self.generations)
    }

    /// Override run length, step or theta (e.g. from the command line)
    pub fn with_overrides(mut self, generations: Option<usize>, dt: Option<f64>, theta: Option<f64>) -> Result<Self> {
        if let Some(g) = generations {
            self.generations = g;
        }
        if let Some(dt) = dt {
            self.engine.parameters.dt = dt;
        }
        if let Some(theta) = theta {
            self.engine.parameters.theta = theta;
        }
        self.engine.parameters = self.engine.parameters.validated()?;
        Ok(self)
    }
}
