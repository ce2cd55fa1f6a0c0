//! Simulation driver
//!
//! Holds the runtime settings (step parameters, tree construction, direct vs
//! Barnes–Hut) and turns an initial `Universe` into a sequence of snapshots.

use log::{debug, info};

use crate::error::{Result, SimError};
use crate::simulation::barnes_hut::{QuadTree, TreeConfig};
use crate::simulation::forces::{BarnesHutGravity, DirectGravity};
use crate::simulation::integrator::step_bodies;
use crate::simulation::params::Parameters;
use crate::simulation::states::Universe;

#[derive(Debug, Clone, Copy)]
pub struct Engine {
    pub parameters: Parameters,
    pub tree: TreeConfig,
    pub barnes_hut: bool, // false = direct, true = barnes-hut
}

impl Engine {
    /// Barnes–Hut engine; parameters are validated here so a bad `dt` or
    /// `theta` never reaches the loop
    pub fn new(parameters: Parameters, tree: TreeConfig) -> Result<Self> {
        Ok(Self {
            parameters: parameters.validated()?,
            tree,
            barnes_hut: true,
        })
    }

    /// Same engine but with the exact O(n²) sum instead of the tree
    pub fn direct(mut self) -> Self {
        self.barnes_hut = false;
        self
    }

    /// Produce `generations + 1` snapshots, the first being `initial`.
    ///
    /// Every generation builds a fresh tree from the previous snapshot,
    /// aggregates it once, and derives every body's next state from that
    /// tree alone. Fails on the first generation that cannot be built or that
    /// yields a non-finite body.
    ///
    /// The fields are public, so parameters are checked again here rather
    /// than trusted from [`Engine::new`].
    pub fn run(&self, initial: Universe, generations: usize) -> Result<Vec<Universe>> {
        self.parameters.validated()?;
        if self.barnes_hut {
            self.tree.validated(initial.width())?;
        }
        info!(
            "running {generations} generations over {} bodies (dt = {}, theta = {}, barnes_hut = {})",
            initial.len(),
            self.parameters.dt,
            self.parameters.theta,
            self.barnes_hut
        );

        let mut snapshots = Vec::with_capacity(generations + 1);
        snapshots.push(initial);
        for generation in 1..=generations {
            let next = self.step(&snapshots[generation - 1], generation)?;
            snapshots.push(next);
        }

        if let Some(last) = snapshots.last() {
            info!("finished; {} of {} bodies outside the universe", last.escaped(), last.len());
        }
        Ok(snapshots)
    }

    /// Advance `current` by one step; `generation` is only used for logging
    /// and error reporting
    pub fn step(&self, current: &Universe, generation: usize) -> Result<Universe> {
        let dt = self.parameters.validated()?.dt;

        let bodies = if self.barnes_hut {
            let tree = QuadTree::build(current, &self.tree)?;
            debug!("generation {generation}: {:?}, {} escaped", tree.stats(), current.escaped());
            step_bodies(current, &BarnesHutGravity::new(&tree, &self.parameters), dt)
        } else {
            step_bodies(current, &DirectGravity::from_params(&self.parameters), dt)
        };

        if let Some(index) = bodies.iter().position(|b| !b.is_finite()) {
            return Err(SimError::NonFiniteState { generation, index });
        }
        Ok(current.with_bodies(bodies))
    }
}
