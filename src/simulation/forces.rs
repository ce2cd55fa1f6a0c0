//! Force contributors for the n-body engine
//!
//! Defines the [`ForceModel`] trait with two implementations: direct
//! Newtonian gravity (exact O(n²) sum) and a Barnes–Hut variant that walks a
//! prebuilt [`QuadTree`]

use std::collections::VecDeque;

use crate::simulation::barnes_hut::{Node, QuadTree};
use crate::simulation::params::Parameters;
use crate::simulation::states::{Body, NVec2, Universe};

/// Source of the net force acting on one body of a snapshot
pub trait ForceModel {
    fn net_force(&self, i: usize, universe: &Universe) -> NVec2;
}

/// Gravitational pull of a mass `m2` at `x2` on a mass `m1` at `x1`.
///
/// `F = G m1 m2 / d²` directed from `x1` towards `x2`, split into components
/// by `Δx/d` and `Δy/d`. With softening `eps2 > 0` the squared distance
/// becomes `d² + eps2`. Coincident points (softened `d² == 0`) give zero.
pub fn pairwise_force(x1: NVec2, m1: f64, x2: NVec2, m2: f64, g: f64, eps2: f64) -> NVec2 {
    let r = x2 - x1;
    let d2 = r.dot(&r) + eps2;
    if d2 == 0.0 {
        return NVec2::zeros();
    }
    let d = d2.sqrt();
    let f = g * m1 * m2 / d2;
    r * (f / d)
}

fn body_force(target: &Body, source: &Body, g: f64, eps2: f64) -> NVec2 {
    pairwise_force(target.x, target.m, source.x, source.m, g, eps2)
}

/// Exact gravity, summing every other body directly
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct DirectGravity {
    pub G: f64, // gravitational constant
    pub eps2: f64, // softening
}

impl DirectGravity {
    pub fn from_params(p: &Parameters) -> Self {
        Self { G: p.G, eps2: p.eps2 }
    }
}

impl ForceModel for DirectGravity {
    fn net_force(&self, i: usize, universe: &Universe) -> NVec2 {
        let bodies = universe.bodies();
        let target = &bodies[i];
        bodies
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .fold(NVec2::zeros(), |acc, (_, b)| acc + body_force(target, b, self.G, self.eps2))
    }
}

/// Gravity evaluated against a Barnes–Hut quadtree built from the same snapshot
#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy)]
pub struct BarnesHutGravity<'t> {
    pub tree: &'t QuadTree,
    pub G: f64,
    pub eps2: f64,
    pub theta: f64, // s/d threshold
}

impl<'t> BarnesHutGravity<'t> {
    pub fn new(tree: &'t QuadTree, p: &Parameters) -> Self {
        Self {
            tree,
            G: p.G,
            eps2: p.eps2,
            theta: p.theta,
        }
    }
}

impl ForceModel for BarnesHutGravity<'_> {
    /// Breadth-first walk from the root.
    ///
    /// - leaf: exact force, unless it is body `i` itself
    /// - cluster: exact force from every member other than `i`
    /// - internal: if `s/d > theta` (or the centroid sits exactly on the
    ///   body) open the node, otherwise use its aggregate as a point mass
    fn net_force(&self, i: usize, universe: &Universe) -> NVec2 {
        let bodies = universe.bodies();
        let target = &bodies[i];
        let mut net = NVec2::zeros();

        let mut queue = VecDeque::from([self.tree.root()]);
        while let Some(id) = queue.pop_front() {
            match self.tree.node(id) {
                Node::Leaf { body, .. } => {
                    if *body != i {
                        net += body_force(target, &bodies[*body], self.G, self.eps2);
                    }
                }
                Node::Cluster { bodies: members, .. } => {
                    for &j in members.iter().filter(|&&j| j != i) {
                        net += body_force(target, &bodies[j], self.G, self.eps2);
                    }
                }
                Node::Internal {
                    quadrant,
                    children,
                    aggregate,
                } => {
                    let d = (aggregate.com - target.x).norm();
                    if d == 0.0 || quadrant.width / d > self.theta {
                        queue.extend(children.iter().flatten().copied());
                    } else {
                        net += pairwise_force(target.x, target.m, aggregate.com, aggregate.mass, self.G, self.eps2);
                    }
                }
            }
        }
        net
    }
}
