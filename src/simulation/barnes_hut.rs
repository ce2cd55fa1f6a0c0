//! # Barnes–Hut Quadtree (2D)
//!
//! This module implements the spatial tree behind the Barnes–Hut force
//! approximation. Every generation a fresh [`QuadTree`] is built over the
//! current [`Universe`] snapshot, its internal nodes are given the centre of
//! mass and total mass of their subtree, and the finished tree is then only
//! read by the force evaluator until it is dropped at the end of the step.
//!
//! ## Layout
//!
//! - Nodes live in a single arena (`Vec<Node>`) and refer to each other by
//!   [`NodeId`], never by reference.
//! - The root always covers the whole universe: origin `(0, 0)`, side
//!   `universe.width()`.
//! - A [`Node::Leaf`] holds exactly one body (by index into the snapshot).
//! - A [`Node::Internal`] has four child slots (NW, NE, SW, SE), any subset
//!   populated, plus an [`Aggregate`] of everything below it.
//! - A [`Node::Cluster`] only appears under [`CollisionPolicy::Merge`]: bodies
//!   that still shared a sub-quadrant at the depth ceiling are kept together
//!   in one leaf-like node with their own aggregate.
//!
//! ## Degenerate positions
//!
//! Two bodies at the same coordinates can never be separated by halving the
//! quadrant, so insertion would descend forever. Insertion is therefore a
//! loop bounded by [`TreeConfig::max_depth`]; what happens at the ceiling is
//! decided by [`TreeConfig::collision`].

use log::warn;

use crate::error::{Result, SimError};
use crate::simulation::quadrant::{Quadrant, SubQuad};
use crate::simulation::states::{Body, NVec2, Universe};

/// What to do with bodies that cannot be separated within `max_depth` levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionPolicy {
    /// Keep them together in a single cluster leaf
    Merge,
    /// Abort construction with [`SimError::DegeneratePosition`], or
    /// [`SimError::OutsideUniverse`] if a body is beyond the root square
    Reject,
}

/// Tree construction settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeConfig {
    pub max_depth: usize, // deepest level a leaf may sit at (root = 0)
    pub collision: CollisionPolicy,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: 64,
            collision: CollisionPolicy::Merge,
        }
    }
}

impl TreeConfig {
    /// Check the depth ceiling against the universe width.
    ///
    /// The deepest quadrant has side `width / 2^max_depth`; that must still be
    /// a positive number or subdivision stops being exact halving.
    pub fn validated(self, width: f64) -> Result<Self> {
        if self.max_depth == 0 {
            return Err(SimError::parameter("max_depth", "must be at least 1"));
        }
        let exponent = i32::try_from(self.max_depth).unwrap_or(i32::MAX);
        let deepest = width * 0.5f64.powi(exponent);
        if !(deepest > 0.0) {
            return Err(SimError::parameter(
                "max_depth",
                format!("{} halvings of width {width} underflow to zero", self.max_depth),
            ));
        }
        Ok(self)
    }
}

/// Centre of mass and total mass of a group of bodies.
///
/// Kept separate from [`Body`] so "this node has no body of its own" and
/// "this is the node's computed centroid" never share a type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    pub com: NVec2,
    pub mass: f64,
}

impl Aggregate {
    /// Massless aggregate sitting at `at`; the starting point of every fold
    pub fn empty_at(at: NVec2) -> Self {
        Self { com: at, mass: 0.0 }
    }

    pub fn of(body: &Body) -> Self {
        Self {
            com: body.x,
            mass: body.m,
        }
    }

    /// Pairwise centre of mass: `(x1*m1 + x2*m2) / (m1 + m2)`
    pub fn combine(self, other: Aggregate) -> Aggregate {
        let mass = self.mass + other.mass;
        if mass == 0.0 {
            return self;
        }
        Aggregate {
            com: (self.com * self.mass + other.com * other.mass) / mass,
            mass,
        }
    }
}

/// Index into the node arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Exactly one body, by index into the snapshot
    Leaf { body: usize, quadrant: Quadrant },

    /// Bodies merged at the depth ceiling
    Cluster {
        bodies: Vec<usize>,
        quadrant: Quadrant,
        aggregate: Aggregate,
    },

    /// Region with up to four populated children `[NW, NE, SW, SE]`
    Internal {
        quadrant: Quadrant,
        children: [Option<NodeId>; 4],
        aggregate: Aggregate,
    },
}

impl Node {
    pub fn quadrant(&self) -> &Quadrant {
        match self {
            Node::Leaf { quadrant, .. }
            | Node::Cluster { quadrant, .. }
            | Node::Internal { quadrant, .. } => quadrant,
        }
    }

    fn internal(quadrant: Quadrant) -> Self {
        Node::Internal {
            quadrant,
            children: [None; 4],
            aggregate: Aggregate::empty_at(quadrant.center()),
        }
    }
}

/// Shape summary, logged once per generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub nodes: usize,
    pub leaves: usize,
    pub clusters: usize,
    pub depth: usize,
    pub merged: usize, // bodies that joined an existing leaf at the ceiling
}

/// A built and aggregated Barnes–Hut quadtree.
///
/// There is no way to mutate a `QuadTree` after [`QuadTree::build`] returns,
/// so it can be shared freely while forces are evaluated.
#[derive(Debug, Clone)]
pub struct QuadTree {
    nodes: Vec<Node>,
    root: NodeId,
    depth: usize,
    merged: usize,
}

impl QuadTree {
    /// Build the tree for `universe` and aggregate mass bottom-up.
    ///
    /// Bodies are inserted in snapshot order. Aggregation runs once, after the
    /// last insertion, so every internal node sees its final shape.
    ///
    /// # Errors
    /// - [`SimError::InvalidParameter`] if `config` is unusable for this width
    /// - [`SimError::DegeneratePosition`] if two bodies share a sub-quadrant at
    ///   the depth ceiling and the policy is [`CollisionPolicy::Reject`]
    /// - [`SimError::OutsideUniverse`] in the same situation when either body
    ///   lies outside the universe square
    pub fn build(universe: &Universe, config: &TreeConfig) -> Result<Self> {
        let config = config.validated(universe.width())?;
        let bodies = universe.bodies();

        let root_quadrant = Quadrant::new(NVec2::zeros(), universe.width());
        let mut nodes = Vec::with_capacity(bodies.len() * 2 + 1);
        nodes.push(Node::internal(root_quadrant));

        let mut tree = QuadTree {
            nodes,
            root: NodeId(0),
            depth: 0,
            merged: 0,
        };

        for i in 0..bodies.len() {
            tree.insert(i, bodies, &config)?;
        }

        tree.aggregate(tree.root, bodies);
        Ok(tree)
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Aggregate of the whole universe
    pub fn root_aggregate(&self) -> Aggregate {
        match self.node(self.root) {
            Node::Internal { aggregate, .. } | Node::Cluster { aggregate, .. } => *aggregate,
            Node::Leaf { .. } => unreachable!("the root is created as an internal node"),
        }
    }

    /// Number of single-body leaves
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats {
            nodes: self.nodes.len(),
            depth: self.depth,
            merged: self.merged,
            ..TreeStats::default()
        };
        for node in &self.nodes {
            match node {
                Node::Leaf { .. } => stats.leaves += 1,
                Node::Cluster { .. } => stats.clusters += 1,
                Node::Internal { .. } => {}
            }
        }
        stats
    }

    // helpers ==============================================================================

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn child(&self, parent: NodeId, q: SubQuad) -> Option<NodeId> {
        match &self.nodes[parent.0] {
            Node::Internal { children, .. } => children[q.index()],
            _ => unreachable!("insertion only descends through internal nodes"),
        }
    }

    fn set_child(&mut self, parent: NodeId, q: SubQuad, child: NodeId) {
        match &mut self.nodes[parent.0] {
            Node::Internal { children, .. } => children[q.index()] = Some(child),
            _ => unreachable!("insertion only descends through internal nodes"),
        }
    }

    /// Walk down from the root until `body` finds an empty slot.
    ///
    /// `depth` is the level of the slot being inspected (children of the root
    /// are at depth 1). When the slot holds another body, that leaf is pushed
    /// one level down under a new internal node covering the same square, and
    /// the walk continues from there. A split is refused once `depth` reaches
    /// `max_depth`.
    fn insert(&mut self, body: usize, bodies: &[Body], config: &TreeConfig) -> Result<()> {
        let pos = bodies[body].x;
        let mut parent = self.root;
        let mut depth = 1;

        loop {
            let quadrant = *self.nodes[parent.0].quadrant();
            let q = quadrant.which_sub_quad(&pos);

            let Some(occupant) = self.child(parent, q) else {
                let leaf = self.push(Node::Leaf {
                    body,
                    quadrant: quadrant.sub_quadrant(q),
                });
                self.set_child(parent, q, leaf);
                self.depth = self.depth.max(depth);
                return Ok(());
            };

            match &mut self.nodes[occupant.0] {
                Node::Internal { .. } => {
                    parent = occupant;
                    depth += 1;
                }
                Node::Cluster { bodies: members, .. } => {
                    members.push(body);
                    self.merged += 1;
                    warn!("body {body} merged into a cluster of {} at depth {depth}", members.len() - 1);
                    return Ok(());
                }
                Node::Leaf {
                    body: existing,
                    quadrant: leaf_quadrant,
                } => {
                    let existing = *existing;
                    let leaf_quadrant = *leaf_quadrant;

                    if depth >= config.max_depth {
                        let outside = !leaf_quadrant.contains(&bodies[existing].x) || !leaf_quadrant.contains(&pos);
                        return self.collide(occupant, existing, body, leaf_quadrant, depth, outside, config);
                    }

                    // the old leaf moves one level down, under a new internal node
                    let nq = leaf_quadrant.which_sub_quad(&bodies[existing].x);
                    self.nodes[occupant.0] = Node::Leaf {
                        body: existing,
                        quadrant: leaf_quadrant.sub_quadrant(nq),
                    };
                    let split = self.push(Node::internal(leaf_quadrant));
                    self.set_child(split, nq, occupant);
                    self.set_child(parent, q, split);

                    parent = split;
                    depth += 1;
                }
            }
        }
    }

    /// Two bodies reached the same slot at the depth ceiling.
    ///
    /// `outside` is set when either body is not inside the leaf's square:
    /// bodies beyond the root square keep falling into the same edge quadrant
    /// however far apart they are, which is a different condition from two
    /// bodies sharing a position.
    #[allow(clippy::too_many_arguments)]
    fn collide(
        &mut self,
        occupant: NodeId,
        existing: usize,
        body: usize,
        quadrant: Quadrant,
        depth: usize,
        outside: bool,
        config: &TreeConfig,
    ) -> Result<()> {
        match (config.collision, outside) {
            (CollisionPolicy::Reject, true) => Err(SimError::OutsideUniverse {
                first: existing,
                second: body,
                depth,
            }),
            (CollisionPolicy::Reject, false) => Err(SimError::DegeneratePosition {
                first: existing,
                second: body,
                depth,
            }),
            (CollisionPolicy::Merge, _) => {
                if outside {
                    warn!("bodies {existing} and {body} lie outside the universe and share an edge quadrant at depth {depth}; merging into one cluster");
                } else {
                    warn!("bodies {existing} and {body} are indistinguishable at depth {depth}; merging into one cluster");
                }
                self.nodes[occupant.0] = Node::Cluster {
                    bodies: vec![existing, body],
                    quadrant,
                    aggregate: Aggregate::empty_at(quadrant.center()),
                };
                self.merged += 1;
                self.depth = self.depth.max(depth);
                Ok(())
            }
        }
    }

    /// Post-order pass: fill in every internal node's and cluster's aggregate.
    ///
    /// Leaves are not touched; their body is authoritative. Recursion depth is
    /// bounded by `max_depth`.
    fn aggregate(&mut self, id: NodeId, bodies: &[Body]) -> Aggregate {
        match &self.nodes[id.0] {
            Node::Leaf { body, .. } => Aggregate::of(&bodies[*body]),
            Node::Cluster { bodies: members, quadrant, .. } => {
                let total = members
                    .iter()
                    .fold(Aggregate::empty_at(quadrant.center()), |acc, &i| acc.combine(Aggregate::of(&bodies[i])));
                if let Node::Cluster { aggregate, .. } = &mut self.nodes[id.0] {
                    *aggregate = total;
                }
                total
            }
            Node::Internal { children, quadrant, .. } => {
                let children = *children;
                let mut total = Aggregate::empty_at(quadrant.center());
                for child in children.into_iter().flatten() {
                    total = total.combine(self.aggregate(child, bodies));
                }
                if let Node::Internal { aggregate, .. } = &mut self.nodes[id.0] {
                    *aggregate = total;
                }
                total
            }
        }
    }
}
