//! Board topology: the fixed node and edge graph.
//!
//! The graph is built once per match from a validated `GameConfig` and never
//! changes afterwards. Construction is deterministic:
//!
//! 1. Nodes, ring by ring from the outermost circuit, position by position.
//! 2. Cycle edges for every ring: position `i` to `(i + 1) % n`, weighted from
//!    the config's ring weight table.
//! 3. Radial cross-links between ring `c` and `c + 1` at every position `p`
//!    with `p % 2 == c % 2`, all with the cross-link weight.
//!
//! On the default board this gives 18 nodes, 18 ring edges and 6 cross-links
//! (outer to middle at positions 0, 2, 4; middle to inner at 1, 3, 5).
//!
//! ## Usage
//!
//! ```
//! use titan_circuits::board::Topology;
//! use titan_circuits::core::{GameConfig, NodeId};
//!
//! let topology = Topology::build(&GameConfig::default()).unwrap();
//!
//! assert_eq!(topology.node_count(), 18);
//! assert_eq!(topology.edge_count(), 24);
//! assert!(topology.are_adjacent(NodeId(0), NodeId(1)));
//! assert!(topology.are_adjacent(NodeId(6), NodeId(0))); // cross-link, either order
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ConfigError, EdgeId, GameConfig, NodeId};

/// Neighbor list. Ring nodes have two ring neighbors and at most one
/// cross-link, so this never spills to the heap.
pub type Neighbors = SmallVec<[NodeId; 4]>;

/// A board node. Identity only: occupancy lives in [`Board`](super::Board).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    /// Circuit index, 0 = outermost.
    pub circuit: usize,
    /// Position within the circuit, clockwise from the top.
    pub position: usize,
}

/// Whether an edge runs along a ring or between two rings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    Ring,
    CrossLink,
}

/// An undirected, weighted edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub a: NodeId,
    pub b: NodeId,
    pub weight: u32,
    pub kind: EdgeKind,
}

impl Edge {
    /// Does this edge join `x` and `y` (in either order)?
    #[must_use]
    pub fn connects(&self, x: NodeId, y: NodeId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }

    /// The endpoint opposite `node`, if `node` is an endpoint.
    #[must_use]
    pub fn other(&self, node: NodeId) -> Option<NodeId> {
        if self.a == node {
            Some(self.b)
        } else if self.b == node {
            Some(self.a)
        } else {
            None
        }
    }
}

/// The immutable board graph.
#[derive(Clone, Debug)]
pub struct Topology {
    circuit_count: usize,
    nodes_per_circuit: usize,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    adjacency: Vec<Neighbors>,
    /// (low, high) endpoint pair -> edge.
    edge_index: FxHashMap<(NodeId, NodeId), EdgeId>,
}

impl Topology {
    /// Build the graph for `config`.
    ///
    /// Fails if the configuration does not validate.
    pub fn build(config: &GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let circuits = config.circuit_count;
        let per_circuit = config.nodes_per_circuit;

        let nodes: Vec<Node> = (0..circuits)
            .flat_map(|circuit| (0..per_circuit).map(move |position| (circuit, position)))
            .enumerate()
            .map(|(id, (circuit, position))| Node {
                id: NodeId(id as u16),
                circuit,
                position,
            })
            .collect();

        let mut topology = Self {
            circuit_count: circuits,
            nodes_per_circuit: per_circuit,
            adjacency: vec![Neighbors::new(); nodes.len()],
            nodes,
            edges: Vec::new(),
            edge_index: FxHashMap::default(),
        };

        for circuit in 0..circuits {
            for position in 0..per_circuit {
                let a = topology.node_id(circuit, position);
                let b = topology.node_id(circuit, (position + 1) % per_circuit);
                topology.push_edge(a, b, config.ring_weight(circuit, position), EdgeKind::Ring);
            }
        }

        for circuit in 0..circuits.saturating_sub(1) {
            for position in (circuit % 2..per_circuit).step_by(2) {
                let outer = topology.node_id(circuit, position);
                let inner = topology.node_id(circuit + 1, position);
                topology.push_edge(outer, inner, config.cross_link_weight, EdgeKind::CrossLink);
            }
        }

        Ok(topology)
    }

    fn node_id(&self, circuit: usize, position: usize) -> NodeId {
        NodeId((circuit * self.nodes_per_circuit + position) as u16)
    }

    fn push_edge(&mut self, a: NodeId, b: NodeId, weight: u32, kind: EdgeKind) {
        let id = EdgeId(self.edges.len() as u16);
        self.edges.push(Edge { id, a, b, weight, kind });
        self.adjacency[a.index()].push(b);
        self.adjacency[b.index()].push(a);
        self.edge_index.insert((a.min(b), a.max(b)), id);
    }

    /// Number of circuits.
    #[must_use]
    pub fn circuit_count(&self) -> usize {
        self.circuit_count
    }

    /// Nodes on each circuit.
    #[must_use]
    pub fn nodes_per_circuit(&self) -> usize {
        self.nodes_per_circuit
    }

    /// Index of the innermost circuit.
    #[must_use]
    pub fn innermost_circuit(&self) -> usize {
        self.circuit_count - 1
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Is `node` a node of this board?
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.nodes.len()
    }

    /// All nodes in id order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in id order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a node of this board.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node {
        self.nodes
            .get(id.index())
            .unwrap_or_else(|| panic!("{} is not on a board of {} nodes", id, self.nodes.len()))
    }

    /// Look up an edge.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not an edge of this board. Use
    /// [`edge_between`](Self::edge_between) to look for an edge without panicking.
    #[must_use]
    pub fn edge(&self, id: EdgeId) -> &Edge {
        self.edges
            .get(id.index())
            .unwrap_or_else(|| panic!("{} is not on a board of {} edges", id, self.edges.len()))
    }

    /// The node at `position` on `circuit`, if both are in range.
    #[must_use]
    pub fn node_at(&self, circuit: usize, position: usize) -> Option<NodeId> {
        (circuit < self.circuit_count && position < self.nodes_per_circuit)
            .then(|| self.node_id(circuit, position))
    }

    /// Node ids on `circuit`, in position order.
    pub fn circuit_nodes(&self, circuit: usize) -> impl Iterator<Item = NodeId> {
        let start = circuit.min(self.circuit_count) * self.nodes_per_circuit;
        let end = (circuit + 1).min(self.circuit_count) * self.nodes_per_circuit;
        (start..end).map(|id| NodeId(id as u16))
    }

    /// Nodes sharing an edge with `node`.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a node of this board.
    #[must_use]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        &self.adjacency[self.node(node).id.index()]
    }

    /// The edge joining `x` and `y`, in either order.
    #[must_use]
    pub fn edge_between(&self, x: NodeId, y: NodeId) -> Option<EdgeId> {
        self.edge_index.get(&(x.min(y), x.max(y))).copied()
    }

    /// Is there an edge between `x` and `y`, in either order?
    #[must_use]
    pub fn are_adjacent(&self, x: NodeId, y: NodeId) -> bool {
        self.edge_between(x, y).is_some()
    }

    /// Sum of every edge weight: the ceiling for both scores combined.
    ///
    /// Validation keeps this total within `u32`, so no score can overflow.
    #[must_use]
    pub fn total_weight(&self) -> u32 {
        self.edges.iter().map(|e| e.weight).sum()
    }

    /// Polar angle of a node in radians, a layout hint for renderers.
    ///
    /// Position 0 sits at the top (`-π/2`) and positions advance clockwise
    /// in screen coordinates.
    #[must_use]
    pub fn layout_angle(&self, node: NodeId) -> f64 {
        let position = self.node(node).position as f64;
        position * std::f64::consts::TAU / self.nodes_per_circuit as f64 - std::f64::consts::FRAC_PI_2
    }
}
