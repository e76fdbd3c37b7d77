//! Node and edge identifiers.
//!
//! ## ID Layout
//!
//! IDs are assigned by the topology builder in creation order and are never
//! reused:
//! - Nodes: ring by ring from the outermost circuit, position by position
//!   within each ring. With `n` nodes per circuit, node `c * n + p` sits at
//!   circuit `c`, position `p`.
//! - Edges: every ring's cycle edges first (outer ring first), then the
//!   radial cross-links.
//!
//! ```
//! use titan_circuits::core::NodeId;
//!
//! let node = NodeId::new(7);
//! assert_eq!(node.index(), 7);
//! assert_eq!(format!("{}", node), "Node(7)");
//! ```

use serde::{Deserialize, Serialize};

/// Identifier of a board node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u16);

impl NodeId {
    /// Create a new node ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the ID as a `usize` index into node storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl From<u16> for NodeId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// Identifier of a board edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u16);

impl EdgeId {
    /// Create a new edge ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the ID as a `usize` index into edge storage.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Edge({})", self.0)
    }
}
