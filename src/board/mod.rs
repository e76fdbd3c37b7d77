//! The board: graph topology, occupancy state and the capture rule.
//!
//! - `topology`: the fixed node/edge graph built from a `GameConfig`
//! - `state`: node occupancy, derived edge control, scoring and circuit unlocks
//! - `capture`: surrounded-titan detection and removal (extended ruleset)

pub mod topology;
pub mod state;
pub mod capture;

pub use topology::{Edge, EdgeKind, Neighbors, Node, Topology};
pub use state::Board;
pub use capture::{capture_after_move, Captured};
