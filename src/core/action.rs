//! Action representation.
//!
//! A turn consists of exactly one action:
//! - `Place`: put a new titan on an empty node of an unlocked circuit
//! - `Move`: slide one of your titans along an edge to an empty node
//!
//! The click-driven controller builds these from the two-click protocol;
//! programmatic callers can apply them directly.

use serde::{Deserialize, Serialize};

use super::ids::NodeId;
use super::player::Player;

/// A complete game action.
///
/// ## Example
///
/// ```
/// use titan_circuits::core::{Action, NodeId};
///
/// let place = Action::Place { node: NodeId(0) };
/// let step = Action::Move { from: NodeId(0), to: NodeId(1) };
///
/// assert_eq!(place.destination(), NodeId(0));
/// assert_eq!(step.destination(), NodeId(1));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Place a titan during the placement phase.
    Place { node: NodeId },
    /// Move a titan during the movement phase.
    Move { from: NodeId, to: NodeId },
}

impl Action {
    /// The node the acting titan ends up on.
    #[must_use]
    pub const fn destination(self) -> NodeId {
        match self {
            Action::Place { node } => node,
            Action::Move { to, .. } => to,
        }
    }
}

/// A recorded action with metadata for history tracking.
///
/// Used for the undo/redo journal and for replaying a match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// The player who took this action.
    pub player: Player,

    /// The action taken.
    pub action: Action,

    /// Turn number when the action was taken (starts at 1).
    pub turn: u32,
}

impl ActionRecord {
    /// Create a new action record.
    #[must_use]
    pub fn new(player: Player, action: Action, turn: u32) -> Self {
        Self { player, action, turn }
    }
}
