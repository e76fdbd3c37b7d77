//! Error types.
//!
//! Two very different failure classes live here:
//!
//! - [`ConfigError`]: a malformed board or match configuration. Returned
//!   from construction; the engine never runs on a configuration that
//!   failed validation.
//! - [`Rejection`]: an expected rule violation (locked circuit, occupied
//!   node, paused match, ...). Operations that can be refused return
//!   `Result<_, Rejection>` and leave all state untouched on `Err`. The
//!   `Display` text is the status message shown to the player.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid game configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("circuit count must be at least 1, got {0}")]
    TooFewCircuits(usize),

    #[error("each circuit needs at least 3 nodes, got {0}")]
    TooFewNodes(usize),

    #[error("each player needs at least one titan")]
    NoTitans,

    #[error("{titans} titans per player do not fit on a board of {nodes} nodes")]
    TooManyTitans { titans: usize, nodes: usize },

    #[error("board of {nodes} nodes and {edges} edges exceeds the id range")]
    BoardTooLarge { nodes: usize, edges: usize },

    #[error("ring weight table is empty or has an empty row")]
    EmptyWeightTable,

    #[error("edge weights must be positive (zero found in {context})")]
    ZeroWeight { context: &'static str },

    #[error("total edge weight {0} does not fit a score")]
    WeightOverflow(u64),

    #[error("{clock} clock must be longer than zero seconds")]
    ZeroTime { clock: &'static str },
}

/// Why an action was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rejection {
    #[error("This circuit is not unlocked yet!")]
    CircuitLocked,

    #[error("This node is already occupied!")]
    NodeOccupied,

    #[error("Select your own titan to move.")]
    NotOwnPiece,

    #[error("Titans can only move along an edge.")]
    NotAdjacent,

    #[error("The game is over.")]
    GameOver,

    #[error("Game Paused")]
    Paused,

    #[error("That action does not belong to this phase.")]
    WrongPhase,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_messages() {
        assert_eq!(
            ConfigError::TooFewNodes(2).to_string(),
            "each circuit needs at least 3 nodes, got 2"
        );
        assert_eq!(
            ConfigError::TooManyTitans { titans: 10, nodes: 18 }.to_string(),
            "10 titans per player do not fit on a board of 18 nodes"
        );
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(Rejection::CircuitLocked.to_string(), "This circuit is not unlocked yet!");
        assert_eq!(Rejection::NodeOccupied.to_string(), "This node is already occupied!");
        assert_eq!(Rejection::Paused.to_string(), "Game Paused");
    }
}
