//! # titan-circuits
//!
//! A rules engine for a two-player territory game played on concentric
//! circuits of nodes.
//!
//! Red and Blue alternately place titans on the outermost circuit; filling
//! a circuit unlocks the next one inward. Once every titan is placed, the
//! players slide titans along edges. An edge whose two endpoints hold the
//! same player's titans is controlled by that player and scores its weight.
//! The match ends when the innermost circuit is full or the match clock runs
//! out; the higher score wins.
//!
//! ## Design
//!
//! 1. **Explicit context**: all state lives in a [`Match`] value. There are
//!    no globals and no timers; the host forwards clicks and one tick per
//!    second.
//!
//! 2. **Derived state is never stored stale**: node occupancy is the only
//!    primary board state. Edge control is rebuilt after each occupancy
//!    change and scores are summed on demand.
//!
//! 3. **Refusals are values**: a rule violation returns a [`Rejection`]
//!    whose text is the player-facing status message, and leaves the match
//!    untouched.
//!
//! 4. **Cheap snapshots**: board state lives in `im` persistent vectors, so
//!    history checkpoints share structure.
//!
//! ## Modules
//!
//! - `core`: ids, players, configuration, actions, errors
//! - `board`: topology, occupancy/control/scoring, capture
//! - `rules`: phases, clocks, history, the `Match` controller, render views
//!
//! ## Usage
//!
//! ```
//! use titan_circuits::{GameConfig, Match, NodeId, Player, Rejection};
//!
//! let mut game = Match::new(GameConfig::default()).unwrap();
//! game.on_node_clicked(NodeId(3)).unwrap(); // red
//! game.on_node_clicked(NodeId(0)).unwrap(); // blue
//! game.on_node_clicked(NodeId(4)).unwrap(); // red takes the weight-3 edge
//!
//! assert_eq!(game.score(Player::Red), 3);
//! assert_eq!(game.on_node_clicked(NodeId(6)), Err(Rejection::CircuitLocked));
//! ```

pub mod core;
pub mod board;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionRecord, ConfigError, EdgeId, GameConfig, NodeId, Player, PlayerMap, Rejection,
    Ruleset,
};

pub use crate::board::{Board, Edge, EdgeKind, Node, Topology};

pub use crate::rules::{
    ClickOutcome, ClockEvent, GameResult, Match, MatchView, Phase, TurnReport,
};
