//! Match rules: phases, clocks, history and the turn controller.
//!
//! - `phase`: placement/movement phases and match results
//! - `clock`: match and turn countdowns
//! - `history`: undo/redo journal (extended ruleset)
//! - `controller`: the `Match` that drives a game from node clicks
//! - `view`: a serializable per-frame snapshot for renderers

pub mod phase;
pub mod clock;
pub mod history;
pub mod controller;
pub mod view;

pub use phase::{GameResult, Phase};
pub use clock::{ClockEvent, Countdown, MatchClocks};
pub use history::History;
pub use controller::{ClickOutcome, Match, TurnReport, Unlocked};
pub use view::{EdgeView, MatchView, NodeView};
