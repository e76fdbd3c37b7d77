//! Turn/phase controller: the `Match`.
//!
//! A `Match` is an explicit context object owning one board and all match
//! state (no globals, so any number of matches can coexist). The renderer
//! drives it through a handful of synchronous calls and redraws from
//! [`Match::view`] afterwards:
//!
//! - [`Match::on_node_clicked`]: the only gameplay entry point
//! - [`Match::pause`], [`Match::resume`], [`Match::reset`]
//! - [`Match::tick`] once per second from the host's scheduler
//!
//! ## Turn flow
//!
//! Placement: a click on a placeable node puts the acting player's titan
//! there. If that fills the innermost unlocked circuit, the next circuit
//! unlocks. Once both players have placed their allotment the match moves to
//! the movement phase (the player who placed last also moves first);
//! otherwise the turn passes.
//!
//! Movement: the first click selects one of the acting player's titans, a
//! click on the same node drops the selection, and a click elsewhere tries to
//! move there. A refused move keeps the selection and the turn. After a
//! move, the capture rule runs against the opponent (extended ruleset), any
//! newly filled outer circuit unlocks the next one, and a full innermost
//! circuit ends the match.
//!
//! ```
//! use titan_circuits::core::{GameConfig, NodeId, Player};
//! use titan_circuits::rules::{ClickOutcome, Match, Phase};
//!
//! let mut game = Match::new(GameConfig::default()).unwrap();
//! assert_eq!(game.current_player(), Player::Red);
//!
//! let outcome = game.on_node_clicked(NodeId(0)).unwrap();
//! assert!(matches!(outcome, ClickOutcome::Acted(_)));
//! assert_eq!(game.current_player(), Player::Blue);
//! assert_eq!(game.phase(), Phase::Placement);
//! ```

use smallvec::SmallVec;
use tracing::{debug, info, instrument};

use super::clock::{ClockEvent, MatchClocks};
use super::history::History;
use super::phase::{GameResult, Phase};
use super::view::MatchView;
use crate::board::{capture_after_move, Board, Captured, Topology};
use crate::core::{
    Action, ActionRecord, ConfigError, GameConfig, NodeId, Player, PlayerMap, Rejection, Ruleset,
};

/// Circuits unlocked by a single action.
pub type Unlocked = SmallVec<[usize; 2]>;

/// What a successful placement or move changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnReport {
    /// Who acted.
    pub player: Player,
    /// The action that was applied.
    pub action: Action,
    /// Circuits unlocked as a consequence.
    pub unlocked: Unlocked,
    /// Opposing titans removed by the capture rule.
    pub captured: Captured,
    /// Did this action complete placement and start the movement phase?
    pub phase_changed: bool,
    /// Set when this action ended the match.
    pub result: Option<GameResult>,
}

/// Response to a node click.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Movement phase: the acting player's titan on this node is selected.
    Selected(NodeId),
    /// Movement phase: the selection on this node was dropped.
    Deselected(NodeId),
    /// A placement or move was applied.
    Acted(TurnReport),
}

/// Match state restored by undo/redo.
#[derive(Clone, Debug)]
struct Snapshot {
    board: Board,
    current: Player,
    phase: Phase,
    placed: PlayerMap<usize>,
    turn: u32,
}

/// A single match: board, turn order, phase, clocks and history.
#[derive(Clone, Debug)]
pub struct Match {
    config: GameConfig,
    board: Board,
    current: Player,
    phase: Phase,
    placed: PlayerMap<usize>,
    selected: Option<NodeId>,
    paused: bool,
    clocks: MatchClocks,
    result: Option<GameResult>,
    turn: u32,
    history: History<Snapshot>,
}

impl Match {
    /// Start a match. Red acts first.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        let topology = Topology::build(&config)?;
        let clocks = MatchClocks::new(config.game_time_secs, config.turn_time_secs);
        Ok(Self {
            board: Board::new(topology.into()),
            config,
            current: Player::Red,
            phase: Phase::Placement,
            placed: PlayerMap::default(),
            selected: None,
            paused: false,
            clocks,
            result: None,
            turn: 1,
            history: History::new(),
        })
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn ruleset(&self) -> Ruleset {
        self.config.ruleset
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Player {
        self.current
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Turn number, starting at 1. Advances on every turn change.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn
    }

    /// Titans `player` has placed so far.
    #[must_use]
    pub fn placed(&self, player: Player) -> usize {
        self.placed[player]
    }

    /// Titans `player` still has to place.
    #[must_use]
    pub fn remaining(&self, player: Player) -> usize {
        self.config.titans_per_player - self.placed[player]
    }

    /// The titan selected for a move, if any.
    #[must_use]
    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.result.is_some()
    }

    /// Final result once the match is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[must_use]
    pub fn score(&self, player: Player) -> u32 {
        self.board.score(player)
    }

    #[must_use]
    pub fn clocks(&self) -> &MatchClocks {
        &self.clocks
    }

    /// Seconds left on the match clock.
    #[must_use]
    pub fn game_time_remaining(&self) -> u32 {
        self.clocks.game.remaining()
    }

    /// Seconds left for the acting player.
    #[must_use]
    pub fn turn_time_remaining(&self) -> u32 {
        self.clocks.turn.remaining()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Journalled actions still applied, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &ActionRecord> + '_ {
        self.history.records()
    }

    /// Every action the acting player could take right now.
    #[must_use]
    pub fn legal_actions(&self) -> Vec<Action> {
        if self.is_over() {
            return Vec::new();
        }
        match self.phase {
            Phase::Placement => self
                .board
                .placeable_nodes()
                .into_iter()
                .map(|node| Action::Place { node })
                .collect(),
            Phase::Movement => self
                .board
                .titans(self.current)
                .flat_map(|from| {
                    self.board
                        .legal_destinations(from)
                        .into_iter()
                        .map(move |to| Action::Move { from, to })
                })
                .collect(),
        }
    }

    /// Snapshot of everything a renderer draws.
    #[must_use]
    pub fn view(&self) -> MatchView {
        MatchView::capture(self)
    }

    // === Input ===

    /// Handle a click on `node`.
    ///
    /// Refused while the match is over or paused, and for any rule
    /// violation; a refusal changes nothing.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a node of this board.
    #[instrument(skip(self), fields(player = %self.current, phase = ?self.phase))]
    pub fn on_node_clicked(&mut self, node: NodeId) -> Result<ClickOutcome, Rejection> {
        self.ensure_live()?;
        match self.phase {
            Phase::Placement => self.place(node).map(ClickOutcome::Acted),
            Phase::Movement => self.click_movement(node),
        }
    }

    fn click_movement(&mut self, node: NodeId) -> Result<ClickOutcome, Rejection> {
        match self.selected {
            None => {
                if self.board.occupant(node) != Some(self.current) {
                    return Err(Rejection::NotOwnPiece);
                }
                self.selected = Some(node);
                debug!(%node, "titan selected");
                Ok(ClickOutcome::Selected(node))
            }
            Some(from) if from == node => {
                self.selected = None;
                debug!(%node, "selection cleared");
                Ok(ClickOutcome::Deselected(node))
            }
            Some(from) => self.step(from, node).map(ClickOutcome::Acted),
        }
    }

    /// Apply a whole action for the acting player, bypassing the click
    /// protocol. Clears any selection on success.
    pub fn apply(&mut self, action: Action) -> Result<TurnReport, Rejection> {
        self.ensure_live()?;
        match (self.phase, action) {
            (Phase::Placement, Action::Place { node }) => self.place(node),
            (Phase::Movement, Action::Move { from, to }) => self.step(from, to),
            _ => Err(Rejection::WrongPhase),
        }
    }

    fn place(&mut self, node: NodeId) -> Result<TurnReport, Rejection> {
        let player = self.current;
        let before = self.snapshot();
        self.board.place(node, player)?;
        self.placed[player] += 1;

        let mut unlocked = Unlocked::new();
        let frontier = self.board.innermost_unlocked();
        if self.board.is_circuit_full(frontier) && self.board.unlock_next_circuit() {
            unlocked.push(frontier + 1);
        }

        let allotment = self.config.titans_per_player;
        let phase_changed = Player::ALL.iter().all(|&p| self.placed[p] == allotment);
        if phase_changed {
            self.phase = Phase::Movement;
            // Undo never reaches back across the phase change.
            self.history.clear();
            info!(first = %player, "all titans placed, movement phase begins");
        } else {
            self.advance_turn();
        }

        let action = Action::Place { node };
        if !phase_changed {
            self.journal(player, action, before);
        }
        Ok(TurnReport {
            player,
            action,
            unlocked,
            captured: Captured::new(),
            phase_changed,
            result: None,
        })
    }

    fn step(&mut self, from: NodeId, to: NodeId) -> Result<TurnReport, Rejection> {
        let player = self.current;
        let before = self.snapshot();
        self.board.move_titan(from, to, player)?;
        self.selected = None;

        let captured = capture_after_move(&mut self.board, self.config.ruleset, player);

        let mut unlocked = Unlocked::new();
        let innermost = self.board.topology().innermost_circuit();
        for circuit in 0..innermost {
            if self.board.is_circuit_full(circuit)
                && !self.board.is_unlocked(circuit + 1)
                && self.board.unlock_next_circuit()
            {
                unlocked.push(circuit + 1);
            }
        }

        let action = Action::Move { from, to };
        let result = if self.board.is_circuit_full(innermost) {
            Some(self.finish())
        } else {
            self.advance_turn();
            self.journal(player, action, before);
            None
        };

        Ok(TurnReport {
            player,
            action,
            unlocked,
            captured,
            phase_changed: false,
            result,
        })
    }

    fn ensure_live(&self) -> Result<(), Rejection> {
        if self.is_over() {
            return Err(Rejection::GameOver);
        }
        if self.paused {
            return Err(Rejection::Paused);
        }
        Ok(())
    }

    /// Pass the turn and restart the turn clock.
    ///
    /// During placement a player who has placed their whole allotment is
    /// skipped, so the allotment holds even after a timed-out turn.
    fn advance_turn(&mut self) {
        let next = self.current.opponent();
        let exhausted = self.phase == Phase::Placement
            && self.placed[next] >= self.config.titans_per_player;
        if !exhausted {
            self.current = next;
        }
        self.selected = None;
        self.turn += 1;
        self.clocks.turn.reset();
    }

    fn finish(&mut self) -> GameResult {
        let scores = self.board.scores();
        let result = GameResult::from_scores(&scores);
        self.result = Some(result);
        self.selected = None;
        info!(
            red = scores[Player::Red],
            blue = scores[Player::Blue],
            ?result,
            "match over"
        );
        result
    }

    // === Clocks ===

    /// One second of the match clock. Ends the match at zero.
    ///
    /// No-op while paused or after the match ended.
    pub fn tick_game_clock(&mut self) -> Option<ClockEvent> {
        if self.paused || self.is_over() {
            return None;
        }
        self.clocks
            .game
            .tick()
            .then(|| ClockEvent::MatchExpired(self.finish()))
    }

    /// One second of the turn clock. Passes the turn at zero without
    /// touching the board.
    ///
    /// No-op while paused or after the match ended.
    pub fn tick_turn_clock(&mut self) -> Option<ClockEvent> {
        if self.paused || self.is_over() {
            return None;
        }
        if !self.clocks.turn.tick() {
            return None;
        }
        debug!(player = %self.current, "turn clock expired");
        self.advance_turn();
        Some(ClockEvent::TurnExpired { next: self.current })
    }

    /// One second on both clocks. The match clock runs first; if it ends
    /// the match the turn clock is not ticked.
    pub fn tick(&mut self) -> Option<ClockEvent> {
        self.tick_game_clock().or_else(|| self.tick_turn_clock())
    }

    // === Pause / reset ===

    /// Suspend both clocks and refuse clicks. Ignored once the match is over.
    pub fn pause(&mut self) {
        if !self.paused && !self.is_over() {
            self.paused = true;
            info!("match paused");
        }
    }

    /// Resume after [`pause`](Self::pause). Elapsed time is kept.
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            info!("match resumed");
        }
    }

    /// Flip the pause flag. Returns the new state.
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    /// Start over with an empty board, full clocks and Red to place.
    ///
    /// The only way back to the placement phase.
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.topology().clone());
        self.current = Player::Red;
        self.phase = Phase::Placement;
        self.placed = PlayerMap::default();
        self.selected = None;
        self.paused = false;
        self.clocks.reset();
        self.result = None;
        self.turn = 1;
        self.history.clear();
        info!(ruleset = ?self.config.ruleset, "match reset");
    }

    /// Switch rule set. Resets the match.
    pub fn set_ruleset(&mut self, ruleset: Ruleset) {
        self.config.ruleset = ruleset;
        self.reset();
    }

    // === History ===

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            current: self.current,
            phase: self.phase,
            placed: self.placed,
            turn: self.turn,
        }
    }

    fn journal(&mut self, player: Player, action: Action, before: Snapshot) {
        if !self.config.ruleset.history_enabled() {
            return;
        }
        let record = ActionRecord::new(player, action, before.turn);
        let after = self.snapshot();
        self.history.record(record, before, after);
    }

    /// Restore occupancy and turn state. Unlocked circuits stay unlocked.
    fn restore(&mut self, snapshot: Snapshot) {
        self.board.restore_occupancy(&snapshot.board);
        self.current = snapshot.current;
        self.phase = snapshot.phase;
        self.placed = snapshot.placed;
        self.turn = snapshot.turn;
        self.selected = None;
        self.clocks.turn.reset();
    }

    /// Take back the most recent journalled action.
    ///
    /// Returns `Ok(None)` when there is nothing to undo, which is always the
    /// case under the base ruleset.
    pub fn undo(&mut self) -> Result<Option<ActionRecord>, Rejection> {
        self.ensure_live()?;
        let Some((record, snapshot)) = self.history.undo() else {
            return Ok(None);
        };
        self.restore(snapshot);
        info!(player = %record.player, action = ?record.action, "action undone");
        Ok(Some(record))
    }

    /// Re-apply the most recently undone action.
    pub fn redo(&mut self) -> Result<Option<ActionRecord>, Rejection> {
        self.ensure_live()?;
        let Some((record, snapshot)) = self.history.redo() else {
            return Ok(None);
        };
        self.restore(snapshot);
        info!(player = %record.player, action = ?record.action, "action redone");
        Ok(Some(record))
    }
}
