//! Render snapshot of a match.
//!
//! `MatchView` is everything a renderer needs to draw one frame: node
//! occupancy with layout angles, edge control, scores, the acting player,
//! remaining allotments, clocks and flags. It is plain data, detached from
//! the match, and serializes with serde so a host can ship it over a wire.

use serde::{Deserialize, Serialize};

use super::controller::Match;
use super::phase::{GameResult, Phase};
use crate::board::EdgeKind;
use crate::core::{EdgeId, NodeId, Player, PlayerMap, Ruleset};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeView {
    pub id: NodeId,
    pub circuit: usize,
    pub position: usize,
    pub occupant: Option<Player>,
    /// Angle of the node on its circle in radians, from the positive x-axis.
    pub angle: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeView {
    pub id: EdgeId,
    pub a: NodeId,
    pub b: NodeId,
    pub weight: u32,
    pub kind: EdgeKind,
    pub controller: Option<Player>,
}

/// One frame of match state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchView {
    pub nodes: Vec<NodeView>,
    pub edges: Vec<EdgeView>,
    pub current_player: Player,
    pub phase: Phase,
    pub scores: PlayerMap<u32>,
    /// Titans each player still has to place.
    pub remaining: PlayerMap<usize>,
    pub unlocked_circuits: Vec<usize>,
    pub selected: Option<NodeId>,
    pub paused: bool,
    pub over: bool,
    pub result: Option<GameResult>,
    pub game_time_remaining: u32,
    pub turn_time_remaining: u32,
    pub ruleset: Ruleset,
    pub can_undo: bool,
    pub can_redo: bool,
}

impl MatchView {
    pub(crate) fn capture(game: &Match) -> Self {
        let board = game.board();
        let topology = board.topology();

        let nodes = topology
            .nodes()
            .iter()
            .map(|node| NodeView {
                id: node.id,
                circuit: node.circuit,
                position: node.position,
                occupant: board.occupant(node.id),
                angle: topology.layout_angle(node.id),
            })
            .collect();

        let edges = board
            .edge_states()
            .map(|(edge, controller)| EdgeView {
                id: edge.id,
                a: edge.a,
                b: edge.b,
                weight: edge.weight,
                kind: edge.kind,
                controller,
            })
            .collect();

        Self {
            nodes,
            edges,
            current_player: game.current_player(),
            phase: game.phase(),
            scores: board.scores(),
            remaining: PlayerMap::new(|player| game.remaining(player)),
            unlocked_circuits: board.unlocked_circuits().collect(),
            selected: game.selected(),
            paused: game.is_paused(),
            over: game.is_over(),
            result: game.result(),
            game_time_remaining: game.game_time_remaining(),
            turn_time_remaining: game.turn_time_remaining(),
            ruleset: game.ruleset(),
            can_undo: game.can_undo(),
            can_redo: game.can_redo(),
        }
    }

    /// The node entry for `id`, if it is on the board.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&NodeView> {
        self.nodes.get(id.index())
    }

    /// Edges currently controlled by `player`.
    pub fn controlled_by(&self, player: Player) -> impl Iterator<Item = &EdgeView> + '_ {
        self.edges
            .iter()
            .filter(move |edge| edge.controller == Some(player))
    }
}
