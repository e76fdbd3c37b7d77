//! Board state: occupancy, edge control and circuit unlocking.
//!
//! `Board` is the sole mutator of node and edge state. Node occupancy is the
//! only primary state; edge control and scores are derived from it:
//!
//! - An edge is controlled by a player iff both endpoints hold that
//!   player's titans.
//! - A player's score is the summed weight of the edges they control.
//!
//! Edge control is recomputed from scratch after every occupancy change and
//! scores are summed on demand, so neither can drift from the occupancy
//! they describe.
//!
//! All per-node and per-edge state lives in `im` persistent vectors, so
//! cloning a `Board` for a history checkpoint is cheap.

use std::sync::Arc;

use im::Vector;
use tracing::{debug, info};

use super::topology::{Edge, Topology};
use crate::core::{EdgeId, NodeId, Player, PlayerMap, Rejection};

/// Mutable board state over a shared, immutable topology.
///
/// ## Usage
///
/// ```
/// use std::sync::Arc;
/// use titan_circuits::board::{Board, Topology};
/// use titan_circuits::core::{GameConfig, NodeId, Player};
///
/// let topology = Arc::new(Topology::build(&GameConfig::default()).unwrap());
/// let mut board = Board::new(topology);
///
/// // Outer positions 3 and 4 share the weight-3 edge.
/// board.place(NodeId(3), Player::Red).unwrap();
/// board.place(NodeId(4), Player::Red).unwrap();
/// assert_eq!(board.score(Player::Red), 3);
/// ```
#[derive(Clone, Debug)]
pub struct Board {
    topology: Arc<Topology>,
    /// Occupant per node, indexed by `NodeId`.
    occupants: Vector<Option<Player>>,
    /// Controller per edge, indexed by `EdgeId`. Derived from `occupants`.
    controllers: Vector<Option<Player>>,
    /// Unlocked circuit indices in unlock order. Always `[0, 1, .., k]`.
    unlocked: Vector<usize>,
}

impl Board {
    /// Create an empty board with only the outermost circuit unlocked.
    #[must_use]
    pub fn new(topology: Arc<Topology>) -> Self {
        let occupants = std::iter::repeat(None).take(topology.node_count()).collect();
        let controllers = std::iter::repeat(None).take(topology.edge_count()).collect();
        Self {
            topology,
            occupants,
            controllers,
            unlocked: Vector::unit(0),
        }
    }

    /// The board graph.
    #[must_use]
    pub fn topology(&self) -> &Arc<Topology> {
        &self.topology
    }

    /// Is `node` a node of this board?
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.topology.contains(node)
    }

    fn slot(&self, node: NodeId) -> usize {
        self.topology.node(node).id.index()
    }

    // === Queries ===

    /// The titan on `node`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not a node of this board.
    #[must_use]
    pub fn occupant(&self, node: NodeId) -> Option<Player> {
        self.occupants[self.slot(node)]
    }

    /// The player controlling `edge`, if any.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is not an edge of this board.
    #[must_use]
    pub fn controller(&self, edge: EdgeId) -> Option<Player> {
        self.controllers[self.topology.edge(edge).id.index()]
    }

    /// Edges paired with their current controller, in id order.
    pub fn edge_states(&self) -> impl Iterator<Item = (&Edge, Option<Player>)> + '_ {
        self.topology.edges().iter().zip(self.controllers.iter().copied())
    }

    /// Unlocked circuit indices in unlock order.
    pub fn unlocked_circuits(&self) -> impl Iterator<Item = usize> + '_ {
        self.unlocked.iter().copied()
    }

    /// Is `circuit` open for placement?
    #[must_use]
    pub fn is_unlocked(&self, circuit: usize) -> bool {
        self.unlocked.iter().any(|&c| c == circuit)
    }

    /// The innermost circuit unlocked so far.
    #[must_use]
    pub fn innermost_unlocked(&self) -> usize {
        self.unlocked.last().copied().unwrap_or(0)
    }

    /// Are `x` and `y` joined by an edge, in either order?
    #[must_use]
    pub fn are_adjacent(&self, x: NodeId, y: NodeId) -> bool {
        self.topology.are_adjacent(x, y)
    }

    /// Why a titan could not be put on `node`, if it could not.
    ///
    /// A locked circuit takes precedence over occupancy.
    pub fn check_placeable(&self, node: NodeId) -> Result<(), Rejection> {
        let circuit = self.topology.node(node).circuit;
        if !self.is_unlocked(circuit) {
            return Err(Rejection::CircuitLocked);
        }
        if self.occupant(node).is_some() {
            return Err(Rejection::NodeOccupied);
        }
        Ok(())
    }

    /// Is `node` empty and on an unlocked circuit?
    #[must_use]
    pub fn is_placeable(&self, node: NodeId) -> bool {
        self.check_placeable(node).is_ok()
    }

    /// Every node a titan could be placed on right now.
    #[must_use]
    pub fn placeable_nodes(&self) -> Vec<NodeId> {
        self.topology
            .nodes()
            .iter()
            .map(|n| n.id)
            .filter(|&id| self.is_placeable(id))
            .collect()
    }

    /// Every node the titan on `from` could move to right now.
    #[must_use]
    pub fn legal_destinations(&self, from: NodeId) -> Vec<NodeId> {
        if self.occupant(from).is_none() {
            return Vec::new();
        }
        self.topology
            .neighbors(from)
            .iter()
            .copied()
            .filter(|&to| self.is_placeable(to))
            .collect()
    }

    /// Nodes holding `player`'s titans, in id order.
    pub fn titans(&self, player: Player) -> impl Iterator<Item = NodeId> + '_ {
        self.occupants
            .iter()
            .enumerate()
            .filter(move |(_, occupant)| **occupant == Some(player))
            .map(|(i, _)| NodeId(i as u16))
    }

    /// Number of titans `player` has on the board.
    #[must_use]
    pub fn titan_count(&self, player: Player) -> usize {
        self.titans(player).count()
    }

    /// Is every node of `circuit` occupied?
    #[must_use]
    pub fn is_circuit_full(&self, circuit: usize) -> bool {
        circuit < self.topology.circuit_count()
            && self
                .topology
                .circuit_nodes(circuit)
                .all(|node| self.occupant(node).is_some())
    }

    /// Summed weight of the edges `player` controls.
    #[must_use]
    pub fn score(&self, player: Player) -> u32 {
        self.edge_states()
            .filter(|(_, controller)| *controller == Some(player))
            .map(|(edge, _)| edge.weight)
            .sum()
    }

    /// Both scores.
    #[must_use]
    pub fn scores(&self) -> PlayerMap<u32> {
        PlayerMap::new(|player| self.score(player))
    }

    // === Mutations ===

    /// Put a new titan for `player` on `node`.
    ///
    /// Fails without touching the board if the node is on a locked circuit
    /// or already occupied.
    pub fn place(&mut self, node: NodeId, player: Player) -> Result<(), Rejection> {
        self.check_placeable(node)?;
        let slot = self.slot(node);
        self.occupants.set(slot, Some(player));
        self.recompute_edge_control();
        debug!(%node, %player, "titan placed");
        Ok(())
    }

    /// Move `player`'s titan from `from` to the adjacent empty node `to`.
    ///
    /// Checks, in order: the titan on `from` belongs to `player`, `to` is on
    /// an unlocked circuit, `to` is empty, and the two nodes share an edge.
    /// Fails without touching the board if any check fails.
    pub fn move_titan(&mut self, from: NodeId, to: NodeId, player: Player) -> Result<(), Rejection> {
        if self.occupant(from) != Some(player) {
            return Err(Rejection::NotOwnPiece);
        }
        self.check_placeable(to)?;
        if !self.are_adjacent(from, to) {
            return Err(Rejection::NotAdjacent);
        }

        let (from_slot, to_slot) = (self.slot(from), self.slot(to));
        self.occupants.set(from_slot, None);
        self.occupants.set(to_slot, Some(player));
        self.recompute_edge_control();
        debug!(%from, %to, %player, "titan moved");
        Ok(())
    }

    /// Remove whatever titan stands on `node`.
    ///
    /// Returns the removed titan's owner.
    pub(crate) fn clear(&mut self, node: NodeId) -> Option<Player> {
        let slot = self.slot(node);
        let previous = self.occupants.set(slot, None);
        if previous.is_some() {
            self.recompute_edge_control();
        }
        previous
    }

    /// Rebuild every edge's controller from node occupancy.
    ///
    /// A pure function of occupancy, so calling it again without an
    /// occupancy change leaves the controllers unchanged.
    pub fn recompute_edge_control(&mut self) {
        let occupants = &self.occupants;
        self.controllers = self
            .topology
            .edges()
            .iter()
            .map(|edge| match (occupants[edge.a.index()], occupants[edge.b.index()]) {
                (Some(x), Some(y)) if x == y => Some(x),
                _ => None,
            })
            .collect();
    }

    /// Take over `other`'s titans, keeping this board's unlocked circuits.
    ///
    /// Used to roll occupancy back or forward; circuits never re-lock.
    ///
    /// # Panics
    ///
    /// Panics if the two boards do not share a topology.
    pub fn restore_occupancy(&mut self, other: &Board) {
        assert!(
            Arc::ptr_eq(&self.topology, &other.topology),
            "cannot restore occupancy from a different board"
        );
        self.occupants = other.occupants.clone();
        self.recompute_edge_control();
    }

    /// Unlock the circuit after the innermost unlocked one.
    ///
    /// Circuits unlock strictly in order, one at a time. Returns `false`
    /// once every circuit is unlocked.
    pub fn unlock_next_circuit(&mut self) -> bool {
        if self.unlocked.len() >= self.topology.circuit_count() {
            return false;
        }
        let next = self.innermost_unlocked() + 1;
        self.unlocked.push_back(next);
        info!(circuit = next, "circuit unlocked");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn board() -> Board {
        Board::new(Arc::new(Topology::build(&GameConfig::default()).unwrap()))
    }

    fn fill_outer(board: &mut Board) {
        for (i, node) in (0..6).map(NodeId).enumerate() {
            let player = if i % 2 == 0 { Player::Red } else { Player::Blue };
            board.place(node, player).unwrap();
        }
    }

    #[test]
    fn test_new_board() {
        let board = board();
        assert!(board.topology().nodes().iter().all(|n| board.occupant(n.id).is_none()));
        assert_eq!(board.unlocked_circuits().collect::<Vec<_>>(), vec![0]);
        assert_eq!(board.score(Player::Red), 0);
        assert_eq!(board.placeable_nodes().len(), 6);
    }

    #[test]
    fn test_place_on_locked_circuit_fails() {
        let mut board = board();
        let before = board.clone();

        assert_eq!(board.place(NodeId(6), Player::Red), Err(Rejection::CircuitLocked));
        assert_eq!(board.place(NodeId(17), Player::Blue), Err(Rejection::CircuitLocked));

        assert_eq!(board.occupants, before.occupants);
        assert_eq!(board.controllers, before.controllers);
    }

    #[test]
    fn test_place_on_occupied_node_fails() {
        let mut board = board();
        board.place(NodeId(0), Player::Red).unwrap();
        assert_eq!(board.place(NodeId(0), Player::Blue), Err(Rejection::NodeOccupied));
        assert_eq!(board.occupant(NodeId(0)), Some(Player::Red));
    }

    #[test]
    fn test_opposing_neighbors_control_nothing() {
        let mut board = board();
        board.place(NodeId(0), Player::Red).unwrap();
        board.place(NodeId(1), Player::Blue).unwrap();

        assert!(board.edge_states().all(|(_, c)| c.is_none()));
        assert_eq!(board.score(Player::Red), 0);
        assert_eq!(board.score(Player::Blue), 0);
    }

    #[test]
    fn test_weight_three_edge() {
        let mut board = board();
        board.place(NodeId(3), Player::Red).unwrap();
        board.place(NodeId(4), Player::Red).unwrap();

        assert_eq!(board.score(Player::Red), 3);
        assert_eq!(board.controller(EdgeId(3)), Some(Player::Red));
        assert_eq!(board.scores()[Player::Blue], 0);
    }

    #[test]
    fn test_move_rules() {
        let mut board = board();
        board.place(NodeId(0), Player::Red).unwrap();
        board.place(NodeId(1), Player::Blue).unwrap();

        // Not your titan.
        assert_eq!(board.move_titan(NodeId(1), NodeId(2), Player::Red), Err(Rejection::NotOwnPiece));
        // Empty origin.
        assert_eq!(board.move_titan(NodeId(2), NodeId(3), Player::Red), Err(Rejection::NotOwnPiece));
        // Destination occupied.
        assert_eq!(board.move_titan(NodeId(0), NodeId(1), Player::Red), Err(Rejection::NodeOccupied));
        // Destination locked even though adjacent by cross-link.
        assert_eq!(board.move_titan(NodeId(0), NodeId(6), Player::Red), Err(Rejection::CircuitLocked));
        // Not adjacent.
        assert_eq!(board.move_titan(NodeId(0), NodeId(3), Player::Red), Err(Rejection::NotAdjacent));

        board.move_titan(NodeId(0), NodeId(5), Player::Red).unwrap();
        assert_eq!(board.occupant(NodeId(0)), None);
        assert_eq!(board.occupant(NodeId(5)), Some(Player::Red));
    }

    #[test]
    fn test_move_updates_control() {
        let mut board = board();
        board.place(NodeId(0), Player::Red).unwrap();
        board.place(NodeId(2), Player::Red).unwrap();
        assert_eq!(board.score(Player::Red), 0);

        board.move_titan(NodeId(0), NodeId(1), Player::Red).unwrap();
        // Edge 1 joins positions 1 and 2 with weight 1.
        assert_eq!(board.controller(EdgeId(1)), Some(Player::Red));
        assert_eq!(board.score(Player::Red), 1);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut board = board();
        fill_outer(&mut board);
        let once = board.controllers.clone();
        board.recompute_edge_control();
        assert_eq!(board.controllers, once);
    }

    #[test]
    fn test_circuit_full_and_unlock() {
        let mut board = board();
        assert!(!board.is_circuit_full(0));
        fill_outer(&mut board);
        assert!(board.is_circuit_full(0));
        assert!(!board.is_circuit_full(1));
        assert!(!board.is_circuit_full(3));

        assert!(board.unlock_next_circuit());
        assert_eq!(board.unlocked_circuits().collect::<Vec<_>>(), vec![0, 1]);
        assert!(board.unlock_next_circuit());
        assert!(!board.unlock_next_circuit());
        assert_eq!(board.unlocked_circuits().collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(board.innermost_unlocked(), 2);
    }

    #[test]
    fn test_legal_destinations() {
        let mut board = board();
        board.place(NodeId(0), Player::Red).unwrap();
        board.place(NodeId(1), Player::Blue).unwrap();

        // Node 6 is a cross-link neighbor but its circuit is locked.
        assert_eq!(board.legal_destinations(NodeId(0)), vec![NodeId(5)]);
        board.unlock_next_circuit();
        let mut destinations = board.legal_destinations(NodeId(0));
        destinations.sort();
        assert_eq!(destinations, vec![NodeId(5), NodeId(6)]);
        assert!(board.legal_destinations(NodeId(2)).is_empty());
    }

    #[test]
    fn test_titans() {
        let mut board = board();
        fill_outer(&mut board);
        assert_eq!(
            board.titans(Player::Red).collect::<Vec<_>>(),
            vec![NodeId(0), NodeId(2), NodeId(4)]
        );
        assert_eq!(board.titan_count(Player::Blue), 3);
    }

    #[test]
    fn test_restore_occupancy_keeps_unlocks() {
        let mut board = board();
        let empty = board.clone();
        fill_outer(&mut board);
        board.unlock_next_circuit();

        board.restore_occupancy(&empty);
        assert_eq!(board.titan_count(Player::Red), 0);
        assert!(board.edge_states().all(|(_, c)| c.is_none()));
        assert!(board.is_unlocked(1));
    }

    #[test]
    fn test_full_control_reaches_total_weight() {
        let config = GameConfig::default().with_board(1, 4).with_titans(2);
        let mut board = Board::new(Arc::new(Topology::build(&config).unwrap()));
        let total = board.topology().total_weight();

        for node in 0..3 {
            board.place(NodeId(node), Player::Red).unwrap();
            assert!(board.score(Player::Red) < total);
        }
        board.place(NodeId(3), Player::Red).unwrap();
        assert!(board.edge_states().all(|(_, c)| c == Some(Player::Red)));
        assert_eq!(board.score(Player::Red), total);
    }

    #[test]
    fn test_heaviest_valid_weights_score_without_overflow() {
        let heavy = u32::MAX / 6;
        let config = GameConfig::default()
            .with_board(1, 6)
            .with_titans(3)
            .with_ring_weights(vec![vec![heavy]]);
        let mut board = Board::new(Arc::new(Topology::build(&config).unwrap()));
        for node in 0..3 {
            board.place(NodeId(node), Player::Red).unwrap();
        }
        assert_eq!(board.score(Player::Red), 2 * heavy);
        assert_eq!(board.topology().total_weight(), 6 * heavy);
    }

    #[test]
    fn test_clear() {
        let mut board = board();
        board.place(NodeId(3), Player::Red).unwrap();
        board.place(NodeId(4), Player::Red).unwrap();

        assert_eq!(board.clear(NodeId(4)), Some(Player::Red));
        assert_eq!(board.clear(NodeId(4)), None);
        assert_eq!(board.score(Player::Red), 0);
    }
}
