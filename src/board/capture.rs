//! Surrounded-titan capture (extended ruleset).
//!
//! A titan is surrounded when it has at least one neighbor and every
//! neighbor holds an opposing titan. After each successful move under the
//! extended ruleset, every surrounded titan of the player who did *not* move
//! is removed. Capture never runs during placement and never removes the
//! mover's own titans.
//!
//! Removing a titan can only free nodes next to its own color, and a titan
//! with an own-colored neighbor is never surrounded, so the order in which
//! surrounded titans are removed does not matter.

use smallvec::SmallVec;
use tracing::info;

use super::state::Board;
use crate::core::{NodeId, Player, Ruleset};

/// Titans removed by one capture pass.
pub type Captured = SmallVec<[NodeId; 4]>;

impl Board {
    /// Is the titan on `node` surrounded by opposing titans?
    ///
    /// An empty node, an isolated node, and a titan with any empty or
    /// own-colored neighbor are never surrounded.
    #[must_use]
    pub fn is_surrounded(&self, node: NodeId) -> bool {
        let Some(owner) = self.occupant(node) else {
            return false;
        };
        let neighbors = self.topology().neighbors(node);
        let opponent = Some(owner.opponent());
        !neighbors.is_empty() && neighbors.iter().all(|&n| self.occupant(n) == opponent)
    }

    /// `player`'s titans that are currently surrounded, in id order.
    #[must_use]
    pub fn surrounded_titans(&self, player: Player) -> Captured {
        self.titans(player).filter(|&node| self.is_surrounded(node)).collect()
    }

    /// Remove every surrounded titan belonging to `player`.
    ///
    /// Returns whether anything was removed. Edge control is recomputed
    /// after the removals.
    pub fn remove_surrounded(&mut self, player: Player) -> bool {
        !self.take_surrounded(player).is_empty()
    }

    fn take_surrounded(&mut self, player: Player) -> Captured {
        let captured = self.surrounded_titans(player);
        for &node in &captured {
            self.clear(node);
        }
        captured
    }
}

/// Run the capture rule after `mover` completed a move.
///
/// Removes the opponent's surrounded titans when `ruleset` enables capture
/// and returns the nodes that were cleared. Under the base ruleset the board
/// is left untouched.
pub fn capture_after_move(board: &mut Board, ruleset: Ruleset, mover: Player) -> Captured {
    if !ruleset.capture_enabled() {
        return Captured::new();
    }
    let victim = mover.opponent();
    let captured = board.take_surrounded(victim);
    if !captured.is_empty() {
        info!(player = %victim, count = captured.len(), "titans captured");
    }
    captured
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::board::Topology;
    use crate::core::GameConfig;

    fn board() -> Board {
        Board::new(Arc::new(Topology::build(&GameConfig::default()).unwrap()))
    }

    /// Red on outer position 2 (neighbors 1, 3 and cross-link 8).
    fn surrounded_red(board: &mut Board) {
        board.unlock_next_circuit();
        board.place(NodeId(2), Player::Red).unwrap();
        board.place(NodeId(1), Player::Blue).unwrap();
        board.place(NodeId(3), Player::Blue).unwrap();
        board.place(NodeId(8), Player::Blue).unwrap();
    }

    #[test]
    fn test_surrounded_detection() {
        let mut board = board();
        surrounded_red(&mut board);

        assert!(board.is_surrounded(NodeId(2)));
        // Blue titans each have an empty neighbor.
        assert!(!board.is_surrounded(NodeId(1)));
        // Empty nodes are never surrounded.
        assert!(!board.is_surrounded(NodeId(0)));
    }

    #[test]
    fn test_partial_surround_is_not_surrounded() {
        let mut board = board();
        board.unlock_next_circuit();
        board.place(NodeId(2), Player::Red).unwrap();
        board.place(NodeId(1), Player::Blue).unwrap();
        board.place(NodeId(3), Player::Blue).unwrap();
        assert!(!board.is_surrounded(NodeId(2)));

        board.place(NodeId(8), Player::Red).unwrap();
        assert!(!board.is_surrounded(NodeId(2)));
    }

    #[test]
    fn test_lone_titan_is_not_surrounded() {
        let mut board = board();
        board.place(NodeId(0), Player::Red).unwrap();
        assert!(!board.is_surrounded(NodeId(0)));
    }

    #[test]
    fn test_remove_surrounded() {
        let mut board = board();
        surrounded_red(&mut board);

        assert!(!board.remove_surrounded(Player::Blue));
        assert!(board.remove_surrounded(Player::Red));
        assert_eq!(board.occupant(NodeId(2)), None);
        assert!(!board.remove_surrounded(Player::Red));
    }

    #[test]
    fn test_capture_gated_by_ruleset() {
        let mut board = board();
        surrounded_red(&mut board);

        let captured = capture_after_move(&mut board, Ruleset::Base, Player::Blue);
        assert!(captured.is_empty());
        assert_eq!(board.occupant(NodeId(2)), Some(Player::Red));

        let captured = capture_after_move(&mut board, Ruleset::Extended, Player::Blue);
        assert_eq!(captured.as_slice(), &[NodeId(2)]);
        assert_eq!(board.occupant(NodeId(2)), None);
    }

    #[test]
    fn test_capture_spares_the_mover() {
        let mut board = board();
        surrounded_red(&mut board);

        // Red moved last: only Blue titans are candidates.
        let captured = capture_after_move(&mut board, Ruleset::Extended, Player::Red);
        assert!(captured.is_empty());
        assert_eq!(board.occupant(NodeId(2)), Some(Player::Red));
    }

    #[test]
    fn test_capture_recomputes_control() {
        let mut board = board();
        surrounded_red(&mut board);
        board.place(NodeId(7), Player::Blue).unwrap();
        // Blue 7-8 ring edge has weight 5.
        assert_eq!(board.score(Player::Blue), 5);

        board.remove_surrounded(Player::Red);
        assert_eq!(board.score(Player::Red), 0);
        assert_eq!(board.score(Player::Blue), 5);
    }
}
