//! Match phases and results.

use serde::{Deserialize, Serialize};

use crate::core::{Player, PlayerMap};

/// Match phase. Progresses `Placement -> Movement` exactly once; only a
/// reset returns a match to placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Players alternate putting titans on unlocked circuits.
    #[default]
    Placement,
    /// Players alternate sliding titans along edges.
    Movement,
}

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Strictly higher score.
    Winner(Player),
    /// Equal scores.
    Draw,
}

impl GameResult {
    /// Decide a match from final scores.
    ///
    /// ```
    /// use titan_circuits::core::{Player, PlayerMap};
    /// use titan_circuits::rules::GameResult;
    ///
    /// let scores = PlayerMap::new(|p| if p == Player::Blue { 12 } else { 7 });
    /// assert_eq!(GameResult::from_scores(&scores), GameResult::Winner(Player::Blue));
    /// ```
    #[must_use]
    pub fn from_scores(scores: &PlayerMap<u32>) -> Self {
        let (red, blue) = (scores[Player::Red], scores[Player::Blue]);
        match red.cmp(&blue) {
            std::cmp::Ordering::Greater => GameResult::Winner(Player::Red),
            std::cmp::Ordering::Less => GameResult::Winner(Player::Blue),
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: Player) -> bool {
        matches!(self, GameResult::Winner(p) if *p == player)
    }
}
