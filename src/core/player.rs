//! Player identification and per-player data storage.
//!
//! ## Player
//!
//! The two colors that contest the board. `Red` always opens a match.
//!
//! ## PlayerMap
//!
//! Fixed two-slot storage indexed by `Player`, used for placed-piece
//! counts, scores and anything else tracked per color.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two players.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    Red,
    Blue,
}

impl Player {
    /// Both players in turn order.
    pub const ALL: [Player; 2] = [Player::Red, Player::Blue];

    /// The opposing color.
    ///
    /// ```
    /// use titan_circuits::core::Player;
    ///
    /// assert_eq!(Player::Red.opponent(), Player::Blue);
    /// assert_eq!(Player::Blue.opponent(), Player::Red);
    /// ```
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Player::Red => Player::Blue,
            Player::Blue => Player::Red,
        }
    }

    /// Slot index (0 for red, 1 for blue).
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Player::Red => 0,
            Player::Blue => 1,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Player::Red => f.write_str("RED"),
            Player::Blue => f.write_str("BLUE"),
        }
    }
}

/// Per-player data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use titan_circuits::core::{Player, PlayerMap};
///
/// let mut placed: PlayerMap<u32> = PlayerMap::with_value(0);
/// placed[Player::Blue] += 1;
///
/// assert_eq!(placed[Player::Red], 0);
/// assert_eq!(placed[Player::Blue], 1);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: [T; 2],
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(factory: impl Fn(Player) -> T) -> Self {
        Self {
            data: [factory(Player::Red), factory(Player::Blue)],
        }
    }

    /// Create a new PlayerMap with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            data: [value.clone(), value],
        }
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: Player) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: Player) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (Player, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Player, &T)> {
        Player::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Player> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: Player) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<Player> for PlayerMap<T> {
    fn index_mut(&mut self, player: Player) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_basics() {
        assert_eq!(Player::Red.index(), 0);
        assert_eq!(Player::Blue.index(), 1);
        assert_eq!(format!("{}", Player::Red), "RED");
        assert_eq!(format!("{}", Player::Blue), "BLUE");
    }

    #[test]
    fn test_opponent_is_involution() {
        for player in Player::ALL {
            assert_ne!(player.opponent(), player);
            assert_eq!(player.opponent().opponent(), player);
        }
    }

    #[test]
    fn test_player_map_new() {
        let map = PlayerMap::new(|p| p.index() * 10);
        assert_eq!(map[Player::Red], 0);
        assert_eq!(map[Player::Blue], 10);
    }

    #[test]
    fn test_player_map_mutation() {
        let mut map: PlayerMap<i32> = PlayerMap::default();
        map[Player::Red] = 3;
        *map.get_mut(Player::Blue) += 7;

        assert_eq!(map[Player::Red], 3);
        assert_eq!(map[Player::Blue], 7);
    }

    #[test]
    fn test_player_map_iter() {
        let map = PlayerMap::new(|p| p.index());
        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(Player::Red, &0), (Player::Blue, &1)]);
    }

    #[test]
    fn test_player_serialization() {
        let json = serde_json::to_string(&Player::Blue).unwrap();
        let deserialized: Player = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, Player::Blue);
    }
}
