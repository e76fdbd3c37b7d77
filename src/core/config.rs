//! Game configuration types.
//!
//! A match is configured at startup by a `GameConfig`:
//! - Board shape: circuit count and nodes per circuit
//! - Edge weights: a per-ring weight table plus the cross-link weight
//! - Placement allotment and clock lengths
//! - `Ruleset`: base rules or the extended (capture + history) rules
//!
//! The defaults reproduce the standard board: three circuits of six nodes,
//! four titans each, a ten-minute match clock and a thirty-second turn clock.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Which rule set governs a match.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ruleset {
    /// Placement, movement, edge scoring and circuit unlocking only.
    #[default]
    Base,
    /// Base rules plus surrounded-titan capture and undo/redo history.
    Extended,
}

impl Ruleset {
    /// Are surrounded titans removed after a move?
    #[must_use]
    pub const fn capture_enabled(self) -> bool {
        matches!(self, Ruleset::Extended)
    }

    /// Are actions journalled for undo/redo?
    #[must_use]
    pub const fn history_enabled(self) -> bool {
        matches!(self, Ruleset::Extended)
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of concentric circuits (rings), outermost first.
    pub circuit_count: usize,

    /// Nodes on every circuit.
    pub nodes_per_circuit: usize,

    /// Titans each player places before movement starts.
    pub titans_per_player: usize,

    /// Overall match clock in seconds.
    pub game_time_secs: u32,

    /// Per-turn clock in seconds.
    pub turn_time_secs: u32,

    /// Cycle edge weights, one row per ring (outer first).
    ///
    /// Ring `c` uses row `min(c, rows - 1)`; the edge leaving position `i`
    /// uses `row[i % row.len()]`.
    pub ring_weights: Vec<Vec<u32>>,

    /// Weight of every radial cross-link.
    pub cross_link_weight: u32,

    /// Active rule set.
    pub ruleset: Ruleset,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            circuit_count: 3,
            nodes_per_circuit: 6,
            titans_per_player: 4,
            game_time_secs: 600,
            turn_time_secs: 30,
            ring_weights: vec![
                vec![2, 1, 1, 3, 2, 1],
                vec![4, 5, 6, 4, 5, 6],
                vec![9, 8, 8, 9, 8, 8],
            ],
            cross_link_weight: 1,
            ruleset: Ruleset::Base,
        }
    }
}

impl GameConfig {
    /// Set the board shape.
    #[must_use]
    pub fn with_board(mut self, circuit_count: usize, nodes_per_circuit: usize) -> Self {
        self.circuit_count = circuit_count;
        self.nodes_per_circuit = nodes_per_circuit;
        self
    }

    /// Set the placement allotment.
    #[must_use]
    pub fn with_titans(mut self, titans_per_player: usize) -> Self {
        self.titans_per_player = titans_per_player;
        self
    }

    /// Set both clock lengths.
    #[must_use]
    pub fn with_clocks(mut self, game_time_secs: u32, turn_time_secs: u32) -> Self {
        self.game_time_secs = game_time_secs;
        self.turn_time_secs = turn_time_secs;
        self
    }

    /// Replace the ring weight table.
    #[must_use]
    pub fn with_ring_weights(mut self, ring_weights: Vec<Vec<u32>>) -> Self {
        self.ring_weights = ring_weights;
        self
    }

    /// Set the rule set.
    #[must_use]
    pub fn with_ruleset(mut self, ruleset: Ruleset) -> Self {
        self.ruleset = ruleset;
        self
    }

    /// Total number of nodes on the board.
    #[must_use]
    pub fn total_nodes(&self) -> usize {
        self.circuit_count * self.nodes_per_circuit
    }

    /// Weight of the cycle edge leaving `position` on `circuit`.
    ///
    /// Only meaningful for a configuration that passed [`validate`](Self::validate).
    #[must_use]
    pub fn ring_weight(&self, circuit: usize, position: usize) -> u32 {
        let row = &self.ring_weights[circuit.min(self.ring_weights.len() - 1)];
        row[position % row.len()]
    }

    /// Number of edges the board will have: one cycle per circuit plus the
    /// cross-links between neighboring circuits.
    #[must_use]
    pub fn total_edges(&self) -> usize {
        let n = self.nodes_per_circuit;
        let rings = self.circuit_count * n;
        let cross: usize = (0..self.circuit_count.saturating_sub(1))
            .map(|circuit| (n + 1 - circuit % 2) / 2)
            .sum();
        rings + cross
    }

    /// Sum of every edge weight, widened so it cannot overflow.
    ///
    /// Only meaningful for a configuration with a non-empty weight table.
    #[must_use]
    pub fn total_weight(&self) -> u64 {
        let rings: u64 = (0..self.circuit_count)
            .flat_map(|circuit| (0..self.nodes_per_circuit).map(move |p| (circuit, p)))
            .map(|(circuit, position)| u64::from(self.ring_weight(circuit, position)))
            .sum();
        let cross = (self.total_edges() - self.circuit_count * self.nodes_per_circuit) as u64;
        rings + cross * u64::from(self.cross_link_weight)
    }

    /// Check that the configuration describes a playable board.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.circuit_count < 1 {
            return Err(ConfigError::TooFewCircuits(self.circuit_count));
        }
        if self.nodes_per_circuit < 3 {
            return Err(ConfigError::TooFewNodes(self.nodes_per_circuit));
        }
        let nodes = self.total_nodes();
        let edges = self.total_edges();
        if nodes > u16::MAX as usize || edges > u16::MAX as usize {
            return Err(ConfigError::BoardTooLarge { nodes, edges });
        }
        if self.titans_per_player == 0 {
            return Err(ConfigError::NoTitans);
        }
        if self.titans_per_player * 2 > nodes {
            return Err(ConfigError::TooManyTitans {
                titans: self.titans_per_player,
                nodes,
            });
        }
        if self.ring_weights.is_empty() || self.ring_weights.iter().any(Vec::is_empty) {
            return Err(ConfigError::EmptyWeightTable);
        }
        if self.ring_weights.iter().flatten().any(|&w| w == 0) {
            return Err(ConfigError::ZeroWeight { context: "ring weights" });
        }
        if self.cross_link_weight == 0 {
            return Err(ConfigError::ZeroWeight { context: "cross-link weight" });
        }
        let total = self.total_weight();
        if total > u64::from(u32::MAX) {
            return Err(ConfigError::WeightOverflow(total));
        }
        if self.game_time_secs == 0 {
            return Err(ConfigError::ZeroTime { clock: "game" });
        }
        if self.turn_time_secs == 0 {
            return Err(ConfigError::ZeroTime { clock: "turn" });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.circuit_count, 3);
        assert_eq!(config.nodes_per_circuit, 6);
        assert_eq!(config.titans_per_player, 4);
        assert_eq!(config.game_time_secs, 600);
        assert_eq!(config.turn_time_secs, 30);
        assert_eq!(config.total_nodes(), 18);
        assert_eq!(config.ruleset, Ruleset::Base);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_board(4, 8)
            .with_titans(6)
            .with_clocks(120, 10)
            .with_ruleset(Ruleset::Extended);

        assert_eq!(config.total_nodes(), 32);
        assert_eq!(config.titans_per_player, 6);
        assert_eq!(config.game_time_secs, 120);
        assert_eq!(config.turn_time_secs, 10);
        assert!(config.ruleset.capture_enabled());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ring_weight_lookup() {
        let config = GameConfig::default();
        assert_eq!(config.ring_weight(0, 3), 3);
        assert_eq!(config.ring_weight(1, 2), 6);
        assert_eq!(config.ring_weight(2, 0), 9);

        // Extra rings reuse the innermost row, extra positions wrap.
        let wide = GameConfig::default().with_board(4, 8);
        assert_eq!(wide.ring_weight(3, 0), 9);
        assert_eq!(wide.ring_weight(0, 7), 1);
    }

    #[test]
    fn test_edge_and_weight_totals() {
        let config = GameConfig::default();
        assert_eq!(config.total_edges(), 24);
        assert_eq!(config.total_weight(), 96);

        // Odd ring length: the even-phase pass gets the extra cross-link.
        let odd = GameConfig::default().with_board(3, 5);
        assert_eq!(odd.total_edges(), 15 + 3 + 2);
    }

    #[test]
    fn test_edge_ids_must_fit() {
        // Few enough nodes for u16 ids, but too many edges.
        let config = GameConfig::default().with_board(2, 30000).with_titans(1);
        assert!(config.total_nodes() <= u16::MAX as usize);
        assert_eq!(
            config.validate(),
            Err(ConfigError::BoardTooLarge { nodes: 60000, edges: 75000 })
        );
    }

    #[test]
    fn test_total_weight_must_fit_a_score() {
        let config = GameConfig::default()
            .with_board(1, 6)
            .with_titans(3)
            .with_ring_weights(vec![vec![u32::MAX]]);
        assert_eq!(
            config.validate(),
            Err(ConfigError::WeightOverflow(6 * u64::from(u32::MAX)))
        );

        let heavy = config.with_ring_weights(vec![vec![u32::MAX / 6]]);
        assert!(heavy.validate().is_ok());
    }

    #[test]
    fn test_validation_failures() {
        let base = GameConfig::default();

        assert_eq!(
            base.clone().with_board(0, 6).validate(),
            Err(ConfigError::TooFewCircuits(0))
        );
        assert_eq!(
            base.clone().with_board(3, 2).validate(),
            Err(ConfigError::TooFewNodes(2))
        );
        assert_eq!(base.clone().with_titans(0).validate(), Err(ConfigError::NoTitans));
        assert_eq!(
            base.clone().with_titans(10).validate(),
            Err(ConfigError::TooManyTitans { titans: 10, nodes: 18 })
        );
        assert_eq!(
            base.clone().with_ring_weights(vec![]).validate(),
            Err(ConfigError::EmptyWeightTable)
        );
        assert!(matches!(
            base.clone().with_ring_weights(vec![vec![1, 0]]).validate(),
            Err(ConfigError::ZeroWeight { .. })
        ));
        assert_eq!(
            base.with_clocks(600, 0).validate(),
            Err(ConfigError::ZeroTime { clock: "turn" })
        );
    }

    #[test]
    fn test_ruleset_flags() {
        assert!(!Ruleset::Base.capture_enabled());
        assert!(!Ruleset::Base.history_enabled());
        assert!(Ruleset::Extended.capture_enabled());
        assert!(Ruleset::Extended.history_enabled());
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_ruleset(Ruleset::Extended);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
