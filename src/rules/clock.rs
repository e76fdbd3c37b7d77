//! Match and turn countdowns.
//!
//! The engine owns no timers. The host calls into the match once per second
//! from whatever scheduler it runs (an interval, a game loop, a test); every
//! call goes through `&mut Match`, so ticks and clicks are serialized.

use serde::{Deserialize, Serialize};

/// A whole-second countdown.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    initial_secs: u32,
    remaining_secs: u32,
}

impl Countdown {
    #[must_use]
    pub const fn new(secs: u32) -> Self {
        Self {
            initial_secs: secs,
            remaining_secs: secs,
        }
    }

    /// Seconds left.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining_secs
    }

    /// Length the countdown restarts from.
    #[must_use]
    pub const fn initial(&self) -> u32 {
        self.initial_secs
    }

    #[must_use]
    pub const fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    /// Count down one second. Returns `true` when this tick reached zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining_secs == 0 {
            return false;
        }
        self.remaining_secs -= 1;
        self.remaining_secs == 0
    }

    /// Restart from the initial length.
    pub fn reset(&mut self) {
        self.remaining_secs = self.initial_secs;
    }
}

/// The two independent countdowns of a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchClocks {
    /// Overall match clock; the match ends when it reaches zero.
    pub game: Countdown,
    /// Acting player's clock; the turn passes when it reaches zero.
    pub turn: Countdown,
}

impl MatchClocks {
    #[must_use]
    pub const fn new(game_secs: u32, turn_secs: u32) -> Self {
        Self {
            game: Countdown::new(game_secs),
            turn: Countdown::new(turn_secs),
        }
    }

    pub fn reset(&mut self) {
        self.game.reset();
        self.turn.reset();
    }
}

/// Something a clock tick caused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockEvent {
    /// The match clock ran out and the match is over.
    MatchExpired(super::GameResult),
    /// The turn clock ran out and the turn passed to `next`.
    TurnExpired { next: crate::core::Player },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown() {
        let mut clock = Countdown::new(3);
        assert!(!clock.tick());
        assert!(!clock.tick());
        assert_eq!(clock.remaining(), 1);
        assert!(clock.tick());
        assert!(clock.is_expired());

        // Further ticks stay at zero and do not fire again.
        assert!(!clock.tick());
        assert_eq!(clock.remaining(), 0);

        clock.reset();
        assert_eq!(clock.remaining(), 3);
        assert_eq!(clock.initial(), 3);
    }

    #[test]
    fn test_clocks_are_independent() {
        let mut clocks = MatchClocks::new(600, 30);
        clocks.turn.tick();
        clocks.turn.tick();
        assert_eq!(clocks.turn.remaining(), 28);
        assert_eq!(clocks.game.remaining(), 600);

        clocks.turn.reset();
        assert_eq!(clocks.turn.remaining(), 30);

        clocks.game.tick();
        clocks.reset();
        assert_eq!(clocks, MatchClocks::new(600, 30));
    }
}
