//! Core engine types: identifiers, players, configuration, actions, errors.
//!
//! This module contains the building blocks shared by the board and the
//! match controller. Board shape and rule variants are configured via
//! `GameConfig` rather than hardcoded.

pub mod ids;
pub mod player;
pub mod config;
pub mod action;
pub mod error;

pub use ids::{EdgeId, NodeId};
pub use player::{Player, PlayerMap};
pub use config::{GameConfig, Ruleset};
pub use action::{Action, ActionRecord};
pub use error::{ConfigError, Rejection};
