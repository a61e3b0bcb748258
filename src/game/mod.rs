//! Core game logic module for Snake
//!
//! This module contains the whole simulation without any I/O or timing.
//! A driver calls [`SnakeEngine::tick`] on its own schedule, forwards player
//! input through [`SnakeEngine::set_direction`] and pulls a [`Snapshot`]
//! whenever it wants to redraw.

pub mod action;
pub mod config;
pub mod engine;
pub mod snapshot;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{ConfigError, GameConfig};
pub use engine::{FOOD_REWARD, SnakeEngine, TickOutcome};
pub use snapshot::Snapshot;
pub use state::{Cell, GameState, Snake, StateError};
