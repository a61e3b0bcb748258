//! Snake Sim - a tick-driven Snake simulation on a wrapping grid
//!
//! This library provides:
//! - The simulation engine (game module)
//! - Input sources: tap regions and a greedy autopilot (input module)
//! - Session metrics (metrics module)
//! - A clock-driven session runner (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
