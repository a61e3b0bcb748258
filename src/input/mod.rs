//! Input sources that feed directions into the engine

pub mod autopilot;
pub mod region;

pub use autopilot::{Autopilot, choose_direction};
pub use region::Viewport;
