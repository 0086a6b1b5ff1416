//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Wall-clock time comes in as an argument, never read directly
//! - Seeded RNG only
//! - Stable iteration order (spawn order)

pub mod collision;
pub mod obstacles;
pub mod physics;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_hit};
pub use state::{GameState, Obstacle, Player, Surface};
pub use tick::{TickInput, TickOutcome, tick};
