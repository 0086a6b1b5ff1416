//! Hop Runner - A single-lane runner game for the browser
//!
//! Core modules:
//! - `sim`: Simulation (physics, obstacles, collisions, scoring)
//! - `game`: Frame driver and login/game-over/restart state machine
//! - `renderer`: Draw list construction and Canvas 2D painting
//! - `telemetry`: Ordered, single-flight gameplay event logging
//! - `ledger`: Endpoint-side event ledger (id counter + row store)
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod game;
#[cfg(not(target_arch = "wasm32"))]
pub mod ledger;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;
pub mod telemetry;
pub mod tuning;

pub use error::{ConfigError, DeliveryError, LedgerError, LoginError};
pub use game::{Game, GamePhase};
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Player left edge (never changes)
    pub const PLAYER_X: f32 = 50.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;
    /// Player spawns this far above the bottom of the surface and drops in
    pub const PLAYER_SPAWN_CLEARANCE: f32 = 70.0;
    /// Downward acceleration applied once per tick
    pub const GRAVITY: f32 = 0.6;
    /// Upward velocity set by a jump (negative is up)
    pub const JUMP_IMPULSE: f32 = -16.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_MIN_HEIGHT: u32 = 50;
    /// Exclusive upper bound
    pub const OBSTACLE_MAX_HEIGHT: u32 = 150;

    /// Obstacle speed in pixels per tick before the multiplier
    pub const BASE_SPEED: f32 = 5.0;
    pub const INITIAL_SPEED_MULTIPLIER: f32 = 1.5;
    pub const SPEED_INCREMENT: f32 = 0.1;
    /// Frames between obstacle spawns
    pub const INITIAL_SPAWN_CADENCE: u64 = 90;
    pub const SPAWN_CADENCE_INCREMENT: u64 = 10;

    /// Wall-clock intervals (milliseconds)
    pub const SPEED_INCREASE_INTERVAL_MS: f64 = 5000.0;
    pub const SCORE_INTERVAL_MS: f64 = 100.0;

    /// Surface used before the host reports a real size
    pub const DEFAULT_SURFACE_WIDTH: f32 = 800.0;
    pub const DEFAULT_SURFACE_HEIGHT: f32 = 600.0;
}
