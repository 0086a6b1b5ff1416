//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON document can override any of
//! them. Missing fields keep their defaults from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Gameplay constants for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Distance from the bottom of the surface to the player's top edge at spawn
    pub player_spawn_clearance: f32,
    pub gravity: f32,
    pub jump_impulse: f32,

    pub obstacle_width: f32,
    pub obstacle_min_height: u32,
    /// Exclusive
    pub obstacle_max_height: u32,

    pub base_speed: f32,
    pub initial_speed_multiplier: f32,
    pub speed_increment: f32,
    pub initial_spawn_cadence: u64,
    pub spawn_cadence_increment: u64,

    pub speed_increase_interval_ms: f64,
    pub score_interval_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_spawn_clearance: PLAYER_SPAWN_CLEARANCE,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,
            obstacle_max_height: OBSTACLE_MAX_HEIGHT,

            base_speed: BASE_SPEED,
            initial_speed_multiplier: INITIAL_SPEED_MULTIPLIER,
            speed_increment: SPEED_INCREMENT,
            initial_spawn_cadence: INITIAL_SPAWN_CADENCE,
            spawn_cadence_increment: SPAWN_CADENCE_INCREMENT,

            speed_increase_interval_ms: SPEED_INCREASE_INTERVAL_MS,
            score_interval_ms: SCORE_INTERVAL_MS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) tuning document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_spawn_cadence == 0 {
            return Err(ConfigError::Invalid("initial_spawn_cadence must be positive"));
        }
        if self.obstacle_max_height <= self.obstacle_min_height {
            return Err(ConfigError::Invalid(
                "obstacle_max_height must exceed obstacle_min_height",
            ));
        }
        if self.speed_increment < 0.0 {
            return Err(ConfigError::Invalid("speed_increment must not be negative"));
        }
        if self.jump_impulse >= 0.0 {
            return Err(ConfigError::Invalid("jump_impulse must point upward (negative)"));
        }
        Ok(())
    }

    /// Obstacle displacement per tick at a given speed multiplier
    #[inline]
    pub fn obstacle_step(&self, speed_multiplier: f32) -> f32 {
        self.base_speed * speed_multiplier
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "gravity": 0.8, "initial_spawn_cadence": 60 }"#)
            .expect("valid tuning");
        assert_eq!(tuning.gravity, 0.8);
        assert_eq!(tuning.initial_spawn_cadence, 60);
        assert_eq!(tuning.jump_impulse, JUMP_IMPULSE);
        assert_eq!(tuning.score_interval_ms, SCORE_INTERVAL_MS);
    }

    #[test]
    fn test_rejects_zero_cadence() {
        let err = Tuning::from_json(r#"{ "initial_spawn_cadence": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_default_obstacle_step() {
        let tuning = Tuning::default();
        assert!((tuning.obstacle_step(tuning.initial_speed_multiplier) - 7.5).abs() < 1e-6);
    }
}
