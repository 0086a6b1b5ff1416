//! Game state and core simulation types
//!
//! A [`GameState`] is always built whole: at login and again on every
//! restart. Nothing in here is ever partially reset.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::tuning::Tuning;

/// Size of the drawing surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(
            crate::consts::DEFAULT_SURFACE_WIDTH,
            crate::consts::DEFAULT_SURFACE_HEIGHT,
        )
    }
}

/// The player's runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
    /// Vertical velocity in pixels per tick (negative is up)
    pub velocity_y: f32,
    /// Added to `velocity_y` every tick
    pub gravity: f32,
    /// Velocity set by a successful jump
    pub jump_impulse: f32,
    pub on_ground: bool,
}

impl Player {
    /// Spawn slightly above the ground; the first few ticks drop it into place
    pub fn spawn(tuning: &Tuning, surface: Surface) -> Self {
        Self {
            rect: Rect::new(
                tuning.player_x,
                surface.height - tuning.player_spawn_clearance,
                tuning.player_width,
                tuning.player_height,
            ),
            velocity_y: 0.0,
            gravity: tuning.gravity,
            jump_impulse: tuning.jump_impulse,
            on_ground: false,
        }
    }
}

/// A ground obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
}

impl Obstacle {
    /// Obstacle resting on the ground with its left edge at `x`
    pub fn on_ground(x: f32, width: f32, height: f32, surface: Surface) -> Self {
        Self {
            rect: Rect {
                pos: Vec2::new(x, surface.height - height),
                size: Vec2::new(width, height),
            },
        }
    }

    /// Right edge has passed the left edge of the surface
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.rect.right() < 0.0
    }
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Balance constants this run was started with
    pub tuning: Tuning,
    /// Drawing surface (may change on resize)
    pub surface: Surface,
    pub player: Player,
    /// Live obstacles in spawn order, which is also left-to-right order
    pub obstacles: Vec<Obstacle>,
    /// Ticks completed since the run started
    pub frame: u64,
    pub game_over: bool,
    pub score: u64,
    /// Applied to `tuning.base_speed`; never decreases during a run
    pub speed_multiplier: f32,
    /// Frames between spawns; never decreases during a run
    pub spawn_cadence: u64,
    /// Wall clock (ms) of the last difficulty step
    pub last_speed_increase_ms: f64,
    /// Wall clock (ms) of the last score increment
    pub last_score_ms: f64,
    /// Seed the obstacle RNG was built from
    pub seed: u64,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Fresh run started at wall-clock time `now_ms`
    pub fn new(tuning: Tuning, surface: Surface, seed: u64, now_ms: f64) -> Self {
        Self {
            player: Player::spawn(&tuning, surface),
            obstacles: Vec::new(),
            frame: 0,
            game_over: false,
            score: 0,
            speed_multiplier: tuning.initial_speed_multiplier,
            spawn_cadence: tuning.initial_spawn_cadence,
            last_speed_increase_ms: now_ms,
            last_score_ms: now_ms,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            surface,
            tuning,
        }
    }

    /// Obstacle displacement for the current tick
    #[inline]
    pub fn obstacle_step(&self) -> f32 {
        self.tuning.obstacle_step(self.speed_multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_uses_tuning() {
        let tuning = Tuning::default();
        let surface = Surface::new(1024.0, 700.0);
        let state = GameState::new(tuning.clone(), surface, 7, 1234.0);

        assert_eq!(state.player.rect, Rect::new(50.0, 630.0, 50.0, 50.0));
        assert!(!state.player.on_ground);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.frame, 0);
        assert_eq!(state.speed_multiplier, tuning.initial_speed_multiplier);
        assert_eq!(state.spawn_cadence, tuning.initial_spawn_cadence);
        assert_eq!(state.last_score_ms, 1234.0);
        assert_eq!(state.last_speed_increase_ms, 1234.0);
    }

    #[test]
    fn test_obstacle_rests_on_ground() {
        let surface = Surface::new(800.0, 600.0);
        let obstacle = Obstacle::on_ground(800.0, 20.0, 120.0, surface);
        assert_eq!(obstacle.rect.bottom(), 600.0);
        assert_eq!(obstacle.rect.top(), 480.0);
        assert!(!obstacle.is_off_screen());

        let gone = Obstacle::on_ground(-20.5, 20.0, 120.0, surface);
        assert!(gone.is_off_screen());
        // Exactly touching the left edge is still on screen
        let edge = Obstacle::on_ground(-20.0, 20.0, 120.0, surface);
        assert!(!edge.is_off_screen());
    }
}
