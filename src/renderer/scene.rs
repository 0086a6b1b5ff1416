//! Draw list construction
//!
//! [`build`] is a pure function of the simulation state.

use glam::Vec2;

use crate::sim::{GameState, Rect, Surface};

/// Colors for game elements
pub mod colors {
    pub const PLAYER: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const OBSTACLE: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const TEXT: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
}

pub const SCORE_FONT: &str = "20px Arial";
pub const TITLE_FONT: &str = "30px Arial";
pub const HINT_FONT: &str = "20px Arial";
pub const GAME_OVER_TITLE: &str = "Game Over";
pub const RESTART_HINT: &str = "R 키를 눌러 재시작하실 수 있습니다.";

/// A filled rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub rect: Rect,
    pub color: [f32; 4],
}

/// A line of text anchored at its baseline start
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub text: String,
    pub font: &'static str,
    pub pos: Vec2,
    pub color: [f32; 4],
}

/// Everything a frame needs to show
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub surface: Surface,
    pub player: Sprite,
    /// In spawn order
    pub obstacles: Vec<Sprite>,
    pub score: u64,
    /// Show the game-over overlay with restart instructions
    pub game_over: bool,
    /// HUD and overlay text, back to front
    pub labels: Vec<Label>,
}

/// Build the draw list for `state`
pub fn build(state: &GameState) -> Scene {
    let surface = state.surface;
    let mut labels = vec![Label {
        text: format!("Score: {}", state.score),
        font: SCORE_FONT,
        pos: Vec2::new(10.0, 30.0),
        color: colors::TEXT,
    }];

    if state.game_over {
        let center = Vec2::new(surface.width / 2.0, surface.height / 2.0);
        labels.push(Label {
            text: GAME_OVER_TITLE.to_string(),
            font: TITLE_FONT,
            pos: center + Vec2::new(-80.0, -30.0),
            color: colors::TEXT,
        });
        labels.push(Label {
            text: RESTART_HINT.to_string(),
            font: HINT_FONT,
            pos: center + Vec2::new(-160.0, 10.0),
            color: colors::TEXT,
        });
    }

    Scene {
        surface,
        player: Sprite {
            rect: state.player.rect,
            color: colors::PLAYER,
        },
        obstacles: state
            .obstacles
            .iter()
            .map(|o| Sprite {
                rect: o.rect,
                color: colors::OBSTACLE,
            })
            .collect(),
        score: state.score,
        game_over: state.game_over,
        labels,
    }
}

/// CSS color string for a linear `[r, g, b, a]` color in 0..=1
pub fn css_color(color: [f32; 4]) -> String {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({}, {}, {}, {})",
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        color[3].clamp(0.0, 1.0)
    )
}
