//! Per-frame simulation tick
//!
//! One call advances the run by exactly one frame: difficulty, player,
//! obstacle movement and removal, collision, spawning and score, in that order.

use super::collision::first_hit;
use super::state::GameState;
use super::{obstacles, physics, score};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump requested since the previous tick (space)
    pub jump: bool,
}

/// What happened during a tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The jump request was honoured
    pub jumped: bool,
    /// Difficulty stepped up
    pub difficulty_up: bool,
    pub spawned: bool,
    pub scored: bool,
    /// The player hit an obstacle this tick
    pub game_over: bool,
}

/// Advance the game state by one frame at wall-clock time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> TickOutcome {
    let mut outcome = TickOutcome::default();
    if state.game_over {
        return outcome;
    }

    outcome.difficulty_up = physics::escalate_difficulty(state, now_ms);

    if input.jump {
        outcome.jumped = physics::try_jump(&mut state.player);
    }
    physics::integrate_player(&mut state.player, state.surface);

    // Every obstacle moves and leaves before any of them is tested, so the
    // frame that ends the run shows the lane fully updated.
    let step = state.obstacle_step();
    obstacles::advance(&mut state.obstacles, step);
    obstacles::cull_off_screen(&mut state.obstacles);

    if let Some(index) = first_hit(
        &state.player.rect,
        state.obstacles.iter().map(|o| &o.rect),
    ) {
        log::info!(
            "Player hit obstacle {} at x={:.1} on frame {}",
            index,
            state.obstacles[index].rect.left(),
            state.frame
        );
        state.game_over = true;
        outcome.game_over = true;
        return outcome;
    }

    outcome.spawned = obstacles::maybe_spawn(state);
    outcome.scored = score::accrue(state, now_ms);

    state.frame += 1;
    outcome
}
