//! Player integration and difficulty escalation
//!
//! Player motion is integrated once per tick with no time scaling, so the
//! feel of a jump depends on the display refresh rate. Difficulty on the
//! other hand follows the wall clock. Both behaviours are intentional.

use super::state::{GameState, Player, Surface};

/// Apply gravity, move, and clamp the player to the ground
pub fn integrate_player(player: &mut Player, surface: Surface) {
    player.velocity_y += player.gravity;
    player.rect.pos.y += player.velocity_y;

    let ground = surface.height - player.rect.size.y;
    if player.rect.pos.y >= ground {
        player.rect.pos.y = ground;
        player.on_ground = true;
        player.velocity_y = 0.0;
    } else {
        player.on_ground = false;
    }
}

/// Start a jump if the player is standing on the ground.
///
/// Returns whether the jump happened. Requests while airborne are dropped.
pub fn try_jump(player: &mut Player) -> bool {
    if !player.on_ground {
        return false;
    }
    player.velocity_y = player.jump_impulse;
    player.on_ground = false;
    true
}

/// Step difficulty up if a full interval of wall-clock time has passed.
///
/// Returns whether a step was taken.
pub fn escalate_difficulty(state: &mut GameState, now_ms: f64) -> bool {
    if now_ms - state.last_speed_increase_ms < state.tuning.speed_increase_interval_ms {
        return false;
    }
    state.speed_multiplier += state.tuning.speed_increment;
    state.spawn_cadence += state.tuning.spawn_cadence_increment;
    state.last_speed_increase_ms = now_ms;
    log::debug!(
        "Difficulty up: speed x{:.1}, spawn every {} frames",
        state.speed_multiplier,
        state.spawn_cadence
    );
    true
}
