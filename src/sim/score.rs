//! Wall-clock scoring

use super::state::GameState;

/// Award one point if a full score interval has passed since the last one.
///
/// The interval is measured from the previous increment, so a slow frame
/// never produces a burst of catch-up points.
pub fn accrue(state: &mut GameState, now_ms: f64) -> bool {
    if now_ms - state.last_score_ms < state.tuning.score_interval_ms {
        return false;
    }
    state.score += 1;
    state.last_score_ms = now_ms;
    true
}
