//! Obstacle spawning, movement and cleanup

use rand::Rng;

use super::state::{GameState, Obstacle};

/// Spawn one obstacle at the right edge if this frame is on the cadence.
///
/// Returns whether an obstacle was spawned.
pub fn maybe_spawn(state: &mut GameState) -> bool {
    if !state.frame.is_multiple_of(state.spawn_cadence) {
        return false;
    }
    let tuning = &state.tuning;
    let height = state
        .rng
        .random_range(tuning.obstacle_min_height..tuning.obstacle_max_height) as f32;
    let obstacle = Obstacle::on_ground(
        state.surface.width,
        tuning.obstacle_width,
        height,
        state.surface,
    );
    state.obstacles.push(obstacle);
    true
}

/// Move every live obstacle left by the current step
pub fn advance(obstacles: &mut [Obstacle], step: f32) {
    for obstacle in obstacles.iter_mut() {
        obstacle.rect.pos.x -= step;
    }
}

/// Drop obstacles that have fully left the surface, keeping spawn order.
///
/// Returns how many were removed.
pub fn cull_off_screen(obstacles: &mut Vec<Obstacle>) -> usize {
    let before = obstacles.len();
    obstacles.retain(|o| !o.is_off_screen());
    before - obstacles.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Surface;
    use crate::tuning::Tuning;

    fn state() -> GameState {
        GameState::new(Tuning::default(), Surface::new(800.0, 600.0), 42, 0.0)
    }

    #[test]
    fn test_spawns_on_cadence_only() {
        let mut state = state();
        assert!(maybe_spawn(&mut state)); // frame 0
        for frame in 1..90 {
            state.frame = frame;
            assert!(!maybe_spawn(&mut state));
        }
        state.frame = 90;
        assert!(maybe_spawn(&mut state));
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_spawned_obstacle_geometry() {
        let mut state = state();
        for frame in 0..50 {
            state.frame = frame * state.spawn_cadence;
            maybe_spawn(&mut state);
        }
        for obstacle in &state.obstacles {
            let rect = obstacle.rect;
            assert_eq!(rect.left(), 800.0);
            assert_eq!(rect.size.x, 20.0);
            assert_eq!(rect.bottom(), 600.0);
            assert!((50.0..150.0).contains(&rect.size.y));
            assert_eq!(rect.size.y.fract(), 0.0);
        }
    }

    #[test]
    fn test_same_seed_same_heights() {
        let mut a = state();
        let mut b = state();
        for frame in 0..10 {
            a.frame = frame * 90;
            b.frame = frame * 90;
            maybe_spawn(&mut a);
            maybe_spawn(&mut b);
        }
        assert_eq!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_advance_moves_every_obstacle() {
        let surface = Surface::new(800.0, 600.0);
        let mut obstacles = vec![
            Obstacle::on_ground(800.0, 20.0, 60.0, surface),
            Obstacle::on_ground(400.0, 20.0, 90.0, surface),
        ];
        advance(&mut obstacles, 7.5);
        assert_eq!(obstacles[0].rect.left(), 792.5);
        assert_eq!(obstacles[1].rect.left(), 392.5);
    }

    #[test]
    fn test_cull_removes_adjacent_off_screen_obstacles() {
        // Two consecutive off-screen obstacles: removing the first must not
        // skip the second.
        let surface = Surface::new(800.0, 600.0);
        let mut obstacles = vec![
            Obstacle::on_ground(-30.0, 20.0, 60.0, surface),
            Obstacle::on_ground(-25.0, 20.0, 70.0, surface),
            Obstacle::on_ground(100.0, 20.0, 80.0, surface),
            Obstacle::on_ground(-40.0, 20.0, 90.0, surface),
            Obstacle::on_ground(500.0, 20.0, 100.0, surface),
        ];
        assert_eq!(cull_off_screen(&mut obstacles), 3);
        let lefts: Vec<f32> = obstacles.iter().map(|o| o.rect.left()).collect();
        assert_eq!(lefts, vec![100.0, 500.0]);
    }
}
