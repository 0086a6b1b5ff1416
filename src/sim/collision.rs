//! Axis-aligned collision detection
//!
//! Everything in the lane is a rectangle in screen space (y grows downward),
//! so a strict AABB overlap test is all the game needs.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle: top-left corner plus size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    /// Strict overlap test. Rectangles that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}

/// Index of the first rectangle (in slice order) overlapping `target`
pub fn first_hit<'a, I>(target: &Rect, candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Rect>,
{
    candidates
        .into_iter()
        .position(|candidate| target.intersects(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_disjoint_horizontally() {
        let player = Rect::new(50.0, 80.0, 50.0, 50.0);
        let obstacle = Rect::new(150.0, 80.0, 20.0, 50.0);
        assert!(!player.intersects(&obstacle));
        assert!(!obstacle.intersects(&player));
    }

    #[test]
    fn test_overlapping() {
        // Player x 50..100, y 80..130; obstacle x 70..90, y 100..200
        let player = Rect::new(50.0, 80.0, 50.0, 50.0);
        let obstacle = Rect::new(70.0, 100.0, 20.0, 100.0);
        assert!(player.intersects(&obstacle));
        assert!(obstacle.intersects(&player));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right_neighbour = Rect::new(10.0, 0.0, 10.0, 10.0);
        let below = Rect::new(0.0, 10.0, 10.0, 10.0);
        assert!(!a.intersects(&right_neighbour));
        assert!(!a.intersects(&below));
    }

    #[test]
    fn test_first_hit_uses_list_order() {
        let player = Rect::new(50.0, 0.0, 50.0, 50.0);
        let rects = [
            Rect::new(300.0, 0.0, 20.0, 50.0),
            Rect::new(60.0, 0.0, 20.0, 50.0),
            Rect::new(70.0, 0.0, 20.0, 50.0),
        ];
        assert_eq!(first_hit(&player, &rects), Some(1));
        assert_eq!(first_hit(&player, &rects[..1]), None);
    }

    fn rect_strategy() -> impl Strategy<Value = Rect> {
        (
            -500.0f32..500.0,
            -500.0f32..500.0,
            0.5f32..200.0,
            0.5f32..200.0,
        )
            .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
    }

    proptest! {
        #[test]
        fn prop_intersection_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn prop_separated_rects_never_intersect(a in rect_strategy(), gap in 0.0f32..100.0) {
            let b = Rect::new(a.right() + gap, a.top(), 10.0, a.size.y);
            prop_assert!(!a.intersects(&b));
        }
    }
}
