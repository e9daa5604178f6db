//! Fixed-capacity position history shared by both entity kinds
//!
//! Only the newest and oldest points matter for rendering: a stroke runs
//! from the oldest recorded position to the entity's current one.

use std::collections::VecDeque;

use glam::Vec2;

/// Ordered history of recent positions, newest first.
///
/// Capacity is fixed at creation: every [`record`](Trail::record) evicts the
/// oldest entry before inserting, so the length never changes.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Vec2>,
}

impl Trail {
    /// A trail of `length` copies of `pos`. Length is clamped to at least 1
    /// so [`oldest`](Trail::oldest) always has a point to return.
    pub fn filled(length: usize, pos: Vec2) -> Self {
        let length = length.max(1);
        let mut points = VecDeque::with_capacity(length);
        points.extend(std::iter::repeat_n(pos, length));
        Self { points }
    }

    /// Evict the oldest entry and push `pos` to the front.
    pub fn record(&mut self, pos: Vec2) {
        self.points.pop_back();
        self.points.push_front(pos);
    }

    /// The oldest recorded position (the tail end of the stroke).
    pub fn oldest(&self) -> Vec2 {
        self.points.back().copied().unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Newest-first iteration, for inspection in tests.
    pub fn iter(&self) -> impl Iterator<Item = &Vec2> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filled_repeats_position() {
        let trail = Trail::filled(3, Vec2::new(4.0, 5.0));
        assert_eq!(trail.len(), 3);
        assert!(trail.iter().all(|p| *p == Vec2::new(4.0, 5.0)));
    }

    #[test]
    fn test_record_keeps_length_constant() {
        let mut trail = Trail::filled(3, Vec2::ZERO);
        for i in 0..10 {
            trail.record(Vec2::new(i as f32, 0.0));
            assert_eq!(trail.len(), 3);
        }
    }

    #[test]
    fn test_oldest_lags_by_capacity() {
        let mut trail = Trail::filled(3, Vec2::ZERO);
        trail.record(Vec2::new(1.0, 0.0));
        trail.record(Vec2::new(2.0, 0.0));
        // Two records against capacity 3: one seed copy still at the back
        assert_eq!(trail.oldest(), Vec2::ZERO);
        trail.record(Vec2::new(3.0, 0.0));
        assert_eq!(trail.oldest(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_zero_length_clamps_to_one() {
        let mut trail = Trail::filled(0, Vec2::ONE);
        assert_eq!(trail.len(), 1);
        trail.record(Vec2::ZERO);
        assert_eq!(trail.oldest(), Vec2::ZERO);
    }
}
