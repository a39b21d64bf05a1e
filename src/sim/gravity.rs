//! Cardinal directions and the global gravity model

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::GRAVITY_STRENGTH;

/// One of the four cardinal directions.
///
/// Used both for the global gravity direction and for per-entity facing.
/// Screen coordinates: +Y points down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Down,
        Direction::Up,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit vector pointing this way
    #[inline]
    pub fn unit(self) -> Vec2 {
        match self {
            Direction::Down => Vec2::new(0.0, 1.0),
            Direction::Up => Vec2::new(0.0, -1.0),
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// True for Up/Down
    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    /// Sprite rotation in radians (Down is the authored orientation)
    pub fn rotation(self) -> f32 {
        use std::f32::consts::PI;
        match self {
            Direction::Down => 0.0,
            Direction::Left => PI * 0.5,
            Direction::Up => PI,
            Direction::Right => PI * 1.5,
        }
    }

    /// Rotate a Down-authored local vector into this orientation.
    ///
    /// Exact quarter turns, so integer offsets stay integers.
    #[inline]
    pub fn rotate(self, v: Vec2) -> Vec2 {
        match self {
            Direction::Down => v,
            Direction::Up => Vec2::new(-v.x, -v.y),
            Direction::Left => Vec2::new(-v.y, v.x),
            Direction::Right => Vec2::new(v.y, -v.x),
        }
    }

    /// Swap a Down-authored (width, height) pair for this orientation
    #[inline]
    pub fn oriented_size(self, size: Vec2) -> Vec2 {
        if self.is_vertical() { size } else { Vec2::new(size.y, size.x) }
    }

    /// Parse a facing code (U/D/L/R)
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            _ => None,
        }
    }
}

/// The single global gravity: a cardinal direction and a strength
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GravityModel {
    pub direction: Direction,
    /// Acceleration magnitude (pixels/s², never negative)
    pub strength: f32,
}

impl Default for GravityModel {
    fn default() -> Self {
        Self::new(GRAVITY_STRENGTH)
    }
}

impl GravityModel {
    /// Gravity pointing down with the given strength
    pub fn new(strength: f32) -> Self {
        Self {
            direction: Direction::Down,
            strength: strength.max(0.0),
        }
    }

    /// Acceleration vector for the current direction
    #[inline]
    pub fn vector(&self) -> Vec2 {
        gravity_vector(self.direction, self.strength)
    }

    /// Back to Down (level load, respawn, goal reached)
    pub fn reset(&mut self) {
        self.direction = Direction::Down;
    }
}

/// Acceleration vector for a direction and strength
#[inline]
pub fn gravity_vector(direction: Direction, strength: f32) -> Vec2 {
    direction.unit() * strength
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gravity_vector_per_direction() {
        assert_eq!(gravity_vector(Direction::Down, 100.0), Vec2::new(0.0, 100.0));
        assert_eq!(gravity_vector(Direction::Up, 100.0), Vec2::new(0.0, -100.0));
        assert_eq!(gravity_vector(Direction::Left, 100.0), Vec2::new(-100.0, 0.0));
        assert_eq!(gravity_vector(Direction::Right, 100.0), Vec2::new(100.0, 0.0));
    }

    #[test]
    fn test_model_vector_follows_direction() {
        let mut gravity = GravityModel::new(40.0);
        for dir in Direction::ALL {
            gravity.direction = dir;
            let v = gravity.vector();
            assert!((v.length() - 40.0).abs() < 1e-6);
            assert_eq!(v.normalize(), dir.unit());
        }
        gravity.reset();
        assert_eq!(gravity.direction, Direction::Down);
    }

    #[test]
    fn test_negative_strength_clamped() {
        assert_eq!(GravityModel::new(-5.0).strength, 0.0);
    }

    #[test]
    fn test_rotate_quarter_turns() {
        let offset = Vec2::new(0.0, 24.0);
        assert_eq!(Direction::Down.rotate(offset), Vec2::new(0.0, 24.0));
        assert_eq!(Direction::Up.rotate(offset), Vec2::new(0.0, -24.0));
        assert_eq!(Direction::Left.rotate(offset), Vec2::new(-24.0, 0.0));
        assert_eq!(Direction::Right.rotate(offset), Vec2::new(24.0, 0.0));
    }

    #[test]
    fn test_oriented_size_swaps_horizontal() {
        let size = Vec2::new(32.0, 8.0);
        assert_eq!(Direction::Up.oriented_size(size), size);
        assert_eq!(Direction::Left.oriented_size(size), Vec2::new(8.0, 32.0));
    }
}
