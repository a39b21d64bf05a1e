//! Axis-aligned box geometry for hitboxes
//!
//! Boxes use screen coordinates: `min` is the top-left corner and +Y points
//! down, so `top() < bottom()`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Width and height (both positive for hitboxes)
    pub size: Vec2,
}

impl Rect {
    pub const EMPTY: Rect = Rect {
        min: Vec2::ZERO,
        size: Vec2::ZERO,
    };

    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Box of the given size centered on a point
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size * 0.5,
            size,
        }
    }

    /// Smallest box containing both corners
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        Self {
            min,
            size: a.max(b) - min,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.min.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.min.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// True if the interiors overlap (shared edges don't count)
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Overlapping region, or `Rect::EMPTY` when the boxes don't intersect
    pub fn intersection(&self, other: &Rect) -> Rect {
        if !self.intersects(other) {
            return Rect::EMPTY;
        }
        let min = self.min.max(other.min);
        let max = Vec2::new(self.right(), self.bottom()).min(Vec2::new(other.right(), other.bottom()));
        Rect { min, size: max - min }
    }

    /// Same box moved by `delta`
    pub fn translated(&self, delta: Vec2) -> Rect {
        Rect {
            min: self.min + delta,
            size: self.size,
        }
    }
}
