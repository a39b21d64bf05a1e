//! GPU-ready types for 2D rendering

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }
}

/// One sprite to draw, rotated about its center
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct DrawInstance {
    pub center: [f32; 2],
    /// Sprite size before rotation
    pub size: [f32; 2],
    /// Radians
    pub rotation: f32,
    /// 1 to mirror horizontally
    pub flip: u32,
    pub color: [f32; 4],
}

impl DrawInstance {
    pub fn new(center: Vec2, size: Vec2, rotation: f32, color: [f32; 4]) -> Self {
        Self {
            center: center.to_array(),
            size: size.to_array(),
            rotation,
            flip: 0,
            color,
        }
    }

    pub fn flipped(mut self, flip: bool) -> Self {
        self.flip = flip as u32;
        self
    }
}

/// Colors for game elements
pub mod colors {
    pub const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BLACK: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    /// Green as the channel color (half intensity, like the classic palette)
    pub const GREEN: [f32; 4] = [0.0, 0.5, 0.0, 1.0];
    pub const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    pub const ORANGE: [f32; 4] = [1.0, 0.647, 0.0, 1.0];
    pub const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    pub const BLUE_VIOLET: [f32; 4] = [0.541, 0.169, 0.886, 1.0];
    pub const DARK_GRAY: [f32; 4] = [0.663, 0.663, 0.663, 1.0];
    pub const LIME_GREEN: [f32; 4] = [0.196, 0.804, 0.196, 1.0];
    pub const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
    pub const BACKGROUND: [f32; 4] = BLACK;
}
