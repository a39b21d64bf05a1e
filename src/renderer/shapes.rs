//! Shape generation for 2D primitives

use super::vertex::{Vertex, colors};
use crate::sim::gravity::Direction;
use crate::sim::rect::Rect;

/// Two triangles covering a box
pub fn quad(rect: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let (l, t, r, b) = (rect.left(), rect.top(), rect.right(), rect.bottom());
    vec![
        Vertex::new(l, t, color),
        Vertex::new(r, t, color),
        Vertex::new(l, b, color),
        Vertex::new(l, b, color),
        Vertex::new(r, t, color),
        Vertex::new(r, b, color),
    ]
}

/// Hollow box drawn inside `rect`, `thickness` pixels wide
pub fn rect_outline(rect: &Rect, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let t = thickness.min(rect.width() / 2.0).min(rect.height() / 2.0).max(0.0);
    let inner_height = rect.height() - 2.0 * t;

    let edges = [
        // Top and bottom span the full width
        Rect::new(rect.left(), rect.top(), rect.width(), t),
        Rect::new(rect.left(), rect.bottom() - t, rect.width(), t),
        // Sides fill the gap between them
        Rect::new(rect.left(), rect.top() + t, t, inner_height),
        Rect::new(rect.right() - t, rect.top() + t, t, inner_height),
    ];

    let mut vertices = Vec::with_capacity(24);
    for edge in edges.iter().filter(|edge| !edge.is_empty()) {
        vertices.extend(quad(edge, color));
    }
    vertices
}

/// Debug outline color for a facing
pub fn facing_color(facing: Direction) -> [f32; 4] {
    match facing {
        Direction::Up => colors::LIME_GREEN,
        Direction::Right => colors::WHITE,
        Direction::Left => colors::YELLOW,
        Direction::Down => colors::MAGENTA,
    }
}
