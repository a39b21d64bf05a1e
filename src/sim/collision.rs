//! Axis-separated collision response between a mover and a solid box
//!
//! A mover is pushed out along one axis at a time. Which axis is tried first
//! depends on gravity: the axis gravity runs along is resolved last, so a
//! body resting on a floor slides along it instead of snagging on seams.

use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::gravity::Direction;
use super::rect::Rect;
use crate::{snap_ceil, snap_floor};

/// World axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Order in which the two passes run for a gravity direction
pub fn resolution_order(gravity: Direction) -> [Axis; 2] {
    if gravity.is_vertical() {
        [Axis::Horizontal, Axis::Vertical]
    } else {
        [Axis::Vertical, Axis::Horizontal]
    }
}

/// Push `mover` out of `target`.
///
/// Each pass recomputes the overlap from the mover's current box. A pass
/// only acts when the overlap is thinner along its own axis; an exact square
/// overlap is left alone. Returns the axis that was corrected, if any.
pub fn resolve_collision(
    mover: &mut Entity,
    target: &Rect,
    gravity: Direction,
    contact_refill: u32,
) -> Option<Axis> {
    let mut resolved = None;
    for axis in resolution_order(gravity) {
        if resolve_axis(mover, target, gravity, axis) {
            if let Some(player) = mover.player_mut() {
                player.refill_contact(contact_refill);
            }
            if resolved.is_none() {
                resolved = Some(axis);
            }
        }
    }
    resolved
}

fn resolve_axis(mover: &mut Entity, target: &Rect, gravity: Direction, axis: Axis) -> bool {
    let this = mover.bounding_box(gravity);
    let overlap = this.intersection(target);

    match axis {
        Axis::Horizontal => {
            if overlap.height() <= overlap.width() {
                return false;
            }
            if let Some(body) = mover.body_mut() {
                body.velocity.x = 0.0;
            }
            mover.position.x = if this.left() < target.left() {
                snap_ceil(mover.position.x - overlap.width())
            } else {
                snap_floor(mover.position.x + overlap.width())
            };
        }
        Axis::Vertical => {
            if overlap.width() <= overlap.height() {
                return false;
            }
            if let Some(body) = mover.body_mut() {
                body.velocity.y = 0.0;
            }
            mover.position.y = if this.top() > target.top() {
                snap_floor(mover.position.y + overlap.height())
            } else {
                snap_ceil(mover.position.y - overlap.height())
            };
        }
    }
    true
}
