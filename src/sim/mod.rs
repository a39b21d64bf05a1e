//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (row-major grid slots)
//! - Shared state only through `SimulationContext`
//! - No rendering or platform dependencies

pub mod anim;
pub mod body;
pub mod collision;
pub mod context;
pub mod entity;
pub mod gravity;
pub mod player;
pub mod rect;
pub mod state;
pub mod switch;
pub mod tick;

pub use anim::{Animator, FrameCycle, LASER_ANIMATION};
pub use body::MovableBody;
pub use collision::{Axis, resolution_order, resolve_collision};
pub use context::SimulationContext;
pub use entity::{Behavior, Entity, EntityKind, TagSet};
pub use gravity::{Direction, GravityModel, gravity_vector};
pub use player::{PlayerState, gravity_from_input, walk_axis};
pub use rect::Rect;
pub use state::{LevelEvent, LevelGrid};
pub use switch::{Channel, ChannelMap, TriggerState};
pub use tick::tick;
