//! Simulated level objects
//!
//! Every object in a level is one `Entity` record. What it does each frame is
//! picked by its `Behavior`; what others do to it is picked by its `TagSet`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::anim::FrameCycle;
use super::body::MovableBody;
use super::context::SimulationContext;
use super::gravity::{Direction, GravityModel};
use super::player::PlayerState;
use super::rect::Rect;
use super::switch::{Channel, ChannelMap, TriggerState};

/// Gameplay roles an entity plays for others
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TagSet(pub u8);

impl TagSet {
    pub const EMPTY: Self = Self(0);

    /// Movers are pushed out of it
    pub const COLLIDABLE: Self = Self(1 << 0);

    /// Kills the player on contact
    pub const DANGEROUS: Self = Self(1 << 1);

    /// Ends the level when the player touches it
    pub const GOAL: Self = Self(1 << 2);

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub fn insert(&mut self, other: Self) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: Self) {
        self.0 &= !other.0;
    }

    /// Insert or remove `tag`. Returns whether it was set before.
    pub fn set(&mut self, tag: Self, on: bool) -> bool {
        let was = self.contains(tag);
        if on {
            self.insert(tag);
        } else {
            self.remove(tag);
        }
        was
    }
}

/// What an entity is, for presentation and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Hazard,
    Tile,
    Goal,
    Player,
    Snail,
    Laser,
    Switch,
    Crate,
    Platform,
}

/// Per-frame behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Behavior {
    /// Never moves
    Static,
    /// Falls with gravity and slides to a stop
    Movable(MovableBody),
    /// Movable, but held on a track between `min` and `max`
    Clamped { body: MovableBody, min: Vec2, max: Vec2 },
    Player { body: MovableBody, player: PlayerState },
    Trigger(TriggerState),
}

/// One object in a level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Unique within a level, stable for the level's lifetime
    pub id: u32,
    pub kind: EntityKind,
    pub position: Vec2,
    /// Collision box size, authored facing down
    pub size: Vec2,
    /// Area the entity occupies, authored facing down; `offset` is measured
    /// from its top-left corner
    pub footprint: Vec2,
    pub offset: Vec2,
    pub facing: Direction,
    pub tags: TagSet,
    /// Channel that must be enabled for the entity to be active
    pub gate: Option<Channel>,
    /// Texture key used when no animation is running
    pub texture: String,
    pub animation: Option<FrameCycle<String>>,
    pub behavior: Behavior,
}

impl Entity {
    /// Static entity with a centered box the size of its footprint
    pub fn new(id: u32, kind: EntityKind, position: Vec2, size: Vec2) -> Self {
        Self {
            id,
            kind,
            position,
            size,
            footprint: size,
            offset: Vec2::ZERO,
            facing: Direction::Down,
            tags: TagSet::EMPTY,
            gate: None,
            texture: String::new(),
            animation: None,
            behavior: Behavior::Static,
        }
    }

    pub fn with_tags(mut self, tags: TagSet) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_facing(mut self, facing: Direction) -> Self {
        self.facing = facing;
        self
    }

    /// Shrink the collision box inside the footprint
    pub fn with_box(mut self, size: Vec2, offset: Vec2) -> Self {
        self.size = size;
        self.offset = offset;
        self
    }

    pub fn with_gate(mut self, channel: Channel) -> Self {
        self.gate = Some(channel);
        self
    }

    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = texture.into();
        self
    }

    pub fn with_animation(mut self, animation: Option<FrameCycle<String>>) -> Self {
        self.animation = animation;
        self
    }

    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// World-space hitbox.
    ///
    /// The player's box turns with gravity. Everything else turns with its
    /// facing: a zero offset centers the box on `position`, otherwise the
    /// offset box is rotated about the footprint center.
    pub fn bounding_box(&self, gravity: Direction) -> Rect {
        if self.is_player() {
            return Rect::from_center(self.position, gravity.oriented_size(self.size));
        }
        if self.offset == Vec2::ZERO {
            return Rect::from_center(self.position, self.facing.oriented_size(self.size));
        }
        let local_min = -self.footprint * 0.5 + self.offset;
        let local_max = local_min + self.size;
        Rect::from_corners(
            self.position + self.facing.rotate(local_min),
            self.position + self.facing.rotate(local_max),
        )
    }

    /// One frame of behavior
    pub fn update(&mut self, ctx: &mut SimulationContext, dt: f32) {
        match &mut self.behavior {
            Behavior::Static => {}
            Behavior::Movable(body) => {
                body.step(&mut self.position, &ctx.gravity, ctx.settings.drag_factor, dt);
            }
            Behavior::Clamped { body, min, max } => {
                body.step(&mut self.position, &ctx.gravity, ctx.settings.drag_factor, dt);
                body.clamp_to(&mut self.position, *min, *max);
            }
            Behavior::Player { body, player } => {
                player.update(body, &mut self.position, ctx, dt);
            }
            Behavior::Trigger(trigger) => trigger.update(),
        }
    }

    /// Step the animation cursor, if any
    pub fn advance_frame(&mut self) {
        if let Some(animation) = &mut self.animation {
            animation.advance();
        }
    }

    /// Texture key to draw this frame
    pub fn sprite(&self) -> &str {
        self.animation
            .as_ref()
            .map_or(self.texture.as_str(), |animation| animation.current().as_str())
    }

    /// Draw rotation in radians
    pub fn rotation(&self, gravity: Direction) -> f32 {
        if self.is_player() {
            gravity.rotation()
        } else {
            self.facing.rotation()
        }
    }

    #[inline]
    pub fn has_tag(&self, tag: TagSet) -> bool {
        self.tags.contains(tag)
    }

    /// Gate open (or no gate at all)
    pub fn is_active(&self, channels: &ChannelMap) -> bool {
        self.gate.is_none_or(|channel| channels.is_enabled(channel))
    }

    pub fn is_dangerous(&self, channels: &ChannelMap) -> bool {
        self.has_tag(TagSet::DANGEROUS) && self.is_active(channels)
    }

    /// Channel this entity displays, either its gate or its switch channel
    pub fn channel(&self) -> Option<Channel> {
        match &self.behavior {
            Behavior::Trigger(trigger) => Some(trigger.channel),
            _ => self.gate,
        }
    }

    pub fn is_player(&self) -> bool {
        matches!(self.behavior, Behavior::Player { .. })
    }

    pub fn is_movable(&self) -> bool {
        self.body().is_some()
    }

    pub fn body(&self) -> Option<&MovableBody> {
        match &self.behavior {
            Behavior::Movable(body) | Behavior::Clamped { body, .. } | Behavior::Player { body, .. } => {
                Some(body)
            }
            Behavior::Static | Behavior::Trigger(_) => None,
        }
    }

    pub fn body_mut(&mut self) -> Option<&mut MovableBody> {
        match &mut self.behavior {
            Behavior::Movable(body) | Behavior::Clamped { body, .. } | Behavior::Player { body, .. } => {
                Some(body)
            }
            Behavior::Static | Behavior::Trigger(_) => None,
        }
    }

    pub fn player(&self) -> Option<&PlayerState> {
        match &self.behavior {
            Behavior::Player { player, .. } => Some(player),
            _ => None,
        }
    }

    pub fn player_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.behavior {
            Behavior::Player { player, .. } => Some(player),
            _ => None,
        }
    }

    pub fn trigger(&self) -> Option<&TriggerState> {
        match &self.behavior {
            Behavior::Trigger(trigger) => Some(trigger),
            _ => None,
        }
    }

    pub fn trigger_mut(&mut self) -> Option<&mut TriggerState> {
        match &mut self.behavior {
            Behavior::Trigger(trigger) => Some(trigger),
            _ => None,
        }
    }

    /// Send the player back to its spawn. No-op for anything else.
    pub fn respawn(&mut self, gravity: &mut GravityModel) {
        if let Behavior::Player { body, player } = &mut self.behavior {
            player.respawn(body, &mut self.position, gravity);
        }
    }
}
