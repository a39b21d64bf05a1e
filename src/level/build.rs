//! Turning a level description into live entities

use glam::Vec2;

use super::format::{LevelDescription, TileCode, TileKind};
use super::LevelError;
use crate::consts::LASER_THICKNESS;
use crate::sim::anim::{Animator, LASER_ANIMATION};
use crate::sim::body::MovableBody;
use crate::sim::collision::Axis;
use crate::sim::context::SimulationContext;
use crate::sim::entity::{Behavior, Entity, EntityKind, TagSet};
use crate::sim::player::PlayerState;
use crate::sim::state::LevelGrid;
use crate::sim::switch::TriggerState;

impl LevelGrid {
    /// Build every entity of a level.
    ///
    /// All tile codes are decoded before anything is touched, so a bad code
    /// leaves `ctx` as it was. On success the context is reset for the new
    /// level: gravity down, every channel on except those with a laser
    /// marked as starting off.
    pub fn from_description(
        desc: &LevelDescription,
        level_number: usize,
        ctx: &mut SimulationContext,
        animator: &Animator,
    ) -> Result<Self, LevelError> {
        desc.validate()?;
        let codes = desc
            .tiles
            .iter()
            .map(|code| TileCode::parse(code))
            .collect::<Result<Vec<_>, _>>()?;

        ctx.reset_for_level();
        let mut grid = LevelGrid::new(desc.width, desc.height, ctx.settings.tile_size, level_number);
        let mut next_id = 1;

        for (slot, code) in codes.iter().enumerate() {
            let (x, y) = (slot % desc.width, slot / desc.width);
            let Some(mut entity) = build_entity(code.kind, next_id, grid.cell_center(x, y), ctx, animator) else {
                continue;
            };
            if let Some(facing) = code.facing {
                entity.facing = facing;
            }
            if let TileKind::Laser {
                channel,
                initially_off: true,
            } = code.kind
            {
                ctx.channels.set(channel, false);
            }
            grid.place(x, y, entity);
            next_id += 1;
        }

        if grid.player().is_none() {
            log::warn!("Level {} has no player spawn", level_number);
        }
        log::info!(
            "Built level {} ({}x{}, {} entities)",
            level_number,
            desc.width,
            desc.height,
            grid.entity_count()
        );
        Ok(grid)
    }
}

fn build_entity(
    kind: TileKind,
    id: u32,
    center: Vec2,
    ctx: &SimulationContext,
    animator: &Animator,
) -> Option<Entity> {
    let settings = &ctx.settings;
    let ts = settings.tile_size;
    let tile = Vec2::splat(ts);

    let entity = match kind {
        TileKind::Empty => return None,
        TileKind::Hazard { half: false } => Entity::new(id, EntityKind::Hazard, center, tile)
            .with_tags(TagSet::DANGEROUS)
            .with_texture("Spike"),
        TileKind::Hazard { half: true } => Entity::new(id, EntityKind::Hazard, center, tile)
            .with_box(Vec2::new(ts, ts / 2.0), Vec2::new(0.0, ts / 2.0))
            .with_tags(TagSet::DANGEROUS)
            .with_texture("SpikesHalf"),
        TileKind::Tile(variant) => Entity::new(id, EntityKind::Tile, center, tile)
            .with_tags(TagSet::COLLIDABLE)
            .with_texture(variant.texture()),
        TileKind::Goal => Entity::new(id, EntityKind::Goal, center, tile)
            .with_tags(TagSet::GOAL)
            .with_texture("Goal"),
        TileKind::Spawn => Entity::new(id, EntityKind::Player, center, settings.player_size)
            .with_texture("Player")
            .with_behavior(Behavior::Player {
                body: MovableBody::new(settings.max_speed),
                player: PlayerState::new(center),
            }),
        TileKind::Snail => Entity::new(id, EntityKind::Snail, center, settings.player_size)
            .with_tags(TagSet::DANGEROUS)
            .with_texture("Player")
            .with_behavior(Behavior::Movable(MovableBody::new(settings.max_speed))),
        TileKind::Laser { channel, .. } => Entity::new(id, EntityKind::Laser, center, tile)
            .with_box(
                Vec2::new(ts, LASER_THICKNESS),
                Vec2::new(0.0, (ts - LASER_THICKNESS) / 2.0),
            )
            .with_tags(TagSet::DANGEROUS)
            .with_gate(channel)
            .with_texture("LaserFrame1")
            .with_animation(animator.cycle(LASER_ANIMATION)),
        TileKind::Switch { channel } => Entity::new(id, EntityKind::Switch, center, tile)
            .with_box(Vec2::new(ts, ts / 4.0), Vec2::new(0.0, ts - ts / 4.0))
            .with_texture("Button")
            .with_behavior(Behavior::Trigger(TriggerState::with_cooldown(
                channel,
                settings.switch_cooldown_frames,
            ))),
        TileKind::Platform { axis, length, range } => {
            let width = length as f32 * ts;
            // Extends to the right of its tile
            let start = center + Vec2::new((width - ts) / 2.0, 0.0);
            let travel = match axis {
                Axis::Horizontal => Vec2::new(range as f32 * ts, 0.0),
                Axis::Vertical => Vec2::new(0.0, range as f32 * ts),
            };
            Entity::new(id, EntityKind::Platform, start, Vec2::new(width, ts))
                .with_tags(TagSet::COLLIDABLE)
                .with_texture(format!("Platform{}Wide", length))
                .with_behavior(Behavior::Clamped {
                    body: MovableBody::new(settings.max_speed),
                    min: start,
                    max: start + travel,
                })
        }
        TileKind::Crate => Entity::new(id, EntityKind::Crate, center, tile)
            .with_tags(TagSet::COLLIDABLE)
            .with_texture("PlatformBox")
            .with_behavior(Behavior::Movable(MovableBody::new(settings.max_speed))),
    };
    Some(entity)
}
