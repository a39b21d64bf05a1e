//! Level presentation: what to draw each frame, with no GPU in sight

use glam::Vec2;

use super::shapes::{facing_color, rect_outline};
use super::vertex::{DrawInstance, Vertex, colors};
use crate::sim::context::SimulationContext;
use crate::sim::entity::{Entity, EntityKind};
use crate::sim::state::LevelGrid;
use crate::sim::switch::{Channel, ChannelMap};

/// A sprite plus the texture key to draw it with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand<'a> {
    pub instance: DrawInstance,
    pub sprite: &'a str,
}

pub fn channel_color(channel: Channel) -> [f32; 4] {
    match channel {
        Channel::Red => colors::RED,
        Channel::Green => colors::GREEN,
        Channel::Blue => colors::BLUE,
    }
}

/// Base tint for an entity, `None` if it is hidden this frame
pub fn entity_color(entity: &Entity, channels: &ChannelMap) -> Option<[f32; 4]> {
    let color = match entity.kind {
        EntityKind::Hazard => colors::RED,
        EntityKind::Tile => colors::ORANGE,
        EntityKind::Goal => colors::YELLOW,
        EntityKind::Player => colors::WHITE,
        EntityKind::Snail => colors::BLACK,
        EntityKind::Laser => {
            if !entity.is_active(channels) {
                return None;
            }
            entity.channel().map_or(colors::WHITE, channel_color)
        }
        EntityKind::Switch => colors::WHITE,
        EntityKind::Crate => colors::BLUE,
        EntityKind::Platform => colors::BLUE_VIOLET,
    };
    Some(color)
}

impl LevelGrid {
    /// Sprites for every visible entity, in update order.
    ///
    /// A `tint` replaces every entity's own color (the game-over screen
    /// draws the frozen level in gray) and also shows disabled lasers.
    pub fn draw_instances(&self, ctx: &SimulationContext, tint: Option<[f32; 4]>) -> Vec<DrawCommand<'_>> {
        let gravity = ctx.gravity.direction;
        self.entities()
            .filter_map(|entity| {
                let color = match tint {
                    Some(tint) => tint,
                    None => entity_color(entity, &ctx.channels)?,
                };
                let flip = entity.player().is_some_and(|player| player.facing_flip);
                let instance = DrawInstance::new(entity.position, sprite_size(entity), entity.rotation(gravity), color)
                    .flipped(flip);
                Some(DrawCommand {
                    instance,
                    sprite: entity.sprite(),
                })
            })
            .collect()
    }

    /// Hitbox outlines colored by facing (debug overlay)
    pub fn debug_outlines(&self, ctx: &SimulationContext, thickness: f32) -> Vec<Vertex> {
        let gravity = ctx.gravity.direction;
        self.entities()
            .flat_map(|entity| {
                let facing = if entity.is_player() { gravity } else { entity.facing };
                rect_outline(&entity.bounding_box(gravity), thickness, facing_color(facing))
            })
            .collect()
    }
}

/// Unrotated sprite size: the player's hitbox, everyone else's footprint
fn sprite_size(entity: &Entity) -> Vec2 {
    if entity.is_player() { entity.size } else { entity.footprint }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::LevelDescription;
    use crate::sim::anim::Animator;
    use crate::sim::gravity::Direction;

    fn level(text: &str, ctx: &mut SimulationContext) -> LevelGrid {
        let desc = LevelDescription::parse(text).unwrap();
        LevelGrid::from_description(&desc, 0, ctx, &Animator::with_builtin()).unwrap()
    }

    #[test]
    fn test_colors_by_kind() {
        let mut ctx = SimulationContext::default();
        // Column 0: spawn, tile. Column 1: goal, red laser
        let grid = level("2\n2\n3\n1b\n2\n5rl\n", &mut ctx);
        let tints: Vec<[f32; 4]> = grid.draw_instances(&ctx, None).iter().map(|c| c.instance.color).collect();
        assert_eq!(tints, vec![colors::WHITE, colors::YELLOW, colors::ORANGE, colors::RED]);
    }

    #[test]
    fn test_disabled_laser_hidden_unless_tinted() {
        let mut ctx = SimulationContext::default();
        let grid = level("1\n1\n5bli\n", &mut ctx);
        assert!(grid.draw_instances(&ctx, None).is_empty());

        let tinted = grid.draw_instances(&ctx, Some(colors::DARK_GRAY));
        assert_eq!(tinted.len(), 1);
        assert_eq!(tinted[0].instance.color, colors::DARK_GRAY);
        assert_eq!(tinted[0].sprite, "LaserFrame1");
    }

    #[test]
    fn test_rotation_follows_facing_and_gravity() {
        let mut ctx = SimulationContext::default();
        let grid = level("2\n1\n3\n0L\n", &mut ctx);
        ctx.gravity.direction = Direction::Up;
        let commands = grid.draw_instances(&ctx, None);
        assert_eq!(commands[0].instance.rotation, Direction::Up.rotation());
        assert_eq!(commands[1].instance.rotation, Direction::Left.rotation());
        assert_eq!(commands[1].instance.size, [32.0, 32.0]);
    }

    #[test]
    fn test_debug_outlines_per_entity() {
        let mut ctx = SimulationContext::default();
        let grid = level("2\n1\n1bU\n1b\n", &mut ctx);
        let vertices = grid.debug_outlines(&ctx, 1.0);
        assert_eq!(vertices.len(), 48);
        assert_eq!(vertices[0].color, colors::LIME_GREEN);
        assert_eq!(vertices[47].color, colors::MAGENTA);
    }
}
