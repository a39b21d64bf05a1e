//! The player: steers gravity and walks relative to it

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::MovableBody;
use super::context::SimulationContext;
use super::gravity::{Direction, GravityModel};
use crate::input::{InputSnapshot, Key};

/// Player-only state layered on a `MovableBody`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub spawn_position: Vec2,
    /// Frames left in the "recently grounded" window
    pub contact_frames: u32,
    /// Sprite mirrored horizontally (cosmetic)
    pub facing_flip: bool,
}

impl PlayerState {
    pub fn new(spawn_position: Vec2) -> Self {
        Self {
            spawn_position,
            contact_frames: 0,
            facing_flip: false,
        }
    }

    /// Touched something solid within the contact window
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.contact_frames > 0
    }

    pub fn refill_contact(&mut self, refill: u32) {
        self.contact_frames = refill;
    }

    /// One player frame: steer gravity, fall, drag, walk, move
    pub fn update(
        &mut self,
        body: &mut MovableBody,
        position: &mut Vec2,
        ctx: &mut SimulationContext,
        dt: f32,
    ) {
        if let Some(direction) = gravity_from_input(&ctx.input) {
            ctx.gravity.direction = direction;
        }

        body.apply_gravity(&ctx.gravity, dt);
        self.apply_drag(body, ctx, dt);
        self.apply_movement(body, &ctx.input, ctx.gravity.direction, ctx.settings.player_acceleration, dt);
        body.apply_velocity(position, dt);

        self.end_of_frame(body);
    }

    /// Ground drag inside the contact window, airborne drag otherwise
    fn apply_drag(&self, body: &mut MovableBody, ctx: &SimulationContext, dt: f32) {
        let factor = if self.is_grounded() {
            ctx.settings.ground_drag_factor
        } else {
            ctx.settings.drag_factor
        };
        body.apply_drag(factor, dt);
    }

    /// Walk input, reinterpreted along the axis perpendicular to gravity
    fn apply_movement(
        &mut self,
        body: &mut MovableBody,
        input: &InputSnapshot,
        gravity: Direction,
        acceleration: f32,
        dt: f32,
    ) {
        let step = acceleration * dt;
        if input.is_down(Key::MoveRight) {
            self.facing_flip = gravity == Direction::Up;
            body.velocity += walk_axis(gravity) * step;
        }
        if input.is_down(Key::MoveLeft) {
            self.facing_flip = gravity != Direction::Up;
            body.velocity -= walk_axis(gravity) * step;
        }
    }

    fn end_of_frame(&mut self, body: &mut MovableBody) {
        self.contact_frames = self.contact_frames.saturating_sub(1);
        body.end_of_frame();
    }

    /// Back to spawn: stopped, gravity down
    pub fn respawn(&self, body: &mut MovableBody, position: &mut Vec2, gravity: &mut GravityModel) {
        body.velocity = Vec2::ZERO;
        body.previous_velocity = Vec2::ZERO;
        *position = self.spawn_position;
        gravity.reset();
    }
}

/// Gravity requested by the held keys (Up > Down > Left > Right)
pub fn gravity_from_input(input: &InputSnapshot) -> Option<Direction> {
    [
        (Key::GravityUp, Direction::Up),
        (Key::GravityDown, Direction::Down),
        (Key::GravityLeft, Direction::Left),
        (Key::GravityRight, Direction::Right),
    ]
    .into_iter()
    .find(|&(key, _)| input.is_down(key))
    .map(|(_, direction)| direction)
}

/// World-space direction of "walk right" under the given gravity
pub fn walk_axis(gravity: Direction) -> Vec2 {
    match gravity {
        Direction::Left => Vec2::Y,
        Direction::Right => Vec2::NEG_Y,
        Direction::Up | Direction::Down => Vec2::X,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_parts() -> (PlayerState, MovableBody, Vec2, SimulationContext) {
        let ctx = SimulationContext::default();
        let body = MovableBody::new(ctx.settings.max_speed);
        (PlayerState::new(Vec2::new(64.0, 64.0)), body, Vec2::new(64.0, 64.0), ctx)
    }

    #[test]
    fn test_gravity_key_priority() {
        let input = InputSnapshot::holding(&[Key::GravityRight, Key::GravityDown, Key::GravityLeft]);
        assert_eq!(gravity_from_input(&input), Some(Direction::Down));
        let input = InputSnapshot::holding(&[Key::GravityRight, Key::GravityUp]);
        assert_eq!(gravity_from_input(&input), Some(Direction::Up));
        let input = InputSnapshot::holding(&[Key::GravityRight, Key::GravityLeft]);
        assert_eq!(gravity_from_input(&input), Some(Direction::Left));
        assert_eq!(gravity_from_input(&InputSnapshot::default()), None);
    }

    #[test]
    fn test_update_writes_gravity() {
        let (mut player, mut body, mut pos, mut ctx) = player_parts();
        ctx.input = InputSnapshot::holding(&[Key::GravityLeft]);
        player.update(&mut body, &mut pos, &mut ctx, 0.1);
        assert_eq!(ctx.gravity.direction, Direction::Left);
        assert!(body.velocity.x < 0.0);
        assert_eq!(body.velocity.y, 0.0);

        // Releasing the key keeps the last gravity
        ctx.input = InputSnapshot::default();
        player.update(&mut body, &mut pos, &mut ctx, 0.1);
        assert_eq!(ctx.gravity.direction, Direction::Left);
    }

    #[test]
    fn test_walk_relative_to_gravity() {
        let (mut player, mut body, mut pos, mut ctx) = player_parts();
        body.apply_gravity = false;
        ctx.gravity.direction = Direction::Left;
        ctx.input = InputSnapshot::holding(&[Key::MoveRight]);
        player.update(&mut body, &mut pos, &mut ctx, 0.1);
        assert_eq!(body.velocity.x, 0.0);
        assert!((body.velocity.y - 15.0).abs() < 1e-4);

        let (mut player, mut body, mut pos, mut ctx) = player_parts();
        body.apply_gravity = false;
        ctx.gravity.direction = Direction::Right;
        ctx.input = InputSnapshot::holding(&[Key::MoveRight]);
        player.update(&mut body, &mut pos, &mut ctx, 0.1);
        assert!((body.velocity.y + 15.0).abs() < 1e-4);

        let (mut player, mut body, mut pos, mut ctx) = player_parts();
        body.apply_gravity = false;
        ctx.input = InputSnapshot::holding(&[Key::MoveLeft]);
        player.update(&mut body, &mut pos, &mut ctx, 0.1);
        assert!((body.velocity.x + 15.0).abs() < 1e-4);
        assert!(player.facing_flip);
    }

    #[test]
    fn test_facing_flip_inverts_under_up_gravity() {
        let (mut player, mut body, mut pos, mut ctx) = player_parts();
        ctx.input = InputSnapshot::holding(&[Key::GravityUp, Key::MoveRight]);
        player.update(&mut body, &mut pos, &mut ctx, 0.1);
        assert!(player.facing_flip);
    }

    #[test]
    fn test_contact_frames_saturate() {
        let (mut player, mut body, mut pos, mut ctx) = player_parts();
        player.refill_contact(2);
        assert!(player.is_grounded());
        for _ in 0..5 {
            player.update(&mut body, &mut pos, &mut ctx, 0.1);
        }
        assert_eq!(player.contact_frames, 0);
        assert!(!player.is_grounded());
    }

    #[test]
    fn test_ground_drag_is_stronger() {
        let (mut grounded, mut body_a, mut pos_a, mut ctx) = player_parts();
        let (airborne, mut body_b, _, _) = player_parts();
        grounded.refill_contact(10);
        for body in [&mut body_a, &mut body_b] {
            body.velocity = Vec2::new(100.0, 0.0);
            body.end_of_frame();
        }
        grounded.apply_drag(&mut body_a, &ctx, 1.0);
        airborne.apply_drag(&mut body_b, &ctx, 1.0);
        assert!((body_a.velocity.x - 20.0).abs() < 1e-3);
        assert!((body_b.velocity.x - 50.0).abs() < 1e-3);

        // Still usable afterwards
        grounded.update(&mut body_a, &mut pos_a, &mut ctx, 0.0);
    }

    #[test]
    fn test_respawn_resets_gravity_down() {
        let (player, mut body, mut pos, mut ctx) = player_parts();
        ctx.gravity.direction = Direction::Right;
        body.velocity = Vec2::new(80.0, -20.0);
        pos = Vec2::new(300.0, 10.0);
        player.respawn(&mut body, &mut pos, &mut ctx.gravity);
        assert_eq!(body.velocity, Vec2::ZERO);
        assert_eq!(pos, Vec2::new(64.0, 64.0));
        assert_eq!(ctx.gravity.direction, Direction::Down);
    }
}
