//! Velocity integration for movable entities
//!
//! A frame always runs gravity, then drag, then integration, then the
//! end-of-frame bookkeeping. Drag compares the current velocity against the
//! previous frame's, so the order is load-bearing.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::gravity::GravityModel;

/// Kinematic state of something that moves
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MovableBody {
    pub velocity: Vec2,
    /// Velocity at the end of the previous frame (drag reference)
    pub previous_velocity: Vec2,
    /// Speed cap, enforced by uniform rescale
    pub max_speed: f32,
    /// Responds to global gravity
    pub apply_gravity: bool,
    /// Loses speed over time
    pub apply_drag: bool,
}

impl MovableBody {
    pub fn new(max_speed: f32) -> Self {
        Self {
            velocity: Vec2::ZERO,
            previous_velocity: Vec2::ZERO,
            max_speed,
            apply_gravity: true,
            apply_drag: true,
        }
    }

    /// One full frame with airborne drag
    pub fn step(&mut self, position: &mut Vec2, gravity: &GravityModel, drag_factor: f32, dt: f32) {
        self.apply_gravity(gravity, dt);
        self.apply_drag(drag_factor, dt);
        self.apply_velocity(position, dt);
        self.end_of_frame();
    }

    /// Accelerate along the global gravity
    pub fn apply_gravity(&mut self, gravity: &GravityModel, dt: f32) {
        // dt == 0 happens on the very first frame
        if !self.apply_gravity || dt == 0.0 {
            return;
        }
        self.velocity += gravity.vector() * dt;
    }

    /// Exponential decay on every axis that is not currently accelerating
    pub fn apply_drag(&mut self, drag_factor: f32, dt: f32) {
        if !self.apply_drag {
            return;
        }
        let decay = drag_factor.powf(dt);
        if self.velocity.x.abs() <= self.previous_velocity.x.abs() {
            self.velocity.x *= decay;
        }
        if self.velocity.y.abs() <= self.previous_velocity.y.abs() {
            self.velocity.y *= decay;
        }
    }

    /// Clamp speed and move
    pub fn apply_velocity(&mut self, position: &mut Vec2, dt: f32) {
        if dt == 0.0 {
            return;
        }
        self.velocity = self.velocity.clamp_length_max(self.max_speed);
        *position += self.velocity * dt;
    }

    pub fn end_of_frame(&mut self) {
        self.previous_velocity = self.velocity;
    }

    /// Keep `position` on a track between `min` and `max`.
    ///
    /// Velocity is zeroed on each axis that ends up sitting on a bound.
    pub fn clamp_to(&mut self, position: &mut Vec2, min: Vec2, max: Vec2) {
        *position = position.clamp(min, max);
        if position.x == min.x || position.x == max.x {
            self.velocity.x = 0.0;
        }
        if position.y == min.y || position.y == max.y {
            self.velocity.y = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::gravity::Direction;
    use proptest::prelude::*;

    #[test]
    fn test_zero_dt_is_noop() {
        let mut body = MovableBody::new(275.0);
        body.velocity = Vec2::new(3.0, 4.0);
        let mut pos = Vec2::new(10.0, 10.0);
        let gravity = GravityModel::new(100.0);
        body.apply_gravity(&gravity, 0.0);
        body.apply_velocity(&mut pos, 0.0);
        assert_eq!(body.velocity, Vec2::new(3.0, 4.0));
        assert_eq!(pos, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_gravity_disabled() {
        let mut body = MovableBody::new(275.0);
        body.apply_gravity = false;
        body.apply_gravity(&GravityModel::new(100.0), 0.1);
        assert_eq!(body.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_gravity_follows_direction() {
        let mut body = MovableBody::new(275.0);
        let mut gravity = GravityModel::new(100.0);
        gravity.direction = Direction::Left;
        body.apply_gravity(&gravity, 0.5);
        assert_eq!(body.velocity, Vec2::new(-50.0, 0.0));
    }

    #[test]
    fn test_drag_skips_accelerating_axis() {
        let mut body = MovableBody::new(275.0);
        body.previous_velocity = Vec2::new(10.0, 10.0);
        body.velocity = Vec2::new(8.0, 20.0);
        body.apply_drag(0.5, 1.0);
        assert_eq!(body.velocity, Vec2::new(4.0, 20.0));
    }

    #[test]
    fn test_drag_is_frame_rate_independent() {
        let mut coarse = MovableBody::new(275.0);
        coarse.velocity = Vec2::new(100.0, 0.0);
        coarse.end_of_frame();
        coarse.apply_drag(0.5, 1.0);

        let mut fine = MovableBody::new(275.0);
        fine.velocity = Vec2::new(100.0, 0.0);
        for _ in 0..10 {
            fine.end_of_frame();
            fine.apply_drag(0.5, 0.1);
        }
        assert!((coarse.velocity.x - fine.velocity.x).abs() < 1e-3);
        assert!((coarse.velocity.x - 50.0).abs() < 1e-3);
    }

    #[test]
    fn test_clamp_to_track() {
        let mut body = MovableBody::new(275.0);
        body.velocity = Vec2::new(40.0, 12.0);
        let mut pos = Vec2::new(120.0, 64.0);
        body.clamp_to(&mut pos, Vec2::new(0.0, 64.0), Vec2::new(96.0, 64.0));
        assert_eq!(pos, Vec2::new(96.0, 64.0));
        assert_eq!(body.velocity, Vec2::ZERO);

        body.velocity = Vec2::new(-5.0, 3.0);
        let mut pos = Vec2::new(50.0, 64.0);
        body.clamp_to(&mut pos, Vec2::new(0.0, 64.0), Vec2::new(96.0, 64.0));
        assert_eq!(body.velocity, Vec2::new(-5.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_speed_clamped_preserving_direction(
            vx in -5000.0f32..5000.0,
            vy in -5000.0f32..5000.0,
            max_speed in 1.0f32..500.0,
        ) {
            let v = Vec2::new(vx, vy);
            prop_assume!(v.length() > max_speed * 1.001);

            let mut body = MovableBody::new(max_speed);
            body.velocity = v;
            let mut pos = Vec2::ZERO;
            body.apply_velocity(&mut pos, 1.0 / 60.0);

            prop_assert!((body.velocity.length() - max_speed).abs() <= max_speed * 1e-4);
            let before = v.normalize();
            let after = body.velocity.normalize();
            prop_assert!((before - after).length() < 1e-4);
        }

        #[test]
        fn prop_drag_decays_without_sign_flip(
            vx in -1000.0f32..1000.0,
            vy in -1000.0f32..1000.0,
            drag in 0.0f32..1.0,
            dt in 0.001f32..0.5,
        ) {
            let mut body = MovableBody::new(f32::MAX);
            body.velocity = Vec2::new(vx, vy);
            body.end_of_frame();

            for _ in 0..30 {
                let before = body.velocity;
                body.apply_drag(drag, dt);
                body.end_of_frame();
                prop_assert!(body.velocity.x.abs() <= before.x.abs());
                prop_assert!(body.velocity.y.abs() <= before.y.abs());
                prop_assert!(body.velocity.x * before.x >= 0.0);
                prop_assert!(body.velocity.y * before.y >= 0.0);
            }
        }
    }
}
