//! Gravity Snail - a grid puzzle platformer with rotating gravity
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (gravity, movement, collisions, triggers)
//! - `level`: Level descriptions and grid construction
//! - `session`: Game state shell driving the loaded level
//! - `renderer`: Draw instances handed to the presentation layer
//! - `input`: Per-frame keyboard/mouse snapshots
//! - `settings`: Data-driven tuning

pub mod input;
pub mod level;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use input::{InputSnapshot, Key};
pub use session::{GameState, Session};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Nominal frame rate the tuning values were authored for
    pub const TARGET_FRAMERATE: u32 = 60;
    /// Frame step used by the headless driver
    pub const FRAME_DT: f32 = 1.0 / TARGET_FRAMERATE as f32;

    /// Pixels per grid tile
    pub const TILE_SIZE: f32 = 32.0;

    /// Gravity acceleration (pixels/s²)
    pub const GRAVITY_STRENGTH: f32 = 100.0;
    /// Speed cap for every movable entity
    pub const BASE_MAX_SPEED: f32 = 275.0;
    /// Fraction of velocity kept after one second of airborne drag
    pub const DRAG_FACTOR: f32 = 0.5;
    /// Fraction of velocity kept after one second of ground drag
    pub const GROUND_DRAG_FACTOR: f32 = 0.2;

    /// Lateral acceleration from player input (pixels/s²)
    pub const PLAYER_ACCELERATION: f32 = 150.0;
    /// Player collision box, gravity-down orientation
    pub const PLAYER_WIDTH: f32 = 26.0;
    pub const PLAYER_HEIGHT: f32 = 22.0;
    /// Frames the player counts as grounded after touching something
    pub const CONTACT_FRAMES_REFILL: u32 = 10;

    /// Frames a switch stays inert after the last body leaves it
    pub const SWITCH_COOLDOWN_FRAMES: u32 = 15;
    /// Laser beam thickness
    pub const LASER_THICKNESS: f32 = 10.0;
    /// Largest grid a level may describe
    pub const MAX_LEVEL_TILES: usize = 1 << 16;
}

/// Tolerance for snapping a resolved coordinate onto a whole pixel
const SNAP_EPSILON: f32 = 1e-3;

/// Round up to a whole pixel, absorbing float noise just above an integer
#[inline]
pub fn snap_ceil(value: f32) -> f32 {
    let nearest = value.round();
    if (value - nearest).abs() < SNAP_EPSILON {
        nearest
    } else {
        value.ceil()
    }
}

/// Round down to a whole pixel, absorbing float noise just below an integer
#[inline]
pub fn snap_floor(value: f32) -> f32 {
    let nearest = value.round();
    if (value - nearest).abs() < SNAP_EPSILON {
        nearest
    } else {
        value.floor()
    }
}
