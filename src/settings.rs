//! Game tuning and preferences
//!
//! Stored as JSON next to the level files. Missing fields fall back to the
//! defaults in `crate::consts`.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors reading or writing a settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Physics tuning and debug preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    /// Pixels per grid tile
    pub tile_size: f32,
    /// Gravity acceleration (pixels/s²)
    pub gravity_strength: f32,

    // === Movement ===
    /// Speed cap for movable entities
    pub max_speed: f32,
    /// Velocity kept per second while airborne (0-1)
    pub drag_factor: f32,
    /// Velocity kept per second while grounded (0-1)
    pub ground_drag_factor: f32,
    /// Lateral acceleration from input
    pub player_acceleration: f32,
    /// Player hitbox, gravity-down orientation
    pub player_size: Vec2,
    /// Grounded window after a contact
    pub contact_frames_refill: u32,

    // === Puzzles ===
    pub switch_cooldown_frames: u32,

    // === Debug ===
    /// Draw hitbox outlines
    pub show_hitboxes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_size: TILE_SIZE,
            gravity_strength: GRAVITY_STRENGTH,

            max_speed: BASE_MAX_SPEED,
            drag_factor: DRAG_FACTOR,
            ground_drag_factor: GROUND_DRAG_FACTOR,
            player_acceleration: PLAYER_ACCELERATION,
            player_size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            contact_frames_refill: CONTACT_FRAMES_REFILL,

            switch_cooldown_frames: SWITCH_COOLDOWN_FRAMES,

            show_hitboxes: false,
        }
    }
}

impl Settings {
    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        Ok(settings.sanitized())
    }

    /// Read settings, logging and falling back to defaults on any failure
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}: {})", path.display(), e);
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Clamp values into their valid ranges
    pub fn sanitized(mut self) -> Self {
        self.tile_size = self.tile_size.max(1.0);
        self.gravity_strength = self.gravity_strength.max(0.0);
        self.max_speed = self.max_speed.max(0.0);
        self.drag_factor = self.drag_factor.clamp(0.0, 1.0);
        self.ground_drag_factor = self.ground_drag_factor.clamp(0.0, 1.0);
        self.player_size = self.player_size.max(Vec2::ONE);
        self
    }
}
