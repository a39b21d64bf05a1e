//! Shared per-frame simulation state
//!
//! Everything that used to be process-wide lives here and is passed by
//! `&mut` into each update. Write ownership per field:
//! - `gravity.direction`: the player (input), level load and goal/respawn resets
//! - `channels`: each switch writes only its own channel
//! - `input`: the platform layer, before the frame runs

use serde::{Deserialize, Serialize};

use super::gravity::GravityModel;
use super::switch::ChannelMap;
use crate::input::InputSnapshot;
use crate::settings::Settings;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationContext {
    pub gravity: GravityModel,
    pub channels: ChannelMap,
    pub input: InputSnapshot,
    pub settings: Settings,
    /// Number of levels in the running campaign (last level wins on goal)
    pub level_count: usize,
}

impl Default for SimulationContext {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl SimulationContext {
    pub fn new(settings: Settings) -> Self {
        Self {
            gravity: GravityModel::new(settings.gravity_strength),
            channels: ChannelMap::default(),
            input: InputSnapshot::default(),
            settings,
            level_count: 1,
        }
    }

    /// State every level starts from: gravity down, all channels on
    pub fn reset_for_level(&mut self) {
        self.gravity.reset();
        self.channels.reset();
    }
}
