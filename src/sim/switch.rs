//! Switches and the gated-hazard channels they drive
//!
//! A switch flips its channel once when something first steps on it. While
//! anything still rests on it the cooldown is held at its reset value, so a
//! body settling on the plate can't make it flicker.

use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::SWITCH_COOLDOWN_FRAMES;

/// Logical wire connecting switches to the hazards they gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Parse a channel code (r/g/b)
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'r' => Some(Channel::Red),
            'g' => Some(Channel::Green),
            'b' => Some(Channel::Blue),
            _ => None,
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// Enabled flag per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelMap {
    enabled: [bool; 3],
}

impl Default for ChannelMap {
    fn default() -> Self {
        Self { enabled: [true; 3] }
    }
}

impl ChannelMap {
    #[inline]
    pub fn is_enabled(&self, channel: Channel) -> bool {
        self.enabled[channel.index()]
    }

    pub fn set(&mut self, channel: Channel, enabled: bool) {
        self.enabled[channel.index()] = enabled;
    }

    /// Flip a channel and return its new state
    pub fn toggle(&mut self, channel: Channel) -> bool {
        let state = !self.is_enabled(channel);
        self.set(channel, state);
        state
    }

    /// Every channel back on
    pub fn reset(&mut self) {
        self.enabled = [true; 3];
    }
}

/// Switch state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggerState {
    pub channel: Channel,
    /// Ids of movers currently overlapping the plate
    pub touching: Vec<u32>,
    pub cooldown_frames: u32,
    /// Value the cooldown is held at while anything touches
    pub cooldown_reset: u32,
}

impl TriggerState {
    pub fn new(channel: Channel) -> Self {
        Self::with_cooldown(channel, SWITCH_COOLDOWN_FRAMES)
    }

    pub fn with_cooldown(channel: Channel, cooldown_reset: u32) -> Self {
        Self {
            channel,
            touching: Vec::new(),
            cooldown_frames: 0,
            cooldown_reset,
        }
    }

    /// Test one mover against the plate.
    ///
    /// Returns true if this contact flipped the channel.
    pub fn on_collision(
        &mut self,
        plate: &Rect,
        mover_id: u32,
        mover_box: &Rect,
        channels: &mut ChannelMap,
    ) -> bool {
        if !plate.intersects(mover_box) {
            self.touching.retain(|&id| id != mover_id);
            return false;
        }

        let fire = self.touching.is_empty() && self.cooldown_frames == 0;
        if fire {
            let enabled = channels.toggle(self.channel);
            log::debug!(
                "Switch {:?} toggled by {}: channel {}",
                self.channel,
                mover_id,
                if enabled { "on" } else { "off" }
            );
        }
        if !self.touching.contains(&mover_id) {
            self.touching.push(mover_id);
        }
        fire
    }

    /// Per-frame cooldown bookkeeping
    pub fn update(&mut self) {
        if !self.touching.is_empty() {
            self.cooldown_frames = self.cooldown_reset;
        } else if self.cooldown_frames > 0 {
            self.cooldown_frames -= 1;
        }
    }

    pub fn is_pressed(&self) -> bool {
        !self.touching.is_empty()
    }
}
