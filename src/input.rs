//! Per-frame input snapshots
//!
//! The platform layer polls the keyboard and mouse once per frame and hands
//! the simulation an `InputSnapshot`. Nothing in here touches a device.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Logical keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// W
    GravityUp,
    /// S
    GravityDown,
    /// A
    GravityLeft,
    /// D
    GravityRight,
    /// Left arrow
    MoveLeft,
    /// Right arrow
    MoveRight,
    /// R
    Respawn,
    /// Enter / click on the win screen
    Confirm,
    /// M
    DebugOverlay,
}

impl Key {
    #[inline]
    const fn bit(self) -> u16 {
        1 << self as u16
    }
}

/// Set of keys held down during one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeySet(pub u16);

impl KeySet {
    pub const EMPTY: Self = Self(0);

    pub fn from_keys(keys: &[Key]) -> Self {
        keys.iter().fold(Self::EMPTY, |set, &key| set.with(key))
    }

    #[inline]
    pub fn with(self, key: Key) -> Self {
        Self(self.0 | key.bit())
    }

    #[inline]
    pub fn is_down(self, key: Key) -> bool {
        self.0 & key.bit() != 0
    }

    pub fn press(&mut self, key: Key) {
        self.0 |= key.bit();
    }

    pub fn release(&mut self, key: Key) {
        self.0 &= !key.bit();
    }
}

/// Mouse state for one frame
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MouseState {
    /// Cursor position in window pixels
    pub position: Vec2,
    pub left_pressed: bool,
}

/// Current and previous frame input
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputSnapshot {
    pub keys: KeySet,
    pub prev_keys: KeySet,
    pub mouse: MouseState,
    pub prev_mouse: MouseState,
}

impl InputSnapshot {
    /// Snapshot with `keys` held this frame and nothing held before
    pub fn holding(keys: &[Key]) -> Self {
        Self {
            keys: KeySet::from_keys(keys),
            ..Default::default()
        }
    }

    /// Roll the snapshot forward: this frame becomes the previous one
    pub fn advance(&mut self, keys: KeySet, mouse: MouseState) {
        self.prev_keys = self.keys;
        self.prev_mouse = self.mouse;
        self.keys = keys;
        self.mouse = mouse;
    }

    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.keys.is_down(key)
    }

    /// Key went down this frame
    pub fn single_press(&self, key: Key) -> bool {
        self.keys.is_down(key) && !self.prev_keys.is_down(key)
    }

    /// Left button went down this frame
    pub fn single_click(&self) -> bool {
        self.mouse.left_pressed && !self.prev_mouse.left_pressed
    }
}
