//! Level grid and the events a frame can raise
//!
//! The grid owns every entity of a loaded level, stored by the tile it was
//! built on. Movers keep their slot while they travel, so slot order is the
//! stable update order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::context::SimulationContext;
use super::entity::Entity;

/// Outcome of a frame the session has to act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LevelEvent {
    /// The player touched something dangerous
    GameOver,
    /// The player reached the goal of the last level
    Win,
    /// The player reached a goal; this level should be loaded next
    LoadLevel(usize),
}

/// A loaded level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelGrid {
    width: usize,
    height: usize,
    tile_size: f32,
    /// Row-major: `y * width + x`
    cells: Vec<Option<Entity>>,
    /// Slot holding the player, if the level has one
    player: Option<usize>,
    /// Index of this level in the campaign
    pub level_number: usize,
    /// Frames simulated since the level was built
    pub frame: u64,
    /// (mover, target) slot pairs queued for resolution this frame
    #[serde(skip)]
    pub(crate) collision_work: Vec<(usize, usize)>,
}

impl LevelGrid {
    /// Empty grid of `width` x `height` tiles
    pub fn new(width: usize, height: usize, tile_size: f32, level_number: usize) -> Self {
        Self {
            width,
            height,
            tile_size,
            cells: vec![None; width * height],
            player: None,
            level_number,
            frame: 0,
            collision_work: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// World position of a tile's center
    pub fn cell_center(&self, x: usize, y: usize) -> Vec2 {
        Vec2::new(x as f32, y as f32) * self.tile_size
    }

    /// Slot index of a tile, `None` outside the grid
    pub fn slot(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&Entity> {
        self.slot(x, y).and_then(|slot| self.cells[slot].as_ref())
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Entity> {
        let slot = self.slot(x, y)?;
        self.cells[slot].as_mut()
    }

    /// Put an entity on a tile, replacing whatever was there.
    ///
    /// Returns false (and drops the entity) when the tile is outside the grid.
    pub fn place(&mut self, x: usize, y: usize, entity: Entity) -> bool {
        let Some(slot) = self.slot(x, y) else {
            log::warn!("Dropping {:?} placed outside the grid at ({}, {})", entity.kind, x, y);
            return false;
        };
        if entity.is_player() {
            if let Some(previous) = self.player.filter(|&previous| previous != slot) {
                log::warn!("Level has more than one player; keeping the one at slot {}", slot);
                self.cells[previous] = None;
            }
            self.player = Some(slot);
        } else if self.player == Some(slot) {
            self.player = None;
        }
        self.cells[slot] = Some(entity);
        true
    }

    /// Take an entity off its tile
    pub fn remove(&mut self, x: usize, y: usize) -> Option<Entity> {
        let slot = self.slot(x, y)?;
        if self.player == Some(slot) {
            self.player = None;
        }
        self.cells[slot].take()
    }

    /// Live entities in update order
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.cells.iter().flatten()
    }

    pub fn entities_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.cells.iter_mut().flatten()
    }

    pub fn entity_count(&self) -> usize {
        self.entities().count()
    }

    pub fn find(&self, id: u32) -> Option<&Entity> {
        self.entities().find(|entity| entity.id == id)
    }

    pub fn player(&self) -> Option<&Entity> {
        self.player.and_then(|slot| self.cells[slot].as_ref())
    }

    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        let slot = self.player?;
        self.cells[slot].as_mut()
    }

    /// Put the player back on its spawn with gravity down
    pub fn respawn_player(&mut self, ctx: &mut SimulationContext) {
        let gravity = &mut ctx.gravity;
        if let Some(player) = self.player_mut() {
            player.respawn(gravity);
            log::info!("Player respawned at {:?}", player.position);
        }
    }

    pub(crate) fn cell(&self, slot: usize) -> Option<&Entity> {
        self.cells.get(slot).and_then(Option::as_ref)
    }

    pub(crate) fn cell_mut(&mut self, slot: usize) -> Option<&mut Entity> {
        self.cells.get_mut(slot).and_then(Option::as_mut)
    }

    pub(crate) fn slot_count(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn player_slot(&self) -> Option<usize> {
        self.player
    }
}
