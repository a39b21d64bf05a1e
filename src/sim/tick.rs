//! Fixed timestep level simulation
//!
//! One call advances every entity of a level by one frame. Contacts between
//! movers and solids are only recorded while entities update; the pushes
//! happen afterwards, in the order the pairs were found.

use super::collision::resolve_collision;
use super::context::SimulationContext;
use super::entity::TagSet;
use super::state::{LevelEvent, LevelGrid};

impl LevelGrid {
    /// Advance the level by one frame. See [`tick`].
    pub fn update(&mut self, ctx: &mut SimulationContext, dt: f32) -> Vec<LevelEvent> {
        tick(self, ctx, dt)
    }
}

/// Advance a level by one frame and report what the session must do
pub fn tick(grid: &mut LevelGrid, ctx: &mut SimulationContext, dt: f32) -> Vec<LevelEvent> {
    let mut events = Vec::new();

    for entity in grid.entities_mut() {
        entity.advance_frame();
    }
    grid.collision_work.clear();

    for slot in 0..grid.slot_count() {
        let Some(entity) = grid.cell_mut(slot) else {
            continue;
        };
        entity.update(ctx, dt);

        if entity.is_movable() {
            pair_mover(grid, slot, ctx, &mut events);
        }
        check_hazard(grid, slot, ctx, &mut events);
    }

    drain_collision_work(grid, ctx);
    grid.frame += 1;
    events
}

/// Queue solids, press switches and check the goal for one mover
fn pair_mover(grid: &mut LevelGrid, mover_slot: usize, ctx: &mut SimulationContext, events: &mut Vec<LevelEvent>) {
    let gravity = ctx.gravity.direction;
    let Some(mover) = grid.cell(mover_slot) else {
        return;
    };
    let mover_id = mover.id;
    let mover_box = mover.bounding_box(gravity);
    let mover_is_player = mover.is_player();

    let mut reached_goal = false;
    for slot in 0..grid.slot_count() {
        if slot == mover_slot {
            continue;
        }
        let Some(other) = grid.cell_mut(slot) else {
            continue;
        };

        let collidable = other.has_tag(TagSet::COLLIDABLE);
        let other_box = other.bounding_box(gravity);
        if mover_is_player && other.has_tag(TagSet::GOAL) && other_box.intersects(&mover_box) {
            reached_goal = true;
        }
        if let Some(trigger) = other.trigger_mut() {
            trigger.on_collision(&other_box, mover_id, &mover_box, &mut ctx.channels);
        }
        if collidable {
            grid.collision_work.push((mover_slot, slot));
        }
    }

    if reached_goal {
        reach_goal(grid, ctx, events);
    }
}

fn reach_goal(grid: &LevelGrid, ctx: &mut SimulationContext, events: &mut Vec<LevelEvent>) {
    ctx.gravity.reset();
    let next = grid.level_number + 1;
    let event = if next >= ctx.level_count {
        LevelEvent::Win
    } else {
        LevelEvent::LoadLevel(next)
    };
    log::debug!("Goal reached in level {}: {:?}", grid.level_number, event);
    push_once(events, event);
}

/// Game over if the player overlaps the entity in `slot` while it is dangerous
fn check_hazard(grid: &LevelGrid, slot: usize, ctx: &SimulationContext, events: &mut Vec<LevelEvent>) {
    let Some(player_slot) = grid.player_slot() else {
        return;
    };
    if player_slot == slot {
        return;
    }
    let (Some(player), Some(entity)) = (grid.cell(player_slot), grid.cell(slot)) else {
        return;
    };
    if !entity.is_dangerous(&ctx.channels) {
        return;
    }

    let gravity = ctx.gravity.direction;
    if player.bounding_box(gravity).intersects(&entity.bounding_box(gravity)) {
        log::debug!("Player hit {:?} {}", entity.kind, entity.id);
        push_once(events, LevelEvent::GameOver);
    }
}

/// Resolve queued pairs in the order they were found
fn drain_collision_work(grid: &mut LevelGrid, ctx: &SimulationContext) {
    let gravity = ctx.gravity.direction;
    let refill = ctx.settings.contact_frames_refill;
    let work = std::mem::take(&mut grid.collision_work);

    for &(mover_slot, target_slot) in &work {
        let Some(target_box) = grid.cell(target_slot).map(|target| target.bounding_box(gravity)) else {
            continue;
        };
        if let Some(mover) = grid.cell_mut(mover_slot) {
            resolve_collision(mover, &target_box, gravity, refill);
        }
    }

    grid.collision_work = work;
}

fn push_once(events: &mut Vec<LevelEvent>, event: LevelEvent) {
    if !events.contains(&event) {
        events.push(event);
    }
}
