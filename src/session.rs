//! Game session: level catalogue, loaded level and screen state
//!
//! The session is the only owner of the `SimulationContext`. It feeds input
//! in, steps the loaded level while playing and turns the level's events
//! into screen changes. Menus are exposed as plain transition methods; the
//! host decides what buttons call them.

use serde::{Deserialize, Serialize};

use crate::input::{Key, KeySet, MouseState};
use crate::level::{LevelDescription, LevelError, LevelSource};
use crate::renderer::{DrawCommand, Vertex, colors};
use crate::settings::Settings;
use crate::sim::anim::Animator;
use crate::sim::context::SimulationContext;
use crate::sim::state::{LevelEvent, LevelGrid};

/// Screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameState {
    #[default]
    Menu,
    LevelSelect,
    Game,
    GameOver,
    Pause,
    Win,
    Controls,
}

/// Outline thickness of the debug overlay
const DEBUG_OUTLINE_THICKNESS: f32 = 1.0;

pub struct Session {
    levels: Vec<LevelSource>,
    animator: Animator,
    ctx: SimulationContext,
    level: Option<LevelGrid>,
    /// Description the loaded level was built from
    description: Option<LevelDescription>,
    loaded_index: Option<usize>,
    state: GameState,
    /// State at the start of the previous frame
    previous_state: GameState,
    show_debug: bool,
}

impl Session {
    pub fn new(levels: Vec<LevelSource>, settings: Settings) -> Self {
        let show_debug = settings.show_hitboxes;
        let mut ctx = SimulationContext::new(settings);
        ctx.level_count = levels.len();
        Self {
            levels,
            animator: Animator::with_builtin(),
            ctx,
            level: None,
            description: None,
            loaded_index: None,
            state: GameState::Menu,
            previous_state: GameState::Menu,
            show_debug,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn level(&self) -> Option<&LevelGrid> {
        self.level.as_ref()
    }

    pub fn level_mut(&mut self) -> Option<&mut LevelGrid> {
        self.level.as_mut()
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn loaded_index(&self) -> Option<usize> {
        self.loaded_index
    }

    pub fn context(&self) -> &SimulationContext {
        &self.ctx
    }

    pub fn animator_mut(&mut self) -> &mut Animator {
        &mut self.animator
    }

    pub fn show_debug(&self) -> bool {
        self.show_debug
    }

    /// Load and build a level, replacing the current one.
    ///
    /// On any error the current level stays loaded.
    pub fn load_level(&mut self, index: usize) -> Result<(), LevelError> {
        let source = self.levels.get(index).ok_or(LevelError::InvalidIndex {
            index,
            count: self.levels.len(),
        })?;
        let desc = source.load()?;
        let grid = LevelGrid::from_description(&desc, index, &mut self.ctx, &self.animator)?;

        log::info!("Loaded level {} from {}", index, source.label());
        self.level = Some(grid);
        self.description = Some(desc);
        self.loaded_index = Some(index);
        Ok(())
    }

    /// Load a level and start playing it
    pub fn select_level(&mut self, index: usize) -> Result<(), LevelError> {
        self.load_level(index)?;
        self.set_state(GameState::Game);
        Ok(())
    }

    pub fn unload_level(&mut self) {
        if let Some(index) = self.loaded_index.take() {
            log::info!("Unloaded level {}", index);
        }
        self.level = None;
        self.description = None;
    }

    /// Menu and level select toggle between each other; any other screen
    /// goes back to the menu
    pub fn change_state(&mut self) {
        let next = match self.state {
            GameState::Menu => GameState::LevelSelect,
            _ => GameState::Menu,
        };
        self.set_state(next);
    }

    pub fn to_controls(&mut self) {
        self.set_state(GameState::Controls);
    }

    /// Pause while playing, resume while paused
    pub fn toggle_pause(&mut self) {
        match self.state {
            GameState::Game => self.set_state(GameState::Pause),
            GameState::Pause => self.set_state(GameState::Game),
            _ => {}
        }
    }

    fn set_state(&mut self, state: GameState) {
        if self.state != state {
            log::info!("Game state {:?} -> {:?}", self.state, state);
            self.state = state;
        }
    }

    /// Run one frame with this frame's input. Returns the level's events.
    pub fn frame(&mut self, keys: KeySet, mouse: MouseState, dt: f32) -> Vec<LevelEvent> {
        self.ctx.input.advance(keys, mouse);
        if self.ctx.input.single_press(Key::DebugOverlay) {
            self.show_debug = !self.show_debug;
        }

        let state = self.state;
        let mut events = Vec::new();
        match state {
            GameState::Game => {
                if !matches!(self.previous_state, GameState::Game | GameState::Pause) {
                    self.rebuild_level();
                }
                if let Some(level) = &mut self.level {
                    events = level.update(&mut self.ctx, dt);
                }
                self.apply_events(&events);
            }
            GameState::GameOver => {
                if self.ctx.input.is_down(Key::Respawn) {
                    if let Some(level) = &mut self.level {
                        level.respawn_player(&mut self.ctx);
                    }
                    self.set_state(GameState::Game);
                }
            }
            GameState::Win => {
                if self.ctx.input.single_press(Key::Confirm) || self.ctx.input.single_click() {
                    self.change_state();
                    self.unload_level();
                }
            }
            GameState::Menu | GameState::LevelSelect | GameState::Pause | GameState::Controls => {}
        }

        self.previous_state = state;
        events
    }

    /// Fresh copy of the loaded level from its description
    fn rebuild_level(&mut self) {
        let (Some(desc), Some(index)) = (&self.description, self.loaded_index) else {
            return;
        };
        match LevelGrid::from_description(desc, index, &mut self.ctx, &self.animator) {
            Ok(grid) => self.level = Some(grid),
            Err(e) => log::error!("Failed to rebuild level {}: {}", index, e),
        }
    }

    /// Reaching a goal outranks dying in the same frame
    fn apply_events(&mut self, events: &[LevelEvent]) {
        if events.contains(&LevelEvent::Win) {
            self.set_state(GameState::Win);
            return;
        }
        if let Some(next) = events.iter().find_map(|event| match event {
            LevelEvent::LoadLevel(next) => Some(*next),
            _ => None,
        }) {
            if let Err(e) = self.load_level(next) {
                log::error!("Failed to load level {}: {}", next, e);
            }
            return;
        }
        if events.contains(&LevelEvent::GameOver) {
            self.set_state(GameState::GameOver);
        }
    }

    /// Sprites for the current screen
    pub fn draw_list(&self) -> Vec<DrawCommand<'_>> {
        let Some(level) = &self.level else {
            return Vec::new();
        };
        match self.state {
            GameState::Game | GameState::Pause => level.draw_instances(&self.ctx, None),
            GameState::GameOver => level.draw_instances(&self.ctx, Some(colors::DARK_GRAY)),
            _ => Vec::new(),
        }
    }

    /// Hitbox outlines while the debug overlay is on
    pub fn debug_list(&self) -> Vec<Vertex> {
        match (&self.level, self.show_debug, self.state) {
            (Some(level), true, GameState::Game | GameState::Pause | GameState::GameOver) => {
                level.debug_outlines(&self.ctx, DEBUG_OUTLINE_THICKNESS)
            }
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    /// Player directly above a goal
    const GOAL_LEVEL: &str = "1\n2\n3\n2\n";
    /// Player directly above spikes
    const SPIKE_LEVEL: &str = "1\n2\n3\n0\n";

    fn session(levels: &[&str]) -> Session {
        let sources = levels.iter().map(|text| LevelSource::Inline(text.to_string())).collect();
        Session::new(sources, Settings::default())
    }

    fn idle(session: &mut Session) -> Vec<LevelEvent> {
        session.frame(KeySet::EMPTY, MouseState::default(), DT)
    }

    /// Step until `done` holds, at most `limit` frames
    fn run_until(session: &mut Session, limit: usize, done: impl Fn(&Session) -> bool) -> bool {
        for _ in 0..limit {
            idle(session);
            if done(session) {
                return true;
            }
        }
        false
    }

    #[test]
    fn test_out_of_range_index_rejected_before_mutation() {
        let mut s = session(&[GOAL_LEVEL]);
        s.select_level(0).unwrap();
        assert!(matches!(
            s.load_level(3),
            Err(LevelError::InvalidIndex { index: 3, count: 1 })
        ));
        assert_eq!(s.loaded_index(), Some(0));
        assert!(s.level().is_some());
        assert_eq!(s.state(), GameState::Game);
    }

    #[test]
    fn test_goal_advances_then_wins() {
        let mut s = session(&[GOAL_LEVEL, GOAL_LEVEL]);
        s.select_level(0).unwrap();

        assert!(run_until(&mut s, 120, |s| s.loaded_index() == Some(1)));
        assert_eq!(s.state(), GameState::Game);

        assert!(run_until(&mut s, 120, |s| s.state() == GameState::Win));

        // Confirm leaves the win screen and drops the level
        s.frame(KeySet::from_keys(&[Key::Confirm]), MouseState::default(), DT);
        assert_eq!(s.state(), GameState::Menu);
        assert!(s.level().is_none());
    }

    #[test]
    fn test_failed_next_level_keeps_current() {
        let mut s = session(&[GOAL_LEVEL, "not a level"]);
        s.select_level(0).unwrap();
        for _ in 0..60 {
            idle(&mut s);
        }
        assert_eq!(s.loaded_index(), Some(0));
        assert!(s.level().is_some());
        assert_eq!(s.state(), GameState::Game);
    }

    #[test]
    fn test_hazard_then_respawn_rebuilds() {
        let mut s = session(&[SPIKE_LEVEL]);
        s.select_level(0).unwrap();

        assert!(run_until(&mut s, 120, |s| s.state() == GameState::GameOver));
        let frozen = s.level().map(|l| l.frame);
        idle(&mut s);
        assert_eq!(s.level().map(|l| l.frame), frozen);
        assert_eq!(s.draw_list()[0].instance.color, colors::DARK_GRAY);

        s.frame(KeySet::from_keys(&[Key::Respawn]), MouseState::default(), DT);
        assert_eq!(s.state(), GameState::Game);
        let spawn = s.level().and_then(|l| l.player()).map(|p| p.position);
        assert_eq!(spawn, Some(glam::Vec2::ZERO));

        // First frame back in the game rebuilds the level from scratch
        idle(&mut s);
        assert_eq!(s.level().map(|l| l.frame), Some(1));
    }

    #[test]
    fn test_game_without_level_is_skipped() {
        let mut s = session(&[GOAL_LEVEL]);
        s.change_state();
        s.change_state();
        s.toggle_pause();
        assert_eq!(s.state(), GameState::Menu);
        // Nothing loaded: the game screen just idles
        s.set_state(GameState::Game);
        assert!(idle(&mut s).is_empty());
        assert!(s.draw_list().is_empty());
    }

    #[test]
    fn test_pause_freezes_without_rebuild() {
        let mut s = session(&[SPIKE_LEVEL]);
        s.select_level(0).unwrap();
        idle(&mut s);
        idle(&mut s);
        s.toggle_pause();
        idle(&mut s);
        assert_eq!(s.level().map(|l| l.frame), Some(2));
        s.toggle_pause();
        idle(&mut s);
        assert_eq!(s.level().map(|l| l.frame), Some(3));
    }

    #[test]
    fn test_menu_transitions() {
        let mut s = session(&[GOAL_LEVEL]);
        assert_eq!(s.state(), GameState::Menu);
        s.change_state();
        assert_eq!(s.state(), GameState::LevelSelect);
        s.change_state();
        assert_eq!(s.state(), GameState::Menu);
        s.to_controls();
        assert_eq!(s.state(), GameState::Controls);
        s.change_state();
        assert_eq!(s.state(), GameState::Menu);
    }

    #[test]
    fn test_debug_overlay_toggles_on_press() {
        let mut s = session(&[GOAL_LEVEL]);
        s.select_level(0).unwrap();
        let debug = KeySet::from_keys(&[Key::DebugOverlay]);
        s.frame(debug, MouseState::default(), DT);
        assert!(s.show_debug());
        // Held, not pressed again
        s.frame(debug, MouseState::default(), DT);
        assert!(s.show_debug());
        assert!(!s.debug_list().is_empty());
        idle(&mut s);
        s.frame(debug, MouseState::default(), DT);
        assert!(!s.show_debug());
    }

    #[test]
    fn test_level_count_reaches_context() {
        let s = session(&[GOAL_LEVEL, GOAL_LEVEL, SPIKE_LEVEL]);
        assert_eq!(s.context().level_count, 3);
        assert_eq!(s.level_count(), 3);
    }
}
