//! Frame-cycling animation
//!
//! An animation is a fixed, ordered list of frames plus a cursor that wraps
//! with modulo arithmetic. Frames are texture keys; resolving them to GPU
//! textures is the presentation layer's job.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Cursor over an ordered frame sequence. Never empty, index always in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrameCycle<T>")]
pub struct FrameCycle<T> {
    frames: Vec<T>,
    index: usize,
    /// Wrap to the first frame after the last (otherwise hold the last)
    pub looping: bool,
}

impl<T> FrameCycle<T> {
    /// Looping cycle over `frames`. Returns `None` for an empty list.
    pub fn new(frames: Vec<T>) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        Some(Self {
            frames,
            index: 0,
            looping: true,
        })
    }

    /// Cycle that stops on its last frame
    pub fn once(frames: Vec<T>) -> Option<Self> {
        Self::new(frames).map(|mut cycle| {
            cycle.looping = false;
            cycle
        })
    }

    pub fn current(&self) -> &T {
        &self.frames[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Step to the next frame and return it
    pub fn advance(&mut self) -> &T {
        if self.looping {
            self.index = (self.index + 1) % self.frames.len();
        } else if self.index + 1 < self.frames.len() {
            self.index += 1;
        }
        self.current()
    }

    pub fn restart(&mut self) {
        self.index = 0;
    }
}

/// Unchecked form read from serialized data
#[derive(Deserialize)]
struct RawFrameCycle<T> {
    frames: Vec<T>,
    index: usize,
    looping: bool,
}

impl<T> TryFrom<RawFrameCycle<T>> for FrameCycle<T> {
    type Error = &'static str;

    fn try_from(raw: RawFrameCycle<T>) -> Result<Self, Self::Error> {
        if raw.frames.is_empty() {
            return Err("animation has no frames");
        }
        if raw.index >= raw.frames.len() {
            return Err("animation frame index out of range");
        }
        Ok(Self {
            frames: raw.frames,
            index: raw.index,
            looping: raw.looping,
        })
    }
}

/// Registry of named animations
#[derive(Debug, Clone, Default)]
pub struct Animator {
    animations: HashMap<String, Vec<String>>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the animations the built-in tile set uses
    pub fn with_builtin() -> Self {
        let mut animator = Self::new();
        for frame in ["LaserFrame1", "LaserFrame2", "LaserFrame3"] {
            animator.add_frame(LASER_ANIMATION, frame);
        }
        animator
    }

    /// Append a frame, creating the animation if needed.
    ///
    /// Returns true if the animation already existed.
    pub fn add_frame(&mut self, name: &str, frame: &str) -> bool {
        match self.animations.get_mut(name) {
            Some(frames) => {
                frames.push(frame.to_string());
                true
            }
            None => {
                self.animations.insert(name.to_string(), vec![frame.to_string()]);
                false
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.animations.contains_key(name)
    }

    /// Fresh looping cursor for a named animation
    pub fn cycle(&self, name: &str) -> Option<FrameCycle<String>> {
        self.animations
            .get(name)
            .and_then(|frames| FrameCycle::new(frames.clone()))
    }
}

/// Name of the laser beam animation
pub const LASER_ANIMATION: &str = "Laser";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_wraps() {
        let mut cycle = FrameCycle::new(vec!["a", "b", "c"]).unwrap();
        assert_eq!(*cycle.current(), "a");
        assert_eq!(*cycle.advance(), "b");
        assert_eq!(*cycle.advance(), "c");
        assert_eq!(*cycle.advance(), "a");
        cycle.advance();
        cycle.restart();
        assert_eq!(cycle.index(), 0);
    }

    #[test]
    fn test_single_frame_loops_on_itself() {
        let mut cycle = FrameCycle::new(vec![7]).unwrap();
        for _ in 0..5 {
            assert_eq!(*cycle.advance(), 7);
        }
    }

    #[test]
    fn test_once_holds_last_frame() {
        let mut cycle = FrameCycle::once(vec![1, 2]).unwrap();
        cycle.advance();
        cycle.advance();
        assert_eq!(*cycle.current(), 2);
    }

    #[test]
    fn test_empty_cycle_rejected() {
        assert!(FrameCycle::<u8>::new(Vec::new()).is_none());
    }

    #[test]
    fn test_deserialize_checks_frames_and_index() {
        let cycle = FrameCycle::new(vec!["a".to_string(), "b".to_string()]).unwrap();
        let json = serde_json::to_string(&cycle).unwrap();
        assert_eq!(serde_json::from_str::<FrameCycle<String>>(&json).unwrap(), cycle);

        let empty = r#"{ "frames": [], "index": 0, "looping": true }"#;
        assert!(serde_json::from_str::<FrameCycle<String>>(empty).is_err());
        let past_end = r#"{ "frames": ["a"], "index": 3, "looping": true }"#;
        assert!(serde_json::from_str::<FrameCycle<String>>(past_end).is_err());
    }

    #[test]
    fn test_animator_add_frame_reports_existing() {
        let mut animator = Animator::new();
        assert!(!animator.add_frame("Spin", "s1"));
        assert!(animator.add_frame("Spin", "s2"));
        let mut cycle = animator.cycle("Spin").unwrap();
        assert_eq!(cycle.len(), 2);
        assert_eq!(cycle.advance(), "s2");
        assert!(animator.cycle("Missing").is_none());
    }
}
