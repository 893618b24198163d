//! Per-frame input tracker for terminal environments.
//!
//! Turns key press/release events into one [`FrameInput`] per frame: held
//! state for movement and soft drop, edges for rotation and restart.
//!
//! Many terminals never report key releases. In that mode a key counts as
//! released once no press or repeat for it has arrived within a timeout.

use crossterm::event::{KeyEvent, KeyEventKind};

use crate::map::{map_key, Key};
use crate::types::{FrameInput, Horizontal};

// A tap should not read as a sustained hold. ~150 ms at 60 Hz.
const DEFAULT_RELEASE_TIMEOUT_FRAMES: u32 = 9;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct KeyState {
    held: bool,
    /// Pressed since the last frame was built
    latched: bool,
    /// Frames since the last press or repeat
    idle_frames: u32,
}

impl KeyState {
    fn active(&self) -> bool {
        self.held || self.latched
    }
}

#[derive(Debug, Clone)]
pub struct InputTracker {
    keys: [KeyState; Key::COUNT],
    /// `None` when the terminal reports releases
    release_timeout_frames: Option<u32>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self {
            keys: [KeyState::default(); Key::COUNT],
            release_timeout_frames: Some(DEFAULT_RELEASE_TIMEOUT_FRAMES),
        }
    }

    pub fn with_release_timeout_frames(mut self, frames: u32) -> Self {
        self.release_timeout_frames = Some(frames);
        self
    }

    /// Trust release events instead of timing keys out
    pub fn with_release_events(mut self) -> Self {
        self.release_timeout_frames = None;
        self
    }

    pub fn release_timeout_frames(&self) -> Option<u32> {
        self.release_timeout_frames
    }

    /// Feed a terminal key event. Returns false for keys the game ignores.
    pub fn handle_key_event(&mut self, event: KeyEvent) -> bool {
        let Some(key) = map_key(event.code) else {
            return false;
        };
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => self.press(key),
            KeyEventKind::Release => self.release(key),
        }
        true
    }

    pub fn press(&mut self, key: Key) {
        let state = &mut self.keys[key.index()];
        if !state.held {
            state.latched = true;
        }
        state.held = true;
        state.idle_frames = 0;
    }

    pub fn release(&mut self, key: Key) {
        let state = &mut self.keys[key.index()];
        state.held = false;
        state.idle_frames = 0;
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.keys[key.index()].held
    }

    /// Build this frame's input and age the key states
    pub fn frame(&mut self) -> FrameInput {
        let left = self.keys[Key::Left.index()].active();
        let right = self.keys[Key::Right.index()].active();
        let ccw = self.keys[Key::RotateCcw.index()];
        let cw = self.keys[Key::RotateCw.index()];

        let input = FrameInput {
            horizontal: Horizontal::from_axis(right as i8 - left as i8),
            rotate_ccw: ccw.latched,
            rotate_cw: cw.latched,
            rotate_ccw_held: ccw.active(),
            rotate_cw_held: cw.active(),
            soft_drop: self.keys[Key::SoftDrop.index()].active(),
            restart: self.keys[Key::Restart.index()].latched,
        };

        for state in &mut self.keys {
            state.latched = false;
            if state.held {
                state.idle_frames = state.idle_frames.saturating_add(1);
                if let Some(timeout) = self.release_timeout_frames {
                    if state.idle_frames > timeout {
                        state.held = false;
                        state.idle_frames = 0;
                    }
                }
            }
        }

        input
    }

    pub fn reset(&mut self) {
        self.keys = [KeyState::default(); Key::COUNT];
    }
}

impl Default for InputTracker {
    fn default() -> Self {
        Self::new()
    }
}
