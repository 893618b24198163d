//! Clock module - explicit phase state and frame counters
//!
//! The session is always in exactly one [`Phase`]. Entry delay carries its own
//! countdown instead of being derived from tick arithmetic every frame.

use crate::snapshot::PhaseTag;
use crate::types::Horizontal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// An unlocked piece is under player control
    Falling,
    /// A piece locked; the next spawns when the countdown has run out
    EntryDelay { frames_left: u32 },
    /// Topped out; only restart is honored
    GameOver,
}

/// What an entry-delay frame decided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelayStep {
    Waiting,
    Spawn,
}

impl Phase {
    /// Start an entry delay of `frames` waiting frames.
    ///
    /// The spawn happens on the frame after the last waiting frame.
    pub fn entry_delay(frames: u32) -> Self {
        Phase::EntryDelay {
            frames_left: frames,
        }
    }

    /// Advance an entry-delay countdown by one frame
    pub fn step_delay(&mut self) -> DelayStep {
        match self {
            Phase::EntryDelay { frames_left: 0 } => DelayStep::Spawn,
            Phase::EntryDelay { frames_left } => {
                *frames_left -= 1;
                DelayStep::Waiting
            }
            _ => DelayStep::Waiting,
        }
    }

    pub fn is_falling(&self) -> bool {
        matches!(self, Phase::Falling)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, Phase::GameOver)
    }

    pub fn tag(&self) -> PhaseTag {
        match self {
            Phase::Falling => PhaseTag::Falling,
            Phase::EntryDelay { .. } => PhaseTag::EntryDelay,
            Phase::GameOver => PhaseTag::GameOver,
        }
    }
}

/// Delayed auto shift: counts frames a direction has been held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoShift {
    held_frames: u32,
}

impl AutoShift {
    /// Record this frame's direction; releasing resets the count
    pub fn update(&mut self, horizontal: Horizontal) {
        self.held_frames = match horizontal {
            Horizontal::None => 0,
            _ => self.held_frames.saturating_add(1),
        };
    }

    /// Shift on the first held frame, then every frame once `das` is reached
    pub fn should_shift(&self, das: u32) -> bool {
        self.held_frames == 1 || self.held_frames >= das
    }

    pub fn held_frames(&self) -> u32 {
        self.held_frames
    }
}

/// True on frames where a `rate`-frame periodic event fires
#[inline]
pub fn every_n_frames(ticks: u64, rate: u32) -> bool {
    rate != 0 && ticks % u64::from(rate) == 0
}
