//! Sound cues derived from game events.
//!
//! The engine only reports what happened; this module decides what it sounds
//! like. A terminal has no mixer, so [`TerminalBell`] rings the bell for the
//! cues loud enough to matter and drops the rest.

use std::io::Write;

use anyhow::Result;

use crate::types::{GameEvent, PieceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Piece came to rest
    Collide,
    /// Announces the kind now first in the preview
    Announce(PieceKind),
    LineClear,
    Lock,
    /// A rotate key was held at spawn
    Irs,
    /// Stop the music
    GameOver,
}

impl SoundCue {
    /// Playback volume in 0.0..=1.0
    pub fn volume(self) -> f32 {
        match self {
            SoundCue::Collide | SoundCue::Irs => 0.9,
            SoundCue::LineClear => 0.7,
            SoundCue::Announce(_) | SoundCue::Lock | SoundCue::GameOver => 1.0,
        }
    }
}

impl From<GameEvent> for SoundCue {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::PieceCollide => SoundCue::Collide,
            GameEvent::Lock => SoundCue::Lock,
            GameEvent::LineClear { .. } => SoundCue::LineClear,
            GameEvent::GameOver => SoundCue::GameOver,
            GameEvent::Spawn { next, .. } => SoundCue::Announce(next),
            GameEvent::RotateIrs(_) => SoundCue::Irs,
        }
    }
}

/// Anything that can play cues. Failures are the sink's problem; callers
/// may ignore them.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue) -> Result<()>;

    fn play_events(&mut self, events: &[GameEvent]) -> Result<()> {
        for &event in events {
            self.play(SoundCue::from(event))?;
        }
        Ok(())
    }
}

/// Rings the terminal bell on line clears and game over.
pub struct TerminalBell<W: Write> {
    out: W,
    enabled: bool,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out, enabled: true }
    }

    pub fn muted(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: SoundCue) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if matches!(cue, SoundCue::LineClear | SoundCue::GameOver) {
            self.out.write_all(b"\x07")?;
            self.out.flush()?;
        }
        Ok(())
    }
}
