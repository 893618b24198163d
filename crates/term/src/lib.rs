//! Terminal frontend: rendering and sound collaborators.
//!
//! Renders game snapshots into a simple framebuffer that is flushed to the
//! terminal with diffing, and maps game events to sound cues. Only reads
//! from the core; never mutates a session.

pub mod audio;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use audio::{AudioSink, SoundCue, TerminalBell};
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{piece_color, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
