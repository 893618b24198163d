//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events onto logical game keys and folds them into one
//! [`crate::types::FrameInput`] per frame, including for terminals without
//! key-release events.

pub mod map;
pub mod tracker;

pub use blockfall_types as types;

pub use map::{map_key, should_quit, Key};
pub use tracker::InputTracker;
