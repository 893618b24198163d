//! Scoring and speed module
//!
//! Score is a flat award per cleared line plus a small per-level bonus. Level
//! grows in two independent places:
//!
//! - once per lock, whether or not anything cleared ([`bump_level_on_lock`])
//! - once per cleared row ([`bump_level_on_clear`])

use crate::types::{FPS, LINE_CLEAR_BASE, LINE_CLEAR_LEVEL_FACTOR, MIN_FALL_TICKRATE};

/// Points for one cleared row at `level` (the level before the clear bumps it)
///
/// # Examples
///
/// ```
/// use blockfall_core::scoring::line_clear_score;
///
/// assert_eq!(line_clear_score(0), 100);
/// assert_eq!(line_clear_score(5), 110);
/// ```
pub fn line_clear_score(level: u32) -> u32 {
    LINE_CLEAR_BASE.saturating_add(level.saturating_mul(LINE_CLEAR_LEVEL_FACTOR))
}

/// Frames between gravity steps at `level`.
///
/// Linear: one frame faster every four levels, starting at `FPS`, floored at
/// [`MIN_FALL_TICKRATE`].
pub fn fall_tickrate(level: u32) -> u32 {
    let quarter_frames = (FPS * 4).saturating_sub(level);
    (quarter_frames / 4).max(MIN_FALL_TICKRATE)
}

/// Level step applied once per lock
pub fn bump_level_on_lock(level: u32) -> u32 {
    level.saturating_add(1)
}

/// Level step applied for every cleared row
pub fn bump_level_on_clear(level: u32) -> u32 {
    level.saturating_add(1)
}
