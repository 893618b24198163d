//! Rules configuration - frame timings and optional rotation capabilities

use thiserror::Error;

use crate::types::{
    ARE_FRAMES, BOARD_HEIGHT, DAS_FRAMES, GRAVITY_ROWS, LOCK_DELAY_FRAMES, SOFT_DROP_INTERVAL,
};

/// Tunable rules for a session. `Default` gives the standard timings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RulesConfig {
    /// Held-direction frames before autorepeat
    pub das_frames: u32,
    /// Entry delay between a lock and the next spawn
    pub are_frames: u32,
    /// Frames a touching piece may rest before it force-locks
    pub lock_delay_frames: u32,
    /// Frames between soft-drop steps while the drop input is held
    pub soft_drop_interval: u32,
    /// Rows per gravity or soft-drop step
    pub gravity_rows: u8,
    /// Consult the kick table when a rotation does not fit in place.
    ///
    /// Off by default: rotation legality is then bounds-only.
    pub wall_kicks: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            das_frames: DAS_FRAMES,
            are_frames: ARE_FRAMES,
            lock_delay_frames: LOCK_DELAY_FRAMES,
            soft_drop_interval: SOFT_DROP_INTERVAL,
            gravity_rows: GRAVITY_ROWS,
            wall_kicks: false,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum ConfigError {
    #[error("soft drop interval must be at least one frame")]
    ZeroSoftDropInterval,
    #[error("gravity must move at least one row, got {0}")]
    ZeroGravity(u8),
    #[error("gravity of {0} rows exceeds the board height")]
    GravityTooLarge(u8),
}

impl RulesConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.soft_drop_interval == 0 {
            return Err(ConfigError::ZeroSoftDropInterval);
        }
        if self.gravity_rows == 0 {
            return Err(ConfigError::ZeroGravity(self.gravity_rows));
        }
        if self.gravity_rows > BOARD_HEIGHT {
            return Err(ConfigError::GravityTooLarge(self.gravity_rows));
        }
        Ok(())
    }

    pub fn with_wall_kicks(mut self, enabled: bool) -> Self {
        self.wall_kicks = enabled;
        self
    }

    pub fn with_lock_delay(mut self, frames: u32) -> Self {
        self.lock_delay_frames = frames;
        self
    }
}
