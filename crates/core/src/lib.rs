//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules and the per-frame state machine of the falling
//! block game. It has **no dependencies** on terminals, audio or the clock:
//!
//! - **Deterministic**: the same seed and input sequence replay bit for bit
//! - **Frame driven**: every timer is a frame count at a fixed 60 Hz
//! - **Allocation free** per frame: events come back in a fixed-capacity buffer
//!
//! # Module Structure
//!
//! - [`geometry`]: authored rotation offsets, spawn positions, pivots, kick data
//! - [`rng`]: seedable LCG and the no-repeat 5-slot piece queue
//! - [`board`]: 10x20 grid with line detection and clearing
//! - [`piece`]: the active piece, transactional moves and rotation
//! - [`phase`]: falling / entry-delay / game-over phases and DAS counter
//! - [`scoring`]: line-clear score, level steps, fall speed
//! - [`game_state`]: the session tying it all together
//! - [`config`]: tunable timings and the wall-kick switch
//! - [`snapshot`]: read-only per-frame output for renderers
//!
//! # Rules at a glance
//!
//! - The 5 queued kinds are always pairwise distinct; slot 0 is in play
//! - Rotation pivots on a fixed block and is legal when it stays in bounds
//! - A downward move into the stack or floor locks immediately
//! - A piece resting on the stack locks after the lock delay, or on the next
//!   gravity or soft-drop step
//! - Each cleared row scores `100 + 2 * level`; level rises per clear and per lock
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameSession;
//! use blockfall_core::types::{FrameInput, Horizontal};
//!
//! let mut game = GameSession::new(12345);
//! let left = FrameInput::idle().with_horizontal(Horizontal::Left);
//!
//! let before = game.active().unwrap().positions();
//! game.advance(&left);
//! let after = game.active().unwrap().positions();
//! assert_eq!(after[0].0, before[0].0 - 1);
//! ```

pub mod board;
pub mod config;
pub mod game_state;
pub mod geometry;
pub mod phase;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use config::{ConfigError, RulesConfig};
pub use game_state::{GameSession, TickEvents, MAX_EVENTS_PER_TICK};
pub use phase::Phase;
pub use piece::{ActivePiece, Block, MoveOutcome, RotateOutcome, TouchChange};
pub use rng::{KindSource, PieceQueue, SimpleRng};
pub use snapshot::{ActiveSnapshot, GameSnapshot, PhaseTag};
