//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be
//! shared by the engine, the input mapper and the terminal frontend.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//!
//! # Frame Timing Constants
//!
//! The engine is frame-driven. Every timing value is a frame count at a fixed
//! 60 steps per second:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `FPS` | 60 | Fixed tickrate, also the level-0 fall tickrate |
//! | `ARE_FRAMES` | 30 | Entry delay between a lock and the next spawn |
//! | `DAS_FRAMES` | 12 | Held-direction frames before autorepeat |
//! | `LOCK_DELAY_FRAMES` | 30 | Grace period for a grounded piece |
//! | `MIN_FALL_TICKRATE` | 4 | Fastest gravity (frames per row) |
//! | `SOFT_DROP_INTERVAL` | 1 | Frames between soft-drop steps |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, Rotation, RotateDirection, BOARD_WIDTH, BOARD_HEIGHT};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.index(), 7);
//!
//! let rotated = Rotation::North.rotate(RotateDirection::Ccw);
//! assert_eq!(rotated, Rotation::West);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of visible slots in the upcoming-piece queue
pub const QUEUE_LEN: usize = 5;

/// Fixed tickrate (frames per second)
pub const FPS: u32 = 60;

/// Entry delay (ARE) after a lock, in frames
pub const ARE_FRAMES: u32 = 30;

/// Delayed auto shift, in frames
pub const DAS_FRAMES: u32 = 12;

/// Lock delay once a piece starts touching the stack, in frames
pub const LOCK_DELAY_FRAMES: u32 = 30;

/// Lower bound for the fall tickrate (frames per gravity step)
pub const MIN_FALL_TICKRATE: u32 = 4;

/// Frames between soft-drop steps while the drop key is held
pub const SOFT_DROP_INTERVAL: u32 = 1;

/// Rows moved per gravity step
pub const GRAVITY_ROWS: u8 = 1;

/// Flat score awarded per cleared line
pub const LINE_CLEAR_BASE: u32 = 100;

/// Per-level bonus awarded per cleared line
pub const LINE_CLEAR_LEVEL_FACTOR: u32 = 2;


/// The seven tetromino piece kinds
///
/// Discriminants match the cell values stored on the board (0 is empty).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    I = 1,
    J = 2,
    L = 3,
    O = 4,
    S = 5,
    Z = 6,
    T = 7,
}

impl PieceKind {
    /// All kinds in cell-value order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Cell value of this kind (1-7)
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Kind for a cell value; `None` for 0 or anything above 7
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::J),
            3 => Some(PieceKind::L),
            4 => Some(PieceKind::O),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::Z),
            7 => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("S"), Some(PieceKind::S));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Uppercase letter for display
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::T => "T",
        }
    }
}

/// A cell on the game board
///
/// - `None`: empty (cell value 0)
/// - `Some(PieceKind)`: locked block of that kind (cell value 1-7)
pub type Cell = Option<PieceKind>;

/// Numeric cell value (0-7) used by renderers for color lookup
pub fn cell_value(cell: Cell) -> u8 {
    cell.map_or(0, PieceKind::index)
}

/// Inverse of [`cell_value`]
pub fn cell_from_value(value: u8) -> Cell {
    PieceKind::from_index(value)
}

/// Rotation states, cyclic in 90° steps
///
/// - **North**: spawn orientation (0°)
/// - **East**: 90° clockwise
/// - **South**: 180°
/// - **West**: 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rotation {
    North,
    East,
    South,
    West,
}

impl Rotation {
    const CYCLE: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Position in the cycle (0-3), used to index geometry tables
    pub fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Step one quarter turn in `direction`, wrapping mod 4
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::{Rotation, RotateDirection};
    ///
    /// assert_eq!(Rotation::North.rotate(RotateDirection::Cw), Rotation::East);
    /// assert_eq!(Rotation::North.rotate(RotateDirection::Ccw), Rotation::West);
    /// ```
    pub fn rotate(self, direction: RotateDirection) -> Self {
        let next = (self.index() as i8 + direction.delta()).rem_euclid(4);
        Self::CYCLE[next as usize]
    }
}

/// Rotation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotateDirection {
    /// Clockwise (+1)
    Cw,
    /// Counter-clockwise (-1)
    Ccw,
}

impl RotateDirection {
    pub fn delta(self) -> i8 {
        match self {
            RotateDirection::Cw => 1,
            RotateDirection::Ccw => -1,
        }
    }
}

/// Net left/right intent for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Horizontal {
    Left,
    #[default]
    None,
    Right,
}

impl Horizontal {
    /// Map a raw axis value to an intent by its sign
    pub fn from_axis(axis: i8) -> Self {
        match axis.signum() {
            -1 => Horizontal::Left,
            1 => Horizontal::Right,
            _ => Horizontal::None,
        }
    }

    pub fn dx(self) -> i8 {
        match self {
            Horizontal::Left => -1,
            Horizontal::None => 0,
            Horizontal::Right => 1,
        }
    }
}

/// Abstract input for a single frame
///
/// Edge fields are true only on the frame the action goes from released to
/// pressed. Held fields are level-triggered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameInput {
    pub horizontal: Horizontal,
    pub rotate_ccw: bool,
    pub rotate_cw: bool,
    /// Rotate-CCW currently held (initial rotation detection at spawn)
    pub rotate_ccw_held: bool,
    /// Rotate-CW currently held (initial rotation detection at spawn)
    pub rotate_cw_held: bool,
    pub soft_drop: bool,
    /// Only honored while the game is over
    pub restart: bool,
}

impl FrameInput {
    /// A frame with no input at all
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_horizontal(mut self, horizontal: Horizontal) -> Self {
        self.horizontal = horizontal;
        self
    }
}

/// Discrete signal emitted by the engine during a frame
///
/// Consumed by the audio collaborator; rendering reads snapshots instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The active piece came to rest on the stack or floor
    PieceCollide,
    /// The active piece was merged into the board
    Lock,
    /// A full row was removed
    LineClear { row: u8 },
    /// The stack topped out
    GameOver,
    /// A new piece entered the board; `next` is the first preview slot
    Spawn { kind: PieceKind, next: PieceKind },
    /// A rotate input was held at the instant of spawn
    RotateIrs(RotateDirection),
}
