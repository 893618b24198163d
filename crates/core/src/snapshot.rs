use crate::piece::ActivePiece;
use crate::types::{PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH, QUEUE_LEN};

/// Phase tag exported to renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PhaseTag {
    #[default]
    Falling,
    EntryDelay,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub blocks: [(i8, i8); 4],
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            blocks: value.positions(),
        }
    }
}

/// Everything a frame needs to draw, copied out of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Cell values 0-7, `board[y][x]`
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<ActiveSnapshot>,
    /// Slot 0 is the kind in play, slots 1.. are the preview
    pub queue: [PieceKind; QUEUE_LEN],
    pub phase: PhaseTag,
    pub game_over: bool,
    pub ticks: u64,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.board = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
        self.active = None;
        self.queue = [PieceKind::I; QUEUE_LEN];
        self.phase = PhaseTag::Falling;
        self.game_over = false;
        self.ticks = 0;
        self.score = 0;
        self.level = 0;
        self.lines = 0;
    }

    /// Preview kinds (queue without the piece in play)
    pub fn preview(&self) -> &[PieceKind] {
        &self.queue[1..]
    }

    pub fn playable(&self) -> bool {
        !self.game_over
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            queue: [PieceKind::I; QUEUE_LEN],
            phase: PhaseTag::Falling,
            game_over: false,
            ticks: 0,
            score: 0,
            level: 0,
            lines: 0,
        }
    }
}
