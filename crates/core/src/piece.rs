//! Active piece module - movement, collision and rotation
//!
//! An [`ActivePiece`] is the four blocks under player control. Every change is
//! transactional: candidate positions are computed and checked first, and the
//! piece is only written when the whole move or rotation is legal.

use crate::board::Board;
use crate::geometry::{kick_tests, pivot_index, rotated_positions, spawn_positions, PieceShape};
use crate::types::{PieceKind, RotateDirection, Rotation, BOARD_HEIGHT};

/// One block of a piece on the board grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Block {
    pub kind: PieceKind,
    /// Rotation state the position was computed for
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

/// Result of [`ActivePiece::try_move`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// All four blocks moved
    Moved,
    /// A vertical move ran into the floor or the stack: the piece must lock
    /// where it currently is. The piece itself is left untouched.
    LockedImmediately,
    /// The move would leave the board or overlap the stack; nothing changed
    Rejected,
}

/// Result of [`ActivePiece::try_rotate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateOutcome {
    /// Rotated in place
    Rotated,
    /// Rotated after shifting by a kick offset (board coordinates)
    Kicked { dx: i8, dy: i8 },
    /// The O piece does not rotate
    Unchanged,
    /// No legal placement; nothing changed
    Rejected,
}

impl RotateOutcome {
    pub fn rotated(self) -> bool {
        matches!(self, RotateOutcome::Rotated | RotateOutcome::Kicked { .. })
    }
}

/// Change of the `touching` flag after a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchChange {
    Began,
    Ended,
    Unchanged,
}

/// The falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    kind: PieceKind,
    rotation: Rotation,
    blocks: [Block; 4],
    locked: bool,
    touching: bool,
}

impl ActivePiece {
    /// Create a piece at its spawn position (rotation North)
    pub fn spawn(kind: PieceKind) -> Self {
        let mut piece = Self {
            kind,
            rotation: Rotation::North,
            blocks: [Block {
                kind,
                rotation: Rotation::North,
                x: 0,
                y: 0,
            }; 4],
            locked: false,
            touching: false,
        };
        piece.write_positions(Rotation::North, spawn_positions(kind));
        piece
    }

    /// Place a piece at explicit positions (block order is kept)
    pub fn from_positions(kind: PieceKind, rotation: Rotation, positions: PieceShape) -> Self {
        let mut piece = Self::spawn(kind);
        piece.write_positions(rotation, &positions);
        piece
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn blocks(&self) -> &[Block; 4] {
        &self.blocks
    }

    /// (x, y) of each block, in block order
    pub fn positions(&self) -> PieceShape {
        self.blocks.map(|b| (b.x, b.y))
    }

    /// Already merged into the board
    pub fn locked(&self) -> bool {
        self.locked
    }

    /// Resting on the stack or floor (lock-delay flag)
    pub fn touching(&self) -> bool {
        self.touching
    }

    /// Smallest y of any block (topmost row)
    pub fn highest_row(&self) -> i8 {
        self.blocks.iter().map(|b| b.y).min().unwrap_or(0)
    }

    /// Largest y of any block (bottommost row)
    pub fn lowest_row(&self) -> i8 {
        self.blocks.iter().map(|b| b.y).max().unwrap_or(0)
    }

    /// All blocks in range and on empty cells
    pub fn fits(&self, board: &Board) -> bool {
        fits(board, &self.positions())
    }

    /// Classify a move by (dx, dy) without applying it
    pub fn check_move(&self, board: &Board, dx: i8, dy: i8) -> MoveOutcome {
        let targets = self.positions().map(|(x, y)| (x + dx, y + dy));

        let grounded = targets.iter().any(|&(x, y)| {
            y >= BOARD_HEIGHT as i8 || (dx == 0 && board.is_occupied(x, y))
        });
        if grounded {
            return MoveOutcome::LockedImmediately;
        }

        if fits(board, &targets) {
            MoveOutcome::Moved
        } else {
            MoveOutcome::Rejected
        }
    }

    /// Move all four blocks by (dx, dy), or none of them.
    ///
    /// On [`MoveOutcome::LockedImmediately`] the caller is expected to lock
    /// the piece at its current position.
    pub fn try_move(&mut self, board: &Board, dx: i8, dy: i8) -> MoveOutcome {
        let outcome = self.check_move(board, dx, dy);
        if outcome == MoveOutcome::Moved {
            for block in &mut self.blocks {
                block.x += dx;
                block.y += dy;
            }
        }
        outcome
    }

    /// Re-evaluate `touching` from the cells under the lowest-row blocks.
    ///
    /// The floor counts as support.
    pub fn update_touching(&mut self, board: &Board) -> TouchChange {
        let lowest = self.lowest_row();
        let resting = self
            .blocks
            .iter()
            .filter(|b| b.y == lowest)
            .any(|b| b.y + 1 >= BOARD_HEIGHT as i8 || board.is_occupied(b.x, b.y + 1));

        match (self.touching, resting) {
            (false, true) => {
                self.touching = true;
                TouchChange::Began
            }
            (true, false) => {
                self.touching = false;
                TouchChange::Ended
            }
            _ => TouchChange::Unchanged,
        }
    }

    /// Rotate one quarter turn around the pivot block.
    ///
    /// Without kicks a rotation is legal when every block stays in bounds;
    /// occupancy is not consulted. With kicks the rotated blocks must also be
    /// on empty cells, and the kick candidates are tried in order when the
    /// in-place rotation does not fit.
    pub fn try_rotate(
        &mut self,
        board: &Board,
        direction: RotateDirection,
        wall_kicks: bool,
    ) -> RotateOutcome {
        if self.kind == PieceKind::O {
            return RotateOutcome::Unchanged;
        }

        let target = self.rotation.rotate(direction);
        let pivot = self.positions()[pivot_index(self.kind)];
        let candidate = rotated_positions(self.kind, target, pivot);

        if !wall_kicks {
            if candidate.iter().all(|&(x, y)| Board::in_bounds(x, y)) {
                self.write_positions(target, &candidate);
                return RotateOutcome::Rotated;
            }
            return RotateOutcome::Rejected;
        }

        if fits(board, &candidate) {
            self.write_positions(target, &candidate);
            return RotateOutcome::Rotated;
        }

        for &(kx, ky) in kick_tests(self.kind, self.rotation, direction) {
            // kick data is y-up
            let (dx, dy) = (kx, -ky);
            let kicked = candidate.map(|(x, y)| (x + dx, y + dy));
            if fits(board, &kicked) {
                self.write_positions(target, &kicked);
                return RotateOutcome::Kicked { dx, dy };
            }
        }

        RotateOutcome::Rejected
    }

    pub(crate) fn mark_locked(&mut self) {
        self.locked = true;
    }

    fn write_positions(&mut self, rotation: Rotation, positions: &PieceShape) {
        self.rotation = rotation;
        for (block, &(x, y)) in self.blocks.iter_mut().zip(positions.iter()) {
            *block = Block {
                kind: self.kind,
                rotation,
                x,
                y,
            };
        }
    }
}

fn fits(board: &Board, positions: &PieceShape) -> bool {
    positions.iter().all(|&(x, y)| board.is_valid(x, y))
}
