//! Board module - manages the game grid
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that locked there. Uses a flat row-major array for cache locality and
//! zero allocation.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom)

use crate::types::{cell_value, Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if Self::in_bounds(x, y) {
            Some((y as usize) * WIDTH + (x as usize))
        } else {
            None
        }
    }

    /// Whether (x, y) addresses a cell of the grid
    #[inline(always)]
    pub fn in_bounds(x: i8, y: i8) -> bool {
        x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8
    }

    /// Get width of the board
    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    /// Get height of the board
    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// True iff the cell holds no locked block.
    ///
    /// Callers must validate the coordinates first.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is outside the grid.
    pub fn is_empty(&self, x: i8, y: i8) -> bool {
        let idx = Self::index(x, y)
            .unwrap_or_else(|| panic!("board cell ({x}, {y}) is out of range"));
        self.cells[idx].is_none()
    }

    /// Check if position is within bounds and empty
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Write each block position into the grid with `kind`.
    ///
    /// Overwrites whatever is there (a spawn or a rotation without kicks may
    /// overlap the stack). Positions outside the grid are skipped.
    pub fn lock_blocks(&mut self, positions: &[(i8, i8); 4], kind: PieceKind) {
        for &(x, y) in positions {
            self.set(x, y, Some(kind));
        }
    }

    /// Check if a row is completely filled
    pub fn line_is_full(&self, y: u8) -> bool {
        if y >= BOARD_HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Check if a row holds no blocks
    pub fn line_is_empty(&self, y: u8) -> bool {
        if y >= BOARD_HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_none())
    }

    fn row(&self, y: u8) -> &[Cell] {
        let start = y as usize * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Zero row `y` and collapse every row above it down by one.
    ///
    /// Row 0 becomes empty. An already-empty row is left alone, so clearing
    /// is idempotent.
    pub fn clear_line(&mut self, y: u8) {
        if y >= BOARD_HEIGHT || self.line_is_empty(y) {
            return;
        }

        let y = y as usize;

        // copy_within handles the overlapping ranges
        for row in (1..=y).rev() {
            let src_start = (row - 1) * WIDTH;
            self.cells
                .copy_within(src_start..src_start + WIDTH, row * WIDTH);
        }

        for cell in &mut self.cells[0..WIDTH] {
            *cell = None;
        }
    }

    /// Number of non-empty cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the cell values (0-7) into a row-major grid for snapshots
    pub fn write_u8_grid(&self, out: &mut [[u8; WIDTH]; BOARD_HEIGHT as usize]) {
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * WIDTH;
            for (x, value) in row.iter_mut().enumerate() {
                *value = cell_value(self.cells[start + x]);
            }
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a board from text rows, bottom-aligned.
    ///
    /// Each row is `BOARD_WIDTH` characters; `.` is empty and a piece letter
    /// locks that kind. Handy for setting up scenarios in tests.
    pub fn from_rows(rows: &[&str]) -> Self {
        assert!(rows.len() <= BOARD_HEIGHT as usize, "too many rows");
        let mut board = Self::new();
        let top = BOARD_HEIGHT as usize - rows.len();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), WIDTH, "row {i} must be {WIDTH} cells wide");
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '.' => None,
                    other => Some(
                        PieceKind::from_str(&other.to_string())
                            .unwrap_or_else(|| panic!("unknown cell '{other}'")),
                    ),
                };
                board.set(x as i8, (top + i) as i8, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
