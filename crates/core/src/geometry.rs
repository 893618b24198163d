//! Geometry module - piece offsets, pivots, spawn positions and kick data
//!
//! Every value here is authored data, not computed. A piece's blocks for a
//! rotation state are placed at `pivot - 1 + offset`, where the pivot is the
//! block at [`pivot_index`] of the piece *before* rotating. Block order is
//! significant: it decides which block acts as the pivot next time.

use crate::types::{PieceKind, RotateDirection, Rotation};

/// Offset of a single block inside the piece's 4x4 authoring box
pub type BlockOffset = (i8, i8);

/// Offsets of the four blocks for one rotation state
pub type PieceShape = [BlockOffset; 4];

/// `[kind - 1][rotation]`, block order matters (see [`pivot_index`])
const ROTATION_DATA: [[PieceShape; 4]; 7] = [
    // I
    [
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
        [(0, 1), (1, 1), (2, 1), (3, 1)],
        [(2, 0), (2, 1), (2, 2), (2, 3)],
    ],
    // J
    [
        [(0, 0), (0, 1), (1, 1), (2, 1)],
        [(2, 0), (1, 0), (1, 1), (1, 2)],
        [(2, 2), (2, 1), (1, 1), (0, 1)],
        [(0, 2), (1, 2), (1, 1), (1, 0)],
    ],
    // L
    [
        [(2, 0), (2, 1), (1, 1), (0, 1)],
        [(2, 2), (1, 2), (1, 1), (1, 0)],
        [(0, 2), (0, 1), (1, 1), (2, 1)],
        [(0, 0), (1, 0), (1, 1), (1, 2)],
    ],
    // O
    [
        [(1, 0), (2, 0), (1, 1), (2, 1)],
        [(1, 1), (2, 1), (1, 2), (2, 2)],
        [(0, 1), (1, 1), (0, 2), (1, 2)],
        [(0, 0), (1, 0), (0, 1), (1, 1)],
    ],
    // S
    [
        [(1, 0), (2, 0), (0, 1), (1, 1)],
        [(2, 1), (2, 2), (1, 0), (1, 1)],
        [(1, 2), (0, 2), (2, 1), (1, 1)],
        [(0, 1), (0, 0), (1, 2), (1, 1)],
    ],
    // Z
    [
        [(0, 0), (1, 0), (1, 1), (2, 1)],
        [(2, 0), (2, 1), (1, 1), (1, 2)],
        [(2, 2), (1, 2), (1, 1), (0, 1)],
        [(0, 2), (0, 1), (1, 1), (1, 0)],
    ],
    // T
    [
        [(0, 1), (1, 0), (1, 1), (2, 1)],
        [(1, 0), (2, 1), (1, 1), (1, 2)],
        [(2, 1), (1, 2), (1, 1), (0, 1)],
        [(1, 2), (0, 1), (1, 1), (1, 0)],
    ],
];

/// Board positions of a freshly spawned piece (rotation North), `[kind - 1]`
const SPAWN_DATA: [PieceShape; 7] = [
    // I
    [(3, 0), (4, 0), (5, 0), (6, 0)],
    // J
    [(4, 0), (4, 1), (5, 1), (6, 1)],
    // L
    [(6, 0), (4, 1), (5, 1), (6, 1)],
    // O
    [(4, 0), (5, 0), (4, 1), (5, 1)],
    // S
    [(5, 0), (6, 0), (4, 1), (5, 1)],
    // Z
    [(4, 0), (5, 0), (5, 1), (6, 1)],
    // T
    [(5, 0), (4, 1), (5, 1), (6, 1)],
];

/// Number of kick candidates per rotation (the in-place test is implicit)
pub const WALLKICK_TESTS: usize = 4;

/// Kick candidates for one (class, from-rotation, direction)
pub type KickTests = [BlockOffset; WALLKICK_TESTS];

/// `[class][from_rotation][direction]`, direction 0 = CCW, 1 = CW.
///
/// Authored with y pointing up; callers negate dy on the y-down board.
const WALLKICK_DATA: [[[KickTests; 2]; 4]; 2] = [
    // Non-I pieces
    [
        [
            [(1, 0), (1, 1), (0, -2), (1, -2)],
            [(-1, 0), (-1, 1), (0, -2), (-1, -2)],
        ],
        [
            [(1, 0), (1, -1), (0, 2), (1, 2)],
            [(1, 0), (1, -1), (0, 2), (1, 2)],
        ],
        [
            [(-1, 0), (-1, 1), (0, -2), (-1, -2)],
            [(1, 0), (1, 1), (0, -2), (1, -2)],
        ],
        [
            [(-1, 0), (-1, -1), (0, 2), (-1, 2)],
            [(-1, 0), (-1, -1), (0, 2), (-1, 2)],
        ],
    ],
    // I piece
    [
        [
            [(-1, 0), (2, 0), (-1, 2), (2, -1)],
            [(-2, 0), (1, 0), (-2, -1), (1, 2)],
        ],
        [
            [(2, 0), (-1, 0), (2, 1), (-1, -2)],
            [(-1, 0), (2, 0), (-1, 2), (2, -1)],
        ],
        [
            [(1, 0), (-2, 0), (1, -2), (-2, -1)],
            [(2, 0), (-1, 0), (2, 1), (-1, -2)],
        ],
        [
            [(-2, 0), (1, 0), (-2, -1), (1, 2)],
            [(1, 0), (-2, 0), (1, -2), (-2, 1)],
        ],
    ],
];

/// Kick geometry class; the I piece kicks differently from the other six
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KickClass {
    Standard,
    I,
}

impl KickClass {
    pub fn of(kind: PieceKind) -> Self {
        match kind {
            PieceKind::I => KickClass::I,
            _ => KickClass::Standard,
        }
    }

    fn index(self) -> usize {
        match self {
            KickClass::Standard => 0,
            KickClass::I => 1,
        }
    }
}

#[inline(always)]
fn kind_slot(kind: PieceKind) -> usize {
    kind.index() as usize - 1
}

/// Block offsets for a piece kind and rotation
pub fn offsets(kind: PieceKind, rotation: Rotation) -> &'static PieceShape {
    &ROTATION_DATA[kind_slot(kind)][rotation.index()]
}

/// Spawn positions of a piece kind's four blocks
pub fn spawn_positions(kind: PieceKind) -> &'static PieceShape {
    &SPAWN_DATA[kind_slot(kind)]
}

/// Block index used as rotation pivot: I uses 1, S uses 3, everything else 2
pub fn pivot_index(kind: PieceKind) -> usize {
    match kind {
        PieceKind::I => 1,
        PieceKind::S => 3,
        _ => 2,
    }
}

/// Ordered kick candidates for rotating out of `from` in `direction`
pub fn kick_tests(kind: PieceKind, from: Rotation, direction: RotateDirection) -> &'static KickTests {
    let dir = match direction {
        RotateDirection::Ccw => 0,
        RotateDirection::Cw => 1,
    };
    &WALLKICK_DATA[KickClass::of(kind).index()][from.index()][dir]
}

/// Board positions for `kind` in `rotation` around an existing pivot position
pub fn rotated_positions(kind: PieceKind, rotation: Rotation, pivot: (i8, i8)) -> PieceShape {
    let shape = offsets(kind, rotation);
    let mut out = [(0, 0); 4];
    for (slot, &(dx, dy)) in out.iter_mut().zip(shape.iter()) {
        *slot = (pivot.0 - 1 + dx, pivot.1 - 1 + dy);
    }
    out
}
