//! Piece tests - geometry tables, movement and rotation

use blockfall::core::geometry::{kick_tests, offsets, pivot_index, spawn_positions, WALLKICK_TESTS};
use blockfall::core::{ActivePiece, Board, MoveOutcome, RotateOutcome};
use blockfall::types::{PieceKind, RotateDirection, Rotation, BOARD_WIDTH};

const ROTATIONS: [Rotation; 4] = [Rotation::North, Rotation::East, Rotation::South, Rotation::West];

#[test]
fn test_spawn_positions_are_in_top_rows() {
    for kind in PieceKind::ALL {
        for &(x, y) in spawn_positions(kind) {
            assert!((0..2).contains(&y), "{kind:?} spawns at row {y}");
            assert!((3..7).contains(&x), "{kind:?} spawns at column {x}");
        }
    }
}

#[test]
fn test_offsets_fit_authoring_box() {
    for kind in PieceKind::ALL {
        for rot in ROTATIONS {
            for &(dx, dy) in offsets(kind, rot) {
                assert!((0..4).contains(&dx) && (0..4).contains(&dy));
            }
        }
    }
}

#[test]
fn test_pivot_choice() {
    assert_eq!(pivot_index(PieceKind::I), 1);
    assert_eq!(pivot_index(PieceKind::S), 3);
    for kind in [PieceKind::J, PieceKind::L, PieceKind::O, PieceKind::Z, PieceKind::T] {
        assert_eq!(pivot_index(kind), 2);
    }
}

#[test]
fn test_kick_tables_have_four_tests() {
    for kind in [PieceKind::I, PieceKind::T] {
        for rot in ROTATIONS {
            for dir in [RotateDirection::Cw, RotateDirection::Ccw] {
                assert_eq!(kick_tests(kind, rot, dir).len(), WALLKICK_TESTS);
            }
        }
    }
}

#[test]
fn test_full_turn_returns_jlszt_to_start() {
    let board = Board::new();
    for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::Z, PieceKind::T] {
        let mut piece = ActivePiece::spawn(kind);
        piece.try_move(&board, 0, 1);
        let start = piece.positions();

        for _ in 0..4 {
            assert!(piece
                .try_rotate(&board, RotateDirection::Cw, false)
                .rotated());
        }
        let mut a = piece.positions();
        let mut b = start;
        a.sort();
        b.sort();
        assert_eq!(a, b, "{kind:?}");
        assert_eq!(piece.rotation(), Rotation::North);
    }
}

#[test]
fn test_cw_then_ccw_is_identity_for_t() {
    let board = Board::new();
    let mut piece = ActivePiece::spawn(PieceKind::T);
    piece.try_move(&board, 0, 5);
    let start = piece;

    piece.try_rotate(&board, RotateDirection::Cw, false);
    piece.try_rotate(&board, RotateDirection::Ccw, false);
    assert_eq!(piece.rotation(), start.rotation());
    let mut a = piece.positions();
    let mut b = start.positions();
    a.sort();
    b.sort();
    assert_eq!(a, b);
}

#[test]
fn test_i_piece_rotates_below_top_row() {
    let board = Board::new();
    let mut piece = ActivePiece::spawn(PieceKind::I);
    assert_eq!(piece.try_move(&board, 0, 1), MoveOutcome::Moved);

    assert_eq!(
        piece.try_rotate(&board, RotateDirection::Cw, false),
        RotateOutcome::Rotated
    );
    // Pivot (4, 1) - 1 + column 2 offsets
    assert_eq!(piece.positions(), [(5, 0), (5, 1), (5, 2), (5, 3)]);
}

#[test]
fn test_o_piece_never_rotates() {
    let board = Board::new();
    let mut piece = ActivePiece::spawn(PieceKind::O);
    for dir in [RotateDirection::Cw, RotateDirection::Ccw] {
        let before = piece;
        assert_eq!(piece.try_rotate(&board, dir, true), RotateOutcome::Unchanged);
        assert_eq!(piece, before);
    }
}

#[test]
fn test_move_left_out_of_bounds_is_rejected_whole() {
    let board = Board::new();
    let mut piece = ActivePiece::spawn(PieceKind::J);
    while piece.try_move(&board, -1, 0) == MoveOutcome::Moved {}

    let before = piece.positions();
    assert_eq!(piece.try_move(&board, -1, 0), MoveOutcome::Rejected);
    assert_eq!(piece.positions(), before);
    assert!(piece.positions().iter().all(|&(x, _)| x >= 0));
}

#[test]
fn test_move_right_stops_at_wall() {
    let board = Board::new();
    let mut piece = ActivePiece::spawn(PieceKind::L);
    let mut steps = 0;
    while piece.try_move(&board, 1, 0) == MoveOutcome::Moved {
        steps += 1;
    }
    assert_eq!(steps, 3);
    assert_eq!(
        piece.positions().iter().map(|&(x, _)| x).max(),
        Some(BOARD_WIDTH as i8 - 1)
    );
}

#[test]
fn test_rotation_at_wall_without_kicks_is_rejected() {
    let board = Board::new();
    let mut piece = ActivePiece::spawn(PieceKind::T);
    piece.try_move(&board, 0, 5);
    piece.try_rotate(&board, RotateDirection::Cw, false);
    // East T hugging the left wall: stem column is x = 0
    while piece.try_move(&board, -1, 0) == MoveOutcome::Moved {}
    assert_eq!(piece.positions().iter().map(|&(x, _)| x).min(), Some(0));

    let before = piece;
    // South around the pivot at x = 0 needs a column at x = -1
    assert_eq!(
        piece.try_rotate(&board, RotateDirection::Cw, false),
        RotateOutcome::Rejected
    );
    assert_eq!(piece, before);
}
