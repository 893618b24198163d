//! Session tests - frame-level behavior through the public API

use blockfall::core::geometry::spawn_positions;
use blockfall::core::{
    ActivePiece, Board, GameSession, KindSource, MoveOutcome, Phase, PhaseTag, RotateOutcome,
    RulesConfig,
};
use blockfall::types::{FrameInput, GameEvent, Horizontal, PieceKind, RotateDirection, Rotation};

fn o_piece_at(x: i8, y: i8) -> ActivePiece {
    ActivePiece::from_positions(
        PieceKind::O,
        Rotation::North,
        [(x, y), (x + 1, y), (x, y + 1), (x + 1, y + 1)],
    )
}

fn soft_drop() -> FrameInput {
    FrameInput {
        soft_drop: true,
        ..FrameInput::idle()
    }
}

/// Hands out kind indices 1, 2, ..., 7, 1, ... in order
#[derive(Debug, Clone, Default)]
struct CycleKinds {
    last: u8,
}

impl KindSource for CycleKinds {
    fn next_kind_index(&mut self) -> u8 {
        self.last = self.last % 7 + 1;
        self.last
    }
}

fn t_north(pivot_x: i8, pivot_y: i8) -> ActivePiece {
    ActivePiece::from_positions(
        PieceKind::T,
        Rotation::North,
        [
            (pivot_x - 1, pivot_y),
            (pivot_x, pivot_y - 1),
            (pivot_x, pivot_y),
            (pivot_x + 1, pivot_y),
        ],
    )
}

/// Lock a piece on `board` and run the entry delay out.
///
/// With [`CycleKinds`] the queue starts I J L O S, the first spawn is J, and
/// the spawn after this lock is L with O next.
fn spawn_l_onto(board: Board) -> (GameSession<CycleKinds>, Vec<GameEvent>) {
    let mut session = GameSession::with_source(CycleKinds::default(), RulesConfig::default())
        .expect("default rules are valid");
    session.load_position(board, o_piece_at(0, 18));
    session.lock();
    session.take_events();

    for _ in 0..30 {
        assert!(session.advance(&FrameInput::idle()).is_empty());
    }
    let events = session.advance(&FrameInput::idle()).to_vec();
    (session, events)
}

/// Deterministic input script covering every control
fn scripted_input(frame: u32) -> FrameInput {
    let horizontal = match frame % 97 {
        0..=14 => Horizontal::Left,
        40..=60 => Horizontal::Right,
        _ => Horizontal::None,
    };
    FrameInput {
        horizontal,
        rotate_cw: frame % 53 == 0,
        rotate_ccw: frame % 71 == 0,
        rotate_cw_held: frame % 53 < 3,
        rotate_ccw_held: frame % 71 < 3,
        soft_drop: frame % 211 > 150,
        restart: frame % 1000 == 999,
    }
}

#[test]
fn test_resting_piece_locks_after_lock_delay() {
    let mut session = GameSession::new(42);
    session.load_position(Board::from_rows(&["....T....."]), o_piece_at(4, 16));
    session.take_events();

    // Tick 1: soft drop moves the piece onto the T and it starts touching.
    let events = session.advance(&soft_drop());
    assert_eq!(events.as_slice(), &[GameEvent::PieceCollide]);
    assert_eq!(session.lock_ticks(), 1);
    assert!(session.active().unwrap().touching());

    // Ticks 2..=31: still resting.
    for _ in 2..=31 {
        let events = session.advance(&FrameInput::idle());
        assert!(events.is_empty());
    }
    assert!(session.active().is_some());

    // Tick 32: the delay has run out.
    let events = session.advance(&FrameInput::idle());
    assert_eq!(events.as_slice(), &[GameEvent::Lock]);
    assert!(session.active().is_none());
    assert_eq!(session.board().get(4, 18), Some(Some(PieceKind::O)));
    assert_eq!(session.phase(), Phase::EntryDelay { frames_left: 30 });
}

#[test]
fn test_soft_drop_into_stack_locks_immediately() {
    let mut session = GameSession::new(42);
    session.load_position(Board::from_rows(&["....T....."]), o_piece_at(4, 17));
    session.take_events();

    let events = session.advance(&soft_drop());
    assert_eq!(events.as_slice(), &[GameEvent::PieceCollide, GameEvent::Lock]);
    assert_eq!(session.board().get(4, 17), Some(Some(PieceKind::O)));
    assert_eq!(session.board().occupied_count(), 5);
}

#[test]
fn test_downward_move_onto_floor_locks() {
    let mut session = GameSession::new(42);
    session.load_position(Board::new(), o_piece_at(0, 18));
    session.take_events();

    assert_eq!(session.try_move(0, 1), MoveOutcome::LockedImmediately);
    let events = session.take_events();
    assert_eq!(events.as_slice(), &[GameEvent::PieceCollide, GameEvent::Lock]);
    assert_eq!(session.board().get(0, 19), Some(Some(PieceKind::O)));
}

#[test]
fn test_touching_piece_locks_on_gravity_step() {
    let rules = RulesConfig::default().with_lock_delay(1000);
    let mut session = GameSession::with_rules(42, rules).unwrap();
    session.load_position(Board::new(), o_piece_at(4, 17));
    session.take_events();

    // Tick 0 move: touching begins at once.
    assert_eq!(session.try_move(0, 1), MoveOutcome::Moved);
    assert!(session.active().unwrap().touching());
    session.take_events();

    for _ in 1..60 {
        session.advance(&FrameInput::idle());
    }
    assert!(session.active().is_some());

    let events = session.advance(&FrameInput::idle());
    assert_eq!(events.as_slice(), &[GameEvent::Lock]);
}

#[test]
fn test_sliding_off_the_stack_ends_touching() {
    let mut session = GameSession::new(42);
    session.load_position(Board::from_rows(&["....TT...."]), o_piece_at(4, 16));
    session.try_move(0, 1);
    assert!(session.active().unwrap().touching());

    // Nothing under columns 6 and 7.
    assert_eq!(session.try_move(2, 0), MoveOutcome::Moved);
    assert!(!session.active().unwrap().touching());

    // The floor is support too.
    assert_eq!(session.try_move(0, 1), MoveOutcome::Moved);
    assert!(session.active().unwrap().touching());
}

#[test]
fn test_move_past_left_wall_is_rejected() {
    let mut session = GameSession::new(42);
    session.load_position(Board::new(), o_piece_at(0, 5));
    session.take_events();

    assert_eq!(session.try_move(-1, 0), MoveOutcome::Rejected);
    assert_eq!(session.active().unwrap().positions()[0], (0, 5));
    assert!(session.take_events().is_empty());
}

#[test]
fn test_o_piece_rotation_is_noop() {
    let mut session = GameSession::new(42);
    session.load_position(Board::new(), o_piece_at(4, 5));
    let before = *session.active().unwrap();

    let input = FrameInput {
        rotate_cw: true,
        rotate_ccw: true,
        ..FrameInput::idle()
    };
    session.advance(&input);
    assert_eq!(*session.active().unwrap(), before);
    assert_eq!(
        session.try_rotate(RotateDirection::Cw),
        RotateOutcome::Unchanged
    );
}

#[test]
fn test_double_clear_scores_with_rising_level() {
    let mut session = GameSession::new(42);
    let board = Board::from_rows(&["IIII..IIII", "IIII..IIII"]);
    session.load_position(board, o_piece_at(4, 18));
    session.take_events();

    session.lock();
    let events = session.take_events();
    assert_eq!(
        events.as_slice(),
        &[
            GameEvent::Lock,
            GameEvent::LineClear { row: 18 },
            GameEvent::LineClear { row: 19 },
        ]
    );
    // 100 + 2*0, then 100 + 2*1
    assert_eq!(session.score(), 202);
    assert_eq!(session.lines(), 2);
    assert_eq!(session.level(), 3);
    assert_eq!(session.board().occupied_count(), 0);
}

#[test]
fn test_spawn_event_names_next_kind() {
    let mut session = GameSession::new(2024);
    session.load_position(Board::new(), o_piece_at(4, 10));
    session.lock();

    let mut spawned = None;
    for _ in 0..31 {
        for event in session.advance(&FrameInput::idle()) {
            if let GameEvent::Spawn { kind, next } = event {
                spawned = Some((kind, next));
            }
        }
    }
    let (kind, next) = spawned.expect("spawn after entry delay");
    assert_eq!(kind, session.queue().front());
    assert_eq!(next, session.queue().next());
    assert_eq!(session.active().unwrap().kind(), kind);
    assert!(session.queue().is_distinct());
}

#[test]
fn test_idle_game_tops_out_and_restarts() {
    let mut session = GameSession::new(77);
    let mut frames = 0;
    while !session.game_over() {
        session.advance(&FrameInput::idle());
        frames += 1;
        assert!(frames < 200_000, "idle stacking never ended the game");
    }
    assert_eq!(session.snapshot().phase, PhaseTag::GameOver);
    assert!(session.active().is_none());

    // Frozen until restart.
    let board = session.board().clone();
    let score = session.score();
    for _ in 0..100 {
        session.advance(&FrameInput::idle());
    }
    assert_eq!(session.board(), &board);
    assert_eq!(session.score(), score);

    let restart = FrameInput {
        restart: true,
        ..FrameInput::idle()
    };
    let events = session.advance(&restart);
    assert!(matches!(events.last(), Some(GameEvent::Spawn { .. })));
    assert!(!session.game_over());
    assert_eq!(session.ticks(), 0);
    assert_eq!(session.level(), 0);
    assert_eq!(session.lines(), 0);
    assert_eq!(session.board().occupied_count(), 0);
    assert!(session.last_locked().is_none());
}

#[test]
fn test_same_seed_and_inputs_replay_identically() {
    let mut a = GameSession::new(31337);
    let mut b = GameSession::new(31337);

    for frame in 0..5_000 {
        let input = scripted_input(frame);
        let ea = a.advance(&input);
        let eb = b.advance(&input);
        assert_eq!(ea, eb, "events diverged at frame {frame}");
        assert_eq!(a.snapshot(), b.snapshot(), "state diverged at frame {frame}");
    }
}

#[test]
fn test_snapshot_reflects_session() {
    let mut session = GameSession::new(5);
    session.load_position(Board::from_rows(&["Z........."]), o_piece_at(2, 3));

    let snap = session.snapshot();
    assert_eq!(snap.board[19][0], PieceKind::Z.index());
    assert_eq!(snap.active.unwrap().blocks, o_piece_at(2, 3).positions());
    assert_eq!(snap.queue, session.queue_kinds());
    assert_eq!(snap.preview(), session.preview());
    assert_eq!(snap.phase, PhaseTag::Falling);
    assert!(snap.playable());
}

#[test]
fn test_spawn_overlapping_stack_can_shift_clear() {
    let mut board = Board::new();
    board.set(4, 1, Some(PieceKind::T));
    let (mut session, events) = spawn_l_onto(board);

    assert_eq!(
        events,
        vec![GameEvent::Spawn {
            kind: PieceKind::L,
            next: PieceKind::O,
        }]
    );
    assert!(!session.game_over());
    let active = *session.active().expect("spawned piece is in play");
    assert_eq!(active.kind(), PieceKind::L);
    assert_eq!(active.positions(), *spawn_positions(PieceKind::L));
    assert!(!active.fits(session.board()));

    let right = FrameInput::idle().with_horizontal(Horizontal::Right);
    assert!(session.advance(&right).is_empty());

    assert!(!session.game_over());
    let active = session.active().unwrap();
    assert_eq!(active.positions(), [(7, 0), (5, 1), (6, 1), (7, 1)]);
    assert!(active.fits(session.board()));
}

#[test]
fn test_spawn_overlapping_stack_tops_out_on_next_drop() {
    let mut board = Board::new();
    board.set(4, 1, Some(PieceKind::T));
    board.set(4, 2, Some(PieceKind::T));
    let (mut session, events) = spawn_l_onto(board);
    assert!(matches!(events.as_slice(), [GameEvent::Spawn { .. }]));
    assert!(!session.game_over());

    let mut last = Vec::new();
    for _ in 0..100 {
        last = session.advance(&FrameInput::idle()).to_vec();
        if session.game_over() {
            break;
        }
    }

    assert!(session.game_over());
    assert_eq!(
        last,
        vec![GameEvent::PieceCollide, GameEvent::Lock, GameEvent::GameOver]
    );
    assert!(session.active().is_none());
    assert_eq!(session.board().get(6, 0), Some(Some(PieceKind::L)));
}

#[test]
fn test_irs_event_comes_before_spawn() {
    let mut session = GameSession::new(8);
    session.load_position(Board::new(), o_piece_at(4, 10));
    session.lock();
    for _ in 0..30 {
        session.advance(&FrameInput::idle());
    }

    let held = FrameInput {
        rotate_ccw_held: true,
        rotate_cw_held: true,
        ..FrameInput::idle()
    };
    let events = session.advance(&held);
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], GameEvent::RotateIrs(RotateDirection::Ccw));
    assert!(matches!(events[1], GameEvent::Spawn { .. }));
}

#[test]
fn test_kick_off_the_stack_ends_touching() {
    let rules = RulesConfig::default().with_wall_kicks(true);
    let mut session = GameSession::with_rules(42, rules).unwrap();
    let mut board = Board::new();
    board.set(5, 11, Some(PieceKind::Z));
    session.load_position(board, t_north(5, 9));

    assert_eq!(session.try_move(0, 1), MoveOutcome::Moved);
    assert!(session.active().unwrap().touching());
    session.take_events();

    // In place needs (5, 11); the first kick shifts left past the ledge.
    assert_eq!(
        session.try_rotate(RotateDirection::Cw),
        RotateOutcome::Kicked { dx: -1, dy: 0 }
    );
    let active = *session.active().unwrap();
    assert_eq!(active.positions(), [(4, 9), (5, 10), (4, 10), (4, 11)]);
    assert!(!active.touching());

    // No lock delay runs for a piece in the air.
    for _ in 0..40 {
        assert!(session.advance(&FrameInput::idle()).is_empty());
    }
    assert!(session.active().is_some());
}

#[test]
fn test_kick_onto_the_floor_starts_touching() {
    let rules = RulesConfig::default().with_wall_kicks(true);
    let mut session = GameSession::with_rules(42, rules).unwrap();
    session.load_position(Board::new(), t_north(5, 19));
    session.take_events();
    assert!(!session.active().unwrap().touching());

    // In place and the first kick leave the board; the second lifts one row.
    assert_eq!(
        session.try_rotate(RotateDirection::Cw),
        RotateOutcome::Kicked { dx: -1, dy: -1 }
    );
    assert_eq!(
        session.active().unwrap().positions(),
        [(4, 17), (5, 18), (4, 18), (4, 19)]
    );
    assert!(session.active().unwrap().touching());
    assert_eq!(session.lock_ticks(), session.ticks());
    assert_eq!(session.take_events().as_slice(), &[GameEvent::PieceCollide]);
}
