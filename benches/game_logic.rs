use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use blockfall::core::{ActivePiece, Board, GameSession, GameSnapshot};
use blockfall::types::{FrameInput, Horizontal, PieceKind, RotateDirection};

fn bench_advance(c: &mut Criterion) {
    let mut session = GameSession::new(12345);
    let restart = FrameInput {
        restart: true,
        ..FrameInput::idle()
    };

    c.bench_function("advance_idle_frame", |b| {
        b.iter(|| {
            if session.game_over() {
                session.advance(&restart);
            }
            black_box(session.advance(black_box(&FrameInput::idle())));
        })
    });
}

fn bench_advance_with_input(c: &mut Criterion) {
    let mut session = GameSession::new(12345);
    let mut frame = 0u32;

    c.bench_function("advance_scripted_frame", |b| {
        b.iter(|| {
            frame = frame.wrapping_add(1);
            let input = FrameInput {
                horizontal: if frame % 40 < 10 { Horizontal::Left } else { Horizontal::None },
                rotate_cw: frame % 17 == 0,
                soft_drop: frame % 90 > 60,
                restart: true,
                ..FrameInput::idle()
            };
            black_box(session.advance(&input));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter_batched(
            || {
                let mut board = Board::new();
                // Fill bottom 4 rows
                for y in 16..20 {
                    for x in 0..10 {
                        board.set(x, y, Some(PieceKind::I));
                    }
                }
                board
            },
            |mut board| {
                for y in 16..20 {
                    board.clear_line(black_box(y));
                }
                board
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_try_move(c: &mut Criterion) {
    let board = Board::new();
    let piece = ActivePiece::spawn(PieceKind::T);

    c.bench_function("try_move", |b| {
        b.iter(|| {
            let mut p = piece;
            black_box(p.try_move(&board, black_box(1), 0))
        })
    });
}

fn bench_try_rotate(c: &mut Criterion) {
    let board = Board::from_rows(&["ZZZZ..ZZZZ", "ZZZ...ZZZZ"]);
    let mut piece = ActivePiece::spawn(PieceKind::T);
    piece.try_move(&board, 0, 10);

    c.bench_function("try_rotate_kicks", |b| {
        b.iter(|| {
            let mut p = piece;
            black_box(p.try_rotate(&board, RotateDirection::Cw, black_box(true)))
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let session = GameSession::new(12345);
    let mut snap = GameSnapshot::default();

    c.bench_function("snapshot_into", |b| {
        b.iter(|| {
            session.snapshot_into(black_box(&mut snap));
        })
    });
}

criterion_group!(
    benches,
    bench_advance,
    bench_advance_with_input,
    bench_line_clear,
    bench_try_move,
    bench_try_rotate,
    bench_snapshot
);
criterion_main!(benches);
