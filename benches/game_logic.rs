use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tetris_battle::adapter::update_grid_message;
use tetris_battle::core::{Board, Engine};
use tetris_battle::types::{CellMarker, PieceKind};

fn bench_tick(c: &mut Criterion) {
    let mut engine = Engine::new(12345);

    c.bench_function("engine_tick_16ms", |b| {
        b.iter(|| {
            engine.tick(black_box(16));
        })
    });
}

fn bench_line_clear(c: &mut Criterion) {
    c.bench_function("clear_4_lines", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.set(x, y, Some(CellMarker::Piece(PieceKind::I)));
                }
            }
            board.clear_full_rows();
        })
    });
}

fn bench_hard_drop(c: &mut Criterion) {
    c.bench_function("hard_drop", |b| {
        let mut engine = Engine::new(12345);
        b.iter(|| {
            engine.hard_drop();
            if engine.game_over() {
                engine = Engine::new(12345);
            }
        })
    });
}

fn bench_rotate(c: &mut Criterion) {
    let mut engine = Engine::new(12345);

    c.bench_function("rotate_cw", |b| {
        b.iter(|| {
            engine.rotate(true);
        })
    });
}

fn bench_garbage_row(c: &mut Criterion) {
    c.bench_function("push_4_garbage_rows", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for hole in 0..4 {
                board.push_garbage_row(black_box(hole));
            }
        })
    });
}

fn bench_update_grid_encode(c: &mut Criterion) {
    let engine = Engine::new(12345);

    c.bench_function("encode_update_grid", |b| {
        b.iter(|| {
            let message = update_grid_message(black_box(&engine));
            serde_json::to_string(&message).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_tick,
    bench_line_clear,
    bench_hard_drop,
    bench_rotate,
    bench_garbage_row,
    bench_update_grid_encode
);
criterion_main!(benches);
