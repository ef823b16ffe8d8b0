use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_blocks::core::{can_place, clear_full, commit, GameSession, Grid};
use tui_blocks::types::{ColorTag, BOARD_SIZE};

fn bench_can_place(c: &mut Criterion) {
    let mut grid = Grid::new();
    // Half-filled board keeps the check honest.
    for y in 0..BOARD_SIZE as i8 {
        for x in 0..BOARD_SIZE as i8 {
            if (x + y) % 2 == 0 {
                grid.set(x, y, Some(ColorTag::Teal));
            }
        }
    }
    let square = [(0, 0), (1, 0), (0, 1), (1, 1)];

    c.bench_function("can_place_half_full", |b| {
        b.iter(|| can_place(black_box(&square), black_box(3), black_box(3), &grid))
    });
}

fn bench_commit_and_clear(c: &mut Criterion) {
    let bar5 = [(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)];

    c.bench_function("commit_and_clear_row", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            commit(&bar5, 0, 0, ColorTag::Rose, &mut grid);
            commit(&bar5, 5, 0, ColorTag::Rose, &mut grid);
            clear_full(&mut grid)
        })
    });
}

fn bench_session_turn(c: &mut Criterion) {
    c.bench_function("session_place_and_undo", |b| {
        let mut session = GameSession::new(12345);
        b.iter(|| {
            let report = session.attempt_placement(0, 0, 0);
            if report.is_ok() {
                session.undo();
            }
            report.is_ok()
        })
    });
}

fn bench_stuck_scan(c: &mut Criterion) {
    let session = GameSession::new(12345);

    c.bench_function("is_stuck_empty_board", |b| b.iter(|| session.is_stuck()));
}

criterion_group!(
    benches,
    bench_can_place,
    bench_commit_and_clear,
    bench_session_turn,
    bench_stuck_scan
);
criterion_main!(benches);
