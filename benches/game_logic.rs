use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tui_pairs::core::{
    Board, GameSession, PlayerName, Scheduler, SessionId, SessionSetup, SimpleRng, SystemClock,
    Task,
};
use tui_pairs::types::{Difficulty, Position};

fn bench_generate(c: &mut Criterion) {
    let mut rng = SimpleRng::new(12345);

    c.bench_function("generate_8x8", |b| {
        b.iter(|| Board::generate(black_box(8), &mut rng))
    });
}

fn bench_solve_easy(c: &mut Criterion) {
    let board = Board::for_difficulty(Difficulty::Easy, &mut SimpleRng::new(12345));
    let player = PlayerName::parse("bench").unwrap();

    c.bench_function("solve_easy", |b| {
        b.iter(|| {
            let setup = SessionSetup::new(Difficulty::Easy, player.clone());
            let mut session = GameSession::new(SessionId(1), setup, board.clone(), SystemClock).unwrap();
            for index in 0..board.len() {
                let pos = Position::from_index(index, 4);
                if session.is_matched(pos) {
                    continue;
                }
                let _ = session.select_card(pos);
                let _ = session.select_card(board.partner_of(pos).unwrap());
            }
            black_box(session.take_events());
        })
    });
}

fn bench_select_mismatch(c: &mut Criterion) {
    let board = Board::for_difficulty(Difficulty::Hard, &mut SimpleRng::new(12345));
    let first = Position::new(0, 0);
    let other = (1..board.len())
        .map(|i| Position::from_index(i, 8))
        .find(|&p| board.get(p) != board.get(first))
        .unwrap();
    let setup = SessionSetup::new(Difficulty::Hard, PlayerName::parse("bench").unwrap());
    let mut session = GameSession::new(SessionId(1), setup, board, SystemClock).unwrap();

    c.bench_function("select_mismatch", |b| {
        b.iter(|| {
            let _ = session.select_card(black_box(first));
            let _ = session.select_card(black_box(other));
            session.finish_mismatch();
            session.take_events();
        })
    });
}

fn bench_scheduler(c: &mut Criterion) {
    let mut scheduler = Scheduler::new();

    c.bench_function("scheduler_advance", |b| {
        b.iter(|| {
            for owner in 0..16 {
                scheduler.schedule(SessionId(owner), 500, Task::HideMismatch);
            }
            black_box(scheduler.advance(black_box(500)));
        })
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_solve_easy,
    bench_select_mismatch,
    bench_scheduler
);
criterion_main!(benches);
