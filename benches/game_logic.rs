use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pair_em_up::core::generator::grow;
use pair_em_up::core::{
    count_valid_moves, Board, GameMode, ResultHistory, Session, SimpleRng, TileRng,
};
use pair_em_up::term::{GameView, ViewModel, Viewport};

/// A late-game board: 40 rows, roughly a third of the tiles cleared.
fn busy_board() -> Board {
    let mut rng = SimpleRng::new(12345);
    let cells = (0..360)
        .map(|i| {
            if i % 3 == 1 {
                None
            } else {
                Some(rng.next_tile(9))
            }
        })
        .collect();
    Board::from_cells(cells)
}

fn bench_count_valid_moves(c: &mut Criterion) {
    let board = busy_board();
    c.bench_function("count_valid_moves_40_rows", |b| {
        b.iter(|| count_valid_moves(black_box(&board)))
    });
}

fn bench_growth(c: &mut Criterion) {
    for mode in [GameMode::Classic, GameMode::Random, GameMode::Chaotic] {
        c.bench_function(&format!("grow_{}", mode.as_str()), |b| {
            let mut rng = SimpleRng::new(7);
            b.iter(|| {
                let mut board = Session::new(mode, &mut rng).board().clone();
                for _ in 0..4 {
                    let _ = grow(mode, &mut board, &mut rng);
                }
                board
            })
        });
    }
}

fn bench_shuffle(c: &mut Criterion) {
    let board = busy_board();
    c.bench_function("shuffle_40_rows", |b| {
        let mut rng = SimpleRng::new(99);
        b.iter(|| {
            let mut session = Session::from_board(GameMode::Chaotic, board.clone());
            let _ = session.use_shuffle(&mut rng);
            session
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let session = Session::from_board(GameMode::Chaotic, busy_board());
    let history = ResultHistory::new();
    let view = GameView::default();
    let model = ViewModel {
        session: Some(&session),
        cursor: 180,
        hint: None,
        message: None,
        results: &history,
        has_saved_game: false,
    };
    let mut fb = view.render(&model, Viewport::new(80, 24));

    c.bench_function("render_80x24", |b| {
        b.iter(|| view.render_into(black_box(&model), Viewport::new(80, 24), &mut fb))
    });
}

criterion_group!(
    benches,
    bench_count_valid_moves,
    bench_growth,
    bench_shuffle,
    bench_render
);
criterion_main!(benches);
