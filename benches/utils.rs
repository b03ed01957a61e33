use checkers_engine::{scan, Board, Color, Game, Rules};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn stupid_game(mut game: Game, max_steps: usize, rng: &mut StdRng) -> Game {
    for _ in 0..max_steps {
        let Some((from, to)) = game.random_move(rng) else {
            break;
        };
        game.play(from, to);
        if game.winner().is_some() {
            break;
        }
    }
    game
}

/// Middle game position with captures pending for both sides.
fn crowded_board() -> Board {
    let mut rng = StdRng::seed_from_u64(7);
    let game = stupid_game(Game::new(Rules::strict()), 20, &mut rng);
    game.board().clone()
}

fn criterion_benchmark(c: &mut Criterion) {
    let start = Board::default();
    let crowded = crowded_board();
    c.bench_function("scan start", |b| b.iter(|| scan(black_box(&start), Color::Light)));
    c.bench_function("scan crowded", |b| {
        b.iter(|| scan(black_box(&crowded), Color::Dark))
    });
    c.bench_function("legal moves start", |b| {
        let game = Game::default();
        b.iter(|| black_box(&game).legal_moves())
    });
    c.bench_function("stupid game 100", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| stupid_game(Game::default(), 100, &mut rng))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
