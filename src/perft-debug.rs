use std::env;

use anyhow::{bail, Context};
use checkers_engine::{Game, Rules};

fn perf_test(game: &Game, depth: u32, debug: bool) -> usize {
    match depth {
        0 => 1,
        1 => {
            let possible_moves = game.legal_moves();
            if debug {
                let moves: Vec<_> = possible_moves
                    .iter()
                    .map(|(from, to)| format!("{from} -> {to}"))
                    .collect();
                println!("{moves:#?}")
            }
            possible_moves.len()
        }
        _ => game
            .legal_moves()
            .into_iter()
            .map(|(from, to)| {
                let mut game = game.clone();
                game.play(from, to);
                perf_test(&game, depth - 1, false)
            })
            .sum(),
    }
}

/// perft-debug <depth> [expected] [--relaxed]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let depth: u32 = args
        .get(1)
        .context("Usage: perft-debug <depth> [expected] [--relaxed]")?
        .parse()
        .context("Depth must be a number")?;
    let expected: Option<usize> = args
        .get(2)
        .filter(|arg| !arg.starts_with("--"))
        .map(|arg| arg.parse())
        .transpose()
        .context("Expected count must be a number")?;
    let rules = if args.iter().any(|arg| arg == "--relaxed") {
        Rules::default()
    } else {
        Rules::strict()
    };
    let game = Game::new(rules);
    let result = perf_test(&game, depth, true);
    println!("Found {result} moves.");
    match expected {
        Some(expected) if expected != result => bail!("Expected {expected} moves"),
        _ => Ok(()),
    }
}
