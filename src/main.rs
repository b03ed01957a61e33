use std::io::{self, BufRead, Write};

use anyhow::{bail, Context};
use checkers_engine::{
    Cell, Color, ForcedScope, Game, MatchInterface, MoveKind, MoveOutcome, Rules, Square,
};

use log::{info, warn};

struct App {
    game: Game,
    rng: rand::rngs::ThreadRng,
}

fn parse_rules(args: &[String]) -> anyhow::Result<Rules> {
    let mut rules = Rules::default();
    for arg in args {
        match arg.as_str() {
            "--strict" => rules.forced_scope = ForcedScope::WholeColor,
            "--allow-null-move" => rules.allow_null_move = true,
            other => bail!("Unknown argument `{other}`, expected --strict or --allow-null-move"),
        }
    }
    Ok(rules)
}

fn parse_cell<'a>(words: &mut impl Iterator<Item = &'a str>) -> anyhow::Result<Cell> {
    let mut coord = || -> anyhow::Result<i8> {
        let word = words.next().context("Missing coordinate")?;
        word.parse()
            .with_context(|| format!("`{word}` is not a coordinate"))
    };
    let col = coord()?;
    let row = coord()?;
    Ok(Cell::new(col, row))
}

fn main() -> anyhow::Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let args: Vec<String> = std::env::args().skip(1).collect();
    let rules = parse_rules(&args)?;
    info!("Starting game with {rules:?}");
    let mut app = App {
        game: Game::new(rules),
        rng: rand::thread_rng(),
    };

    println!("Commands: `<col> <row> <col> <row>`, `moves <col> <row>`, `hint`,");
    println!("          `save <file>`, `load <file>`, `new`, `quit`");
    app.draw()?;
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        match app.command(line.trim()) {
            Ok(true) => break,
            Ok(false) => (),
            Err(err) => {
                warn!("Command `{}` failed: {err:#}", line.trim());
                println!("! {err:#}");
            }
        }
    }
    Ok(())
}

impl App {
    /// Returns `true` when the user asked to quit.
    fn command(&mut self, line: &str) -> anyhow::Result<bool> {
        let mut words = line.split_whitespace();
        match words.next() {
            None => (),
            Some("quit") | Some("q") => return Ok(true),
            Some("new") => {
                self.game = Game::new(*self.game.rules());
                self.draw()?;
            }
            Some("moves") => {
                let cell = parse_cell(&mut words)?;
                match self.game.possible_moves(cell) {
                    Some(moves) => {
                        let moves: Vec<_> = moves.iter().map(Cell::to_string).collect();
                        println!("{cell} -> {}", moves.join(", "));
                    }
                    None => println!("{cell} has no moves"),
                }
            }
            Some("hint") => match self.game.random_move(&mut self.rng) {
                Some((from, to)) => println!("Try {from} -> {to}"),
                None => println!("No legal move"),
            },
            Some("save") => {
                let path = words.next().context("Missing file name")?;
                let bytes = self.game.to_bytes().context("Failed to encode game")?;
                std::fs::write(path, bytes).with_context(|| format!("Failed to write {path}"))?;
                println!("Saved to {path}");
            }
            Some("load") => {
                let path = words.next().context("Missing file name")?;
                let bytes = std::fs::read(path).with_context(|| format!("Failed to read {path}"))?;
                self.game = Game::from_bytes(&bytes)?;
                self.draw()?;
            }
            Some(first) => {
                let mut words = std::iter::once(first).chain(words);
                let from = parse_cell(&mut words)?;
                let to = parse_cell(&mut words)?;
                self.play(from, to)?;
            }
        }
        Ok(false)
    }

    fn play(&mut self, from: Cell, to: Cell) -> io::Result<()> {
        match self.game.play(from, to) {
            MoveOutcome::Applied(applied) => {
                if let MoveKind::Capture { captured } = applied.kind {
                    println!("Captured {captured}");
                }
                if applied.promoted {
                    println!("Crowned on {}", applied.to);
                }
                self.draw()?;
            }
            MoveOutcome::Returned => println!("Piece returned to {from}"),
            MoveOutcome::Rejected(err) => println!("Invalid - {err}"),
        }
        Ok(())
    }

    fn draw(&self) -> io::Result<()> {
        self.render(&mut io::stdout().lock())
    }

    fn render(&self, out: &mut impl Write) -> io::Result<()> {
        for (row, squares) in self.game.current_board().iter().enumerate().rev() {
            let line: String = squares
                .iter()
                .map(|square| match square {
                    Square::Empty => "  .".to_string(),
                    Square::Figure(figure) => {
                        let symbol = match (figure.color, figure.king) {
                            (Color::Light, false) => 'l',
                            (Color::Light, true) => 'L',
                            (Color::Dark, false) => 'd',
                            (Color::Dark, true) => 'D',
                        };
                        let mark = if figure.forced { '*' } else { ' ' };
                        format!(" {mark}{symbol}")
                    }
                })
                .collect();
            writeln!(out, "{row}{line}")?;
        }
        writeln!(out, "   0  1  2  3  4  5  6  7")?;
        match self.game.winner() {
            Some(winner) => writeln!(out, "{winner} wins!"),
            None => writeln!(out, "{} to move", self.game.current_player()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn app() -> App {
        App {
            game: Game::default(),
            rng: rand::thread_rng(),
        }
    }

    #[test]
    fn render_start() {
        let mut out = Vec::new();
        app().render(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "7  d  .  d  .  d  .  d  .");
        assert_eq!(lines[7], "0  .  l  .  l  .  l  .  l");
        assert_eq!(lines[9], "Light to move");
    }

    #[test]
    fn render_reports_write_errors() {
        let err = app().render(&mut Closed).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
