pub mod core;

// module re-exports
pub use crate::core::definitions::{
    AppliedMove, Cell, Figure, MatchInterface, MoveOutcome, SelectionResult, Square,
};
pub use crate::core::engine::{Board, Color, Piece, PieceId};
pub use crate::core::forced::{scan, ForcedMoves};
pub use crate::core::game::{Game, Phase};
pub use crate::core::rules::{validate, ForcedScope, MoveError, MoveKind, Rules, Verdict};
pub use crate::core::snapshot::SnapshotError;


/// Fresh game with the standard setup, Light to move.
pub fn new_game() -> Game {
    Game::default()
}

pub fn select(game: &mut Game, cell: Cell) -> SelectionResult {
    game.select(cell)
}

pub fn attempt_move(game: &mut Game, dest: Cell) -> MoveOutcome {
    game.attempt_move(dest)
}

pub fn forced_moves(game: &Game) -> &ForcedMoves {
    MatchInterface::forced_moves(game)
}

pub fn current_turn(game: &Game) -> Color {
    game.current_turn()
}
