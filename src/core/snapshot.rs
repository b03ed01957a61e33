use postcard::{from_bytes, to_allocvec};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::engine::{Board, Color};
use crate::core::game::Game;
use crate::core::rules::Rules;

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to decode snapshot: {0}")]
    Decode(#[from] postcard::Error),
    #[error("corrupted snapshot: {0}")]
    Corrupted(String),
}

/// Saved game: board with king flags, side to move and rules.
/// Forced moves and the current selection are rebuilt on load.
#[derive(Serialize)]
struct SnapshotRef<'a> {
    board: &'a Board,
    active: Color,
    rules: Rules,
}

#[derive(Deserialize)]
struct Snapshot {
    board: Board,
    active: Color,
    rules: Rules,
}

impl Game {
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(&SnapshotRef {
            board: self.board(),
            active: self.current_turn(),
            rules: *self.rules(),
        })
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Game, SnapshotError> {
        let snapshot: Snapshot = from_bytes(bytes)?;
        snapshot
            .board
            .check_consistency()
            .map_err(SnapshotError::Corrupted)?;
        Ok(Game::from_board(snapshot.board, snapshot.active, snapshot.rules))
    }
}
