use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::core::engine::{Color, PieceId};
use crate::core::forced::ForcedMoves;
use crate::core::rules::{MoveError, MoveKind};

/// Board coordinate. Signed so that an input surface can hand over
/// off-board positions (e.g. `(-1, -1)` when the pointer misses the board).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub col: i8,
    pub row: i8,
}

impl Cell {
    #[inline]
    pub const fn new(col: i8, row: i8) -> Cell {
        Cell { col, row }
    }
}

impl From<(i8, i8)> for Cell {
    fn from((col, row): (i8, i8)) -> Self {
        Cell::new(col, row)
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub color: Color,
    pub king: bool,
    /// Piece has at least one mandatory capture this turn
    pub forced: bool,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Square {
    Empty,
    Figure(Figure),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectionResult {
    Selected(PieceId),
    /// Empty cell, opponent piece, off-board cell or finished game
    Ignored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedMove {
    pub piece: PieceId,
    pub from: Cell,
    pub to: Cell,
    pub kind: MoveKind,
    pub promoted: bool,
}

impl AppliedMove {
    pub fn is_capture(&self) -> bool {
        matches!(self.kind, MoveKind::Capture { .. })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    Applied(AppliedMove),
    /** piece dropped back on its own cell, only with `Rules::allow_null_move` */
    Returned,
    /** piece was put back on its origin cell */
    Rejected(MoveError),
}

impl MoveOutcome {
    pub fn applied(&self) -> Option<&AppliedMove> {
        match self {
            MoveOutcome::Applied(applied) => Some(applied),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<MoveError> {
        match self {
            MoveOutcome::Rejected(err) => Some(*err),
            _ => None,
        }
    }
}

/// What the input surface and renderer are allowed to see and do.
pub trait MatchInterface {
    fn current_board(&self) -> Vec<Vec<Square>>;
    fn square(&self, cell: Cell) -> Option<Square>;
    fn possible_moves(&self, cell: Cell) -> Option<Vec<Cell>>;
    fn select(&mut self, cell: Cell) -> SelectionResult;
    fn attempt_move(&mut self, dest: Cell) -> MoveOutcome;
    // info
    fn current_player(&self) -> Color;
    fn forced_moves(&self) -> &ForcedMoves;
    fn game_ended(&self) -> bool;
}
