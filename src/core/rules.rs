use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::definitions::Cell;
use crate::core::engine::{Board, Color, Piece};
use crate::core::forced::ForcedMoves;
use crate::core::utils::{delta, distance, is_in_diagonal_line, is_valid_coord, midpoint};

/// Which pieces a pending capture restricts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ForcedScope {
    /// Only a piece with its own forced entries is bound to them.
    #[default]
    SelectedPiece,
    /// Any forced entry for the color forbids every move outside the map.
    WholeColor,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rules {
    /// Dropping a piece back on its own cell is a silent no-op instead of `NullMove`.
    pub allow_null_move: bool,
    pub forced_scope: ForcedScope,
}

impl Rules {
    /// Tournament rules: captures are mandatory for the whole side.
    pub fn strict() -> Rules {
        Rules {
            allow_null_move: false,
            forced_scope: ForcedScope::WholeColor,
        }
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveError {
    #[error("you cannot move outside of the board")]
    OutOfBounds,
    #[error("putting a piece back does not count as a move")]
    NullMove,
    #[error("you cannot move on top of another piece")]
    DestinationOccupied,
    #[error("you have to take a forced capture")]
    MustTakeForcedMove,
    #[error("pieces only move diagonally")]
    NotDiagonal,
    #[error("pieces move one cell, or two when capturing")]
    InvalidDistance,
    #[error("only kings may move backwards")]
    WrongDirection,
    #[error("no piece is selected")]
    NoSelection,
    #[error("the game is over")]
    GameFinished,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /** one diagonal step */
    Simple,
    /** jump over the piece standing on `captured` */
    Capture { captured: Cell },
}

/// Result of `validate` when the piece may stay where it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Move(MoveKind),
    /// Same cell under `Rules::allow_null_move`
    Stay,
}

/** Checks one candidate move, first failing rule wins:
 * bounds, null move, occupancy, forced captures, diagonal, distance, direction.
 *
 * `forced` is expected to be the scan for `active`. A piece of either colour is checked
 * against the same rules, so a waiting piece gets a verdict too. */
pub fn validate(
    board: &Board,
    forced: &ForcedMoves,
    rules: &Rules,
    active: Color,
    piece: &Piece,
    dest: Cell,
) -> Result<Verdict, MoveError> {
    if !is_valid_coord(dest) {
        return Err(MoveError::OutOfBounds);
    }
    if dest == piece.cell() {
        return if rules.allow_null_move {
            Ok(Verdict::Stay)
        } else {
            Err(MoveError::NullMove)
        };
    }
    if board.is_occupied(dest) {
        return Err(MoveError::DestinationOccupied);
    }

    let is_forced = forced.contains(piece.id(), dest);
    let bound = match rules.forced_scope {
        ForcedScope::SelectedPiece => forced.has_moves(piece.id()),
        ForcedScope::WholeColor => forced.color() == active && !forced.is_empty(),
    };
    if bound && !is_forced {
        return Err(MoveError::MustTakeForcedMove);
    }

    if !is_in_diagonal_line(piece.cell(), dest) {
        return Err(MoveError::NotDiagonal);
    }

    let kind = match distance(piece.cell(), dest) {
        1 => MoveKind::Simple,
        2 if is_forced => MoveKind::Capture {
            captured: midpoint(piece.cell(), dest),
        },
        _ => return Err(MoveError::InvalidDistance),
    };

    let (_, drow) = delta(piece.cell(), dest);
    if !piece.can_step(drow) {
        return Err(MoveError::WrongDirection);
    }

    Ok(Verdict::Move(kind))
}
