use std::collections::BTreeMap;

use log::trace;

use crate::core::definitions::Cell;
use crate::core::engine::{Board, Color, PieceId};
use crate::core::utils::{is_valid_coord, offset, DIAGONALS};

/// Mandatory captures of one side for the current turn: piece -> landing cells.
/// Rebuilt from scratch by [`scan`] after every committed move.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForcedMoves {
    color: Color,
    moves: BTreeMap<PieceId, Vec<Cell>>,
}

impl ForcedMoves {
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Number of pieces with at least one forced capture.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn has_moves(&self, piece: PieceId) -> bool {
        self.moves.contains_key(&piece)
    }

    pub fn contains(&self, piece: PieceId, dest: Cell) -> bool {
        self.for_piece(piece).contains(&dest)
    }

    pub fn for_piece(&self, piece: PieceId) -> &[Cell] {
        self.moves.get(&piece).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (PieceId, &[Cell])> + '_ {
        self.moves.iter().map(|(id, cells)| (*id, cells.as_slice()))
    }
}

/** Full board scan for captures available to `color`.
 * For every piece of `color` and every allowed diagonal: the neighbour must
 * hold an opponent and the cell behind it must be on board and empty. */
pub fn scan(board: &Board, color: Color) -> ForcedMoves {
    let mut forced = ForcedMoves {
        color,
        moves: BTreeMap::new(),
    };
    for piece in board.iter_pieces().filter(|piece| piece.color() == color) {
        for (dcol, drow) in DIAGONALS {
            if !piece.can_step(drow) {
                continue;
            }
            let over = offset(piece.cell(), dcol, drow);
            let jumped = match board.get(over) {
                Ok(Some(jumped)) => jumped,
                _ => continue,
            };
            if jumped.color() == color {
                continue;
            }
            let landing = offset(over, dcol, drow);
            if !is_valid_coord(landing) || board.is_occupied(landing) {
                continue;
            }
            trace!("Forced move: {:?} {} -> {}", piece.id(), piece.cell(), landing);
            forced.moves.entry(piece.id()).or_default().push(landing);
        }
    }
    forced
}
