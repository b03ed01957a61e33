use crate::core::definitions::Cell;

pub const BOARD_SIZE: i8 = 8;

/** Diagonal unit steps, (col, row) */
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub struct DirectionIterator {
    position: Cell,
    direction: (i8, i8),
}

impl Iterator for DirectionIterator {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.position = offset(self.position, self.direction.0, self.direction.1);
        if is_valid_coord(self.position) {
            Some(self.position)
        } else {
            None
        }
    }
}

/// Cells along `direction` starting after `position`, stops at the board edge.
pub fn in_direction(position: Cell, direction: (i8, i8)) -> DirectionIterator {
    DirectionIterator {
        position,
        direction,
    }
}

#[inline]
pub fn is_valid_coord(cell: Cell) -> bool {
    (0..BOARD_SIZE).contains(&cell.col) && (0..BOARD_SIZE).contains(&cell.row)
}

#[inline]
pub fn offset(cell: Cell, dcol: i8, drow: i8) -> Cell {
    Cell::new(cell.col.saturating_add(dcol), cell.row.saturating_add(drow))
}

/// Signed (dcol, drow) from `from` to `to`.
#[inline]
pub fn delta(from: Cell, to: Cell) -> (i8, i8) {
    (
        to.col.saturating_sub(from.col),
        to.row.saturating_sub(from.row),
    )
}

/// Chebyshev distance, equals the step count for diagonal moves.
pub fn distance(a: Cell, b: Cell) -> u8 {
    let (dcol, drow) = delta(a, b);
    dcol.unsigned_abs().max(drow.unsigned_abs())
}

pub fn is_in_diagonal_line(a: Cell, b: Cell) -> bool {
    let (dcol, drow) = delta(a, b);
    dcol.unsigned_abs() == drow.unsigned_abs()
}

pub fn midpoint(a: Cell, b: Cell) -> Cell {
    Cell::new((a.col + b.col) / 2, (a.row + b.row) / 2)
}

#[inline]
pub fn compact_pos(cell: Cell) -> Option<usize> {
    if is_valid_coord(cell) {
        Some(cell.row as usize * BOARD_SIZE as usize + cell.col as usize)
    } else {
        None
    }
}

#[inline]
pub fn unpack_pos(pos: usize) -> Cell {
    let size = BOARD_SIZE as usize;
    Cell::new((pos % size) as i8, (pos / size) as i8)
}
