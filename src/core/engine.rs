use std::fmt::{Debug, Display};

use log::trace;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::core::definitions::Cell;
use crate::core::rules::MoveError;
use crate::core::utils::{compact_pos, unpack_pos, BOARD_SIZE};

/** Rows each side fills at setup */
const SETUP_ROWS: i8 = 3;

#[derive(PartialEq, Eq, Hash, Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub enum Color {
    #[default]
    Light,
    Dark,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row step of a non-king piece moving forward.
    pub fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    /// Far edge row where a piece of this color is crowned.
    pub fn promotion_row(self) -> i8 {
        match self {
            Color::Light => BOARD_SIZE - 1,
            Color::Dark => 0,
        }
    }

    fn home_rows(self) -> std::ops::Range<i8> {
        match self {
            Color::Light => 0..SETUP_ROWS,
            Color::Dark => BOARD_SIZE - SETUP_ROWS..BOARD_SIZE,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Color::Light => "Light",
            Color::Dark => "Dark",
        })
    }
}

/// Stable index of a piece in the board arena. Never reused within a game.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(u8);

impl PieceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl Debug for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    color: Color,
    king: bool,
    cell: Cell,
    previous_cell: Cell,
}

impl Piece {
    fn new(id: PieceId, color: Color, king: bool, cell: Cell) -> Piece {
        Piece {
            id,
            color,
            king,
            cell,
            previous_cell: cell,
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn is_king(&self) -> bool {
        self.king
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn previous_cell(&self) -> Cell {
        self.previous_cell
    }

    /// Whether a move with row step `drow` goes the way this piece may go.
    pub fn can_step(&self, drow: i8) -> bool {
        self.king || drow.signum() == self.color.forward()
    }
}

impl Debug for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Piece")
            .field("id", &self.id)
            .field("color", &self.color)
            .field("king", &self.king)
            .field("cell", &self.cell)
            .field("previous_cell", &self.previous_cell)
            .finish()
    }
}

/** 8x8 slots referencing pieces of the arena.
 * A slot holds `id` iff `pieces[id].cell` is that slot. Captured pieces
 * leave a `None` hole in the arena so ids stay stable. */
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde_as(as = "[_; 64]")]
    slots: [Option<PieceId>; 64],
    pieces: Vec<Option<Piece>>,
}

impl Board {
    pub fn empty() -> Board {
        Board {
            slots: [None; 64],
            pieces: Vec::new(),
        }
    }

    /// Standard starting placement: 12 pieces per side on the cells with odd `col + row`.
    pub fn new() -> Board {
        let mut board = Board::empty();
        for color in [Color::Light, Color::Dark] {
            for row in color.home_rows() {
                for col in (0..BOARD_SIZE).filter(|col| (col + row) % 2 == 1) {
                    board
                        .spawn(color, false, Cell::new(col, row))
                        .expect("Setup cells are on board and distinct");
                }
            }
        }
        board
    }

    pub fn get(&self, cell: Cell) -> Result<Option<&Piece>, MoveError> {
        let pos = compact_pos(cell).ok_or(MoveError::OutOfBounds)?;
        Ok(self.slots[pos].and_then(|id| self.piece(id)))
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        matches!(self.get(cell), Ok(Some(_)))
    }

    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(id.index()).and_then(Option::as_ref)
    }

    fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        match self.pieces.get_mut(id.index()).and_then(Option::as_mut) {
            Some(piece) => piece,
            None => panic!("That's a bug! Piece {id:?} is not on the board"),
        }
    }

    /// Put a new piece on an empty cell.
    pub fn spawn(&mut self, color: Color, king: bool, cell: Cell) -> Result<PieceId, MoveError> {
        let pos = compact_pos(cell).ok_or(MoveError::OutOfBounds)?;
        if self.slots[pos].is_some() {
            return Err(MoveError::DestinationOccupied);
        }
        let id = PieceId(
            u8::try_from(self.pieces.len()).expect("Piece arena is limited to 256 pieces"),
        );
        self.pieces.push(Some(Piece::new(id, color, king, cell)));
        self.slots[pos] = Some(id);
        Ok(id)
    }

    /** Mechanical relocation of an ***already validated*** move. */
    pub fn place(&mut self, id: PieceId, cell: Cell) {
        let to = compact_pos(cell).expect("Trying to place a piece out of the board!");
        let from = self.piece_mut(id).cell;
        let from = compact_pos(from).expect("That's a bug! Piece stands out of the board");
        assert!(
            self.slots[to].is_none() || self.slots[to] == Some(id),
            "Trying to move in busy place!"
        );
        assert!(
            self.slots[from] == Some(id),
            "That's a bug! Board and piece disagree on its cell"
        );
        self.slots[from] = None;
        self.slots[to] = Some(id);
        let piece = self.piece_mut(id);
        piece.previous_cell = piece.cell;
        piece.cell = cell;
        trace!("Placed {id:?} on {cell}");
    }

    /// Clear the slot and drop its piece from the arena.
    pub fn remove(&mut self, cell: Cell) -> Result<Option<Piece>, MoveError> {
        let pos = compact_pos(cell).ok_or(MoveError::OutOfBounds)?;
        Ok(self.slots[pos]
            .take()
            .and_then(|id| self.pieces[id.index()].take()))
    }

    /// Monotonic promotion, returns `true` only when the piece just became a king.
    pub fn crown(&mut self, id: PieceId) -> bool {
        let piece = self.piece_mut(id);
        let promoted = !piece.king;
        piece.king = true;
        promoted
    }

    pub fn iter_pieces(&self) -> impl Iterator<Item = &Piece> + '_ {
        self.slots
            .iter()
            .filter_map(move |slot| slot.and_then(|id| self.piece(id)))
    }

    pub fn count(&self, color: Color) -> usize {
        self.iter_pieces().filter(|piece| piece.color == color).count()
    }

    pub fn occupancy(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Verifies the slot/arena agreement, for boards coming from outside.
    pub fn check_consistency(&self) -> Result<(), String> {
        for (pos, slot) in self.slots.iter().enumerate() {
            let Some(id) = slot else { continue };
            let cell = unpack_pos(pos);
            match self.piece(*id) {
                None => return Err(format!("slot {cell} references missing piece {id:?}")),
                Some(piece) if piece.cell != cell => {
                    return Err(format!("piece {id:?} thinks it is on {}, slot says {cell}", piece.cell))
                }
                Some(piece) if piece.id != *id => {
                    return Err(format!("arena entry {id:?} carries id {:?}", piece.id))
                }
                Some(_) => (),
            }
        }
        let placed = self.occupancy();
        let alive = self.pieces.iter().flatten().count();
        if placed != alive {
            return Err(format!("{alive} pieces alive but {placed} placed"));
        }
        Ok(())
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
