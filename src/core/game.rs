use log::{debug, info};
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::core::definitions::{
    AppliedMove, Cell, Figure, MatchInterface, MoveOutcome, SelectionResult, Square,
};
use crate::core::engine::{Board, Color, Piece, PieceId};
use crate::core::forced::{scan, ForcedMoves};
use crate::core::rules::{validate, MoveError, MoveKind, Rules, Verdict};
use crate::core::utils::{compact_pos, in_direction, BOARD_SIZE, DIAGONALS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    AwaitingSelection,
    /** piece being dragged and the cell it was picked up from */
    PieceSelected { piece: PieceId, origin: Cell },
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    active: Color,
    phase: Phase,
    forced: ForcedMoves,
    rules: Rules,
}

impl Game {
    pub fn new(rules: Rules) -> Game {
        Game::from_board(Board::new(), Color::Light, rules)
    }

    pub fn from_board(board: Board, active: Color, rules: Rules) -> Game {
        let forced = scan(&board, active);
        Game {
            board,
            active,
            phase: Phase::AwaitingSelection,
            forced,
            rules,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_turn(&self) -> Color {
        self.active
    }

    pub fn selected(&self) -> Option<PieceId> {
        match self.phase {
            Phase::PieceSelected { piece, .. } => Some(piece),
            Phase::AwaitingSelection => None,
        }
    }

    /// The side left with pieces once the other has lost all of them.
    pub fn winner(&self) -> Option<Color> {
        match (self.board.count(Color::Light), self.board.count(Color::Dark)) {
            (0, 0) => None,
            (0, _) => Some(Color::Dark),
            (_, 0) => Some(Color::Light),
            _ => None,
        }
    }

    pub fn deselect(&mut self) {
        self.phase = Phase::AwaitingSelection;
    }

    /// `select` followed by `attempt_move`.
    pub fn play(&mut self, from: Cell, to: Cell) -> MoveOutcome {
        match self.select(from) {
            SelectionResult::Selected(_) => self.attempt_move(to),
            SelectionResult::Ignored => {
                self.deselect();
                MoveOutcome::Rejected(MoveError::NoSelection)
            }
        }
    }

    /// Destinations the piece on `cell` may legally take this turn.
    pub fn destinations(&self, cell: Cell) -> Vec<Cell> {
        let piece = match self.board.get(cell) {
            Ok(Some(piece)) if piece.color() == self.active => piece,
            _ => return Vec::new(),
        };
        if self.winner().is_some() {
            return Vec::new();
        }
        DIAGONALS
            .iter()
            .flat_map(|&direction| in_direction(cell, direction).take(2))
            .filter(|&dest| {
                matches!(
                    validate(&self.board, &self.forced, &self.rules, self.active, piece, dest),
                    Ok(Verdict::Move(_))
                )
            })
            .collect()
    }

    /// Every `(from, to)` pair the side to move may play.
    pub fn legal_moves(&self) -> Vec<(Cell, Cell)> {
        self.board
            .iter_pieces()
            .filter(|piece| piece.color() == self.active)
            .flat_map(|piece| {
                let from = piece.cell();
                self.destinations(from).into_iter().map(move |to| (from, to))
            })
            .collect()
    }

    pub fn random_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(Cell, Cell)> {
        self.legal_moves().into_iter().choose(rng)
    }

    fn commit(&mut self, piece: &Piece, dest: Cell, kind: MoveKind) -> AppliedMove {
        let id = piece.id();
        let from = piece.cell();
        self.board.place(id, dest);
        if let MoveKind::Capture { captured } = kind {
            let removed = self
                .board
                .remove(captured)
                .expect("Jumped cell lies between two board cells");
            assert!(
                removed.map(|removed| removed.color() != piece.color()).unwrap_or(false),
                "That's a bug! Capture over an empty cell or a teammate"
            );
            info!("{} captured the piece on {captured}", piece.color());
        }
        let promoted = dest.row == piece.color().promotion_row() && self.board.crown(id);
        if promoted {
            info!("{} piece {id:?} became a king on {dest}", piece.color());
        }

        self.active = self.active.opposite();
        self.forced = scan(&self.board, self.active);
        if let Some(winner) = self.winner() {
            info!("{winner} wins");
        }
        debug!(
            "Applied {kind:?} {from} -> {dest}, {} to move, {} forced",
            self.active,
            self.forced.len()
        );
        AppliedMove {
            piece: id,
            from,
            to: dest,
            kind,
            promoted,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new(Default::default())
    }
}

impl MatchInterface for Game {
    fn current_board(&self) -> Vec<Vec<Square>> {
        (0..BOARD_SIZE)
            .map(|row| {
                (0..BOARD_SIZE)
                    .filter_map(|col| self.square(Cell::new(col, row)))
                    .collect()
            })
            .collect()
    }

    fn square(&self, cell: Cell) -> Option<Square> {
        compact_pos(cell)?;
        Some(match self.board.get(cell) {
            Ok(Some(piece)) => Square::Figure(Figure {
                color: piece.color(),
                king: piece.is_king(),
                forced: piece.color() == self.forced.color() && self.forced.has_moves(piece.id()),
                selected: self.selected() == Some(piece.id()),
            }),
            _ => Square::Empty,
        })
    }

    fn possible_moves(&self, cell: Cell) -> Option<Vec<Cell>> {
        let moves = self.destinations(cell);
        if moves.is_empty() {
            None
        } else {
            Some(moves)
        }
    }

    fn select(&mut self, cell: Cell) -> SelectionResult {
        if self.winner().is_some() {
            return SelectionResult::Ignored;
        }
        match self.board.get(cell) {
            Ok(Some(piece)) if piece.color() == self.active => {
                debug!("Selected {:?} on {cell}", piece.id());
                self.phase = Phase::PieceSelected {
                    piece: piece.id(),
                    origin: piece.cell(),
                };
                SelectionResult::Selected(piece.id())
            }
            _ => SelectionResult::Ignored,
        }
    }

    fn attempt_move(&mut self, dest: Cell) -> MoveOutcome {
        let (id, origin) = match self.phase {
            Phase::PieceSelected { piece, origin } => (piece, origin),
            Phase::AwaitingSelection => return MoveOutcome::Rejected(MoveError::NoSelection),
        };
        self.phase = Phase::AwaitingSelection;
        if self.winner().is_some() {
            return MoveOutcome::Rejected(MoveError::GameFinished);
        }

        let piece = match self.board.piece(id) {
            Some(piece) => piece.clone(),
            None => unreachable!("Selected piece {id:?} is not on the board"),
        };
        assert!(
            piece.cell() == origin,
            "That's a bug! Selected piece moved while being dragged"
        );
        assert!(
            piece.color() == self.active,
            "That's a bug! Selected a piece of the waiting side"
        );

        match validate(&self.board, &self.forced, &self.rules, self.active, &piece, dest) {
            Ok(Verdict::Move(kind)) => MoveOutcome::Applied(self.commit(&piece, dest, kind)),
            Ok(Verdict::Stay) => {
                self.board.place(id, origin);
                MoveOutcome::Returned
            }
            Err(err) => {
                debug!("Rejected {:?} {origin} -> {dest}: {err}", id);
                self.board.place(id, origin);
                MoveOutcome::Rejected(err)
            }
        }
    }

    fn current_player(&self) -> Color {
        self.active
    }

    fn forced_moves(&self) -> &ForcedMoves {
        &self.forced
    }

    fn game_ended(&self) -> bool {
        self.winner().is_some()
    }
}
