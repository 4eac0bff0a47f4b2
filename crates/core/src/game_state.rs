//! Game state module - the board, the falling piece, score and game-over flag
//!
//! `GameState` is plain data. The rules that mutate it live in
//! [`crate::engine`]; the controller owns the single instance.

use crate::board::Board;
use crate::pieces::{base_shape, FilledCells, Shape};
use crate::types::{PieceColor, PieceKind};

/// The currently falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub color: PieceColor,
    /// Board row of the shape's top-left cell
    pub row: i32,
    /// Board column of the shape's top-left cell
    pub col: i32,
}

impl ActivePiece {
    /// Base shape of `kind`, top row, horizontally centred on a board
    /// `board_cols` wide.
    pub fn spawn(kind: PieceKind, board_cols: usize) -> Self {
        let shape = base_shape(kind);
        Self {
            kind,
            shape,
            color: kind.color(),
            row: 0,
            col: board_cols as i32 / 2 - shape.cols() as i32 / 2,
        }
    }

    /// Board coordinates of every filled cell
    pub fn board_cells(&self) -> FilledCells {
        let mut cells = self.shape.filled_cells();
        for (r, c) in cells.iter_mut() {
            *r += self.row;
            *c += self.col;
        }
        cells
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) active: ActivePiece,
    pub(crate) score: u32,
    pub(crate) game_over: bool,
}

impl GameState {
    /// Empty board with `first` spawned at the top.
    ///
    /// The spawn is not checked here; see [`crate::engine::spawn`].
    pub fn new(rows: usize, cols: usize, first: PieceKind) -> Self {
        Self {
            board: Board::new(rows, cols),
            active: ActivePiece::spawn(first, cols),
            score: 0,
            game_over: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Raw board access. Bypasses every game rule, including the game-over
    /// freeze; a `Controller` only exposes the checked
    /// [`Controller::edit_board`](crate::controller::Controller::edit_board).
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> &ActivePiece {
        &self.active
    }

    /// Replace the falling piece outright (tests, scripted setups).
    pub fn set_active(&mut self, piece: ActivePiece) {
        self.active = piece;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }
}
