//! Shared types - plain data used by the engine, the input map and the renderer
//!
//! Everything here is dependency-free so it can be used from any layer
//! (simulation, terminal rendering, tests).
//!
//! # Board Dimensions
//!
//! The board size is a startup setting. The defaults are:
//!
//! - **Rows**: 14 (indexed 0-13, top to bottom)
//! - **Cols**: 10 (indexed 0-9, left to right)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_TICK_MS` | 750 | Gravity interval: one row per tick |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceColor, PieceKind, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! assert_eq!(PieceKind::from_index(0), Some(PieceKind::I));
//! assert_eq!(PieceKind::O.color(), PieceColor::Pink);
//! assert_eq!((DEFAULT_ROWS, DEFAULT_COLS), (14, 10));
//! ```

/// Default board height in cells
pub const DEFAULT_ROWS: u16 = 14;

/// Default board width in cells
pub const DEFAULT_COLS: u16 = 10;

/// Default gravity interval in milliseconds
pub const DEFAULT_TICK_MS: u32 = 750;

/// Default drawing width of the board in terminal columns.
///
/// The per-cell width is derived from it: `canvas_width / cols`.
pub const DEFAULT_CANVAS_WIDTH: u16 = 20;

/// The seven tetromino kinds, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order (index 0..7).
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Look up a kind by catalog index.
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_index(6), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_index(7), None);
    /// ```
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Catalog index of this kind.
    pub fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::J => 1,
            PieceKind::L => 2,
            PieceKind::O => 3,
            PieceKind::S => 4,
            PieceKind::T => 5,
            PieceKind::Z => 6,
        }
    }

    /// Display color associated with this kind.
    pub fn color(self) -> PieceColor {
        match self {
            PieceKind::I => PieceColor::Red,
            PieceKind::J => PieceColor::Yellow,
            PieceKind::L => PieceColor::Magenta,
            PieceKind::O => PieceColor::Pink,
            PieceKind::S => PieceColor::Cyan,
            PieceKind::T => PieceColor::Green,
            PieceKind::Z => PieceColor::Orange,
        }
    }

    /// Single uppercase letter, as shown in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::T => "T",
            PieceKind::Z => "Z",
        }
    }
}

/// Colors a piece (and therefore a locked cell) can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceColor {
    Red,
    Yellow,
    Magenta,
    Pink,
    Cyan,
    Green,
    Orange,
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceColor)`: Occupied by a locked piece of that color
pub type Cell = Option<PieceColor>;

/// Inputs the controller understands
///
/// Produced by the terminal key map and consumed by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Shift one column left
    MoveLeft,
    /// Shift one column right
    MoveRight,
    /// Shift one row down
    MoveDown,
    /// Rotate 90° counter-clockwise
    RotateCcw,
    /// Rotate 90° clockwise (three counter-clockwise steps)
    RotateCw,
    /// Fall until blocked
    HardDrop,
    /// Start a fresh game (always available)
    Restart,
}

impl GameAction {
    /// camelCase name used in the session log
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::RotateCw => "rotateCw",
            GameAction::HardDrop => "hardDrop",
            GameAction::Restart => "restart",
        }
    }
}
