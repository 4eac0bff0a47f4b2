//! Pieces module - the tetromino catalog and matrix rotation
//!
//! Each kind has one base `Shape`: a small row-major boolean matrix with the
//! origin at the top-left. Rotation produces a new matrix; the old one is
//! never touched, so a rejected rotation is simply dropped.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Largest row or column count any shape can have
pub const MAX_SHAPE_DIM: usize = 4;

/// Offset of a filled cell inside a shape: (row, col)
pub type CellOffset = (i32, i32);

/// Filled offsets of a shape, without heap allocation
pub type FilledCells = ArrayVec<CellOffset, { MAX_SHAPE_DIM * MAX_SHAPE_DIM }>;

/// One rotation state of a piece.
///
/// Cells outside `rows x cols` are always `false`, so two shapes compare
/// equal exactly when their visible matrices match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_SHAPE_DIM]; MAX_SHAPE_DIM],
}

impl Shape {
    /// Build a shape from matrix rows.
    ///
    /// Panics if the matrix is empty, ragged, or larger than 4x4; shapes are
    /// only ever built from the static catalog and from rotation.
    pub fn from_rows(rows: &[&[bool]]) -> Self {
        assert!(!rows.is_empty() && rows.len() <= MAX_SHAPE_DIM);
        let cols = rows[0].len();
        assert!(cols > 0 && cols <= MAX_SHAPE_DIM);

        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for (r, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), cols, "ragged shape row {}", r);
            cells[r][..cols].copy_from_slice(row);
        }

        Self {
            rows: rows.len() as u8,
            cols: cols as u8,
            cells,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Whether (row, col) is filled; false outside the matrix
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.cells[row][col]
    }

    /// Offsets of every filled cell, row-major
    pub fn filled_cells(&self) -> FilledCells {
        let mut out = FilledCells::new();
        for r in 0..self.rows() {
            for c in 0..self.cols() {
                if self.cells[r][c] {
                    out.push((r as i32, c as i32));
                }
            }
        }
        out
    }

    /// Rotate 90° counter-clockwise.
    ///
    /// The result has the dimensions swapped and satisfies
    /// `new[old_cols - 1 - c][r] == old[r][c]`.
    pub fn rotated_ccw(&self) -> Shape {
        let old_rows = self.rows();
        let old_cols = self.cols();
        let mut cells = [[false; MAX_SHAPE_DIM]; MAX_SHAPE_DIM];
        for r in 0..old_rows {
            for c in 0..old_cols {
                cells[old_cols - 1 - c][r] = self.cells[r][c];
            }
        }
        Shape {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

const T: bool = true;
const F: bool = false;

/// Base (spawn) shape for a piece kind
pub fn base_shape(kind: PieceKind) -> Shape {
    match kind {
        PieceKind::I => Shape::from_rows(&[&[T, T, T, T]]),
        PieceKind::J => Shape::from_rows(&[&[T, F, F], &[T, T, T]]),
        PieceKind::L => Shape::from_rows(&[&[F, F, T], &[T, T, T]]),
        PieceKind::O => Shape::from_rows(&[&[T, T], &[T, T]]),
        PieceKind::S => Shape::from_rows(&[&[F, T, T], &[T, T, F]]),
        PieceKind::T => Shape::from_rows(&[&[F, T, F], &[T, T, T]]),
        PieceKind::Z => Shape::from_rows(&[&[T, T, F], &[F, T, T]]),
    }
}

/// Anchor shift applied when a `rows x cols` shape is rotated.
///
/// Keeps the rotated matrix centred on the old one:
/// `(rows/2 - cols/2, cols/2 - rows/2)` with the dimensions swapped after
/// rotation.
pub fn rotation_recenter(rows: usize, cols: usize) -> (i32, i32) {
    let (new_rows, new_cols) = (cols as i32, rows as i32);
    (
        rows as i32 / 2 - new_rows / 2,
        cols as i32 / 2 - new_cols / 2,
    )
}
