//! Board module - manages the game grid
//!
//! The board is a `rows x cols` grid where each cell is empty or holds the
//! color of a locked piece. Uses a flat row-major array for cache locality.
//! Coordinates are (row, col): row grows downward from 0 at the top, col
//! grows rightward from 0. Dimensions are fixed at construction.

use crate::types::Cell;

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: usize,
    cols: usize,
    /// Flat array of cells, row-major order (row * cols + col)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![None; rows * cols],
        }
    }

    #[inline(always)]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || col < 0 || row as usize >= self.rows || col as usize >= self.cols {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col)
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        match self.index(row, col) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// In bounds and empty
    pub fn is_vacant(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(None))
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.rows {
            return false;
        }
        self.row(row).iter().all(|cell| cell.is_some())
    }

    /// Cells of one row, left to right
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Iterate rows top to bottom
    pub fn rows_iter(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.cols.max(1)).take(self.rows)
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Surviving rows keep their relative order and settle at the bottom;
    /// the freed rows at the top come back empty. Two-pointer compaction,
    /// scanning bottom to top, no allocation.
    pub fn clear_full_rows(&mut self) -> usize {
        let cols = self.cols;
        let mut write_row = self.rows;
        let mut cleared = 0;

        for read_row in (0..self.rows).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
                continue;
            }
            write_row -= 1;
            if write_row != read_row {
                let src = read_row * cols;
                self.cells.copy_within(src..src + cols, write_row * cols);
            }
        }

        self.cells[..write_row * cols].fill(None);
        cleared
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Number of occupied cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }
}
