//! Simulation engine - legality, movement, rotation, locking and spawning
//!
//! Every operation takes the state by exclusive reference and runs to
//! completion. Failure is always a `false` return with the state left as it
//! was; nothing here panics or errors.

use crate::game_state::{ActivePiece, GameState};
use crate::board::Board;
use crate::pieces::rotation_recenter;
use crate::types::PieceKind;

/// Outcome of locking a piece into the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Anchor the piece locked at (row, col)
    pub row: i32,
    pub col: i32,
    pub rows_cleared: u32,
}

/// Whether every filled cell of `piece` is on the board and vacant.
///
/// Unfilled cells of the shape matrix are ignored. This is the only
/// placement check: movement, rotation and spawn all go through it.
pub fn is_legal(board: &Board, piece: &ActivePiece) -> bool {
    piece
        .board_cells()
        .iter()
        .all(|&(r, c)| board.is_vacant(r, c))
}

/// Shift the active piece by (drow, dcol) if the target is legal.
pub fn try_move(state: &mut GameState, drow: i32, dcol: i32) -> bool {
    let moved = ActivePiece {
        row: state.active.row + drow,
        col: state.active.col + dcol,
        ..state.active
    };
    if !is_legal(&state.board, &moved) {
        return false;
    }
    state.active = moved;
    true
}

/// Rotate the active piece 90° counter-clockwise about its centre.
///
/// No kicks: if the rotated, recentred piece is illegal the rotation is
/// dropped and the piece is left exactly as it was.
pub fn rotate_ccw(state: &mut GameState) -> bool {
    let active = state.active;
    let (drow, dcol) = rotation_recenter(active.shape.rows(), active.shape.cols());
    let rotated = ActivePiece {
        shape: active.shape.rotated_ccw(),
        row: active.row + drow,
        col: active.col + dcol,
        ..active
    };
    if !is_legal(&state.board, &rotated) {
        return false;
    }
    state.active = rotated;
    true
}

/// Rotate clockwise as three counter-clockwise steps.
///
/// Each step is checked on its own, so a blocked second or third step
/// leaves the piece at whatever the earlier steps produced. Returns whether
/// the piece changed.
pub fn rotate_cw(state: &mut GameState) -> bool {
    let before = state.active;
    for _ in 0..3 {
        rotate_ccw(state);
    }
    state.active != before
}

/// Move down until blocked; returns the number of rows fallen.
pub fn hard_drop(state: &mut GameState) -> u32 {
    let mut fallen = 0;
    while try_move(state, 1, 0) {
        fallen += 1;
    }
    fallen
}

/// Anchor row the active piece would land on if hard-dropped now
pub fn ghost_row(state: &GameState) -> i32 {
    let mut probe = state.active;
    loop {
        let below = ActivePiece {
            row: probe.row + 1,
            ..probe
        };
        if !is_legal(&state.board, &below) {
            return probe.row;
        }
        probe = below;
    }
}

/// Write the active piece into the board, then clear full rows.
///
/// The current position is assumed legal. Each cleared row scores one point.
pub fn lock(state: &mut GameState) -> LockEvent {
    let active = state.active;
    for (r, c) in active.board_cells() {
        state.board.set(r, c, Some(active.color));
    }

    let rows_cleared = state.board.clear_full_rows() as u32;
    state.score += rows_cleared;

    LockEvent {
        kind: active.kind,
        row: active.row,
        col: active.col,
        rows_cleared,
    }
}

/// Replace the active piece with a fresh `kind` at the top centre.
///
/// Returns whether the new piece is legal. On `false` the caller ends the
/// game; the piece is still installed so a renderer can show where it
/// collided.
pub fn spawn(state: &mut GameState, kind: PieceKind) -> bool {
    state.active = ActivePiece::spawn(kind, state.board.cols());
    is_legal(&state.board, &state.active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceColor;

    fn state_with(kind: PieceKind) -> GameState {
        GameState::new(14, 10, kind)
    }

    #[test]
    fn test_try_move_reverts_on_wall() {
        let mut state = state_with(PieceKind::O);
        state.active.col = 0;
        let before = state.clone();
        assert!(!try_move(&mut state, 0, -1));
        assert_eq!(state, before);
        assert!(try_move(&mut state, 0, 1));
        assert_eq!(state.active.col, 1);
    }

    #[test]
    fn test_try_move_blocked_by_cell() {
        let mut state = state_with(PieceKind::O);
        // O at (0,4)-(1,5); block (2,4)
        state.board.set(2, 4, Some(PieceColor::Red));
        assert!(!try_move(&mut state, 1, 0));
        assert_eq!(state.active.row, 0);
    }

    #[test]
    fn test_i_piece_cannot_rotate_at_spawn() {
        // Recentring lifts a vertical I two rows above the anchor.
        let mut state = state_with(PieceKind::I);
        assert!(!rotate_ccw(&mut state));
        assert_eq!(state.active, ActivePiece::spawn(PieceKind::I, 10));

        state.active.row = 5;
        assert!(rotate_ccw(&mut state));
        assert_eq!((state.active.row, state.active.col), (3, 5));
        assert_eq!(state.active.shape.rows(), 4);
    }

    #[test]
    fn test_rotate_cw_matches_single_step_formula() {
        // Clockwise: new[c][old_rows - 1 - r] = old[r][c]
        for kind in PieceKind::ALL {
            let mut state = state_with(kind);
            state.active.row = 6;
            let old = state.active.shape;
            // O is symmetric, so only the matrix check applies to it.
            assert_eq!(rotate_cw(&mut state), kind != PieceKind::O, "{:?}", kind);
            let new = state.active.shape;
            assert_eq!((new.rows(), new.cols()), (old.cols(), old.rows()));
            for r in 0..old.rows() {
                for c in 0..old.cols() {
                    assert_eq!(new.is_filled(c, old.rows() - 1 - r), old.is_filled(r, c));
                }
            }
        }
    }

    #[test]
    fn test_lock_scores_cleared_rows() {
        let mut state = state_with(PieceKind::I);
        for c in 0..6 {
            state.board.set(13, c, Some(PieceColor::Cyan));
        }
        state.active.row = 13;
        state.active.col = 6;
        let ev = lock(&mut state);
        assert_eq!(ev.rows_cleared, 1);
        assert_eq!(state.score, 1);
        assert_eq!(state.board.occupied_count(), 0);
    }

    fn vertical_i_at(state: &mut GameState, row: i32, col: i32) {
        state.active = ActivePiece {
            shape: crate::pieces::base_shape(PieceKind::I).rotated_ccw(),
            row,
            col,
            ..ActivePiece::spawn(PieceKind::I, state.board.cols())
        };
    }

    #[test]
    fn test_lock_clears_four_rows_at_once() {
        let mut state = state_with(PieceKind::I);
        for r in 10..14 {
            for c in 0..9 {
                state.board.set(r, c, Some(PieceColor::Green));
            }
        }
        state.board.set(9, 0, Some(PieceColor::Orange));
        vertical_i_at(&mut state, 10, 9);
        assert!(is_legal(&state.board, &state.active));

        let ev = lock(&mut state);
        assert_eq!(ev.rows_cleared, 4);
        assert_eq!(state.score, 4);
        assert_eq!(state.board.occupied_count(), 1);
        assert_eq!(state.board.get(13, 0), Some(Some(PieceColor::Orange)));
    }

    #[test]
    fn test_lock_clears_only_completed_rows() {
        let mut state = state_with(PieceKind::I);
        state.score = 3;
        for r in 10..14 {
            // Rows 10 and 11 keep a hole at column 8.
            let filled = if r >= 12 { 9 } else { 8 };
            for c in 0..filled {
                state.board.set(r, c, Some(PieceColor::Green));
            }
        }
        vertical_i_at(&mut state, 10, 9);

        let ev = lock(&mut state);
        assert_eq!(ev.rows_cleared, 2);
        assert_eq!(state.score, 5);
        for r in 12..14 {
            assert!(!state.board.is_row_full(r as usize));
            assert_eq!(state.board.get(r, 8), Some(None));
            assert_eq!(state.board.get(r, 9), Some(Some(PieceColor::Red)));
        }
        assert_eq!(state.board.occupied_count(), 18);
    }

    #[test]
    fn test_hard_drop_and_ghost_agree() {
        let mut state = state_with(PieceKind::T);
        let ghost = ghost_row(&state);
        let fallen = hard_drop(&mut state);
        assert_eq!(state.active.row, ghost);
        assert_eq!(fallen as i32, ghost);
        assert_eq!(ghost, 12);
    }

    #[test]
    fn test_spawn_reports_collision() {
        let mut state = state_with(PieceKind::O);
        assert!(spawn(&mut state, PieceKind::T));
        state.board.set(1, 5, Some(PieceColor::Red));
        assert!(!spawn(&mut state, PieceKind::T));
        assert_eq!(state.active.kind, PieceKind::T);
    }
}
