//! Integration tests for the controller and engine working together

use blockfall::core::engine::{self, try_move};
use blockfall::core::{
    base_shape, is_legal, ActivePiece, Board, Controller, ControllerEvent, GameState, Phase,
    SequenceSource,
};
use blockfall::types::{GameAction, PieceColor, PieceKind};

fn controller_with(kinds: Vec<PieceKind>) -> Controller<SequenceSource> {
    Controller::new(14, 10, SequenceSource::new(kinds))
}

#[test]
fn test_o_spawns_top_centre() {
    let game = controller_with(vec![PieceKind::O]);
    let active = game.state().active();
    assert_eq!((active.row, active.col), (0, 4));
    assert!(is_legal(game.state().board(), active));
    assert_eq!(game.phase(), Phase::Playing);
}

#[test]
fn test_completed_row_scores_and_shifts_down() {
    let mut game = controller_with(vec![PieceKind::O]);
    assert!(game.edit_board(|board| {
        for col in (0..10).filter(|c| *c != 4 && *c != 5) {
            board.set(13, col, Some(PieceColor::Cyan));
        }
        board.set(12, 0, Some(PieceColor::Red));
    }));

    assert!(game.apply_action(GameAction::HardDrop));
    assert!(game.tick());

    assert_eq!(game.score(), 1);
    let board = game.state().board();
    // Old row 12 (marker plus the top half of the O) is now the bottom row.
    assert_eq!(board.get(13, 0), Some(Some(PieceColor::Red)));
    assert_eq!(board.get(13, 4), Some(Some(PieceColor::Pink)));
    assert_eq!(board.get(13, 5), Some(Some(PieceColor::Pink)));
    assert_eq!(board.occupied_count(), 3);

    let events = game.take_events();
    assert!(matches!(
        events.as_slice(),
        [ControllerEvent::Locked(lock)] if lock.rows_cleared == 1 && lock.kind == PieceKind::O
    ));
}

#[test]
fn test_i_piece_stops_at_left_wall() {
    let mut game = controller_with(vec![PieceKind::I]);
    assert_eq!(game.state().active().col, 3);

    let mut moves = 0;
    while game.apply_action(GameAction::MoveLeft) {
        moves += 1;
        assert!(game.state().active().col >= 0);
    }
    assert_eq!(moves, 3);
    assert_eq!(game.state().active().col, 0);

    // Further attempts stay rejected and change nothing.
    let before = game.state().clone();
    assert!(!game.apply_action(GameAction::MoveLeft));
    assert_eq!(game.state(), &before);
}

#[test]
fn test_blocked_spawn_ends_game() {
    let mut game = controller_with(vec![PieceKind::O]);
    game.apply_action(GameAction::HardDrop);
    assert!(game.edit_board(|board| {
        board.set(0, 4, Some(PieceColor::Green));
    }));

    assert!(game.tick());
    assert_eq!(game.phase(), Phase::GameOver);
    assert!(game.state().game_over());
    assert_eq!(game.ghost_row(), None);

    let events = game.take_events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[1], ControllerEvent::GameOver { score: 0 });

    // Frozen until restart.
    let frozen = game.state().clone();
    assert!(!game.tick());
    for action in [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::MoveDown,
        GameAction::RotateCcw,
        GameAction::RotateCw,
        GameAction::HardDrop,
    ] {
        assert!(!game.apply_action(action));
    }
    assert_eq!(game.state(), &frozen);
}

#[test]
fn test_engine_spawn_on_filled_region_fails() {
    let mut state = GameState::new(14, 10, PieceKind::T);
    for col in 0..10 {
        state.board_mut().set(0, col, Some(PieceColor::Red));
    }
    assert!(!engine::spawn(&mut state, PieceKind::O));
}

#[test]
fn test_restart_after_game_over() {
    let mut game = controller_with(vec![PieceKind::O]);
    game.apply_action(GameAction::HardDrop);
    assert!(game.edit_board(|board| {
        board.set(0, 5, Some(PieceColor::Green));
    }));
    game.tick();
    assert_eq!(game.phase(), Phase::GameOver);
    game.take_events();

    assert!(game.apply_action(GameAction::Restart));
    assert_eq!(game.phase(), Phase::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.state().board().occupied_count(), 0);
    let active = game.state().active();
    assert_eq!((active.row, active.col), (0, 4));
    assert!(is_legal(game.state().board(), active));
    assert_eq!(game.take_events(), vec![ControllerEvent::Restarted]);
}

#[test]
fn test_restart_mid_game_is_allowed() {
    let mut game = Controller::seeded(14, 10, 99);
    game.apply_action(GameAction::HardDrop);
    game.tick();
    assert!(game.state().board().occupied_count() > 0);

    game.restart();
    assert_eq!(game.state().board().occupied_count(), 0);
    assert_eq!(game.phase(), Phase::Playing);
}

/// Reference legality: every filled cell inside the grid and vacant.
fn legal_by_hand(board: &Board, piece: &ActivePiece) -> bool {
    let shape = piece.shape;
    for r in 0..shape.rows() {
        for c in 0..shape.cols() {
            if !shape.is_filled(r, c) {
                continue;
            }
            let (br, bc) = (piece.row + r as i32, piece.col + c as i32);
            if br < 0 || bc < 0 || br >= board.rows() as i32 || bc >= board.cols() as i32 {
                return false;
            }
            if board.get(br, bc) != Some(None) {
                return false;
            }
        }
    }
    true
}

#[test]
fn test_legality_exhaustive_small_board() {
    let mut board = Board::new(5, 5);
    board.set(3, 2, Some(PieceColor::Red));
    board.set(0, 4, Some(PieceColor::Red));

    for kind in PieceKind::ALL {
        let mut shape = base_shape(kind);
        for _ in 0..4 {
            for row in -4..9 {
                for col in -4..9 {
                    let piece = ActivePiece {
                        kind,
                        shape,
                        color: kind.color(),
                        row,
                        col,
                    };
                    assert_eq!(
                        is_legal(&board, &piece),
                        legal_by_hand(&board, &piece),
                        "{:?} at ({}, {})",
                        kind,
                        row,
                        col
                    );
                }
            }
            shape = shape.rotated_ccw();
        }
    }
}

#[test]
fn test_four_ccw_rotations_restore_piece() {
    for kind in PieceKind::ALL {
        let mut state = GameState::new(14, 10, kind);
        let mut piece = *state.active();
        piece.row = 5;
        state.set_active(piece);

        for _ in 0..4 {
            assert!(engine::rotate_ccw(&mut state), "{:?}", kind);
        }
        assert_eq!(state.active(), &piece, "{:?}", kind);
    }
}

#[test]
fn test_illegal_move_leaves_state_untouched() {
    let mut state = GameState::new(14, 10, PieceKind::T);
    engine::hard_drop(&mut state);
    let before = state.clone();
    assert!(!try_move(&mut state, 1, 0));
    assert_eq!(state, before);
}

#[test]
fn test_same_seed_same_game() {
    let mut a = Controller::seeded(14, 10, 2024);
    let mut b = Controller::seeded(14, 10, 2024);
    for _ in 0..200 {
        a.apply_action(GameAction::HardDrop);
        b.apply_action(GameAction::HardDrop);
        a.tick();
        b.tick();
    }
    assert_eq!(a.state(), b.state());
    assert_eq!(a.take_events(), b.take_events());
}
