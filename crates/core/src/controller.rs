//! Game controller - owns the game state and turns ticks and inputs into
//! engine calls
//!
//! Two phases: `Playing` and `GameOver`. A failed spawn after a lock moves
//! the game to `GameOver`; only [`Controller::restart`] leaves it.

use crate::board::Board;
use crate::engine::{self, LockEvent};
use crate::game_state::GameState;
use crate::rng::{PieceSource, SimpleRng};
use crate::types::GameAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    GameOver,
}

/// Something observers may want to know about (session log, UI effects).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerEvent {
    Locked(LockEvent),
    GameOver { score: u32 },
    Restarted,
}

/// Owns the single `GameState` and the piece source.
#[derive(Debug, Clone)]
pub struct Controller<S: PieceSource = SimpleRng> {
    rows: usize,
    cols: usize,
    state: GameState,
    source: S,
    events: Vec<ControllerEvent>,
}

impl Controller<SimpleRng> {
    /// Controller with the default uniform source
    pub fn seeded(rows: usize, cols: usize, seed: u32) -> Self {
        Self::new(rows, cols, SimpleRng::new(seed))
    }
}

impl<S: PieceSource> Controller<S> {
    /// Fresh game on an empty `rows x cols` board.
    pub fn new(rows: usize, cols: usize, mut source: S) -> Self {
        let state = Self::fresh_state(rows, cols, &mut source);
        Self {
            rows,
            cols,
            state,
            source,
            events: Vec::new(),
        }
    }

    fn fresh_state(rows: usize, cols: usize, source: &mut S) -> GameState {
        let mut state = GameState::new(rows, cols, source.next_kind());
        if !engine::is_legal(&state.board, &state.active) {
            // Only possible on boards too small for the piece.
            state.game_over = true;
        }
        state
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Edit the locked cells directly (pre-filled boards in tests and demos).
    ///
    /// Refused once the game is over. An edit that overlaps the active piece
    /// is rolled back. Returns whether the edit was kept.
    pub fn edit_board(&mut self, edit: impl FnOnce(&mut Board)) -> bool {
        if self.state.game_over {
            return false;
        }
        let before = self.state.board.clone();
        edit(&mut self.state.board);
        if !engine::is_legal(&self.state.board, &self.state.active) {
            self.state.board = before;
            return false;
        }
        true
    }

    pub fn phase(&self) -> Phase {
        if self.state.game_over {
            Phase::GameOver
        } else {
            Phase::Playing
        }
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Landing row of the active piece, `None` once the game is over
    pub fn ghost_row(&self) -> Option<i32> {
        (!self.state.game_over).then(|| engine::ghost_row(&self.state))
    }

    /// Take all events recorded since the last call
    pub fn take_events(&mut self) -> Vec<ControllerEvent> {
        std::mem::take(&mut self.events)
    }

    /// Gravity step.
    ///
    /// Moves the piece down one row; if it cannot move, locks it, clears
    /// rows and spawns the next piece. Returns whether anything changed.
    pub fn tick(&mut self) -> bool {
        if self.state.game_over {
            return false;
        }
        if engine::try_move(&mut self.state, 1, 0) {
            return true;
        }

        let locked = engine::lock(&mut self.state);
        self.events.push(ControllerEvent::Locked(locked));

        let kind = self.source.next_kind();
        if !engine::spawn(&mut self.state, kind) {
            self.state.game_over = true;
            self.events.push(ControllerEvent::GameOver {
                score: self.state.score,
            });
        }
        true
    }

    /// Apply one input. Returns whether the state changed.
    ///
    /// Everything but `Restart` is ignored once the game is over.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Restart => {
                self.restart();
                true
            }
            _ if self.state.game_over => false,
            GameAction::MoveLeft => engine::try_move(&mut self.state, 0, -1),
            GameAction::MoveRight => engine::try_move(&mut self.state, 0, 1),
            GameAction::MoveDown => engine::try_move(&mut self.state, 1, 0),
            GameAction::RotateCcw => engine::rotate_ccw(&mut self.state),
            GameAction::RotateCw => engine::rotate_cw(&mut self.state),
            GameAction::HardDrop => engine::hard_drop(&mut self.state) > 0,
        }
    }

    /// Empty board, zero score, new piece. Always allowed.
    pub fn restart(&mut self) {
        self.state = Self::fresh_state(self.rows, self.cols, &mut self.source);
        self.events.push(ControllerEvent::Restarted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SequenceSource;
    use crate::types::{PieceColor, PieceKind};

    #[test]
    fn test_tick_moves_down() {
        let mut ctl = Controller::new(14, 10, SequenceSource::repeat(PieceKind::O));
        assert!(ctl.tick());
        assert_eq!(ctl.state().active().row, 1);
        assert!(ctl.take_events().is_empty());
    }

    #[test]
    fn test_tick_locks_and_spawns() {
        let mut ctl = Controller::new(
            14,
            10,
            SequenceSource::new(vec![PieceKind::O, PieceKind::T]),
        );
        ctl.apply_action(GameAction::HardDrop);
        assert_eq!(ctl.state().active().row, 12);

        assert!(ctl.tick());
        assert_eq!(ctl.state().active().kind, PieceKind::T);
        assert_eq!(ctl.state().active().row, 0);
        assert_eq!(ctl.state().board().get(13, 4), Some(Some(PieceColor::Pink)));

        let events = ctl.take_events();
        assert_eq!(events.len(), 1);
        assert!(matches!(
            events[0],
            ControllerEvent::Locked(LockEvent {
                kind: PieceKind::O,
                rows_cleared: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_inputs_ignored_after_game_over() {
        let mut ctl = Controller::new(14, 10, SequenceSource::repeat(PieceKind::O));
        ctl.state.game_over = true;
        let before = ctl.state().clone();
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::MoveDown,
            GameAction::RotateCcw,
            GameAction::RotateCw,
            GameAction::HardDrop,
        ] {
            assert!(!ctl.apply_action(action));
        }
        assert!(!ctl.tick());
        assert_eq!(ctl.state(), &before);
        assert_eq!(ctl.ghost_row(), None);
    }

    #[test]
    fn test_restart_records_event() {
        let mut ctl = Controller::seeded(14, 10, 9);
        assert!(ctl.apply_action(GameAction::Restart));
        assert_eq!(ctl.take_events(), vec![ControllerEvent::Restarted]);
        assert_eq!(ctl.phase(), Phase::Playing);
    }

    #[test]
    fn test_edit_board_refused_after_game_over() {
        let mut ctl = Controller::new(14, 10, SequenceSource::repeat(PieceKind::O));
        assert!(ctl.edit_board(|b| {
            b.set(13, 0, Some(PieceColor::Red));
        }));
        assert_eq!(ctl.state().board().occupied_count(), 1);

        ctl.state.game_over = true;
        let before = ctl.state().clone();
        assert!(!ctl.edit_board(|b| b.clear()));
        assert_eq!(ctl.state(), &before);
    }

    #[test]
    fn test_edit_board_cannot_cover_active_piece() {
        let mut ctl = Controller::new(14, 10, SequenceSource::repeat(PieceKind::O));
        // O spawns over (0, 4)..(1, 5).
        assert!(!ctl.edit_board(|b| {
            b.set(0, 4, Some(PieceColor::Red));
            b.set(13, 0, Some(PieceColor::Red));
        }));
        assert_eq!(ctl.state().board().occupied_count(), 0);
    }
}
