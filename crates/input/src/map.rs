//! Key mapping from terminal events to game actions.

use crate::types::GameAction;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

/// Map a key press to a game action.
///
/// Releases and terminal auto-repeats map to nothing; each press is one
/// engine call.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(GameAction::MoveLeft)
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Char('l') | KeyCode::Char('L') => {
            Some(GameAction::MoveRight)
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char('j') | KeyCode::Char('J') => {
            Some(GameAction::MoveDown)
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('w')
        | KeyCode::Char('W')
        | KeyCode::Char('k')
        | KeyCode::Char('K') => Some(GameAction::RotateCcw),
        // Right shift only arrives when the terminal reports modifier keys.
        KeyCode::Char('x')
        | KeyCode::Char('X')
        | KeyCode::Modifier(ModifierKeyCode::RightShift) => Some(GameAction::RotateCw),

        // Drop
        KeyCode::Enter | KeyCode::Char(' ') => Some(GameAction::HardDrop),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
