//! Key mapping from terminal events to game actions.

use crate::types::{GameAction, GameMode};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
pub fn handle_key_event(key: KeyEvent) -> Option<GameAction> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') => Some(GameAction::CursorLeft),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') => Some(GameAction::CursorRight),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => Some(GameAction::CursorUp),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => Some(GameAction::CursorDown),

        // Selection
        KeyCode::Char(' ') | KeyCode::Enter => Some(GameAction::Select),

        // Assists
        KeyCode::Char('t') | KeyCode::Char('T') => Some(GameAction::Hint),
        KeyCode::Char('u') | KeyCode::Char('U') => Some(GameAction::Revert),
        KeyCode::Char('n') | KeyCode::Char('N') => Some(GameAction::AddNumbers),
        KeyCode::Char('s') | KeyCode::Char('S') => Some(GameAction::Shuffle),
        KeyCode::Char('e') | KeyCode::Char('E') => Some(GameAction::Eraser),

        // Game
        KeyCode::Char('1') => Some(GameAction::NewGame(GameMode::Classic)),
        KeyCode::Char('2') => Some(GameAction::NewGame(GameMode::Random)),
        KeyCode::Char('3') => Some(GameAction::NewGame(GameMode::Chaotic)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        KeyCode::Char('w') | KeyCode::Char('W') => Some(GameAction::Save),
        KeyCode::Char('c') | KeyCode::Char('C') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(GameAction::Continue)
        }

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
