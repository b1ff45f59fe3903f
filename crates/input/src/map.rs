//! Key mapping from terminal events to UI actions.

use crate::types::UiAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to UI actions.
pub fn map_key(key: KeyEvent) -> Option<UiAction> {
    match key.code {
        // Cursor
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(UiAction::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(UiAction::Right)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(UiAction::Up)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(UiAction::Down)
        }

        // Select / leave
        KeyCode::Enter | KeyCode::Char(' ') => Some(UiAction::Confirm),
        KeyCode::Esc | KeyCode::Backspace => Some(UiAction::Back),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) || is_interrupt(key)
}

/// Ctrl+C. The only quit key honored while typing into a prompt.
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_cursor_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), Some(UiAction::Left));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), Some(UiAction::Right));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Some(UiAction::Up));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Down)), Some(UiAction::Down));

        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('h'))), Some(UiAction::Left));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('L'))), Some(UiAction::Right));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('w'))), Some(UiAction::Up));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('J'))), Some(UiAction::Down));
    }

    #[test]
    fn test_confirm_and_back() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), Some(UiAction::Confirm));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), Some(UiAction::Confirm));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Esc)), Some(UiAction::Back));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::from(KeyCode::Char('Q'))));
        assert!(should_quit(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert!(!is_interrupt(KeyEvent::from(KeyCode::Char('q'))));
    }
}
