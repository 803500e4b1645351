use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    ScrollBy(i32),
    ScrollHalfPageDown,
    ScrollHalfPageUp,
    ScrollPageDown,
    ScrollPageUp,
    JumpToStart,
    JumpToEnd,
    AddItems,    // '+': grow the content (layout change)
    RemoveItems, // '-': shrink the content (layout change)
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Line scrolling (both axes)
        (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
            Action::ScrollBy(1)
        }
        (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
            Action::ScrollBy(-1)
        }
        (KeyCode::Down, _) | (KeyCode::Right, _) => Action::ScrollBy(1),
        (KeyCode::Up, _) | (KeyCode::Left, _) => Action::ScrollBy(-1),

        // Page scrolling
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ScrollHalfPageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ScrollHalfPageUp,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => {
            Action::ScrollPageDown
        }
        (KeyCode::Char('b'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => Action::ScrollPageUp,

        // Jump to start/end
        (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => Action::JumpToStart,
        (KeyCode::Char('G'), _) | (KeyCode::End, _) => Action::JumpToEnd,

        // Content size
        (KeyCode::Char('+'), _) => Action::AddItems,
        (KeyCode::Char('-'), _) => Action::RemoveItems,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'), KeyModifiers::NONE)), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Esc, KeyModifiers::NONE)), Action::Quit);
        assert_eq!(
            handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
    }

    #[test]
    fn test_scroll_keys() {
        assert_eq!(
            handle_key_event(key(KeyCode::Char('j'), KeyModifiers::NONE)),
            Action::ScrollBy(1)
        );
        assert_eq!(handle_key_event(key(KeyCode::Left, KeyModifiers::NONE)), Action::ScrollBy(-1));
        assert_eq!(
            handle_key_event(key(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Action::ScrollHalfPageDown
        );
        assert_eq!(
            handle_key_event(key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Action::JumpToEnd
        );
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(handle_key_event(key(KeyCode::Char('z'), KeyModifiers::NONE)), Action::None);
    }
}
