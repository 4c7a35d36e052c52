//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Start a fresh activation
    Refresh,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Map a key press to a UI event
pub fn key_to_ui_event(key: KeyEvent, show_help: bool) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') => Some(UiEvent::CloseHelp),
            KeyCode::Char('q') => Some(UiEvent::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('r') | KeyCode::F(5) => Some(UiEvent::Refresh),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('q') => Some(UiEvent::Quit),
        _ => None,
    }
}
