use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which widget receives plain key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Search,
}

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    FocusSearch,
    FocusList,
    RunSearch,
    ClearSearch,
    NextMatch,
    PrevMatch,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Copy,
    Delete,
    Export,
    Import,
    Clear,
    ToggleFavorite,
    ToggleMark,
    Combine,
    TogglePause,
    ToggleReverseLines,
    UpdateSearch(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration, focus: Focus) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
        && key.kind != KeyEventKind::Release
    {
        return Ok(key_to_action(key, focus));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent, focus: Focus) -> Action {
    match (key.code, key.modifiers) {
        // Global shortcuts
        (KeyCode::Char('q'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('f'), KeyModifiers::CONTROL) => Action::FocusSearch,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Copy,
        (KeyCode::Char('e'), KeyModifiers::CONTROL) => Action::Export,
        // Unix terminals deliver Ctrl+I as Tab; list-focus `i` is the fallback
        (KeyCode::Char('i'), KeyModifiers::CONTROL) => Action::Import,
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => Action::Clear,
        (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::NextMatch,
        (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::PrevMatch,
        (KeyCode::Delete, _) => Action::Delete,
        (KeyCode::Esc, _) => Action::ClearSearch,
        (KeyCode::Up, _) => Action::MoveUp,
        (KeyCode::Down, _) => Action::MoveDown,
        (KeyCode::PageUp, _) => Action::PageUp,
        (KeyCode::PageDown, _) => Action::PageDown,

        _ => match focus {
            Focus::Search => search_key_to_action(key),
            Focus::List => list_key_to_action(key),
        },
    }
}

fn search_key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => Action::RunSearch,
        (KeyCode::Tab, _) => Action::FocusList,
        (KeyCode::Backspace, _) => Action::DeleteChar,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            Action::UpdateSearch(c)
        }
        _ => Action::None,
    }
}

fn list_key_to_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => Action::RunSearch,
        (KeyCode::Tab, _) | (KeyCode::Char('/'), KeyModifiers::NONE) => Action::FocusSearch,
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('f'), KeyModifiers::NONE) => Action::ToggleFavorite,
        (KeyCode::Char('i'), KeyModifiers::NONE) => Action::Import,
        (KeyCode::Char(' '), KeyModifiers::NONE) => Action::ToggleMark,
        (KeyCode::Char('m'), KeyModifiers::NONE) => Action::Combine,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::TogglePause,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::ToggleReverseLines,
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::NextMatch,
        (KeyCode::Char('N'), KeyModifiers::SHIFT) => Action::PrevMatch,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::MoveUp,
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::MoveDown,
        _ => Action::None,
    }
}
