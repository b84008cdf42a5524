//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::View;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // Session actions
    Connect,
    InitializeAccount,
    SubmitGif,
    Refresh,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Gallery navigation
    ScrollUp,
    ScrollDown,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    view: View,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Editing => handle_editing_keys(key),
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            _ => match view {
                View::Unconnected => handle_unconnected_keys(key),
                View::Setup => handle_setup_keys(key),
                View::Gallery => handle_gallery_keys(key),
            },
        },
    }
}

fn handle_unconnected_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('c') | KeyCode::Enter => Some(UiEvent::Connect),
        _ => None,
    }
}

fn handle_setup_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('i') | KeyCode::Enter => Some(UiEvent::InitializeAccount),
        KeyCode::Char('r') => Some(UiEvent::Refresh),
        _ => None,
    }
}

fn handle_gallery_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('e') => Some(UiEvent::StartEditing),
        KeyCode::Char('s') | KeyCode::Enter => Some(UiEvent::SubmitGif),
        KeyCode::Char('r') => Some(UiEvent::Refresh),
        KeyCode::Up => Some(UiEvent::ScrollUp),
        KeyCode::Down => Some(UiEvent::ScrollDown),
        _ => None,
    }
}

fn handle_editing_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Enter => Some(UiEvent::SubmitGif),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}
