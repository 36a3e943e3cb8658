//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which part of the screen receives keys
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Focus {
    #[default]
    Friends,
    /// A friend row in edit mode
    EditRow,
    AddFriend,
    SplitBill,
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Friend list
    CursorUp,
    CursorDown,
    ToggleSelect,
    StartEdit,
    DeleteFriend,
    ToggleAddFriend,
    NextPanel,

    // Form input
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    NextField,
    PrevField,
    Submit,
    Cancel,
    FocusList,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, focus: Focus, show_help: bool) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match focus {
        Focus::Friends => handle_list_keys(key),
        Focus::EditRow | Focus::AddFriend => handle_profile_form_keys(key),
        Focus::SplitBill => handle_split_form_keys(key),
    }
}

fn handle_list_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::CursorDown),
        KeyCode::Enter | KeyCode::Char(' ') => Some(UiEvent::ToggleSelect),
        KeyCode::Char('e') => Some(UiEvent::StartEdit),
        KeyCode::Char('d') => Some(UiEvent::DeleteFriend),
        KeyCode::Char('a') => Some(UiEvent::ToggleAddFriend),
        KeyCode::Tab => Some(UiEvent::NextPanel),
        _ => None,
    }
}

/// Name + image forms (add friend, edit row)
fn handle_profile_form_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::Cancel),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::FocusList),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

fn handle_split_form_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::Cancel),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Tab | KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::BackTab => Some(UiEvent::FocusList),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}
