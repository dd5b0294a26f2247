//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::composer::{FieldId, FieldKind};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Input editing
    EditSearch,
    EditHost,
    EditFieldName,
    EditFieldValue,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,

    // Endpoint list
    NextEndpoint,
    PrevEndpoint,
    SelectEndpoint,

    // Composer fields
    NextField,
    PrevField,
    AddField(FieldKind),
    RemoveField,
    DuplicateField,

    // Request
    Submit,

    // Output tabs
    NextOutputTab,
    PrevOutputTab,

    // Popups
    ToggleHelp,
    CloseHelp,
    ToggleReadme,

    // System
    Quit,
}

/// Active panel in the UI (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Panel {
    Endpoints,
    Composer,
    Output,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Endpoints => Panel::Composer,
            Panel::Composer => Panel::Output,
            Panel::Output => Panel::Endpoints,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Endpoints => Panel::Output,
            Panel::Composer => Panel::Endpoints,
            Panel::Output => Panel::Composer,
        }
    }
}

/// Tabs of the output panel
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum OutputTab {
    #[default]
    Response,
    Call,
    Curl,
}

impl OutputTab {
    pub const ALL: [OutputTab; 3] = [OutputTab::Response, OutputTab::Call, OutputTab::Curl];

    pub fn title(&self) -> &'static str {
        match self {
            OutputTab::Response => "Response",
            OutputTab::Call => "axios",
            OutputTab::Curl => "curl",
        }
    }

    pub fn index(&self) -> usize {
        match self {
            OutputTab::Response => 0,
            OutputTab::Call => 1,
            OutputTab::Curl => 2,
        }
    }

    pub fn next(&self) -> OutputTab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> OutputTab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Text currently receiving keystrokes
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EditTarget {
    Search,
    Host,
    FieldName(FieldId),
    FieldValue(FieldId),
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
    show_readme: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('s') => return Some(UiEvent::Submit),
            _ => {}
        }
    }

    // Popups swallow the next key
    if show_help {
        return Some(UiEvent::CloseHelp);
    }
    if show_readme {
        return Some(UiEvent::ToggleReadme);
    }

    match input_mode {
        InputMode::Editing => match key.code {
            KeyCode::Esc | KeyCode::Enter => Some(UiEvent::StopEditing),
            KeyCode::Left => Some(UiEvent::CursorLeft),
            KeyCode::Right => Some(UiEvent::CursorRight),
            KeyCode::Backspace => Some(UiEvent::Backspace),
            KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
            _ => None,
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => Some(UiEvent::Quit),
            KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
            KeyCode::Char('r') => Some(UiEvent::ToggleReadme),
            KeyCode::Char('s') => Some(UiEvent::Submit),
            KeyCode::Char('h') => Some(UiEvent::EditHost),
            KeyCode::Char('/') => Some(UiEvent::EditSearch),
            KeyCode::Tab => Some(UiEvent::NextPanel),
            KeyCode::BackTab => Some(UiEvent::PrevPanel),
            _ => match active_panel {
                Panel::Endpoints => endpoint_keys(key.code),
                Panel::Composer => composer_keys(key.code),
                Panel::Output => output_keys(key.code),
            },
        },
    }
}

fn endpoint_keys(code: KeyCode) -> Option<UiEvent> {
    match code {
        KeyCode::Up => Some(UiEvent::PrevEndpoint),
        KeyCode::Down => Some(UiEvent::NextEndpoint),
        KeyCode::Enter => Some(UiEvent::SelectEndpoint),
        _ => None,
    }
}

fn composer_keys(code: KeyCode) -> Option<UiEvent> {
    match code {
        KeyCode::Up => Some(UiEvent::PrevField),
        KeyCode::Down => Some(UiEvent::NextField),
        KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::EditFieldValue),
        KeyCode::Char('n') => Some(UiEvent::EditFieldName),
        KeyCode::Char('H') => Some(UiEvent::AddField(FieldKind::Header)),
        KeyCode::Char('Q') => Some(UiEvent::AddField(FieldKind::Query)),
        KeyCode::Char('B') => Some(UiEvent::AddField(FieldKind::Body)),
        KeyCode::Char('d') => Some(UiEvent::RemoveField),
        KeyCode::Char('y') => Some(UiEvent::DuplicateField),
        _ => None,
    }
}

fn output_keys(code: KeyCode) -> Option<UiEvent> {
    match code {
        KeyCode::Up => Some(UiEvent::ScrollUp),
        KeyCode::Down => Some(UiEvent::ScrollDown),
        KeyCode::Left => Some(UiEvent::PrevOutputTab),
        KeyCode::Right => Some(UiEvent::NextOutputTab),
        _ => None,
    }
}
