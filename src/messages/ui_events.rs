//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

/// Application tabs, one per browser
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppTab {
    #[default]
    Characters,
    Store,
}

impl AppTab {
    pub fn title(&self) -> &str {
        match self {
            AppTab::Characters => "Characters",
            AppTab::Store => "Store",
        }
    }
}

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    SwitchTab(AppTab),

    // Cursor / scrolling
    SelectNext,
    SelectPrev,

    /// Open the record under the cursor
    Open,
    /// Close the modal, or go back from a detail screen
    Back,
    /// Re-issue the failed fetch of the visible screen
    Retry,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, show_help: bool) -> Option<UiEvent> {
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

    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('1') => Some(UiEvent::SwitchTab(AppTab::Characters)),
        KeyCode::Char('2') => Some(UiEvent::SwitchTab(AppTab::Store)),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Enter => Some(UiEvent::Open),
        KeyCode::Esc | KeyCode::Backspace => Some(UiEvent::Back),
        KeyCode::Char('r') => Some(UiEvent::Retry),
        _ => None,
    }
}
