//! Input handling for the TUI application.
//!
//! This module provides key-to-message mapping for translating terminal key
//! events into application messages. The mapping depends on what has focus:
//! the table, a text form, or the read-only detail popup.

use crossterm::event::{KeyCode, KeyModifiers};

use super::messages::AppMsg;

/// What currently receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    /// The applications table.
    #[default]
    Table,
    /// A popup collecting text (revert message or sanctioned amount).
    TextEntry,
    /// The read-only detail popup.
    DetailView,
}

/// Maps a key event to an application message for the given context.
///
/// Returns `None` for unrecognised key events, allowing them to be ignored.
/// `Ctrl+C` quits from every context.
#[must_use]
pub fn map_key_to_message_with_context(
    key: &bubbletea_rs::event::KeyMsg,
    context: InputContext,
) -> Option<AppMsg> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.key == KeyCode::Char('c') {
        return Some(AppMsg::Quit);
    }

    match context {
        InputContext::Table => map_table_key(key.key),
        InputContext::TextEntry => map_text_entry_key(key),
        InputContext::DetailView => map_detail_view_key(key.key),
    }
}

const fn map_table_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Char('q') => Some(AppMsg::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(AppMsg::CursorDown),
        KeyCode::Char('k') | KeyCode::Up => Some(AppMsg::CursorUp),
        KeyCode::PageDown => Some(AppMsg::PageDown),
        KeyCode::PageUp => Some(AppMsg::PageUp),
        KeyCode::Home | KeyCode::Char('g') => Some(AppMsg::Home),
        KeyCode::End | KeyCode::Char('G') => Some(AppMsg::End),
        KeyCode::Char('a') => Some(AppMsg::ApproveSelected),
        KeyCode::Char('x') => Some(AppMsg::RejectSelected),
        KeyCode::Char('r') => Some(AppMsg::RevertSelected),
        KeyCode::Char('v') | KeyCode::Enter => Some(AppMsg::ViewSelected),
        KeyCode::Char('?') => Some(AppMsg::ToggleHelp),
        _ => None,
    }
}

fn map_text_entry_key(key: &bubbletea_rs::event::KeyMsg) -> Option<AppMsg> {
    match key.key {
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => {
            Some(AppMsg::InputChar('\n'))
        }
        KeyCode::Char('j') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(AppMsg::InputChar('\n'))
        }
        KeyCode::Enter => Some(AppMsg::SubmitPopup),
        KeyCode::Esc => Some(AppMsg::ClosePopup),
        KeyCode::Backspace => Some(AppMsg::InputBackspace),
        KeyCode::Char(character)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(AppMsg::InputChar(character))
        }
        _ => None,
    }
}

const fn map_detail_view_key(key: KeyCode) -> Option<AppMsg> {
    match key {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(AppMsg::ClosePopup),
        _ => None,
    }
}
