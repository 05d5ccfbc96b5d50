//! Navigation handlers and cursor management.
//!
//! Navigation only applies while the table has focus. Each handler moves the
//! cursor and then scrolls so the cursor remains in the visible window.

use bubbletea_rs::Cmd;

use super::AdminApp;
use crate::tui::messages::AppMsg;

impl AdminApp {
    /// Dispatches navigation messages to their handlers.
    pub(super) fn handle_navigation_msg(&mut self, msg: &AppMsg) -> Option<Cmd> {
        if self.popup.is_open() {
            return None;
        }

        let page = self.table.visible_height().max(1);
        match msg {
            AppMsg::CursorUp => self.move_cursor_up(1),
            AppMsg::CursorDown => self.move_cursor_down(1),
            AppMsg::PageUp => self.move_cursor_up(page),
            AppMsg::PageDown => self.move_cursor_down(page),
            AppMsg::Home => {
                self.cursor.scroll_offset = 0;
                self.cursor.cursor_position = 0;
            }
            AppMsg::End => self.move_cursor_down(usize::MAX),
            _ => {
                debug_assert!(
                    false,
                    "non-navigation message routed to handle_navigation_msg"
                );
            }
        }
        self.cursor.ensure_visible(self.table.visible_height());
        None
    }

    fn move_cursor_up(&mut self, step: usize) {
        self.cursor.cursor_position = self.cursor.cursor_position.saturating_sub(step);
    }

    fn move_cursor_down(&mut self, step: usize) {
        let max_index = self.store.len().saturating_sub(1);
        self.cursor.cursor_position = self
            .cursor
            .cursor_position
            .saturating_add(step)
            .min(max_index);
    }
}
