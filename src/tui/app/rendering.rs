//! Rendering logic for the loan review console.
//!
//! This module contains the view rendering methods that produce string output
//! for display in the terminal. These are pure query methods that read state
//! without modification.

use super::AdminApp;
use crate::store::LoadState;
use crate::tui::components::{
    ApplicationTableComponent, ApplicationTableViewContext, PopupComponent, PopupViewContext,
    form_hints,
};
use crate::tui::state::{Alert, Popup};

/// Title shown on the first line.
pub(crate) const TITLE: &str = "Admin Panel - Loan Applications";

impl AdminApp {
    /// Renders the full frame: title, body and status bar.
    pub(super) fn render_frame(&self) -> String {
        let mut output = self.render_header();
        output.push_str(&self.render_body());
        output.push_str(&self.render_status_bar());
        output
    }

    /// Renders the header bar.
    pub(super) fn render_header(&self) -> String {
        let loading_indicator = if self.store.is_loading() {
            " [Loading...]"
        } else {
            ""
        };
        format!("{TITLE}{loading_indicator}\n")
    }

    /// Renders the region between the header and the status bar.
    ///
    /// An alert takes the region over, then an open popup, then the table or
    /// its load state.
    fn render_body(&self) -> String {
        let body_height = self.body_height();
        let max_width = (self.width as usize).saturating_sub(1).max(1);

        if let Some(alert) = &self.alert {
            return render_alert(alert);
        }

        if self.popup.is_open() {
            return PopupComponent::view(&PopupViewContext {
                popup: &self.popup,
                max_width,
                max_height: body_height,
            });
        }

        match self.store.load_state() {
            LoadState::Loading => "  Loading loan applications...\n".to_owned(),
            LoadState::Failed(message) => format!("  {message}\n"),
            LoadState::Loaded => ApplicationTableComponent::view(&ApplicationTableViewContext {
                applications: self.store.applications(),
                cursor_position: Some(self.cursor.cursor_position),
                scroll_offset: self.cursor.scroll_offset,
                visible_height: self.table.visible_height(),
                timestamp_format: &self.timestamp_format,
                styled: true,
            }),
        }
    }

    /// Renders the status bar with help hints.
    pub(super) fn render_status_bar(&self) -> String {
        let hints = if self.alert.is_some() {
            "Press any key to continue"
        } else {
            match &self.popup {
                Popup::Closed if self.width <= 80 => "q:quit  ?:help  a/x/r:act  v:view",
                Popup::Closed => {
                    "j/k:move  a:approve  x:reject  r:revert  v:view  ?:help  q:quit"
                }
                Popup::Revert(form) | Popup::Approve(form) => form_hints(form),
                Popup::View(_) => "Esc:close",
            }
        };
        format!("{hints}\n")
    }

    /// Renders the help overlay if visible.
    pub(super) fn render_help_overlay(&self) -> String {
        if !self.show_help {
            return String::new();
        }

        let help_text = r"
=== Keyboard Shortcuts ===

Navigation:
  j, Down    Move cursor down
  k, Up      Move cursor up
  PgDn       Page down
  PgUp       Page up
  Home, g    Go to first application
  End, G     Go to last application

Actions on the selected application:
  a          Approve with a sanctioned amount
  x          Reject
  r          Revert with a review message
  v, Enter   View all details

Popups:
  Enter      Submit
  Alt+Enter  New line in a review message (also Ctrl+J)
  Esc        Cancel or close
  Backspace  Delete one character

Other:
  ?          Toggle this help
  q          Quit

Press any key to close this help.
";
        help_text.to_owned()
    }
}

fn render_alert(alert: &Alert) -> String {
    format!(
        "=== {} ===\n{}\n\nPress any key to continue.\n",
        alert.title(),
        alert.message
    )
}
