//! `Model` trait implementation for the loan review console.
//!
//! This module contains the `bubbletea_rs::Model` trait implementation for
//! `AdminApp`, handling initialisation, update dispatch, and view rendering.

use std::any::Any;
use std::sync::Arc;

use bubbletea_rs::{Cmd, Model};
use unicode_width::UnicodeWidthChar;

use super::AdminApp;
use crate::tui::input::map_key_to_message_with_context;
use crate::tui::messages::AppMsg;
use crate::tui::{UnconfiguredGateway, get_service_context};

impl Model for AdminApp {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = match get_service_context() {
            Some(context) => Self::new(context.gateway)
                .with_telemetry(context.telemetry)
                .with_timestamp_format(context.timestamp_format),
            None => Self::new(Arc::new(UnconfiguredGateway)),
        };

        // The list is requested exactly once, from here.
        let cmd = model.start_load();
        (model, cmd)
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        if let Some(app_msg) = msg.downcast_ref::<AppMsg>() {
            return self.handle_message(app_msg);
        }

        // Any key dismisses an alert or the help overlay before it does
        // anything else.
        if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
            if self.alert.is_some() {
                return self.handle_message(&AppMsg::DismissAlert);
            }
            if self.show_help {
                return self.handle_message(&AppMsg::ToggleHelp);
            }
            let context = self.input_context();
            if let Some(mapped) = map_key_to_message_with_context(key_msg, context) {
                return self.handle_message(&mapped);
            }
        }

        if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
            let resize_msg = AppMsg::WindowResized {
                width: size_msg.width,
                height: size_msg.height,
            };
            return self.handle_message(&resize_msg);
        }

        None
    }

    fn view(&self) -> String {
        if self.show_help {
            return self.normalise_viewport(&self.render_help_overlay());
        }
        self.normalise_viewport(&self.render_frame())
    }
}

impl AdminApp {
    /// Normalises the rendered frame to terminal dimensions.
    ///
    /// Rows are clamped to one column less than the terminal width to avoid
    /// autowrap, and padded with spaces so shorter rows overwrite stale cells
    /// from the previous frame.
    fn normalise_viewport(&self, output: &str) -> String {
        let width = self.width.max(1) as usize;
        let safe_width = width.saturating_sub(1).max(1);
        let height = self.height.max(1) as usize;

        let mut lines: Vec<String> = output
            .lines()
            .map(|line| fit_line(line, safe_width))
            .collect();
        lines.truncate(height);

        let missing = height.saturating_sub(lines.len());
        let blank = " ".repeat(safe_width);
        lines.extend(std::iter::repeat_with(|| blank.clone()).take(missing));

        let mut normalised = lines.join("\n");
        normalised.push('\n');
        normalised
    }
}

/// Pads or truncates one line to `width` visible columns.
///
/// Escape sequences pass through without counting towards the width, and a
/// reset is appended if the line was cut while styled.
fn fit_line(line: &str, width: usize) -> String {
    let mut output = String::with_capacity(line.len());
    let mut visible = 0_usize;
    let mut in_escape = false;
    let mut styled = false;
    let mut ends_with_reset = false;

    for ch in line.chars() {
        if in_escape {
            output.push(ch);
            ends_with_reset = ch == 'm';
            in_escape = !ch.is_ascii_alphabetic();
            continue;
        }
        if ch == '\x1b' {
            output.push(ch);
            in_escape = true;
            styled = true;
            ends_with_reset = false;
            continue;
        }

        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if visible.saturating_add(char_width) > width {
            break;
        }
        output.push(ch);
        visible = visible.saturating_add(char_width);
        ends_with_reset = false;
    }

    if styled && !ends_with_reset {
        output.push_str("\x1b[0m");
    }
    if visible < width {
        output.push_str(&" ".repeat(width - visible));
    }
    output
}
