//! Popup rendering for the revert, approve and view popups.
//!
//! An open popup replaces the table region of the screen. Text forms show
//! the typed input with a block cursor; the detail popup lists every field
//! of the loaded record in service order.

use crate::tui::state::{DetailView, Popup, TextForm};

use super::text_truncate::{truncate_to_height, truncate_to_width};
use super::value_format::{format_json_value, humanise_field_name};

/// Title of the revert popup.
pub const REVERT_TITLE: &str = "Add Review Message";
/// Title of the approve popup.
pub const APPROVE_TITLE: &str = "Sanction Loan Amount";
/// Title of the view popup.
pub const VIEW_TITLE: &str = "Application Details";

const FORM_HINTS: &str = "Enter:submit  Esc:cancel";
const MULTILINE_FORM_HINTS: &str = "Enter:submit  Alt+Enter:new line  Esc:cancel";
const VIEW_HINTS: &str = "Esc:close";

/// Context for rendering the open popup.
#[derive(Debug, Clone)]
pub struct PopupViewContext<'a> {
    /// The popup to render.
    pub popup: &'a Popup,
    /// Maximum line width in columns.
    pub max_width: usize,
    /// Maximum number of lines; `0` means unbounded.
    pub max_height: usize,
}

/// Stateless popup renderer.
#[derive(Debug, Default, Clone, Copy)]
pub struct PopupComponent;

impl PopupComponent {
    /// Renders the open popup, or nothing when the popup is closed.
    #[must_use]
    pub fn view(ctx: &PopupViewContext<'_>) -> String {
        let lines = match ctx.popup {
            Popup::Closed => return String::new(),
            Popup::Revert(form) => form_lines(REVERT_TITLE, "Review message:", form),
            Popup::Approve(form) => form_lines(APPROVE_TITLE, "Sanctioned amount:", form),
            Popup::View(view) => return render_detail(view, ctx),
        };
        join_lines(&lines, ctx.max_width)
    }
}

/// Key hints for a text form.
#[must_use]
pub const fn form_hints(form: &TextForm) -> &'static str {
    if form.is_multiline() {
        MULTILINE_FORM_HINTS
    } else {
        FORM_HINTS
    }
}

fn form_lines(title: &str, prompt: &str, form: &TextForm) -> Vec<String> {
    let footer = if form.is_submitting() {
        "Sending..."
    } else {
        form_hints(form)
    };

    let mut lines = vec![
        format!("=== {title} ==="),
        format!("Aadhar Number: {}", form.aadhar_number()),
        String::new(),
        prompt.to_owned(),
    ];
    lines.extend(input_lines(form.input()));
    lines.push(String::new());
    lines.push(footer.to_owned());
    lines
}

/// Typed text with a prompt marker on the first line and a block cursor
/// after the last.
fn input_lines(input: &str) -> Vec<String> {
    let mut lines: Vec<String> = input
        .split('\n')
        .enumerate()
        .map(|(index, line)| {
            let marker = if index == 0 { ">" } else { " " };
            format!("{marker} {line}")
        })
        .collect();
    if let Some(last) = lines.last_mut() {
        last.push('_');
    }
    lines
}

fn render_detail(view: &DetailView, ctx: &PopupViewContext<'_>) -> String {
    let header = vec![format!("=== {VIEW_TITLE} ===")];
    let footer = vec![String::new(), VIEW_HINTS.to_owned()];

    let body_lines: Vec<String> = view.detail().map_or_else(
        || vec!["Loading...".to_owned()],
        |detail| {
            detail
                .fields()
                .map(|(name, value)| {
                    format!("{}: {}", humanise_field_name(name), format_json_value(value))
                })
                .collect()
        },
    );

    let mut body = join_lines(&body_lines, ctx.max_width);
    if ctx.max_height > 0 {
        let chrome = header.len() + footer.len();
        truncate_to_height(&mut body, ctx.max_height.saturating_sub(chrome).max(1));
    }

    let mut output = join_lines(&header, ctx.max_width);
    output.push_str(&body);
    output.push_str(&join_lines(&footer, ctx.max_width));
    output
}

fn join_lines(lines: &[String], max_width: usize) -> String {
    let mut output = String::new();
    for line in lines {
        if max_width == 0 {
            output.push_str(line);
        } else {
            output.push_str(&truncate_to_width(line, max_width));
        }
        output.push('\n');
    }
    output
}
