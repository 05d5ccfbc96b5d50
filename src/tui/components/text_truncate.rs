//! Width and height fitting for terminal cells and popup bodies.
//!
//! Widths are measured in terminal columns, not Unicode scalar count, so
//! table columns stay aligned when names contain wide characters.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates `text` to `max_width` columns, ending with `...` when cut.
///
/// Widths of three columns or fewer fall back to dots only.
pub(crate) fn truncate_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if text.width() <= max_width {
        return text.to_owned();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let target_width = max_width - 3;
    let mut truncated = String::new();
    let mut current_width = 0_usize;
    for ch in text.chars() {
        let char_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width.saturating_add(char_width) > target_width {
            break;
        }
        truncated.push(ch);
        current_width = current_width.saturating_add(char_width);
    }
    truncated.push_str("...");
    truncated
}

/// Truncates or right-pads `text` so it occupies exactly `width` columns.
pub(crate) fn fit_to_width(text: &str, width: usize) -> String {
    let mut cell = truncate_to_width(text, width);
    let used = cell.width();
    if used < width {
        cell.push_str(&" ".repeat(width - used));
    }
    cell
}

/// Cuts `output` to at most `max_height` lines, replacing the tail with `...`.
///
/// A `max_height` of zero leaves the output untouched.
pub(crate) fn truncate_to_height(output: &mut String, max_height: usize) {
    if max_height == 0 || output.lines().count() <= max_height {
        return;
    }

    let keep = max_height.saturating_sub(1);
    let cut_at = output
        .match_indices('\n')
        .nth(keep.saturating_sub(1))
        .map_or(0, |(index, _)| if keep == 0 { 0 } else { index + 1 });

    output.truncate(cut_at);
    output.push_str("...\n");
}
