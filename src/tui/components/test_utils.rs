//! Helpers shared by component and app tests.

/// Removes ANSI escape sequences, leaving only the visible text.
///
/// ```
/// use loan_admin::tui::components::test_utils::strip_ansi_codes;
///
/// assert_eq!(strip_ansi_codes("\x1b[32mApproved\x1b[39m"), "Approved");
/// ```
#[must_use]
pub fn strip_ansi_codes(text: &str) -> String {
    let mut visible = String::with_capacity(text.len());
    let mut in_escape = false;

    for ch in text.chars() {
        if ch == '\x1b' {
            in_escape = true;
        } else if in_escape {
            // The final byte of a CSI sequence is alphabetic.
            in_escape = !ch.is_ascii_alphabetic();
        } else {
            visible.push(ch);
        }
    }

    visible
}
