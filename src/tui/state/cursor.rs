//! Cursor and scroll state for the applications table.

/// Tracks the selected row and the first visible row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorState {
    /// Index of the selected row (0-indexed).
    pub cursor_position: usize,
    /// Index of the first row in the viewport.
    pub scroll_offset: usize,
}

impl CursorState {
    /// Creates a cursor at the first row.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cursor_position: 0,
            scroll_offset: 0,
        }
    }

    /// Clamps the cursor to a list of `row_count` rows.
    pub const fn clamp_cursor(&mut self, row_count: usize) {
        if row_count == 0 {
            self.cursor_position = 0;
            self.scroll_offset = 0;
        } else if self.cursor_position >= row_count {
            self.cursor_position = row_count - 1;
        }
    }

    /// Moves the scroll offset so the cursor stays inside the viewport.
    pub const fn ensure_visible(&mut self, visible_height: usize) {
        if self.cursor_position < self.scroll_offset {
            self.scroll_offset = self.cursor_position;
            return;
        }

        let viewport_end = self.scroll_offset.saturating_add(visible_height);
        if self.cursor_position >= viewport_end {
            self.scroll_offset = self
                .cursor_position
                .saturating_sub(visible_height.saturating_sub(1));
        }
    }
}
