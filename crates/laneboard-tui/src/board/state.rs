//! Board state management.
//!
//! Handles group rows, selection, scrolling, and collapse state.

use laneboard_core::{Node, TimelineGroup, TimelineItem};

/// Rows scrolled per mouse wheel tick.
pub const SCROLL_SPEED: usize = 3;

/// One lane on the board: a group, its rendered label, and its items.
#[derive(Debug)]
pub struct GroupRow {
    /// The group this row displays.
    pub group: TimelineGroup,
    /// Label node produced by the group-rendering hook (or the default).
    pub label: Node,
    /// Items belonging to this group.
    pub items: Vec<TimelineItem>,
    /// Whether the row's items are hidden.
    pub collapsed: bool,
}

impl GroupRow {
    /// Display height in lines: the header, plus one line per item when
    /// expanded.
    pub fn display_height(&self) -> usize {
        if self.collapsed {
            1
        } else {
            1 + self.items.len()
        }
    }
}

/// Board pane state.
#[derive(Debug, Default)]
pub struct BoardState {
    /// Rows in group order.
    rows: Vec<GroupRow>,
    /// Index of selected row (if any).
    selected: Option<usize>,
    /// Index of first visible row.
    scroll_offset: usize,
}

impl BoardState {
    /// Create an empty board state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all rows.
    pub fn rows(&self) -> &[GroupRow] {
        &self.rows
    }

    /// Get the currently selected row index.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Get the scroll offset.
    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    /// Check if the board is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Replace the rows, preserving collapse state and selection by
    /// group id where the groups survive.
    pub fn replace_rows(&mut self, rows: Vec<GroupRow>) {
        let selected_id = self
            .selected
            .and_then(|index| self.rows.get(index))
            .map(|row| row.group.id.clone());

        self.rows = rows;

        self.selected = selected_id
            .and_then(|id| self.rows.iter().position(|row| row.group.id == id));
        let max_offset = self.rows.len().saturating_sub(1);
        self.scroll_offset = self.scroll_offset.min(max_offset);
    }

    /// Move selection up. Stops at first row (no wrap).
    pub fn select_prev(&mut self) {
        if self.rows.is_empty() {
            return;
        }

        match self.selected {
            Some(0) => {}
            Some(index) => self.selected = Some(index - 1),
            None => self.selected = Some(self.rows.len().saturating_sub(1)),
        }
    }

    /// Move selection down. Stops at last row (no wrap).
    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }

        match self.selected {
            Some(index) if index >= self.rows.len() - 1 => {}
            Some(index) => self.selected = Some(index + 1),
            None => self.selected = Some(0),
        }
    }

    /// Select a specific row by index.
    pub fn select(&mut self, index: usize) {
        if index < self.rows.len() {
            self.selected = Some(index);
        }
    }

    /// Scroll up by the given number of rows.
    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// Scroll down by the given number of rows.
    pub fn scroll_down(&mut self, amount: usize) {
        let max_offset = self.rows.len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + amount).min(max_offset);
    }

    /// Toggle collapse for a row.
    pub fn toggle_collapse(&mut self, index: usize) {
        if let Some(row) = self.rows.get_mut(index) {
            row.collapsed = !row.collapsed;
        }
    }

    /// Toggle collapse for the selected row.
    pub fn toggle_selected(&mut self) {
        if let Some(index) = self.selected {
            self.toggle_collapse(index);
        }
    }

    /// How many rows fit in the given height, assuming collapsed rows.
    pub fn rows_per_page(&self, height: usize) -> usize {
        height
    }

    /// Ensure the selected row is visible, adjusting `scroll_offset`.
    pub fn ensure_selection_visible(&mut self, visible_count: usize) {
        let Some(selected) = self.selected else {
            return;
        };

        if visible_count == 0 {
            return;
        }

        if selected < self.scroll_offset {
            self.scroll_offset = selected;
        }

        let last_visible = self.scroll_offset + visible_count - 1;
        if selected > last_visible {
            self.scroll_offset = selected.saturating_sub(visible_count - 1);
        }
    }

    /// Convert a y-coordinate (relative to the board inner area) to a
    /// row index and the line within that row.
    ///
    /// Accounts for variable row heights (expanded vs collapsed).
    pub fn locate(&self, y: usize) -> Option<(usize, usize)> {
        let mut current_y = 0usize;

        for index in self.scroll_offset..self.rows.len() {
            let height = self.rows[index].display_height();
            if y >= current_y && y < current_y + height {
                return Some((index, y - current_y));
            }
            current_y += height;
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain_label(text: &str) -> Node {
        Node::element("group-label").child(Node::text(text))
    }

    fn test_row(id: i64, collapsed: bool, item_count: usize) -> GroupRow {
        use chrono::TimeZone;
        let start = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let items = (0..item_count)
            .map(|n| {
                TimelineItem::new(i64::try_from(n).unwrap(), format!("Task {n}"), start)
                    .with_group(id)
            })
            .collect();
        GroupRow {
            group: TimelineGroup::new(id, format!("Group {id}")),
            label: plain_label(&format!("Group {id}")),
            items,
            collapsed,
        }
    }

    fn board_with(count: usize) -> BoardState {
        let mut state = BoardState::new();
        state.replace_rows((0..count).map(|n| test_row(n as i64, true, 2)).collect());
        state
    }

    #[test]
    fn test_new_board() {
        let state = BoardState::new();
        assert!(state.is_empty());
        assert_eq!(state.len(), 0);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn test_select_prev_next() {
        let mut state = board_with(5);
        state.select(3);

        state.select_prev();
        assert_eq!(state.selected(), Some(2));

        state.select_next();
        assert_eq!(state.selected(), Some(3));

        // Clamped at the ends.
        state.select(0);
        state.select_prev();
        assert_eq!(state.selected(), Some(0));

        state.select(4);
        state.select_next();
        assert_eq!(state.selected(), Some(4));
    }

    #[test]
    fn test_scroll_clamps() {
        let mut state = board_with(10);
        state.scroll_down(SCROLL_SPEED);
        assert_eq!(state.scroll_offset(), 3);

        state.scroll_down(100);
        assert_eq!(state.scroll_offset(), 9);

        state.scroll_up(100);
        assert_eq!(state.scroll_offset(), 0);
    }

    #[test]
    fn test_toggle_collapse() {
        let mut state = board_with(3);
        assert!(state.rows()[1].collapsed);

        state.toggle_collapse(1);
        assert!(!state.rows()[1].collapsed);

        state.select(1);
        state.toggle_selected();
        assert!(state.rows()[1].collapsed);
    }

    #[test]
    fn test_display_height() {
        let collapsed = test_row(1, true, 4);
        assert_eq!(collapsed.display_height(), 1);

        let expanded = test_row(1, false, 4);
        assert_eq!(expanded.display_height(), 5);
    }

    #[test]
    fn test_replace_rows_preserves_collapse_and_selection() {
        let mut state = BoardState::new();
        state.replace_rows(vec![test_row(1, true, 1), test_row(2, true, 1)]);
        state.select(1);
        state.toggle_collapse(1);

        // Re-push with the same groups in a different order.
        let mut replacement = vec![test_row(2, true, 1), test_row(1, true, 1)];
        // Collapse state comes from the caller's rebuild; selection is
        // re-resolved by group id.
        replacement[0].collapsed = false;
        state.replace_rows(replacement);

        assert_eq!(state.selected(), Some(0));
    }

    #[test]
    fn test_locate_with_mixed_heights() {
        let mut state = BoardState::new();
        state.replace_rows(vec![
            test_row(1, false, 2), // lines 0..3 (header + 2 items)
            test_row(2, true, 2),  // line 3
            test_row(3, true, 2),  // line 4
        ]);

        assert_eq!(state.locate(0), Some((0, 0)));
        assert_eq!(state.locate(1), Some((0, 1)));
        assert_eq!(state.locate(2), Some((0, 2)));
        assert_eq!(state.locate(3), Some((1, 0)));
        assert_eq!(state.locate(4), Some((2, 0)));
        assert_eq!(state.locate(100), None);
    }

    #[test]
    fn test_locate_respects_scroll_offset() {
        let mut state = board_with(5);
        state.scroll_down(2);

        assert_eq!(state.locate(0), Some((2, 0)));
        assert_eq!(state.locate(1), Some((3, 0)));
    }

    #[test]
    fn test_ensure_selection_visible() {
        let mut state = board_with(20);
        state.scroll_down(5);
        state.select(15);

        state.ensure_selection_visible(5);
        assert!(state.scroll_offset() <= 15);
        assert!(state.scroll_offset() + 5 > 15);

        state.select(2);
        state.ensure_selection_visible(5);
        assert_eq!(state.scroll_offset(), 2);
    }
}
