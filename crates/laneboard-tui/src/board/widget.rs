//! Board widget for rendering group rows.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use laneboard_core::TimelineItem;

use super::state::{BoardState, GroupRow};
use crate::label::layout_label;
use crate::theme::{BorderSet, IconSet, Theme};

/// Board pane widget.
pub struct BoardWidget<'a> {
    state: &'a BoardState,
    theme: &'a Theme,
    borders: &'a BorderSet,
    icons: &'a IconSet,
    focused: bool,
    /// Whether to render with a border (default: true).
    with_border: bool,
}

impl<'a> BoardWidget<'a> {
    /// Create a new board widget.
    pub fn new(
        state: &'a BoardState,
        theme: &'a Theme,
        borders: &'a BorderSet,
        icons: &'a IconSet,
    ) -> Self {
        Self {
            state,
            theme,
            borders,
            icons,
            focused: false,
            with_border: true,
        }
    }

    /// Set whether the pane is focused.
    #[must_use]
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set whether to render with a border.
    #[must_use]
    pub fn with_border(mut self, border: bool) -> Self {
        self.with_border = border;
        self
    }

    /// The content area inside the widget's border.
    ///
    /// Mouse coordinates are mapped through this before hit-testing.
    pub fn inner_area(area: Rect) -> Rect {
        Rect::new(
            area.x.saturating_add(1),
            area.y.saturating_add(1),
            area.width.saturating_sub(2),
            area.height.saturating_sub(2),
        )
    }

    /// Render a single row. Returns the number of lines used.
    fn render_row(&self, index: usize, row: &GroupRow, area: Rect, buf: &mut Buffer) -> u16 {
        let mut y = area.y;
        let width = area.width as usize;
        let selected = self.state.selected() == Some(index);

        // Header line: selection marker, collapse indicator, label, count.
        let selection_prefix = if selected {
            format!("{} ", self.icons.selection())
        } else {
            "  ".to_string()
        };
        let collapse_indicator = if row.items.is_empty() {
            "  ".to_string()
        } else if row.collapsed {
            format!("{} ", self.icons.collapsed())
        } else {
            format!("{} ", self.icons.expanded())
        };

        let mut spans = vec![
            Span::styled(
                selection_prefix,
                Style::default().fg(if selected {
                    self.theme.primary
                } else {
                    self.theme.base
                }),
            ),
            Span::styled(collapse_indicator, Style::default().fg(self.theme.muted)),
        ];

        let label = layout_label(&row.label, self.theme, self.icons, self.theme.lane_accent(index));
        spans.extend(label.spans().iter().cloned());

        let count = row.items.len();
        let badge = if count == 1 {
            "  (1 item)".to_string()
        } else {
            format!("  ({count} items)")
        };
        spans.push(Span::styled(badge, Style::default().fg(self.theme.muted)));

        Paragraph::new(Line::from(spans)).render(Rect::new(area.x, y, area.width, 1), buf);
        y += 1;

        if row.collapsed {
            return y - area.y;
        }

        // Item lines.
        for item in &row.items {
            if y >= area.y + area.height {
                break;
            }

            let text = format!(
                "      {} {}  {}",
                self.icons.bullet(),
                item.content,
                format_span(item)
            );
            let display = truncate_str(&text, width);
            let line = Line::from(Span::styled(display, Style::default().fg(self.theme.subtext)));
            Paragraph::new(line).render(Rect::new(area.x, y, area.width, 1), buf);
            y += 1;
        }

        y - area.y
    }
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if self.with_border {
            let border_set = if self.focused {
                self.borders.focused()
            } else {
                self.borders.normal()
            };
            let border_style = if self.focused {
                Style::default().fg(self.theme.border_focused)
            } else {
                Style::default().fg(self.theme.border)
            };

            let block = Block::default()
                .title(" Groups ")
                .title_style(Style::default().fg(self.theme.text))
                .borders(Borders::ALL)
                .border_set(border_set)
                .border_style(border_style)
                .style(Style::default().bg(self.theme.base));

            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        if inner.height == 0 {
            return;
        }

        // Empty state
        if self.state.is_empty() {
            let empty_msg = Line::from(Span::styled(
                "No groups yet",
                Style::default().fg(self.theme.muted),
            ));
            Paragraph::new(empty_msg).render(
                Rect::new(
                    inner.x + 2,
                    inner.y + inner.height / 2,
                    inner.width.saturating_sub(4),
                    1,
                ),
                buf,
            );
            return;
        }

        // Render rows from the scroll offset.
        let mut y = inner.y;
        for (index, row) in self
            .state
            .rows()
            .iter()
            .enumerate()
            .skip(self.state.scroll_offset())
        {
            if y >= inner.y + inner.height {
                break;
            }

            let remaining = (inner.y + inner.height).saturating_sub(y);
            let row_area = Rect::new(inner.x, y, inner.width, remaining);
            y += self.render_row(index, row, row_area, buf);
        }
    }
}

/// Display span of an item: start date, or start - end.
fn format_span(item: &TimelineItem) -> String {
    let start = item.start.format("%b %d");
    match item.end {
        Some(end) => format!("{start} - {}", end.format("%b %d")),
        None => start.to_string(),
    }
}

/// Truncate a string to `max_len` columns, adding ellipsis if needed.
fn truncate_str(s: &str, max_len: usize) -> String {
    let count = s.chars().count();
    if count <= max_len {
        s.to_string()
    } else if max_len > 3 {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{kept}...")
    } else {
        s.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use laneboard_core::{Node, TimelineGroup};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    fn buffer_content(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    fn test_state() -> BoardState {
        let start = chrono::Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = chrono::Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let mut state = BoardState::new();
        state.replace_rows(vec![GroupRow {
            group: TimelineGroup::new(1, "Development Team"),
            label: Node::element("group-label").child(Node::text("Development Team")),
            items: vec![laneboard_core::TimelineItem::new(1, "Task 1", start)
                .with_group(1)
                .with_end(end)],
            collapsed: false,
        }]);
        state
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("this is a long string", 10), "this is...");
        assert_eq!(truncate_str("abc", 3), "abc");
        assert_eq!(truncate_str("abcd", 3), "abc");
    }

    #[test]
    fn test_board_renders_title_and_rows() {
        let state = test_state();
        let theme = Theme::default();
        let borders = BorderSet::default();
        let icons = IconSet::default();

        let mut terminal = create_test_terminal(60, 10);
        terminal
            .draw(|frame| {
                let widget = BoardWidget::new(&state, &theme, &borders, &icons);
                frame.render_widget(widget, frame.area());
            })
            .unwrap();

        let content = buffer_content(&terminal);
        assert!(content.contains("Groups"));
        assert!(content.contains("Development Team"));
        assert!(content.contains("Task 1"));
        assert!(content.contains("Jan 01 - Jan 03"));
        assert!(content.contains("(1 item)"));
    }

    #[test]
    fn test_board_collapsed_row_hides_items() {
        let mut state = test_state();
        state.toggle_collapse(0);
        let theme = Theme::default();
        let borders = BorderSet::default();
        let icons = IconSet::default();

        let mut terminal = create_test_terminal(60, 10);
        terminal
            .draw(|frame| {
                let widget = BoardWidget::new(&state, &theme, &borders, &icons);
                frame.render_widget(widget, frame.area());
            })
            .unwrap();

        let content = buffer_content(&terminal);
        assert!(content.contains("Development Team"));
        assert!(!content.contains("Task 1"));
    }

    #[test]
    fn test_board_empty_state() {
        let state = BoardState::new();
        let theme = Theme::default();
        let borders = BorderSet::default();
        let icons = IconSet::default();

        let mut terminal = create_test_terminal(40, 10);
        terminal
            .draw(|frame| {
                let widget = BoardWidget::new(&state, &theme, &borders, &icons);
                frame.render_widget(widget, frame.area());
            })
            .unwrap();

        assert!(buffer_content(&terminal).contains("No groups yet"));
    }

    #[test]
    fn test_board_minimum_size_does_not_panic() {
        let state = test_state();
        let theme = Theme::default();
        let borders = BorderSet::default();
        let icons = IconSet::default();

        let mut terminal = create_test_terminal(10, 3);
        terminal
            .draw(|frame| {
                let widget = BoardWidget::new(&state, &theme, &borders, &icons);
                frame.render_widget(widget, frame.area());
            })
            .unwrap();
    }

    #[test]
    fn test_inner_area() {
        let inner = BoardWidget::inner_area(Rect::new(0, 0, 60, 10));
        assert_eq!(inner, Rect::new(1, 1, 58, 8));
    }
}
