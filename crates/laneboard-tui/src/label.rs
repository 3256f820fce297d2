//! Terminal layout for group-label node trees.
//!
//! Flattens a [`Node`] into one styled ratatui line plus hit-test
//! targets, so a mouse click on a rendered column can be routed back to
//! the node that owns it (and from there through activation dispatch).

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use laneboard_core::{Node, ACTION_BUTTON_KIND, OVERFLOW_ICON_KIND};

use crate::theme::{IconSet, Theme};

/// A clickable column range mapped to a node path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HitTarget {
    /// First column (inclusive).
    pub start: u16,
    /// Last column (exclusive).
    pub end: u16,
    /// Child-index path into the label node.
    pub path: Vec<usize>,
}

/// A laid-out label: spans plus the columns of its interactive parts.
#[derive(Debug, Clone)]
pub struct LabelLine {
    spans: Vec<Span<'static>>,
    targets: Vec<HitTarget>,
    width: u16,
}

impl LabelLine {
    /// The styled line.
    pub fn line(&self) -> Line<'static> {
        Line::from(self.spans.clone())
    }

    /// The spans of the line.
    pub fn spans(&self) -> &[Span<'static>] {
        &self.spans
    }

    /// Total column width.
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Hit targets, in column order.
    pub fn targets(&self) -> &[HitTarget] {
        &self.targets
    }

    /// The node path under a column, if any.
    pub fn hit(&self, x: u16) -> Option<&[usize]> {
        self.targets
            .iter()
            .find(|target| x >= target.start && x < target.end)
            .map(|target| target.path.as_slice())
    }
}

struct LayoutCx<'a> {
    theme: &'a Theme,
    icons: &'a IconSet,
    accent: Color,
    spans: Vec<Span<'static>>,
    targets: Vec<HitTarget>,
    col: u16,
}

impl LayoutCx<'_> {
    fn push(&mut self, text: String, style: Style, path: Option<&[usize]>) {
        let width = text.width() as u16;
        if width == 0 {
            return;
        }
        if let Some(path) = path {
            self.targets.push(HitTarget {
                start: self.col,
                end: self.col + width,
                path: path.to_vec(),
            });
        }
        self.spans.push(Span::styled(text, style));
        self.col += width;
    }

    fn walk(&mut self, node: &Node, path: &mut Vec<usize>) {
        if let Some(text) = node.text_content() {
            self.push(
                text.to_string(),
                Style::default().fg(self.accent),
                Some(path),
            );
            return;
        }

        match node.tag().unwrap_or_default() {
            ACTION_BUTTON_KIND => {
                // Buttons render bracketed; the whole bracket run maps
                // to the button node.
                let text = format!("[{}]", node.visible_text());
                self.push(
                    text,
                    Style::default()
                        .fg(self.theme.primary)
                        .add_modifier(Modifier::BOLD),
                    Some(path),
                );
            }
            OVERFLOW_ICON_KIND => {
                // Icons render as a glyph; their label text is a title,
                // not display content.
                self.push(
                    self.icons.overflow().to_string(),
                    Style::default().fg(self.theme.muted),
                    Some(path),
                );
            }
            _ => {
                for (index, child) in node.children().iter().enumerate() {
                    if index > 0 {
                        self.push(" ".to_string(), Style::default(), None);
                    }
                    path.push(index);
                    self.walk(child, path);
                    path.pop();
                }
            }
        }
    }
}

/// Lay out a label node with the given lane accent color.
pub fn layout_label(node: &Node, theme: &Theme, icons: &IconSet, accent: Color) -> LabelLine {
    let mut cx = LayoutCx {
        theme,
        icons,
        accent,
        spans: Vec::new(),
        targets: Vec::new(),
        col: 0,
    };
    cx.walk(node, &mut Vec::new());

    LabelLine {
        spans: cx.spans,
        targets: cx.targets,
        width: cx.col,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laneboard_core::{render_group_label, ActionGroupTemplate, BasicViewFactory};
    use laneboard_core::{TimelineGroup, ViewRegistry};

    fn action_label() -> Node {
        let mut factory = BasicViewFactory::new();
        let mut registry = ViewRegistry::new();
        let group = TimelineGroup::new(1, "Development Team");
        render_group_label(&ActionGroupTemplate, Some(&group), &mut factory, &mut registry)
    }

    #[test]
    fn test_layout_renders_label_and_button() {
        let theme = Theme::default();
        let icons = IconSet::default();
        let label = layout_label(&action_label(), &theme, &icons, theme.lane_accent(0));

        let text: String = label.spans().iter().map(|span| span.content.as_ref()).collect();
        assert!(text.contains("Development Team"));
        assert!(text.contains("[Add Task]"));
        assert!(text.contains("\u{22ee}"));
    }

    #[test]
    fn test_hit_maps_button_columns() {
        let theme = Theme::default();
        let icons = IconSet::default();
        let node = action_label();
        let label = layout_label(&node, &theme, &icons, theme.lane_accent(0));

        // Two interactive targets after the plain text: button and icon.
        assert_eq!(label.targets().len(), 3);
        let button = &label.targets()[1];
        let path = label.hit(button.start).expect("button is clickable");

        let outcome = node.activate(path);
        assert!(outcome.handled);
        assert!(outcome.contained);
    }

    #[test]
    fn test_hit_outside_targets_is_none() {
        let theme = Theme::default();
        let icons = IconSet::default();
        let label = layout_label(&action_label(), &theme, &icons, theme.lane_accent(0));
        assert!(label.hit(label.width() + 5).is_none());
    }

    #[test]
    fn test_width_matches_span_content() {
        let theme = Theme::default();
        let icons = IconSet::default();
        let label = layout_label(&action_label(), &theme, &icons, theme.lane_accent(0));

        let content: String = label.spans().iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(label.width() as usize, content.width());
    }
}
