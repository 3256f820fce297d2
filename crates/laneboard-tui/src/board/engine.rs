//! Widget-engine implementation backing the terminal board.

use std::collections::HashMap;

use laneboard_core::{
    EntityId, Node, TimelineGroup, TimelineItem, WidgetEngine, WidgetOptions,
};

use super::state::{BoardState, GroupRow};
use crate::label::layout_label;
use crate::theme::{IconSet, Theme};

/// Columns before the label text in a row header: selection marker,
/// space, collapse indicator, space.
pub const LABEL_COLUMN: u16 = 4;

/// Terminal board engine.
///
/// Holds the data pushed by the host and rebuilds its rows on every
/// push, invoking the group-rendering hook once per group per rebuild
/// (the hook contract allows any invocation count).
#[derive(Default)]
pub struct BoardEngine {
    state: BoardState,
    items: Vec<TimelineItem>,
    groups: Vec<TimelineGroup>,
    options: WidgetOptions,
    live: bool,
}

impl BoardEngine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// The board state.
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    /// The board state, mutably.
    pub fn state_mut(&mut self) -> &mut BoardState {
        &mut self.state
    }

    /// Whether a widget instance is live.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Whether the last pushed options carried a group template.
    pub fn has_group_template(&self) -> bool {
        self.options.has_group_template()
    }

    /// Handle a click at board-inner coordinates.
    ///
    /// Clicks on a row header go through label hit-testing and node
    /// activation first; only an uncontained activation falls through
    /// to the expand/collapse gesture. Clicks on item lines select the
    /// row.
    pub fn handle_click(&mut self, x: u16, y: u16, theme: &Theme, icons: &IconSet) {
        let Some((index, line)) = self.state.locate(y as usize) else {
            return;
        };

        self.state.select(index);
        if line != 0 {
            return;
        }

        if x >= LABEL_COLUMN {
            let row = &self.state.rows()[index];
            let label = layout_label(&row.label, theme, icons, theme.lane_accent(index));
            if let Some(path) = label.hit(x - LABEL_COLUMN) {
                let outcome = row.label.activate(path);
                if outcome.contained {
                    tracing::debug!(group = %row.group.id, "label control handled the click");
                    return;
                }
            }
        }

        self.state.toggle_collapse(index);
    }

    /// Rebuild rows from the current data, rendering each group's label
    /// through the hook (or a plain default) and preserving collapse
    /// state by group id.
    fn rebuild(&mut self) {
        let collapsed: HashMap<EntityId, bool> = self
            .state
            .rows()
            .iter()
            .map(|row| (row.group.id.clone(), row.collapsed))
            .collect();

        let rows = self
            .groups
            .iter()
            .map(|group| {
                let label = match &self.options.group_template {
                    Some(hook) => hook(Some(group)),
                    None => Node::element("group-label").child(Node::text(group.label_text())),
                };
                let items: Vec<TimelineItem> = self
                    .items
                    .iter()
                    .filter(|item| item.group.as_ref() == Some(&group.id))
                    .cloned()
                    .collect();
                GroupRow {
                    group: group.clone(),
                    label,
                    items,
                    collapsed: collapsed.get(&group.id).copied().unwrap_or(false),
                }
            })
            .collect();

        self.state.replace_rows(rows);
    }
}

impl WidgetEngine for BoardEngine {
    type Handle = ();

    fn construct(
        &mut self,
        items: &[TimelineItem],
        groups: &[TimelineGroup],
        options: &WidgetOptions,
    ) -> Self::Handle {
        self.items = items.to_vec();
        self.groups = groups.to_vec();
        self.options = options.clone();
        self.live = true;
        self.rebuild();
    }

    fn set_items(&mut self, _handle: &mut Self::Handle, items: &[TimelineItem]) {
        self.items = items.to_vec();
        self.rebuild();
    }

    fn set_groups(&mut self, _handle: &mut Self::Handle, groups: &[TimelineGroup]) {
        self.groups = groups.to_vec();
        self.rebuild();
    }

    fn set_options(&mut self, _handle: &mut Self::Handle, options: &WidgetOptions) {
        self.options = options.clone();
        self.rebuild();
    }

    fn destroy(&mut self, _handle: Self::Handle) {
        self.live = false;
        self.options = WidgetOptions::default();
        self.state.replace_rows(Vec::new());
    }
}
