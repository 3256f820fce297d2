//! Stock group templates and the reference view factory.
//!
//! These are example consumers of the template contract. The host does
//! not depend on them; embedders can supply any [`GroupTemplate`] and
//! [`ViewFactory`] of their own.

use crate::data::TimelineGroup;
use crate::node::Node;
use crate::registry::{DynamicView, ViewDefinition, ViewError, ViewFactory};
use crate::template::{GroupTemplate, TemplateContext, TemplateError};

/// View kind understood by [`BasicViewFactory`]: a raised action button.
pub const ACTION_BUTTON_KIND: &str = "action-button";

/// View kind understood by [`BasicViewFactory`]: an overflow icon.
pub const OVERFLOW_ICON_KIND: &str = "overflow-icon";

/// Reference view factory building button and overflow-icon views.
///
/// Activation handlers stop propagation (so clicks never reach the
/// widget's collapse gesture) and log for diagnostics only.
#[derive(Debug, Default)]
pub struct BasicViewFactory;

impl BasicViewFactory {
    /// Create the factory.
    pub fn new() -> Self {
        Self
    }
}

impl ViewFactory for BasicViewFactory {
    fn create(&mut self, definition: &ViewDefinition) -> Result<DynamicView, ViewError> {
        let group = definition.group_id.clone();
        match definition.kind.as_str() {
            ACTION_BUTTON_KIND => {
                let label = definition
                    .label
                    .clone()
                    .unwrap_or_else(|| "Add Task".to_string());
                let activated_group = group.clone();
                let node = Node::element(ACTION_BUTTON_KIND)
                    .child(Node::text(label))
                    .on_activate(move || {
                        tracing::debug!(group = ?activated_group, "action button activated");
                    });
                Ok(DynamicView::new(node, move || {
                    tracing::trace!(group = ?group, "action button view released");
                }))
            }
            OVERFLOW_ICON_KIND => {
                let label = definition
                    .label
                    .clone()
                    .unwrap_or_else(|| "More options".to_string());
                let activated_group = group.clone();
                let node = Node::element(OVERFLOW_ICON_KIND)
                    .child(Node::text(label))
                    .on_activate(move || {
                        tracing::debug!(group = ?activated_group, "overflow icon activated");
                    });
                Ok(DynamicView::new(node, move || {
                    tracing::trace!(group = ?group, "overflow icon view released");
                }))
            }
            other => Err(ViewError::UnknownKind {
                kind: other.to_string(),
            }),
        }
    }
}

/// Label-only template: the group's text, nothing interactive.
#[derive(Debug, Default)]
pub struct PlainGroupTemplate;

impl GroupTemplate for PlainGroupTemplate {
    fn render(
        &self,
        group: &TimelineGroup,
        _ctx: &mut TemplateContext<'_>,
    ) -> Result<Node, TemplateError> {
        Ok(Node::element("group-label").child(Node::text(group.label_text())))
    }
}

/// Template with per-group action controls: the group's text, an
/// "Add Task" button, and an overflow icon, both mounted as dynamic
/// views through the factory.
#[derive(Debug, Default)]
pub struct ActionGroupTemplate;

impl GroupTemplate for ActionGroupTemplate {
    fn render(
        &self,
        group: &TimelineGroup,
        ctx: &mut TemplateContext<'_>,
    ) -> Result<Node, TemplateError> {
        let button = ctx.create_view(
            &ViewDefinition::new(ACTION_BUTTON_KIND)
                .with_group(group.id.clone())
                .with_label("Add Task"),
        )?;
        let icon = ctx.create_view(
            &ViewDefinition::new(OVERFLOW_ICON_KIND)
                .with_group(group.id.clone())
                .with_label("More options"),
        )?;

        Ok(Node::element("group-label")
            .child(Node::text(group.label_text()))
            .child(button)
            .child(icon))
    }
}
