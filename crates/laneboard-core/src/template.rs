//! The group-label template contract.
//!
//! The widget calls its group-rendering hook with a group (or nothing,
//! for its internal unknown-group sentinel) and expects exactly one
//! node back, every time. [`render_group_label`] is the wrapper that
//! guarantees this: it maps an absent group to a placeholder, converts
//! template failures into a visibly-marked fallback node, and keeps the
//! view registry consistent across re-renders and failures. Errors
//! never reach the widget.

use crate::data::TimelineGroup;
use crate::node::Node;
use crate::registry::{LabelScope, ViewDefinition, ViewError, ViewFactory, ViewKey, ViewRegistry};

/// Text of the placeholder returned for an absent/unknown group.
pub const UNKNOWN_GROUP_LABEL: &str = "Unknown Group";

/// Marker appended to labels rendered through the degraded path.
pub const FALLBACK_MARKER: &str = "(fallback)";

/// Errors a template can fail with.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    /// A sub-view could not be created.
    #[error(transparent)]
    View(#[from] ViewError),

    /// The template itself gave up.
    #[error("template failed: {0}")]
    Failed(String),
}

/// A caller-supplied hook that customizes how a group's label renders.
pub trait GroupTemplate {
    /// Build the label node for a group.
    ///
    /// Sub-views go through [`TemplateContext::create_view`] so they are
    /// tracked for teardown from the moment they exist.
    fn render(
        &self,
        group: &TimelineGroup,
        ctx: &mut TemplateContext<'_>,
    ) -> Result<Node, TemplateError>;
}

impl<F> GroupTemplate for F
where
    F: Fn(&TimelineGroup, &mut TemplateContext<'_>) -> Result<Node, TemplateError>,
{
    fn render(
        &self,
        group: &TimelineGroup,
        ctx: &mut TemplateContext<'_>,
    ) -> Result<Node, TemplateError> {
        self(group, ctx)
    }
}

/// Per-invocation context handed to a template.
///
/// Creation and registration are one step: a teardown arriving right
/// after the template returns still finds every sub-view it mounted.
pub struct TemplateContext<'a> {
    factory: &'a mut dyn ViewFactory,
    registry: &'a mut ViewRegistry,
    created: Vec<ViewKey>,
}

impl<'a> TemplateContext<'a> {
    /// Create a context over the host's factory and registry.
    pub fn new(factory: &'a mut dyn ViewFactory, registry: &'a mut ViewRegistry) -> Self {
        Self {
            factory,
            registry,
            created: Vec::new(),
        }
    }

    /// Create a sub-view, register it, and return its node.
    pub fn create_view(&mut self, definition: &ViewDefinition) -> Result<Node, ViewError> {
        let view = self.factory.create(definition)?;
        let node = view.node().clone();
        let key = self.registry.register(view);
        self.created.push(key);
        Ok(node)
    }

    /// Keys created during this invocation so far.
    pub fn created_keys(&self) -> &[ViewKey] {
        &self.created
    }

    fn into_created(self) -> Vec<ViewKey> {
        self.created
    }
}

/// Render one group's label through the full contract.
///
/// This is what the host installs as the widget's group-rendering hook.
/// It always returns a node:
/// - absent group: a neutral placeholder reading [`UNKNOWN_GROUP_LABEL`],
///   no field of the input is touched;
/// - template success: the template's node, with this render's sub-views
///   bound to the group's label scope (the previous render's views are
///   retired first);
/// - template failure: partially-created sub-views are released and a
///   fallback node carrying the group's label text and
///   [`FALLBACK_MARKER`] is substituted.
pub fn render_group_label(
    template: &dyn GroupTemplate,
    group: Option<&TimelineGroup>,
    factory: &mut dyn ViewFactory,
    registry: &mut ViewRegistry,
) -> Node {
    let Some(group) = group else {
        return unknown_group_placeholder();
    };

    // The widget is replacing this group's label; its previous
    // sub-views must not outlive it.
    let scope: LabelScope = Some(group.id.clone());
    registry.retire_scope(&scope);

    let mut ctx = TemplateContext::new(factory, registry);
    match template.render(group, &mut ctx) {
        Ok(node) => {
            let created = ctx.into_created();
            registry.bind_scope(scope, created);
            node
        }
        Err(err) => {
            let created = ctx.into_created();
            for key in created {
                registry.release(key);
            }
            tracing::error!(
                group = %group.id,
                error = %err,
                "group template failed, substituting fallback label"
            );
            fallback_label(group)
        }
    }
}

/// Placeholder node for an absent/unknown group.
pub fn unknown_group_placeholder() -> Node {
    Node::element("group-label").child(Node::text(UNKNOWN_GROUP_LABEL))
}

/// Degraded label for a group whose template failed.
pub fn fallback_label(group: &TimelineGroup) -> Node {
    Node::element("group-label").child(Node::text(format!(
        "{} {}",
        group.label_text(),
        FALLBACK_MARKER
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DynamicView;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Factory that builds plain labeled nodes and counts releases.
    struct StubFactory {
        releases: Rc<Cell<u32>>,
        /// Fail after this many successful creates (`None` = never).
        fail_after: Option<u32>,
        created: u32,
    }

    impl StubFactory {
        fn new(releases: &Rc<Cell<u32>>) -> Self {
            Self {
                releases: Rc::clone(releases),
                fail_after: None,
                created: 0,
            }
        }

        fn failing_after(releases: &Rc<Cell<u32>>, successes: u32) -> Self {
            Self {
                releases: Rc::clone(releases),
                fail_after: Some(successes),
                created: 0,
            }
        }
    }

    impl ViewFactory for StubFactory {
        fn create(&mut self, definition: &ViewDefinition) -> Result<DynamicView, ViewError> {
            if self.fail_after == Some(self.created) {
                return Err(ViewError::Failed {
                    kind: definition.kind.clone(),
                    reason: "stub factory exhausted".into(),
                });
            }
            self.created += 1;

            let releases = Rc::clone(&self.releases);
            let label = definition.label.clone().unwrap_or_default();
            Ok(DynamicView::new(
                Node::element(definition.kind.clone()).child(Node::text(label)),
                move || releases.set(releases.get() + 1),
            ))
        }
    }

    /// Template building a label plus one button sub-view.
    fn one_button_template(
    ) -> impl Fn(&TimelineGroup, &mut TemplateContext<'_>) -> Result<Node, TemplateError> {
        |group: &TimelineGroup, ctx: &mut TemplateContext<'_>| {
            let button = ctx.create_view(
                &ViewDefinition::new("action-button")
                    .with_group(group.id.clone())
                    .with_label("Add Task"),
            )?;
            Ok(Node::element("group-label")
                .child(Node::text(group.label_text()))
                .child(button))
        }
    }

    #[test]
    fn test_label_includes_group_content() {
        let releases = Rc::new(Cell::new(0));
        let mut factory = StubFactory::new(&releases);
        let mut registry = ViewRegistry::new();
        let group = TimelineGroup::new(1, "Development Team");

        let node = render_group_label(
            &one_button_template(),
            Some(&group),
            &mut factory,
            &mut registry,
        );

        assert!(node.visible_text().contains("Development Team"));
        assert_eq!(registry.live_count(), 1);
    }

    #[test]
    fn test_empty_content_falls_back_to_id() {
        let releases = Rc::new(Cell::new(0));
        let mut factory = StubFactory::new(&releases);
        let mut registry = ViewRegistry::new();
        let group = TimelineGroup::new(42, "");

        let node = render_group_label(
            &one_button_template(),
            Some(&group),
            &mut factory,
            &mut registry,
        );

        assert!(node.visible_text().contains("42"));
    }

    #[test]
    fn test_absent_group_placeholder_exact_text() {
        let releases = Rc::new(Cell::new(0));
        let mut factory = StubFactory::new(&releases);
        let mut registry = ViewRegistry::new();

        let node = render_group_label(&one_button_template(), None, &mut factory, &mut registry);

        assert_eq!(node.visible_text(), "Unknown Group");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_failure_substitutes_marked_fallback() {
        let releases = Rc::new(Cell::new(0));
        let mut factory = StubFactory::failing_after(&releases, 0);
        let mut registry = ViewRegistry::new();
        let group = TimelineGroup::new(1, "Development Team");

        let node = render_group_label(
            &one_button_template(),
            Some(&group),
            &mut factory,
            &mut registry,
        );

        let text = node.visible_text();
        assert!(text.contains("Development Team"));
        assert!(text.contains(FALLBACK_MARKER));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_partial_failure_releases_created_views() {
        // Template that creates two views; the factory dies after one.
        let two_views = |group: &TimelineGroup,
                         ctx: &mut TemplateContext<'_>|
         -> Result<Node, TemplateError> {
            let button = ctx.create_view(
                &ViewDefinition::new("action-button").with_group(group.id.clone()),
            )?;
            let icon = ctx.create_view(
                &ViewDefinition::new("overflow-icon").with_group(group.id.clone()),
            )?;
            Ok(Node::element("group-label").child(button).child(icon))
        };

        let releases = Rc::new(Cell::new(0));
        let mut factory = StubFactory::failing_after(&releases, 1);
        let mut registry = ViewRegistry::new();
        let group = TimelineGroup::new(1, "Development Team");

        let node = render_group_label(&two_views, Some(&group), &mut factory, &mut registry);

        assert!(node.visible_text().contains(FALLBACK_MARKER));
        // The one view that was created got released again.
        assert_eq!(releases.get(), 1);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_rerender_retires_previous_label_views() {
        let releases = Rc::new(Cell::new(0));
        let mut factory = StubFactory::new(&releases);
        let mut registry = ViewRegistry::new();
        let group = TimelineGroup::new(1, "Development Team");
        let template = one_button_template();

        render_group_label(&template, Some(&group), &mut factory, &mut registry);
        assert_eq!(registry.live_count(), 1);
        assert_eq!(releases.get(), 0);

        // Second render of the same group's label: the first render's
        // view is retired, only the new one stays live.
        render_group_label(&template, Some(&group), &mut factory, &mut registry);
        assert_eq!(registry.live_count(), 1);
        assert_eq!(releases.get(), 1);
    }

    #[test]
    fn test_rerender_keeps_other_groups_views() {
        let releases = Rc::new(Cell::new(0));
        let mut factory = StubFactory::new(&releases);
        let mut registry = ViewRegistry::new();
        let dev = TimelineGroup::new(1, "Development Team");
        let design = TimelineGroup::new(2, "Design Team");
        let template = one_button_template();

        render_group_label(&template, Some(&dev), &mut factory, &mut registry);
        render_group_label(&template, Some(&design), &mut factory, &mut registry);
        assert_eq!(registry.live_count(), 2);

        render_group_label(&template, Some(&dev), &mut factory, &mut registry);
        assert_eq!(registry.live_count(), 2);
        assert_eq!(releases.get(), 1);
    }
}
