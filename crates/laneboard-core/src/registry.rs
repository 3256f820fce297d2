//! Dynamic view tracking.
//!
//! Group templates may mount sub-views (buttons, icons) inside the
//! label node they return. Every such view is registered here at
//! creation time and released either when the widget re-renders that
//! group's label (scope retirement) or at host teardown, whichever
//! comes first.

use std::collections::HashMap;

use crate::data::EntityId;
use crate::node::Node;

/// Key of a registered view in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewKey(usize);

/// Scope a label render belongs to: the group id, or `None` for the
/// widget's unknown-group sentinel.
pub type LabelScope = Option<EntityId>;

/// Errors from a view factory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ViewError {
    /// The factory does not know how to build this kind of view.
    #[error("unknown view kind: {kind}")]
    UnknownKind {
        /// The requested kind.
        kind: String,
    },

    /// The factory failed while building the view.
    #[error("failed to create {kind} view: {reason}")]
    Failed {
        /// The requested kind.
        kind: String,
        /// What went wrong.
        reason: String,
    },
}

/// Description of a sub-view to create.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewDefinition {
    /// View kind (e.g. "action-button", "overflow-icon").
    pub kind: String,

    /// Group the view belongs to.
    pub group_id: Option<EntityId>,

    /// Display label for the view.
    pub label: Option<String>,
}

impl ViewDefinition {
    /// Create a definition for the given kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            group_id: None,
            label: None,
        }
    }

    /// Set the owning group id.
    #[must_use]
    pub fn with_group(mut self, group_id: impl Into<EntityId>) -> Self {
        self.group_id = Some(group_id.into());
        self
    }

    /// Set the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// External facility that creates dynamic views.
pub trait ViewFactory {
    /// Build a view for the given definition.
    fn create(&mut self, definition: &ViewDefinition) -> Result<DynamicView, ViewError>;
}

/// An ephemeral render produced by a template invocation.
///
/// Holds the view's node and a release closure that detaches the view
/// from whatever host-wide registry the factory attached it to.
/// Release is idempotent: the closure runs at most once.
pub struct DynamicView {
    node: Node,
    on_release: Option<Box<dyn FnOnce()>>,
}

impl DynamicView {
    /// Create a view from its node and release action.
    pub fn new(node: Node, on_release: impl FnOnce() + 'static) -> Self {
        Self {
            node,
            on_release: Some(Box::new(on_release)),
        }
    }

    /// The view's renderable node.
    pub fn node(&self) -> &Node {
        &self.node
    }

    /// Release the view. Subsequent calls are no-ops.
    pub fn release(&mut self) {
        if let Some(release) = self.on_release.take() {
            release();
        }
    }
}

impl Drop for DynamicView {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for DynamicView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicView")
            .field("node", &self.node)
            .field("released", &self.on_release.is_none())
            .finish()
    }
}

/// Arena of live dynamic views, indexed by [`ViewKey`].
#[derive(Debug, Default)]
pub struct ViewRegistry {
    slots: Vec<Option<DynamicView>>,
    free: Vec<usize>,
    scopes: HashMap<LabelScope, Vec<ViewKey>>,
}

impl ViewRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live views.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Whether no views are live.
    pub fn is_empty(&self) -> bool {
        self.live_count() == 0
    }

    /// Track a view, returning its key.
    pub fn register(&mut self, view: DynamicView) -> ViewKey {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(view);
                ViewKey(index)
            }
            None => {
                self.slots.push(Some(view));
                ViewKey(self.slots.len() - 1)
            }
        }
    }

    /// Release one view. Returns whether a live view was released;
    /// releasing an already-released key is a no-op.
    pub fn release(&mut self, key: ViewKey) -> bool {
        match self.slots.get_mut(key.0).and_then(Option::take) {
            Some(mut view) => {
                view.release();
                self.free.push(key.0);
                true
            }
            None => false,
        }
    }

    /// Record which views belong to a label scope's current render.
    pub fn bind_scope(&mut self, scope: LabelScope, keys: Vec<ViewKey>) {
        if keys.is_empty() {
            self.scopes.remove(&scope);
        } else {
            self.scopes.insert(scope, keys);
        }
    }

    /// Release every view bound to a scope's previous render.
    ///
    /// Called when the widget re-renders a group's label; the views of
    /// the discarded label must not outlive it.
    pub fn retire_scope(&mut self, scope: &LabelScope) -> usize {
        let mut released = 0;
        if let Some(keys) = self.scopes.remove(scope) {
            for key in keys {
                if self.release(key) {
                    released += 1;
                }
            }
        }
        released
    }

    /// Release every live view.
    pub fn release_all(&mut self) {
        for index in 0..self.slots.len() {
            if let Some(mut view) = self.slots[index].take() {
                view.release();
                self.free.push(index);
            }
        }
        self.scopes.clear();
    }
}
