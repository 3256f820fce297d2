//! The host component: owns one widget instance and keeps it fed.
//!
//! [`TimelineHost`] wraps an external visualization widget behind the
//! [`WidgetEngine`] trait. It constructs the widget once, pushes full
//! replacement data into it whenever an input changes, installs the
//! group template hook into the derived options, and tears everything
//! down (widget and tracked dynamic views) exactly once.

use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::Rc;

use crate::data::{RenderOptions, TimelineGroup, TimelineItem};
use crate::node::Node;
use crate::registry::{ViewFactory, ViewRegistry};
use crate::template::{render_group_label, GroupTemplate};

/// The group-rendering hook installed into widget options.
///
/// The widget calls it with a group, or with `None` for its internal
/// unknown-group sentinel, whenever a group's label must be displayed.
/// There is no contract on invocation count or timing.
pub type GroupRenderFn = Rc<dyn Fn(Option<&TimelineGroup>) -> Node>;

/// Derived options pushed to the widget: the caller's option bag plus
/// the recognized group-template extension.
///
/// Always rebuilt fresh before a push, never patched, so dropping the
/// template reliably clears the hook.
#[derive(Clone, Default)]
pub struct WidgetOptions {
    /// The caller-supplied option bag, forwarded as-is.
    pub render: RenderOptions,

    /// Group-rendering hook, present only while a template is set.
    pub group_template: Option<GroupRenderFn>,
}

impl WidgetOptions {
    /// Whether a group-rendering hook is installed.
    pub fn has_group_template(&self) -> bool {
        self.group_template.is_some()
    }
}

impl fmt::Debug for WidgetOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetOptions")
            .field("render", &self.render)
            .field("group_template", &self.group_template.is_some())
            .finish()
    }
}

/// The external timeline-visualization widget.
///
/// The engine value encapsulates its own container; the host only
/// drives construction, full-replacement updates, and destruction.
pub trait WidgetEngine {
    /// Handle to one constructed widget instance.
    type Handle;

    /// Build a widget with the initial data and options.
    fn construct(
        &mut self,
        items: &[TimelineItem],
        groups: &[TimelineGroup],
        options: &WidgetOptions,
    ) -> Self::Handle;

    /// Replace the widget's items.
    fn set_items(&mut self, handle: &mut Self::Handle, items: &[TimelineItem]);

    /// Replace the widget's groups.
    fn set_groups(&mut self, handle: &mut Self::Handle, groups: &[TimelineGroup]);

    /// Replace the widget's options.
    fn set_options(&mut self, handle: &mut Self::Handle, options: &WidgetOptions);

    /// Destroy the widget instance.
    fn destroy(&mut self, handle: Self::Handle);
}

/// Host lifecycle errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// `mount` was called on an already-mounted host.
    #[error("widget is already mounted")]
    AlreadyMounted,

    /// `mount` was called after teardown.
    #[error("host has been destroyed")]
    Destroyed,
}

/// Lifecycle phase of a host instance.
enum Phase<H> {
    Uninitialized,
    Mounted(H),
    Destroyed,
}

/// Host component owning one widget instance.
pub struct TimelineHost<E: WidgetEngine> {
    engine: E,
    phase: Phase<E::Handle>,
    items: Vec<TimelineItem>,
    groups: Vec<TimelineGroup>,
    options: RenderOptions,
    template: Option<Rc<dyn GroupTemplate>>,
    factory: Rc<RefCell<dyn ViewFactory>>,
    registry: Rc<RefCell<ViewRegistry>>,
}

impl<E: WidgetEngine> TimelineHost<E> {
    /// Create an unmounted host over an engine and a view factory.
    pub fn new(engine: E, factory: Rc<RefCell<dyn ViewFactory>>) -> Self {
        Self {
            engine,
            phase: Phase::Uninitialized,
            items: Vec::new(),
            groups: Vec::new(),
            options: RenderOptions::default(),
            template: None,
            factory,
            registry: Rc::new(RefCell::new(ViewRegistry::new())),
        }
    }

    /// The wrapped engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The wrapped engine, mutably.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Current items.
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    /// Current groups.
    pub fn groups(&self) -> &[TimelineGroup] {
        &self.groups
    }

    /// Whether the widget is live.
    pub fn is_mounted(&self) -> bool {
        matches!(self.phase, Phase::Mounted(_))
    }

    /// Whether teardown has happened.
    pub fn is_destroyed(&self) -> bool {
        matches!(self.phase, Phase::Destroyed)
    }

    /// Whether a group template is currently set.
    pub fn has_group_template(&self) -> bool {
        self.template.is_some()
    }

    /// Number of live tracked dynamic views.
    pub fn tracked_view_count(&self) -> usize {
        self.registry.borrow().live_count()
    }

    /// Construct the widget with the current inputs.
    pub fn mount(&mut self) -> Result<(), HostError> {
        match self.phase {
            Phase::Uninitialized => {
                let options = self.derived_options();
                let handle = self.engine.construct(&self.items, &self.groups, &options);
                self.phase = Phase::Mounted(handle);
                Ok(())
            }
            Phase::Mounted(_) => Err(HostError::AlreadyMounted),
            Phase::Destroyed => Err(HostError::Destroyed),
        }
    }

    /// Replace the items and push the change.
    pub fn set_items(&mut self, items: Vec<TimelineItem>) {
        self.items = items;
        self.sync();
    }

    /// Replace the groups and push the change.
    pub fn set_groups(&mut self, groups: Vec<TimelineGroup>) {
        self.groups = groups;
        self.sync();
    }

    /// Replace the option bag and push the change.
    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
        self.sync();
    }

    /// Set or clear the group template and push the change.
    ///
    /// Clearing releases every tracked view: the widget discards the
    /// custom labels with this push, and without a hook nothing would
    /// retire their views before teardown.
    pub fn set_group_template(&mut self, template: Option<Rc<dyn GroupTemplate>>) {
        let cleared = template.is_none() && self.template.is_some();
        self.template = template;
        self.sync();
        if cleared {
            self.registry.borrow_mut().release_all();
        }
    }

    /// Destroy the widget and release every tracked view.
    ///
    /// Idempotent: a second call, or a call on a never-mounted host, is
    /// a no-op apart from landing in the terminal phase.
    pub fn teardown(&mut self) {
        let phase = mem::replace(&mut self.phase, Phase::Destroyed);
        if let Phase::Mounted(handle) = phase {
            self.engine.destroy(handle);
        }
        self.registry.borrow_mut().release_all();
    }

    /// Push the full current inputs into a mounted widget.
    ///
    /// The widget may invoke the group hook any number of times during
    /// these setters; the registry absorbs whatever it creates.
    fn sync(&mut self) {
        let options = self.derived_options();
        if let Phase::Mounted(ref mut handle) = self.phase {
            self.engine.set_items(handle, &self.items);
            self.engine.set_groups(handle, &self.groups);
            self.engine.set_options(handle, &options);
        }
    }

    /// Build a fresh options object for the widget.
    fn derived_options(&self) -> WidgetOptions {
        WidgetOptions {
            render: self.options.clone(),
            group_template: self.template.as_ref().map(|template| {
                let template = Rc::clone(template);
                let factory = Rc::clone(&self.factory);
                let registry = Rc::clone(&self.registry);
                let hook: GroupRenderFn = Rc::new(move |group: Option<&TimelineGroup>| {
                    let mut factory = factory.borrow_mut();
                    let mut registry = registry.borrow_mut();
                    render_group_label(template.as_ref(), group, &mut *factory, &mut *registry)
                });
                hook
            }),
        }
    }
}

impl<E: WidgetEngine> Drop for TimelineHost<E> {
    fn drop(&mut self) {
        self.teardown();
    }
}
