//! laneboard-core: Headless host layer for timeline widgets
//!
//! This crate provides the widget-facing glue for laneboard, including:
//! - Data model for items, groups, and render options
//! - Renderable node trees with propagation-aware activation
//! - Dynamic view tracking with scope-based retirement
//! - The group-label template contract (placeholder + fallback paths)
//! - The host component driving an external widget engine

pub mod data;
pub mod host;
pub mod node;
pub mod registry;
pub mod template;
pub mod templates;

// Re-export commonly used types
pub use data::{
    dataset_problems, validate_dataset, DataError, Dataset, EntityId, RenderOptions,
    TimelineGroup, TimelineItem,
};
pub use host::{GroupRenderFn, HostError, TimelineHost, WidgetEngine, WidgetOptions};
pub use node::{ActivationOutcome, Node};
pub use registry::{
    DynamicView, LabelScope, ViewDefinition, ViewError, ViewFactory, ViewKey, ViewRegistry,
};
pub use template::{
    fallback_label, render_group_label, unknown_group_placeholder, GroupTemplate,
    TemplateContext, TemplateError, FALLBACK_MARKER, UNKNOWN_GROUP_LABEL,
};
pub use templates::{
    ActionGroupTemplate, BasicViewFactory, PlainGroupTemplate, ACTION_BUTTON_KIND,
    OVERFLOW_ICON_KIND,
};

/// Returns the core version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
