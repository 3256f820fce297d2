//! The terminal board: group rows with custom labels.
//!
//! Plays the external-widget role for the demo app: it consumes the
//! host's pushed data and options, renders each group's label through
//! the group-rendering hook, and owns the expand/collapse gesture.

mod engine;
mod state;
mod widget;

pub use engine::{BoardEngine, LABEL_COLUMN};
pub use state::{BoardState, GroupRow, SCROLL_SPEED};
pub use widget::BoardWidget;
