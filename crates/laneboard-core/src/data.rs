//! Data model for timeline items, groups, and render options.
//!
//! These are value/configuration objects supplied by the embedding
//! application and pushed wholesale into the widget on every change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier for items and groups.
///
/// Widgets accept either numeric or string ids; `group` references on
/// items join against `TimelineGroup::id` by equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    /// Numeric id.
    Num(i64),
    /// String id.
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for EntityId {
    fn from(n: i64) -> Self {
        Self::Num(n)
    }
}

impl From<&str> for EntityId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for EntityId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// A single bar/point on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Unique item id.
    pub id: EntityId,

    /// Group (lane) this item belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<EntityId>,

    /// Display content.
    pub content: String,

    /// Start timestamp.
    pub start: DateTime<Utc>,

    /// End timestamp. When present, must not precede `start`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<DateTime<Utc>>,

    /// Widget-specific item kind (e.g. "range", "point").
    #[serde(
        default,
        rename = "type",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
}

impl TimelineItem {
    /// Create an item with the required fields.
    pub fn new(id: impl Into<EntityId>, content: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            group: None,
            content: content.into(),
            start,
            end: None,
            kind: None,
        }
    }

    /// Assign the item to a group.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<EntityId>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Set the end timestamp.
    #[must_use]
    pub fn with_end(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end);
        self
    }

    /// Set the widget-specific kind.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// A named lane/category that timeline items belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineGroup {
    /// Unique group id, referenced by `TimelineItem::group`.
    pub id: EntityId,

    /// Display content (lane label).
    pub content: String,

    /// Optional hover title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl TimelineGroup {
    /// Create a group.
    pub fn new(id: impl Into<EntityId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            title: None,
        }
    }

    /// Set the hover title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Text to label this group with: `content`, or the id when content
    /// is empty.
    pub fn label_text(&self) -> String {
        if self.content.is_empty() {
            self.id.to_string()
        } else {
            self.content.clone()
        }
    }
}

/// Open configuration bag forwarded to the widget.
///
/// Known fields are typed; everything else round-trips through `extra`.
/// The derived options pushed to the widget (including the group
/// template hook) live in [`crate::host::WidgetOptions`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Whether items stack within a lane.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<bool>,

    /// Whether items are editable in the widget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,

    /// Whether the widget draws a current-time marker.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_current_time: Option<bool>,

    /// Widget width hint (e.g. "100%").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,

    /// Widget height hint (e.g. "400px").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,

    /// Unrecognized options, preserved as-is.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A complete data document: items, groups, and options.
///
/// This is the JSON shape accepted by the CLI's `--data` flag.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Timeline items.
    #[serde(default)]
    pub items: Vec<TimelineItem>,

    /// Timeline groups.
    #[serde(default)]
    pub groups: Vec<TimelineGroup>,

    /// Render options.
    #[serde(default)]
    pub options: RenderOptions,
}

/// Problems a dataset can have.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    /// Two items share an id.
    #[error("duplicate item id: {0}")]
    DuplicateItem(EntityId),

    /// Two groups share an id.
    #[error("duplicate group id: {0}")]
    DuplicateGroup(EntityId),

    /// An item ends before it starts.
    #[error("item {item} ends before it starts")]
    EndBeforeStart {
        /// Offending item id.
        item: EntityId,
    },

    /// An item references a group that does not exist.
    #[error("item {item} references unknown group {group}")]
    UnknownGroup {
        /// Offending item id.
        item: EntityId,
        /// The missing group id.
        group: EntityId,
    },
}

/// Collect every problem in the given items and groups.
pub fn dataset_problems(items: &[TimelineItem], groups: &[TimelineGroup]) -> Vec<DataError> {
    let mut problems = Vec::new();

    let mut group_ids = std::collections::HashSet::new();
    for group in groups {
        if !group_ids.insert(&group.id) {
            problems.push(DataError::DuplicateGroup(group.id.clone()));
        }
    }

    let mut item_ids = std::collections::HashSet::new();
    for item in items {
        if !item_ids.insert(&item.id) {
            problems.push(DataError::DuplicateItem(item.id.clone()));
        }

        if let Some(end) = item.end {
            if end < item.start {
                problems.push(DataError::EndBeforeStart {
                    item: item.id.clone(),
                });
            }
        }

        if let Some(ref group) = item.group {
            if !group_ids.contains(group) {
                problems.push(DataError::UnknownGroup {
                    item: item.id.clone(),
                    group: group.clone(),
                });
            }
        }
    }

    problems
}

/// Validate items and groups, returning the first problem found.
pub fn validate_dataset(
    items: &[TimelineItem],
    groups: &[TimelineGroup],
) -> Result<(), DataError> {
    match dataset_problems(items, groups).into_iter().next() {
        Some(problem) => Err(problem),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_entity_id_display() {
        assert_eq!(EntityId::from(1).to_string(), "1");
        assert_eq!(EntityId::from("dev").to_string(), "dev");
    }

    #[test]
    fn test_entity_id_serde_untagged() {
        let num: EntityId = serde_json::from_str("7").unwrap();
        assert_eq!(num, EntityId::Num(7));

        let text: EntityId = serde_json::from_str("\"qa\"").unwrap();
        assert_eq!(text, EntityId::Text("qa".into()));
    }

    #[test]
    fn test_item_builders() {
        let item = TimelineItem::new(1, "Task 1", date(1))
            .with_group(1)
            .with_end(date(3))
            .with_kind("range");

        assert_eq!(item.group, Some(EntityId::Num(1)));
        assert_eq!(item.end, Some(date(3)));
        assert_eq!(item.kind.as_deref(), Some("range"));
    }

    #[test]
    fn test_item_kind_serializes_as_type() {
        let item = TimelineItem::new(1, "Task 1", date(1)).with_kind("point");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "point");
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_group_label_text_falls_back_to_id() {
        let named = TimelineGroup::new(1, "Development Team");
        assert_eq!(named.label_text(), "Development Team");

        let unnamed = TimelineGroup::new(2, "");
        assert_eq!(unnamed.label_text(), "2");
    }

    #[test]
    fn test_render_options_preserves_unknown_keys() {
        let json = r#"{"stack": true, "zoomable": false}"#;
        let options: RenderOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.stack, Some(true));
        assert_eq!(
            options.extra.get("zoomable"),
            Some(&serde_json::Value::Bool(false))
        );

        let back = serde_json::to_value(&options).unwrap();
        assert_eq!(back["zoomable"], false);
    }

    #[test]
    fn test_dataset_json_round_trip() {
        let dataset = Dataset {
            items: vec![TimelineItem::new(1, "Task 1", date(1))
                .with_group(1)
                .with_end(date(3))],
            groups: vec![TimelineGroup::new(1, "Development Team")],
            options: RenderOptions {
                stack: Some(true),
                ..RenderOptions::default()
            },
        };

        let json = serde_json::to_string(&dataset).unwrap();
        let parsed: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, dataset);
    }

    #[test]
    fn test_validate_clean_dataset() {
        let items = vec![TimelineItem::new(1, "Task 1", date(1))
            .with_group(1)
            .with_end(date(3))];
        let groups = vec![TimelineGroup::new(1, "Development Team")];
        assert!(validate_dataset(&items, &groups).is_ok());
    }

    #[test]
    fn test_validate_end_before_start() {
        let items = vec![TimelineItem::new(1, "Task 1", date(3)).with_end(date(1))];
        assert_eq!(
            validate_dataset(&items, &[]),
            Err(DataError::EndBeforeStart {
                item: EntityId::Num(1)
            })
        );
    }

    #[test]
    fn test_validate_unknown_group() {
        let items = vec![TimelineItem::new(1, "Task 1", date(1)).with_group(9)];
        let groups = vec![TimelineGroup::new(1, "Development Team")];
        assert_eq!(
            validate_dataset(&items, &groups),
            Err(DataError::UnknownGroup {
                item: EntityId::Num(1),
                group: EntityId::Num(9)
            })
        );
    }

    #[test]
    fn test_problems_collects_everything() {
        let items = vec![
            TimelineItem::new(1, "a", date(2)).with_end(date(1)),
            TimelineItem::new(1, "b", date(1)),
        ];
        let groups = vec![
            TimelineGroup::new(1, "x"),
            TimelineGroup::new(1, "y"),
        ];

        let problems = dataset_problems(&items, &groups);
        assert_eq!(problems.len(), 3);
        assert!(problems.contains(&DataError::DuplicateGroup(EntityId::Num(1))));
        assert!(problems.contains(&DataError::DuplicateItem(EntityId::Num(1))));
    }
}
