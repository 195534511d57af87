//! Visualization projection: `{items, groups}` for a timeline widget.
//!
//! Items are colored by condition and tinted by severity. Condition names
//! outside the catalog fall back to the neutral color rather than failing.

use chrono::NaiveDate;
use medsynth_core::vocabulary::color_for;
use medsynth_core::{ConditionEvent, Severity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineProjection {
    pub items: Vec<TimelineItem>,
    pub groups: Vec<TimelineGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    pub id: String,
    pub content: String,
    pub start: NaiveDate,
    /// Condition name; matches a [`TimelineGroup::id`].
    pub group: String,
    #[serde(rename = "className")]
    pub class_name: String,
    /// Tooltip, `<br>`-separated.
    pub title: String,
    pub style: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineGroup {
    pub id: String,
    pub content: String,
    pub style: String,
}

pub fn severity_background(severity: Severity) -> &'static str {
    match severity {
        Severity::Mild => "rgba(46, 213, 115, 0.2)",
        Severity::Moderate => "rgba(255, 165, 2, 0.2)",
        Severity::Severe => "rgba(255, 71, 87, 0.2)",
    }
}

/// Project date-sorted events. Item ids are 1-based positions; groups appear
/// in order of each condition's first event.
pub fn project(events: &[ConditionEvent]) -> TimelineProjection {
    let mut projection = TimelineProjection::default();

    for (i, event) in events.iter().enumerate() {
        let color = color_for(&event.condition);
        projection.items.push(TimelineItem {
            id: (i + 1).to_string(),
            content: format!("{}: {}", event.event_type, event.condition),
            start: event.date,
            group: event.condition.clone(),
            class_name: format!("severity-{}", event.severity.slug()),
            title: format!(
                "{}<br>Severity: {}<br>Provider: {}",
                event.description, event.severity, event.provider
            ),
            style: format!(
                "background-color: {}; color: {}; border-color: {};",
                severity_background(event.severity),
                color,
                color
            ),
        });

        if !projection.groups.iter().any(|g| g.id == event.condition) {
            projection.groups.push(TimelineGroup {
                id: event.condition.clone(),
                content: event.condition.clone(),
                style: format!("color: {};", color),
            });
        }
    }
    projection
}

impl TimelineProjection {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Keep only items and groups for the selected conditions.
    pub fn filter_conditions<S: AsRef<str>>(&self, selected: &[S]) -> TimelineProjection {
        let keep = |name: &str| selected.iter().any(|s| s.as_ref() == name);
        TimelineProjection {
            items: self.items.iter().filter(|i| keep(&i.group)).cloned().collect(),
            groups: self.groups.iter().filter(|g| keep(&g.id)).cloned().collect(),
        }
    }
}
