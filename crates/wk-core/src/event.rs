//! Calendar events and categories.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{CategoryId, EventId, TimeOfDay};

/// Display color for events and categories created without an explicit one.
pub const DEFAULT_COLOR: &str = "#4A90D9";

/// A single calendar item on one day.
///
/// Well-formed events have `start < end`. Events with `end <= start` are
/// degenerate but still accepted: imported or hastily edited data is allowed
/// through, and the layout engine draws such events as a minimum-height box
/// at their start time instead of failing the whole day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier, stable across edits.
    pub id: EventId,
    /// Display title.
    pub title: String,
    /// The calendar day this event belongs to.
    pub date: NaiveDate,
    /// Start time of day.
    pub start: TimeOfDay,
    /// End time of day.
    pub end: TimeOfDay,
    /// The category this event was created under, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryId>,
    /// Display color. Opaque to the domain; hex like `#4A90D9` by convention.
    pub color: String,
}

impl Event {
    /// Returns the scheduled duration in minutes.
    ///
    /// Degenerate events (`end <= start`) report zero rather than wrapping
    /// around midnight.
    #[must_use]
    pub fn duration_minutes(&self) -> u16 {
        self.end
            .minutes_from_midnight()
            .saturating_sub(self.start.minutes_from_midnight())
    }
}

/// A user-defined kind of event, carrying the default display color that
/// events created under it inherit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier, derived from the name on creation.
    pub id: CategoryId,
    /// Human-readable name.
    pub name: String,
    /// Display color inherited by new events in this category.
    pub color: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(start: &str, end: &str) -> Event {
        Event {
            id: EventId::new("evt-1").unwrap(),
            title: "Linear Algebra".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            start: start.parse().unwrap(),
            end: end.parse().unwrap(),
            category: None,
            color: "#4A90D9".to_string(),
        }
    }

    #[test]
    fn duration_of_regular_event() {
        assert_eq!(event("09:00", "10:30").duration_minutes(), 90);
    }

    #[test]
    fn duration_of_degenerate_event_is_zero() {
        assert_eq!(event("10:00", "10:00").duration_minutes(), 0);
        assert_eq!(event("11:00", "10:00").duration_minutes(), 0);
    }

    #[test]
    fn event_serde_round_trip() {
        let mut original = event("09:00", "10:30");
        original.category = Some(CategoryId::new("lecture").unwrap());

        let json = serde_json::to_string(&original).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn event_without_category_omits_field() {
        let json = serde_json::to_string(&event("09:00", "10:30")).unwrap();
        assert!(!json.contains("category"));
    }

    #[test]
    fn event_deserialization_rejects_invalid_time() {
        let json = r##"{
            "id": "evt-1",
            "title": "Broken",
            "date": "2025-03-10",
            "start": "25:00",
            "end": "26:00",
            "color": "#000000"
        }"##;
        let result: Result<Event, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn category_serde_round_trip() {
        let category = Category {
            id: CategoryId::new("deadline").unwrap(),
            name: "Deadline".to_string(),
            color: "#D0021B".to_string(),
        };
        let json = serde_json::to_string(&category).unwrap();
        let back: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(back, category);
    }
}
