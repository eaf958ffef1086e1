//! Core type definitions with validation.
//!
//! Times and identifiers are validated once, when raw input (CLI arguments,
//! database rows, JSON) crosses into the domain. Code downstream of these
//! types never re-parses strings and never sees an out-of-range time.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for core types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required string value was empty or whitespace-only.
    #[error("{field} cannot be empty")]
    Empty {
        /// Name of the field that was empty.
        field: &'static str,
    },

    /// A value could not be read as a time of day.
    #[error("invalid time of day: {value:?} (expected HH:MM, 24-hour clock)")]
    InvalidTime {
        /// The rejected input.
        value: String,
    },
}

/// Defines a validated string identifier type.
///
/// Generated types enforce non-emptiness on construction and deserialize
/// through the same check, so an identifier in hand is always valid.
macro_rules! define_string_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new identifier, validating it is non-empty.
            pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
                let value = value.into();
                if value.trim().is_empty() {
                    return Err(ValidationError::Empty { field: $field });
                }
                Ok(Self(value))
            }

            /// Returns the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// Unique identifier for a calendar event.
    EventId,
    "event ID"
);

impl EventId {
    /// Generates a random (UUID v4) identifier for a newly created event.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

define_string_id!(
    /// Unique identifier for an event category.
    CategoryId,
    "category ID"
);

/// Minutes in a full day (24 * 60).
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A minute-granularity time of day.
///
/// Stored as minutes since midnight, always in `0..1440`. The wall-clock
/// string form (`HH:MM`, 24-hour) exists only at the boundary: parsing
/// happens once on the way in, and the layout engine works with plain minute
/// arithmetic from then on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// First minute of the day (00:00).
    pub const MIDNIGHT: Self = Self(0);

    /// Creates a time of day from hour and minute components.
    pub fn new(hour: u8, minute: u8) -> Result<Self, ValidationError> {
        if hour >= 24 || minute >= 60 {
            return Err(ValidationError::InvalidTime {
                value: format!("{hour:02}:{minute:02}"),
            });
        }
        Ok(Self(u16::from(hour) * 60 + u16::from(minute)))
    }

    /// Creates a time of day from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Result<Self, ValidationError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(ValidationError::InvalidTime {
                value: format!("{minutes} minutes since midnight"),
            });
        }
        Ok(Self(minutes))
    }

    /// Returns minutes since midnight.
    #[must_use]
    pub const fn minutes_from_midnight(self) -> u16 {
        self.0
    }

    /// Returns the hour component (0-23).
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "minutes < 1440, so hour < 24")]
    pub const fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    /// Returns the minute component (0-59).
    #[must_use]
    #[expect(clippy::cast_possible_truncation, reason = "remainder mod 60 fits in u8")]
    pub const fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }
}

impl std::str::FromStr for TimeOfDay {
    type Err = ValidationError;

    /// Parses `HH:MM` on a 24-hour clock. A single-digit hour is accepted
    /// (`9:05`); the minute part must be exactly two digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidTime {
            value: s.to_string(),
        };

        let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
        if hour.is_empty()
            || hour.len() > 2
            || minute.len() != 2
            || !hour.bytes().all(|b| b.is_ascii_digit())
            || !minute.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let hour: u8 = hour.parse().map_err(|_| invalid())?;
        let minute: u8 = minute.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).map_err(|_| invalid())
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(time: TimeOfDay) -> Self {
        time.to_string()
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========== EventId / CategoryId ==========

    #[test]
    fn event_id_accepts_non_empty_string() {
        let id = EventId::new("evt-123").unwrap();
        assert_eq!(id.as_str(), "evt-123");
        assert_eq!(id.to_string(), "evt-123");
    }

    #[test]
    fn event_id_rejects_empty_string() {
        let err = EventId::new("").unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "event ID" });
    }

    #[test]
    fn event_id_rejects_whitespace_only_string() {
        assert!(EventId::new("   ").is_err());
    }

    #[test]
    fn category_id_rejects_empty_string() {
        let err = CategoryId::new("").unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "category ID" });
    }

    #[test]
    fn generated_event_ids_are_unique() {
        assert_ne!(EventId::generate(), EventId::generate());
    }

    #[test]
    fn event_id_serde_round_trip() {
        let id = EventId::new("evt-123").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"evt-123\"");
        let back: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn event_id_deserialization_rejects_empty() {
        let result: Result<EventId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    // ========== TimeOfDay ==========

    #[test]
    fn time_of_day_from_components() {
        let time = TimeOfDay::new(9, 30).unwrap();
        assert_eq!(time.hour(), 9);
        assert_eq!(time.minute(), 30);
        assert_eq!(time.minutes_from_midnight(), 570);
    }

    #[test]
    fn time_of_day_rejects_out_of_range_components() {
        assert!(TimeOfDay::new(24, 0).is_err());
        assert!(TimeOfDay::new(9, 60).is_err());
        assert!(TimeOfDay::new(25, 61).is_err());
    }

    #[test]
    fn time_of_day_boundaries() {
        assert_eq!(TimeOfDay::new(0, 0).unwrap(), TimeOfDay::MIDNIGHT);
        let last = TimeOfDay::new(23, 59).unwrap();
        assert_eq!(last.minutes_from_midnight(), 1439);
    }

    #[test]
    fn time_of_day_from_minutes_bounds() {
        assert_eq!(TimeOfDay::from_minutes(0).unwrap(), TimeOfDay::MIDNIGHT);
        assert_eq!(
            TimeOfDay::from_minutes(1439).unwrap(),
            TimeOfDay::new(23, 59).unwrap()
        );
        assert!(TimeOfDay::from_minutes(1440).is_err());
    }

    #[test]
    fn time_of_day_parses_hh_mm() {
        let time: TimeOfDay = "09:30".parse().unwrap();
        assert_eq!(time, TimeOfDay::new(9, 30).unwrap());
    }

    #[test]
    fn time_of_day_parses_single_digit_hour() {
        let time: TimeOfDay = "9:05".parse().unwrap();
        assert_eq!(time, TimeOfDay::new(9, 5).unwrap());
    }

    #[test]
    fn time_of_day_rejects_malformed_strings() {
        for input in [
            "", "09", "0930", "9:5", "09:300", "ab:cd", "+9:15", "24:00", "12:60",
        ] {
            let result: Result<TimeOfDay, _> = input.parse();
            assert!(result.is_err(), "expected {input:?} to be rejected");
        }
    }

    #[test]
    fn time_of_day_display_zero_pads() {
        let time = TimeOfDay::new(7, 5).unwrap();
        assert_eq!(time.to_string(), "07:05");
    }

    #[test]
    fn time_of_day_orders_chronologically() {
        let morning = TimeOfDay::new(9, 0).unwrap();
        let noon = TimeOfDay::new(12, 0).unwrap();
        let evening = TimeOfDay::new(18, 30).unwrap();
        assert!(morning < noon);
        assert!(noon < evening);
    }

    #[test]
    fn time_of_day_serde_round_trip() {
        let time = TimeOfDay::new(14, 45).unwrap();
        let json = serde_json::to_string(&time).unwrap();
        assert_eq!(json, "\"14:45\"");
        let back: TimeOfDay = serde_json::from_str(&json).unwrap();
        assert_eq!(back, time);
    }

    #[test]
    fn time_of_day_deserialization_rejects_out_of_range() {
        let result: Result<TimeOfDay, _> = serde_json::from_str("\"24:30\"");
        assert!(result.is_err());
    }
}
