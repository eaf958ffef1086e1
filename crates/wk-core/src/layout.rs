//! Day-column layout for calendar events.
//!
//! Computes rendering geometry for one day's events in two passes:
//!
//! 1. Vertical placement maps each event's time span to layout units under a
//!    fixed units-per-hour scale. Heights are floored so very short events
//!    stay visible.
//! 2. Horizontal placement partitions the events into groups of transitively
//!    overlapping events and slots each group's members into side-by-side
//!    columns of equal width.
//!
//! The engine is a pure function of its input: same events and config, same
//! geometry, no state carried between calls. Events are processed in the
//! order given. The store feeds them sorted by start time, which keeps a
//! day's partition stable; a different order can produce a different
//! partition (see [`lay_out_day`]).

use serde::Serialize;

use crate::event::Event;
use crate::types::{EventId, TimeOfDay};

/// Scale and spacing constants for day-column geometry.
///
/// Vertical values are in layout units (one screen pixel per unit in the
/// default web rendering); horizontal values are fractions of the day
/// column's width.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Layout units per hour of the day column.
    pub hour_height: f64,
    /// Floor applied to event heights, so zero-length and very short events
    /// remain visible and clickable.
    pub min_event_height: f64,
    /// Horizontal gap between side-by-side events, as a fraction of the day
    /// column's width.
    pub column_gap: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            hour_height: 64.0,
            min_event_height: 24.0,
            column_gap: 0.01,
        }
    }
}

impl LayoutConfig {
    /// Vertical offset of a time of day, in layout units.
    #[must_use]
    pub fn offset_of(&self, time: TimeOfDay) -> f64 {
        f64::from(time.minutes_from_midnight()) / 60.0 * self.hour_height
    }

    /// Vertical extent of a time span, in layout units.
    ///
    /// Spans shorter than the minimum (including degenerate spans where
    /// `end <= start`) come out at exactly `min_event_height`.
    #[must_use]
    pub fn height_of(&self, start: TimeOfDay, end: TimeOfDay) -> f64 {
        let duration_minutes = f64::from(end.minutes_from_midnight())
            - f64::from(start.minutes_from_midnight());
        (duration_minutes / 60.0 * self.hour_height).max(self.min_event_height)
    }

    /// Width of one column in a group of `group_size` events, as a fraction
    /// of the day column.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "group sizes are small")]
    pub fn column_width(&self, group_size: usize) -> f64 {
        1.0 / group_size.max(1) as f64 - self.column_gap
    }

    /// Width of an event that shares its time with no other event.
    ///
    /// Equal to `column_width(1)`: a group of one spans the whole day column
    /// minus the gap.
    #[must_use]
    pub fn full_column_width(&self) -> f64 {
        1.0 - self.column_gap
    }
}

/// An event the layout engine can place.
///
/// The engine only needs an identifier and the time span; implementing this
/// trait lets it lay out stored events, in-memory drafts, and test fixtures
/// alike.
pub trait LayoutEvent {
    /// Returns the event's identifier.
    fn event_id(&self) -> &EventId;

    /// Returns the event's start time of day.
    fn start(&self) -> TimeOfDay;

    /// Returns the event's end time of day.
    fn end(&self) -> TimeOfDay;
}

impl LayoutEvent for Event {
    fn event_id(&self) -> &EventId {
        &self.id
    }

    fn start(&self) -> TimeOfDay {
        self.start
    }

    fn end(&self) -> TimeOfDay {
        self.end
    }
}

/// Computed day-column geometry for one event.
///
/// `top` and `height` are in layout units; `left` and `width` are fractions
/// of the day column's width. The rendering layer owns the mapping from
/// these values onto its own coordinate system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventGeometry {
    /// The event this geometry belongs to.
    pub event_id: EventId,
    /// Vertical offset, proportional to minutes since midnight.
    pub top: f64,
    /// Vertical extent, proportional to duration and floored at the
    /// configured minimum.
    pub height: f64,
    /// Horizontal offset, as a fraction of the day column's width.
    pub left: f64,
    /// Horizontal extent, as a fraction of the day column's width.
    pub width: f64,
}

/// Computes geometry for one day's events.
///
/// Returns one [`EventGeometry`] per input event, in input order. An empty
/// input yields an empty result. Every event is placed; degenerate time
/// spans produce a minimum-height box at the start time rather than an
/// error.
///
/// Grouping is a greedy first-fit pass over the input order: an event joins
/// the first group containing any member whose time span it overlaps, and
/// opens a new group otherwise. Chained overlaps (A-B and B-C) therefore
/// share one group even when A and C never touch. The partition depends on
/// input order; callers wanting stable output feed events sorted by start
/// time.
#[expect(clippy::cast_precision_loss, reason = "group sizes are small")]
pub fn lay_out_day<E: LayoutEvent>(events: &[E], config: &LayoutConfig) -> Vec<EventGeometry> {
    let groups = group_overlapping(events);

    // (column index within group, group size) per event; the partition
    // overwrites every entry.
    let mut slots = vec![(0_usize, 1_usize); events.len()];
    for group in &groups {
        for (column, &member) in group.iter().enumerate() {
            slots[member] = (column, group.len());
        }
    }

    events
        .iter()
        .zip(slots)
        .map(|(event, (column, group_size))| EventGeometry {
            event_id: event.event_id().clone(),
            top: config.offset_of(event.start()),
            height: config.height_of(event.start(), event.end()),
            left: column as f64 / group_size as f64,
            width: config.column_width(group_size),
        })
        .collect()
}

/// Partitions event indices into groups of transitively overlapping events.
///
/// Greedy first-fit: each event lands in the first existing group where it
/// overlaps at least one member, else in a fresh group of its own. Every
/// index appears in exactly one group; group members keep input order.
fn group_overlapping<E: LayoutEvent>(events: &[E]) -> Vec<Vec<usize>> {
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for (index, event) in events.iter().enumerate() {
        let home = groups
            .iter_mut()
            .find(|group| group.iter().any(|&member| overlaps(event, &events[member])));
        match home {
            Some(group) => group.push(index),
            None => groups.push(vec![index]),
        }
    }

    groups
}

/// Strict time overlap: the spans share interior minutes. Back-to-back
/// events that merely touch at an endpoint do not overlap.
fn overlaps<E: LayoutEvent>(a: &E, b: &E) -> bool {
    a.start() < b.end() && a.end() > b.start()
}
