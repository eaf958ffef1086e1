//! Week command: lists the seven days around a date, Monday first.
//!
//! Each day is laid out independently; a week is just seven day columns, so
//! the JSON output repeats the day payload once per day.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{Duration, Local, NaiveDate};
use serde::Serialize;
use wk_core::{Event, LayoutConfig, lay_out_day};
use wk_db::Database;

use crate::commands::day::{JsonDay, day_json};
use crate::commands::util::{format_minutes, parse_date, short_id, week_bounds};

/// Runs the week command.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    date_arg: Option<&str>,
    json: bool,
) -> Result<()> {
    let today = Local::now().date_naive();
    let date = parse_date(date_arg.unwrap_or("today"), today)?;
    let (monday, sunday) = week_bounds(date);

    let events = db.events_between(monday, sunday)?;
    let days = split_by_day(monday, &events);

    if json {
        let payload = week_json(monday, &days);
        writeln!(writer, "{}", serde_json::to_string_pretty(&payload)?)?;
    } else {
        write!(writer, "{}", format_week(monday, sunday, &days))?;
    }
    Ok(())
}

/// Splits a week's events into seven per-day slices, Monday first.
///
/// Events arrive ordered by date then start time, so each day keeps the
/// order the layout engine expects.
fn split_by_day(monday: NaiveDate, events: &[Event]) -> Vec<(NaiveDate, Vec<Event>)> {
    (0..7)
        .map(|offset| {
            let date = monday + Duration::days(offset);
            let on_day = events
                .iter()
                .filter(|event| event.date == date)
                .cloned()
                .collect();
            (date, on_day)
        })
        .collect()
}

/// Formats the human-readable week listing.
fn format_week(monday: NaiveDate, sunday: NaiveDate, days: &[(NaiveDate, Vec<Event>)]) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "WEEK: {} - {}",
        monday.format("%b %-d"),
        sunday.format("%b %-d, %Y")
    )
    .unwrap();

    let mut total_events = 0_usize;
    let mut total_minutes = 0_u32;

    for (date, events) in days {
        writeln!(output).unwrap();
        writeln!(output, "{}", date.format("%A, %b %-d")).unwrap();
        if events.is_empty() {
            writeln!(output, "  (no events)").unwrap();
            continue;
        }
        for event in events {
            let category = event
                .category
                .as_ref()
                .map(|id| format!("  ({id})"))
                .unwrap_or_default();
            writeln!(
                output,
                "  {}-{}  {}  [{}]{}",
                event.start,
                event.end,
                event.title,
                short_id(&event.id),
                category,
            )
            .unwrap();
        }
        let day_minutes: u32 = events
            .iter()
            .map(|event| u32::from(event.duration_minutes()))
            .sum();
        total_events += events.len();
        total_minutes += day_minutes;
        writeln!(
            output,
            "  = {} event{}, {}",
            events.len(),
            if events.len() == 1 { "" } else { "s" },
            format_minutes(day_minutes),
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "SUMMARY").unwrap();
    writeln!(output, "───────").unwrap();
    writeln!(
        output,
        "Total: {} event{}, {} scheduled",
        total_events,
        if total_events == 1 { "" } else { "s" },
        format_minutes(total_minutes),
    )
    .unwrap();

    output
}

// ========== JSON Output ==========

/// JSON shape for a whole week.
#[derive(Debug, Serialize)]
pub struct JsonWeek {
    pub week_of: String,
    pub days: Vec<JsonDay>,
}

fn week_json(monday: NaiveDate, days: &[(NaiveDate, Vec<Event>)]) -> JsonWeek {
    let layout = LayoutConfig::default();
    let days = days
        .iter()
        .map(|(date, events)| {
            let geometry = lay_out_day(events, &layout);
            day_json(*date, events, &geometry, &layout)
        })
        .collect();
    JsonWeek {
        week_of: monday.to_string(),
        days,
    }
}
