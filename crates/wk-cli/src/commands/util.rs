//! Shared helpers for subcommands: date words, ID prefixes, durations.

use std::fmt::Write;

use anyhow::{Context, Result, bail};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use wk_core::{Event, EventId};
use wk_db::Database;

/// Parses a date argument.
///
/// Accepts `YYYY-MM-DD`, the words `today`, `tomorrow` and `yesterday`, and
/// weekday names (`monday` or `mon`), which resolve within the current
/// Monday-based week.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let normalized = input.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "today" => return Ok(today),
        "tomorrow" => return Ok(today + Duration::days(1)),
        "yesterday" => return Ok(today - Duration::days(1)),
        _ => {}
    }
    if let Ok(weekday) = normalized.parse::<Weekday>() {
        let (monday, _) = week_bounds(today);
        return Ok(monday + Duration::days(i64::from(weekday.num_days_from_monday())));
    }
    input.trim().parse().with_context(|| {
        format!("invalid date {input:?}, expected YYYY-MM-DD, 'today', 'tomorrow', or a weekday")
    })
}

/// Returns the Monday and Sunday of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    (monday, monday + Duration::days(6))
}

/// Formats a minute count as `Xh Ym`, or `Ym` under an hour.
#[must_use]
pub fn format_minutes(total_minutes: u32) -> String {
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours >= 1 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Returns the first eight characters of an event ID, for display.
#[must_use]
pub fn short_id(id: &EventId) -> &str {
    let s = id.as_str();
    match s.char_indices().nth(8) {
        Some((index, _)) => &s[..index],
        None => s,
    }
}

/// Lowercases a category name and collapses runs of non-alphanumerics into
/// single dashes, producing the category's ID.
///
/// Names made entirely of punctuation slug to the empty string; callers
/// validate the result.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::new();
    let mut pending_dash = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Looks up an event by full ID or unique ID prefix.
pub fn resolve_event(db: &Database, reference: &str) -> Result<Event> {
    if let Ok(id) = EventId::new(reference) {
        if let Some(event) = db.get_event(&id)? {
            return Ok(event);
        }
    }

    let mut matches = db.events_with_id_prefix(reference)?;
    match matches.len() {
        0 => bail!("no event matches {reference:?}"),
        1 => Ok(matches.remove(0)),
        _ => {
            let mut listing = String::new();
            for event in &matches {
                writeln!(listing, "  {}  {}", short_id(&event.id), event.title)?;
            }
            bail!("event reference {reference:?} is ambiguous, candidates:\n{listing}");
        }
    }
}
