//! Day command: draws one day as a laid-out column.
//!
//! The layout engine hands back geometry in abstract units (vertical) and
//! day-column fractions (horizontal); this module owns the mapping onto a
//! character grid. Each hour becomes two rows, the column becomes a fixed
//! character band, and events paint over it in input order, so later events
//! cover earlier ones exactly where their boxes would stack on screen.

use std::fmt::Write as _;
use std::io::Write;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use wk_core::{Event, EventGeometry, LayoutConfig, lay_out_day};
use wk_db::Database;

use crate::Config;
use crate::commands::util::{parse_date, short_id};

/// Character width of the drawn day column.
const BAND_WIDTH: usize = 48;

/// Rows drawn per hour.
const ROWS_PER_HOUR: usize = 2;

/// Runs the day command.
pub fn run<W: Write>(
    writer: &mut W,
    db: &Database,
    date_arg: Option<&str>,
    json: bool,
    config: &Config,
) -> Result<()> {
    let today = Local::now().date_naive();
    let date = parse_date(date_arg.unwrap_or("today"), today)?;

    let events = db.events_on(date)?;
    let layout = LayoutConfig::default();
    let geometry = lay_out_day(&events, &layout);

    if json {
        let payload = day_json(date, &events, &geometry, &layout);
        writeln!(writer, "{}", serde_json::to_string_pretty(&payload)?)?;
    } else {
        write!(writer, "{}", format_day(date, &events, &geometry, &layout, config))?;
    }
    Ok(())
}

// ========== Human-Readable Rendering ==========

/// Hour range the grid covers, widened from the configured window so every
/// event box stays inside it.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "hour values are clamped to 0..=24 before casting"
)]
fn grid_hours(geometry: &[EventGeometry], layout: &LayoutConfig, config: &Config) -> (u8, u8) {
    let mut start_hour = config.day_start_hour.min(23);
    let mut end_hour = config.day_end_hour.clamp(start_hour + 1, 24);

    for item in geometry {
        let top_hour = (item.top / layout.hour_height).floor().clamp(0.0, 24.0) as u8;
        let bottom_hour =
            ((item.top + item.height) / layout.hour_height).ceil().clamp(0.0, 24.0) as u8;
        start_hour = start_hour.min(top_hour);
        end_hour = end_hour.max(bottom_hour);
    }
    (start_hour, end_hour)
}

/// Paints event boxes onto a character grid and assembles the output.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    reason = "cell coordinates are small and clamped to the grid"
)]
fn paint_grid(
    events: &[Event],
    geometry: &[EventGeometry],
    layout: &LayoutConfig,
    start_hour: u8,
    end_hour: u8,
) -> Vec<String> {
    let rows = usize::from(end_hour - start_hour) * ROWS_PER_HOUR;
    let mut grid = vec![vec![' '; BAND_WIDTH]; rows];

    for (number, (event, item)) in events.iter().zip(geometry).enumerate() {
        let hours_from_top = item.top / layout.hour_height - f64::from(start_hour);
        let first_row = ((hours_from_top * ROWS_PER_HOUR as f64).floor().max(0.0) as usize)
            .min(rows.saturating_sub(1));
        let row_span = ((item.height / layout.hour_height * ROWS_PER_HOUR as f64).ceil() as usize)
            .max(1);
        let last_row = (first_row + row_span).min(rows);

        let first_col =
            ((item.left * BAND_WIDTH as f64).round().max(0.0) as usize).min(BAND_WIDTH - 1);
        let col_span = ((item.width * BAND_WIDTH as f64).floor() as usize).max(3);
        let last_col = (first_col + col_span).min(BAND_WIDTH);

        for row in grid.iter_mut().take(last_row).skip(first_row) {
            for cell in &mut row[first_col..last_col] {
                *cell = '░';
            }
        }

        let label = format!("[{}] {}", number + 1, event.title);
        for (offset, ch) in label.chars().take(last_col - first_col).enumerate() {
            grid[first_row][first_col + offset] = ch;
        }
    }

    grid.into_iter()
        .map(|row| row.into_iter().collect::<String>().trim_end().to_string())
        .collect()
}

/// Formats the day view: header, hour grid, event legend.
fn format_day(
    date: NaiveDate,
    events: &[Event],
    geometry: &[EventGeometry],
    layout: &LayoutConfig,
    config: &Config,
) -> String {
    let mut output = String::new();
    writeln!(output, "SCHEDULE: {}", date.format("%A, %b %-d, %Y")).unwrap();
    writeln!(output).unwrap();

    if events.is_empty() {
        writeln!(output, "No events on this day.").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "Hint: Run 'wk add' to put something on the calendar.").unwrap();
        return output;
    }

    let (start_hour, end_hour) = grid_hours(geometry, layout, config);
    let band = paint_grid(events, geometry, layout, start_hour, end_hour);
    for (row, cells) in band.iter().enumerate() {
        let gutter = if row % ROWS_PER_HOUR == 0 {
            let hour = start_hour + u8::try_from(row / ROWS_PER_HOUR).unwrap_or(0);
            format!("{hour:02}:00")
        } else {
            "     ".to_string()
        };
        let line = format!("{gutter} │ {cells}");
        writeln!(output, "{}", line.trim_end()).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "EVENTS").unwrap();
    writeln!(output, "──────").unwrap();
    for (number, event) in events.iter().enumerate() {
        let category = event
            .category
            .as_ref()
            .map(|id| format!("  ({id})"))
            .unwrap_or_default();
        writeln!(
            output,
            "[{}] {}  {}-{}  {}{}",
            number + 1,
            short_id(&event.id),
            event.start,
            event.end,
            event.title,
            category,
        )
        .unwrap();
    }

    output
}

// ========== JSON Output ==========

/// JSON shape for one day's laid-out events.
#[derive(Debug, Serialize)]
pub struct JsonDay {
    pub date: String,
    pub hour_height: f64,
    pub min_event_height: f64,
    pub events: Vec<JsonDayEvent>,
}

/// One event with its computed geometry.
#[derive(Debug, Serialize)]
pub struct JsonDayEvent {
    pub id: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub category: Option<String>,
    pub color: String,
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
}

/// Builds the JSON payload for one day.
pub fn day_json(
    date: NaiveDate,
    events: &[Event],
    geometry: &[EventGeometry],
    layout: &LayoutConfig,
) -> JsonDay {
    let events = events
        .iter()
        .zip(geometry)
        .map(|(event, item)| JsonDayEvent {
            id: event.id.to_string(),
            title: event.title.clone(),
            start: event.start.to_string(),
            end: event.end.to_string(),
            category: event.category.as_ref().map(ToString::to_string),
            color: event.color.clone(),
            top: item.top,
            height: item.height,
            left: item.left,
            width: item.width,
        })
        .collect();
    JsonDay {
        date: date.to_string(),
        hour_height: layout.hour_height,
        min_event_height: layout.min_event_height,
        events,
    }
}
