//! Edit command: changes fields of an existing event.

use std::io::Write;

use anyhow::{Context, Result, ensure};
use chrono::Local;
use wk_core::TimeOfDay;
use wk_db::Database;

use crate::commands::util::{parse_date, resolve_event, short_id};

/// Field changes for the edit command. `None` leaves a field untouched.
#[derive(Debug, Default)]
pub struct EditArgs {
    pub title: Option<String>,
    pub date: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub color: Option<String>,
}

/// Runs the edit command.
pub fn run<W: Write>(
    writer: &mut W,
    db: &mut Database,
    reference: &str,
    args: &EditArgs,
) -> Result<()> {
    let mut event = resolve_event(db, reference)?;

    if let Some(title) = &args.title {
        event.title.clone_from(title);
    }
    if let Some(date) = &args.date {
        let today = Local::now().date_naive();
        event.date = parse_date(date, today)?;
    }
    if let Some(start) = &args.start {
        event.start = start
            .parse::<TimeOfDay>()
            .with_context(|| format!("invalid --start {start:?}"))?;
    }
    if let Some(end) = &args.end {
        event.end = end
            .parse::<TimeOfDay>()
            .with_context(|| format!("invalid --end {end:?}"))?;
    }
    if let Some(color) = &args.color {
        event.color.clone_from(color);
    }

    if event.end <= event.start {
        tracing::warn!(%event.start, %event.end, "event does not end after it starts");
    }

    let updated = db.update_event(&event)?;
    ensure!(updated, "event {} no longer exists", short_id(&event.id));

    writeln!(
        writer,
        "Updated {:?}, now on {} {}-{} [{}]",
        event.title,
        event.date,
        event.start,
        event.end,
        short_id(&event.id),
    )?;
    Ok(())
}
