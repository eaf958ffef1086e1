//! Add command: puts a new event on the calendar.

use std::io::Write;

use anyhow::{Context, Result, bail};
use chrono::Local;
use wk_core::{Category, CategoryId, DEFAULT_COLOR, TimeOfDay};
use wk_db::{Database, EventDraft};

use crate::commands::util::{parse_date, short_id, slugify};

/// Raw arguments for the add command.
#[derive(Debug)]
pub struct AddArgs {
    pub title: String,
    pub date: String,
    pub start: String,
    pub end: String,
    pub category: Option<String>,
    pub color: Option<String>,
}

/// Runs the add command.
pub fn run<W: Write>(writer: &mut W, db: &mut Database, args: &AddArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let date = parse_date(&args.date, today)?;
    let start: TimeOfDay = args
        .start
        .parse()
        .with_context(|| format!("invalid --start {:?}", args.start))?;
    let end: TimeOfDay = args
        .end
        .parse()
        .with_context(|| format!("invalid --end {:?}", args.end))?;
    if end <= start {
        // Accepted, but it will render as a minimum-height box.
        tracing::warn!(%start, %end, "event does not end after it starts");
    }

    let category = resolve_category(db, args.category.as_deref())?;
    let color = args
        .color
        .clone()
        .or_else(|| category.as_ref().map(|c| c.color.clone()))
        .unwrap_or_else(|| DEFAULT_COLOR.to_string());

    let draft = EventDraft {
        title: args.title.clone(),
        date,
        start,
        end,
        category: category.map(|c| c.id),
        color,
    };
    let event = db.create_event(&draft)?;

    writeln!(
        writer,
        "Added {:?} on {} {}-{} [{}]",
        event.title,
        event.date,
        event.start,
        event.end,
        short_id(&event.id),
    )?;
    Ok(())
}

/// Looks up the category named on the command line, if any.
///
/// The argument may be the category's name or its slug; both resolve to the
/// same ID.
fn resolve_category(db: &Database, raw: Option<&str>) -> Result<Option<Category>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let id = CategoryId::new(slugify(raw))
        .with_context(|| format!("invalid category name {raw:?}"))?;
    match db.get_category(&id)? {
        Some(category) => Ok(Some(category)),
        None => bail!("unknown category {raw:?}, run 'wk categories list' to see them"),
    }
}
