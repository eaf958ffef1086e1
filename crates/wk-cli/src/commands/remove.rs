//! Remove command: deletes an event.

use std::io::Write;

use anyhow::{Result, ensure};
use wk_db::Database;

use crate::commands::util::{resolve_event, short_id};

/// Runs the remove command.
pub fn run<W: Write>(writer: &mut W, db: &mut Database, reference: &str) -> Result<()> {
    let event = resolve_event(db, reference)?;
    let removed = db.remove_event(&event.id)?;
    ensure!(removed, "event {} no longer exists", short_id(&event.id));

    writeln!(
        writer,
        "Removed {:?} [{}]",
        event.title,
        short_id(&event.id)
    )?;
    Ok(())
}
