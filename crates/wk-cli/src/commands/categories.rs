//! Categories command: manages the kinds of events and their colors.

use std::io::Write;

use anyhow::{Context, Result, bail};
use wk_core::{Category, CategoryId, DEFAULT_COLOR};
use wk_db::Database;

use crate::commands::util::slugify;

/// Runs `categories list`.
pub fn list<W: Write>(writer: &mut W, db: &Database) -> Result<()> {
    let categories = db.list_categories()?;
    if categories.is_empty() {
        writeln!(writer, "No categories defined.")?;
        writeln!(writer)?;
        writeln!(writer, "Hint: Run 'wk categories add <name>' to create one.")?;
        return Ok(());
    }

    for category in categories {
        writeln!(
            writer,
            "{:<16} {:<20} {}",
            category.id.as_str(),
            category.name,
            category.color
        )?;
    }
    Ok(())
}

/// Runs `categories add`.
pub fn add<W: Write>(
    writer: &mut W,
    db: &mut Database,
    name: &str,
    color: Option<&str>,
) -> Result<()> {
    let id = CategoryId::new(slugify(name))
        .with_context(|| format!("category name {name:?} must contain letters or digits"))?;
    if db.get_category(&id)?.is_some() {
        bail!("category '{id}' already exists");
    }

    let category = Category {
        id,
        name: name.to_string(),
        color: color.unwrap_or(DEFAULT_COLOR).to_string(),
    };
    db.add_category(&category)?;

    writeln!(
        writer,
        "Added category '{}' ({})",
        category.id,
        category.color
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_slugs_name_into_id() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();

        add(&mut output, &mut db, "Group Project", Some("#7ED321")).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Added category 'group-project' (#7ED321)"));

        let stored = db
            .get_category(&CategoryId::new("group-project").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, "Group Project");
    }

    #[test]
    fn add_defaults_color() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();

        add(&mut output, &mut db, "Lecture", None).unwrap();

        let stored = db
            .get_category(&CategoryId::new("lecture").unwrap())
            .unwrap()
            .unwrap();
        assert_eq!(stored.color, DEFAULT_COLOR);
    }

    #[test]
    fn add_rejects_duplicate_slug() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();

        add(&mut output, &mut db, "Lecture", None).unwrap();
        let err = add(&mut output, &mut db, "LECTURE", None).unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn add_rejects_punctuation_only_name() {
        let mut db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();

        let err = add(&mut output, &mut db, "!!!", None).unwrap_err();
        assert!(err.to_string().contains("must contain letters or digits"));
    }

    #[test]
    fn list_shows_rows_or_hint() {
        let mut db = Database::open_in_memory().unwrap();

        let mut empty_output = Vec::new();
        list(&mut empty_output, &db).unwrap();
        assert!(String::from_utf8(empty_output).unwrap().contains("Hint:"));

        add(&mut Vec::new(), &mut db, "Deadline", Some("#D0021B")).unwrap();
        let mut output = Vec::new();
        list(&mut output, &db).unwrap();

        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("deadline"));
        assert!(output.contains("Deadline"));
        assert!(output.contains("#D0021B"));
    }
}
