//! Storage layer for the week planner.
//!
//! Provides persistence for events and categories using `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! This means a `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization.
//!
//! For multi-threaded access, either:
//! - Use a `Mutex<Database>` to serialize access
//! - Create a connection pool (e.g., with `r2d2`)
//! - Use separate `Database` instances per thread
//!
//! # Schema
//!
//! ## Date and Time Format
//!
//! Dates are stored as TEXT in ISO 8601 calendar form (e.g., `2025-03-10`) and
//! times of day as zero-padded TEXT (e.g., `09:30`). Both forms ensure:
//! - Lexicographic ordering matches chronological ordering, so `ORDER BY`
//!   clauses sort events the way a day column expects them
//! - Human-readable values in the database
//!
//! Parsing back into [`wk_core::TimeOfDay`] happens once per row read;
//! everything downstream of this crate works with validated domain types.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;
use wk_core::{Category, CategoryId, Event, EventId, TimeOfDay, ValidationError};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to parse a stored calendar date.
    #[error("invalid date for event {event_id}: {value}")]
    DateParse {
        event_id: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    /// Failed to parse a stored time of day.
    #[error("invalid time for event {event_id}: {value}")]
    TimeParse {
        event_id: String,
        value: String,
        #[source]
        source: ValidationError,
    },
    /// A stored row failed validation when decoded into a domain type.
    #[error("invalid row {id}: {message}")]
    InvalidRow { id: String, message: String },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// Fields for an event about to be created.
///
/// The database assigns the identifier; everything else comes from the
/// caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub title: String,
    pub date: NaiveDate,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub category: Option<CategoryId>,
    pub color: String,
}

/// An event row before decoding into domain types.
struct EventRow {
    id: String,
    date: String,
    start: String,
    end: String,
    title: String,
    category: Option<String>,
    color: String,
}

impl EventRow {
    fn decode(self) -> Result<Event, DbError> {
        let date = self.date.parse().map_err(|source| DbError::DateParse {
            event_id: self.id.clone(),
            value: self.date.clone(),
            source,
        })?;
        let start = self.start.parse().map_err(|source| DbError::TimeParse {
            event_id: self.id.clone(),
            value: self.start.clone(),
            source,
        })?;
        let end = self.end.parse().map_err(|source| DbError::TimeParse {
            event_id: self.id.clone(),
            value: self.end.clone(),
            source,
        })?;
        let category = self
            .category
            .map(CategoryId::new)
            .transpose()
            .map_err(|err| DbError::InvalidRow {
                id: self.id.clone(),
                message: err.to_string(),
            })?;
        let id = EventId::new(self.id.clone()).map_err(|err| DbError::InvalidRow {
            id: self.id.clone(),
            message: err.to_string(),
        })?;
        Ok(Event {
            id,
            title: self.title,
            date,
            start,
            end,
            category,
            color: self.color,
        })
    }
}

const EVENT_COLUMNS: &str = "id, date, start, end, title, category_id, color";

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS categories (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                color TEXT NOT NULL
            );

            -- Events table: one row per calendar item
            -- date: ISO 8601 calendar date (e.g., '2025-03-10')
            -- start, end: zero-padded 24-hour time of day (e.g., '09:30'),
            --   so lexicographic ORDER BY is chronological
            CREATE TABLE IF NOT EXISTS events (
                id TEXT PRIMARY KEY,
                date TEXT NOT NULL,
                start TEXT NOT NULL,
                end TEXT NOT NULL,
                title TEXT NOT NULL,
                category_id TEXT,
                color TEXT NOT NULL,
                FOREIGN KEY (category_id) REFERENCES categories(id) ON DELETE SET NULL
            );

            CREATE INDEX IF NOT EXISTS idx_events_date ON events(date);
            CREATE INDEX IF NOT EXISTS idx_events_category ON events(category_id);
            ",
        )?;
        Ok(())
    }

    // ========== Events ==========

    /// Creates a new event from a draft, assigning a fresh identifier.
    ///
    /// Returns the stored event, including the generated ID.
    pub fn create_event(&mut self, draft: &EventDraft) -> Result<Event, DbError> {
        let event = Event {
            id: EventId::generate(),
            title: draft.title.clone(),
            date: draft.date,
            start: draft.start,
            end: draft.end,
            category: draft.category.clone(),
            color: draft.color.clone(),
        };
        self.conn.execute(
            "
            INSERT INTO events (id, date, start, end, title, category_id, color)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
            params![
                event.id.as_str(),
                event.date.to_string(),
                event.start.to_string(),
                event.end.to_string(),
                event.title,
                event.category.as_ref().map(CategoryId::as_str),
                event.color,
            ],
        )?;
        Ok(event)
    }

    /// Fetches a single event by ID.
    pub fn get_event(&self, id: &EventId) -> Result<Option<Event>, DbError> {
        let row = self
            .conn
            .query_row(
                &format!("SELECT {EVENT_COLUMNS} FROM events WHERE id = ?"),
                [id.as_str()],
                event_row,
            )
            .optional()?;
        row.map(EventRow::decode).transpose()
    }

    /// Lists all events on one calendar day, ordered by start time then ID.
    ///
    /// This is the order the layout engine expects its input in.
    pub fn events_on(&self, date: NaiveDate) -> Result<Vec<Event>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {EVENT_COLUMNS} FROM events
            WHERE date = ?
            ORDER BY start ASC, id ASC
            "
        ))?;
        let rows = stmt.query_map([date.to_string()], event_row)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?.decode()?);
        }
        Ok(events)
    }

    /// Lists events between two calendar days, inclusive of both ends.
    ///
    /// Ordered by date, then start time, then ID.
    pub fn events_between(
        &self,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<Event>, DbError> {
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {EVENT_COLUMNS} FROM events
            WHERE date >= ? AND date <= ?
            ORDER BY date ASC, start ASC, id ASC
            "
        ))?;
        let rows = stmt.query_map([first.to_string(), last.to_string()], event_row)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?.decode()?);
        }
        Ok(events)
    }

    /// Lists events whose ID starts with the given prefix, ordered by ID.
    ///
    /// Lets the CLI accept a short ID prefix instead of a full identifier.
    pub fn events_with_id_prefix(&self, prefix: &str) -> Result<Vec<Event>, DbError> {
        let pattern = format!(
            "{}%",
            prefix
                .replace('\\', "\\\\")
                .replace('%', "\\%")
                .replace('_', "\\_")
        );
        let mut stmt = self.conn.prepare(&format!(
            "
            SELECT {EVENT_COLUMNS} FROM events
            WHERE id LIKE ? ESCAPE '\\'
            ORDER BY id ASC
            "
        ))?;
        let rows = stmt.query_map([pattern], event_row)?;
        let mut events = Vec::new();
        for row in rows {
            events.push(row?.decode()?);
        }
        Ok(events)
    }

    /// Overwrites a stored event with new field values, matched by ID.
    ///
    /// Returns `false` if no event with that ID exists.
    pub fn update_event(&mut self, event: &Event) -> Result<bool, DbError> {
        let updated = self.conn.execute(
            "
            UPDATE events
            SET date = ?, start = ?, end = ?, title = ?, category_id = ?, color = ?
            WHERE id = ?
            ",
            params![
                event.date.to_string(),
                event.start.to_string(),
                event.end.to_string(),
                event.title,
                event.category.as_ref().map(CategoryId::as_str),
                event.color,
                event.id.as_str(),
            ],
        )?;
        Ok(updated > 0)
    }

    /// Deletes an event by ID.
    ///
    /// Returns `false` if no event with that ID exists.
    pub fn remove_event(&mut self, id: &EventId) -> Result<bool, DbError> {
        let deleted = self
            .conn
            .execute("DELETE FROM events WHERE id = ?", [id.as_str()])?;
        Ok(deleted > 0)
    }

    // ========== Categories ==========

    /// Inserts a category.
    ///
    /// Fails with a constraint error if the ID is already taken; callers
    /// check [`Database::get_category`] first when they want to report a
    /// friendlier duplicate message.
    pub fn add_category(&mut self, category: &Category) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO categories (id, name, color) VALUES (?, ?, ?)",
            params![category.id.as_str(), category.name, category.color],
        )?;
        Ok(())
    }

    /// Fetches a single category by ID.
    pub fn get_category(&self, id: &CategoryId) -> Result<Option<Category>, DbError> {
        let row = self
            .conn
            .query_row(
                "SELECT id, name, color FROM categories WHERE id = ?",
                [id.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .optional()?;
        row.map(|(id, name, color)| decode_category(id, name, color))
            .transpose()
    }

    /// Lists all categories, ordered by name then ID.
    pub fn list_categories(&self) -> Result<Vec<Category>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, color FROM categories ORDER BY name ASC, id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;
        let mut categories = Vec::new();
        for row in rows {
            let (id, name, color) = row?;
            categories.push(decode_category(id, name, color)?);
        }
        Ok(categories)
    }
}

fn event_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EventRow> {
    Ok(EventRow {
        id: row.get(0)?,
        date: row.get(1)?,
        start: row.get(2)?,
        end: row.get(3)?,
        title: row.get(4)?,
        category: row.get(5)?,
        color: row.get(6)?,
    })
}

fn decode_category(id: String, name: String, color: String) -> Result<Category, DbError> {
    let raw_id = id.clone();
    let id = CategoryId::new(id).map_err(|err| DbError::InvalidRow {
        id: raw_id,
        message: err.to_string(),
    })?;
    Ok(Category { id, name, color })
}
