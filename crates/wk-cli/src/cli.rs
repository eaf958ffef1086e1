//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Weekly planner for students.
///
/// Keeps a calendar of lectures, deadlines and revision blocks, and draws
/// each day as a column where overlapping events sit side by side.
#[derive(Debug, Parser)]
#[command(name = "wk", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add an event to the calendar.
    Add {
        /// Event title.
        title: String,

        /// Day the event is on (YYYY-MM-DD, 'today', 'tomorrow', or a
        /// weekday of the current week).
        #[arg(long, default_value = "today")]
        date: String,

        /// Start time (HH:MM, 24-hour).
        #[arg(long)]
        start: String,

        /// End time (HH:MM, 24-hour).
        #[arg(long)]
        end: String,

        /// Category the event belongs to.
        #[arg(long)]
        category: Option<String>,

        /// Display color (e.g., #4A90D9). Defaults to the category's color.
        #[arg(long)]
        color: Option<String>,
    },

    /// Show one day as a laid-out column.
    Day {
        /// Day to show (YYYY-MM-DD, 'today', 'tomorrow', or a weekday of
        /// the current week). Defaults to today.
        date: Option<String>,

        /// Output layout geometry as JSON instead of drawing.
        #[arg(long)]
        json: bool,
    },

    /// Show the week containing a date.
    Week {
        /// Any day inside the week to show. Defaults to today.
        date: Option<String>,

        /// Output the week's events and geometry as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Edit fields of an existing event.
    Edit {
        /// Event ID (a unique prefix is enough).
        id: String,

        /// New title.
        #[arg(long)]
        title: Option<String>,

        /// New day (YYYY-MM-DD, 'today', 'tomorrow', or a weekday).
        #[arg(long)]
        date: Option<String>,

        /// New start time (HH:MM).
        #[arg(long)]
        start: Option<String>,

        /// New end time (HH:MM).
        #[arg(long)]
        end: Option<String>,

        /// New display color.
        #[arg(long)]
        color: Option<String>,
    },

    /// Remove an event.
    Remove {
        /// Event ID (a unique prefix is enough).
        id: String,
    },

    /// Manage event categories.
    Categories {
        #[command(subcommand)]
        action: CategoriesAction,
    },
}

/// Category management subcommands.
#[derive(Debug, Subcommand)]
pub enum CategoriesAction {
    /// List all categories.
    List,

    /// Add a category.
    Add {
        /// Category name (the ID is a slug of this).
        name: String,

        /// Display color inherited by the category's events.
        #[arg(long)]
        color: Option<String>,
    },
}
