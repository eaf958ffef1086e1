//! CLI subcommand implementations.

pub mod add;
pub mod categories;
pub mod day;
pub mod edit;
pub mod remove;
pub mod util;
pub mod week;
