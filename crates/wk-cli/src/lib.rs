//! Weekly planner CLI library.
//!
//! This crate provides the CLI interface for the week planner.

mod cli;
pub mod commands;
mod config;

pub use cli::{CategoriesAction, Cli, Commands};
pub use config::Config;
