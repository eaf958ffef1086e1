use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wk_cli::commands::{add, categories, day, edit, remove, week};
use wk_cli::{CategoriesAction, Cli, Commands, Config};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(wk_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = wk_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    let mut stdout = std::io::stdout();

    match &cli.command {
        Some(Commands::Add {
            title,
            date,
            start,
            end,
            category,
            color,
        }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            let args = add::AddArgs {
                title: title.clone(),
                date: date.clone(),
                start: start.clone(),
                end: end.clone(),
                category: category.clone(),
                color: color.clone(),
            };
            add::run(&mut stdout, &mut db, &args)?;
        }
        Some(Commands::Day { date, json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            day::run(&mut stdout, &db, date.as_deref(), *json, &config)?;
        }
        Some(Commands::Week { date, json }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            week::run(&mut stdout, &db, date.as_deref(), *json)?;
        }
        Some(Commands::Edit {
            id,
            title,
            date,
            start,
            end,
            color,
        }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            let args = edit::EditArgs {
                title: title.clone(),
                date: date.clone(),
                start: start.clone(),
                end: end.clone(),
                color: color.clone(),
            };
            edit::run(&mut stdout, &mut db, id, &args)?;
        }
        Some(Commands::Remove { id }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            remove::run(&mut stdout, &mut db, id)?;
        }
        Some(Commands::Categories { action }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            match action {
                CategoriesAction::List => categories::list(&mut stdout, &db)?,
                CategoriesAction::Add { name, color } => {
                    categories::add(&mut stdout, &mut db, name, color.as_deref())?;
                }
            }
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
