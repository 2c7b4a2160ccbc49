use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime, SubsecRound};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tl_cli::commands::{add, analytics, delete, list, status, summary};
use tl_cli::{Cli, Commands, Config};
use tl_store::{JsonFile, RecordStore};

/// Load config and open the record store.
fn open_store(config_path: Option<&Path>) -> Result<(RecordStore<JsonFile>, Config)> {
    let config = load_config(config_path)?;
    let store = RecordStore::open_file(&config.data_path)
        .with_context(|| format!("failed to open {}", config.data_path.display()))?;
    Ok((store, config))
}

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

/// Local wall-clock time, truncated to whole seconds as stored on disk.
fn local_now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
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
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Add(args)) => {
            let (mut store, _config) = open_store(cli.config.as_deref())?;
            add::run(&mut stdout, &mut store, args, local_now())?;
        }
        Some(Commands::Delete { id }) => {
            let (mut store, _config) = open_store(cli.config.as_deref())?;
            delete::run(&mut stdout, &mut store, id)?;
        }
        Some(Commands::List(args)) => {
            let (store, _config) = open_store(cli.config.as_deref())?;
            list::run(&mut stdout, &store, args)?;
        }
        Some(Commands::Summary(args)) => {
            let (store, _config) = open_store(cli.config.as_deref())?;
            summary::run(&mut stdout, &store, args, local_now().date())?;
        }
        Some(Commands::Analytics { json }) => {
            let (store, _config) = open_store(cli.config.as_deref())?;
            analytics::run(&mut stdout, &store, *json)?;
        }
        Some(Commands::Status) => {
            let config = load_config(cli.config.as_deref())?;
            status::run(&mut stdout, &config)?;
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
