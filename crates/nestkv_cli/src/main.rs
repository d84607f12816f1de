//! nestkv CLI
//!
//! Interactive shell for the nestkv transactional key-value store.
//!
//! # Commands
//!
//! - `SET`, `GET`, `UNSET` - read and write keys
//! - `COUNTS`, `FIND` - query keys by value
//! - `BEGIN`, `COMMIT`, `ROLLBACK` - nested transactions
//! - `END`, `HELP` - session control

mod commands;
mod repl;

use clap::Parser;
use commands::dispatcher::Dispatcher;
use commands::stats::{StatsFormat, StatsReport};
use nestkv_core::{KeyCase, LayerStack, QueryStrategy, StoreConfig};
use repl::SessionOptions;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// In-memory key-value store with nested transactions.
#[derive(Parser)]
#[command(name = "nestkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Treat keys case-insensitively
    #[arg(short = 'i', long)]
    case_insensitive: bool,

    /// Algorithm for COUNTS and FIND (value-index, layer-index, full-scan)
    #[arg(short, long, default_value = "value-index")]
    strategy: QueryStrategy,

    /// Read commands from this file instead of stdin
    #[arg(long)]
    script: Option<PathBuf>,

    /// Suppress the banner, help text and prompt
    #[arg(short, long)]
    quiet: bool,

    /// Print session statistics on exit
    #[arg(long, value_enum)]
    stats: Option<StatsFormat>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let key_case = if cli.case_insensitive {
        KeyCase::Insensitive
    } else {
        KeyCase::Sensitive
    };
    let config = StoreConfig::new()
        .key_case(key_case)
        .query_strategy(cli.strategy);
    info!(?key_case, strategy = %cli.strategy, "starting session");

    let mut dispatcher = Dispatcher::new(LayerStack::with_config(config), io::stdout().lock());
    let lines = match &cli.script {
        Some(path) => {
            let input = BufReader::new(File::open(path)?);
            repl::run(input, &mut dispatcher, SessionOptions::default())?
        }
        None => {
            let stdin = io::stdin();
            let options = SessionOptions {
                interactive: !cli.quiet && stdin.is_terminal(),
            };
            repl::run(stdin.lock(), &mut dispatcher, options)?
        }
    };
    info!(lines, "session finished");

    if let Some(format) = cli.stats {
        StatsReport::collect(dispatcher.store()).write_to(dispatcher.out(), format)?;
    }

    Ok(())
}
