//! Roster CLI
//!
//! Interactive menu for adding, editing, searching and listing students.

use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use roster_core::{Config, StudentStore};

mod input;
mod shell;

use shell::Shell;

#[derive(Parser)]
#[command(name = "roster")]
#[command(about = "Roster - keep a list of students, their roll numbers and grades")]
#[command(version)]
struct Cli {
    /// Config file to use instead of ~/.config/roster/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Student list to open, overriding the configured location
    #[arg(long, value_name = "PATH")]
    data_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load_with_cli_override(cli.config.as_ref())
        .context("Failed to load configuration")?;
    if let Some(path) = cli.data_file {
        config.data_file = Some(path);
    }

    init_logging(&config);

    let mut store = StudentStore::open(&config);
    info!(
        "Opened student list {:?} with {} record(s)",
        store.path(),
        store.len()
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    Shell::new(&mut store, stdin.lock(), stdout.lock()).run()
}

/// Initialize logging
///
/// Only initializes if ROSTER_LOG environment variable is set.
/// Logs to file (config.log_file or default {data_dir}/debug.log) so
/// nothing lands between the menu lines on stdout.
fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var("ROSTER_LOG") else {
        return;
    };

    let log_path = config.log_path();

    if let Some(parent) = log_path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Warning: Could not create log directory {:?}: {}", parent, e);
            return;
        }
    }

    let log_file = match File::create(&log_path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Warning: Could not create log file {:?}: {}", log_path, e);
            return;
        }
    };

    let env_filter = EnvFilter::new(format!(
        "roster_core={},roster_cli={}",
        log_level, log_level
    ));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(log_file)
        .try_init();

    info!("Logging initialized to {:?}", log_path);
}
