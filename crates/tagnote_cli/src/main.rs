//! `tagnote` command-line entry point.
//!
//! # Responsibility
//! - Load configuration, optional logging and the notebook database.
//! - Dispatch one command per invocation.

mod commands;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{execute, execute_static, Cli};
use config::CliConfig;
use std::process::ExitCode;
use tagnote_core::db::open_db;
use tagnote_core::{init_logging, KvRepository, NotebookService, SqliteKvStore};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("tagnote: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let command = Cli::parse().command;
    let config = CliConfig::from_env();

    if let Some(log_dir) = config.log_dir.as_deref() {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if !command.needs_store() {
        return execute_static(&command, &mut out);
    }

    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let mut service = NotebookService::open(KvRepository::new(SqliteKvStore::new(&conn)))
        .context("failed to load notebook")?;
    log::debug!(
        "event=cli_command module=cli status=start command={}",
        command.name()
    );
    execute(command, &mut service, &mut out)
}
