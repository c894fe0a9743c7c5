//! Main entry point for rusty-cmd.
//!
//! Parses arguments, initializes logging, and runs the pipeline on a
//! single-threaded runtime. Ctrl-C at any point ends the run cleanly.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use rusty_cmd::{Cli, RunReport, app, ui, utils};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = match utils::logger::init_logging() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Warning: logging disabled: {:#}", e);
            None
        }
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let result = runtime.block_on(run_until_interrupted(cli));

    // An interrupted prompt leaves a blocking stdin read behind; don't wait for it.
    runtime.shutdown_background();

    match result? {
        Some(report) => {
            tracing::info!(outcome = ?report.outcome, "run finished");
            Ok(ExitCode::from(report.exit_code()))
        }
        None => Ok(ExitCode::SUCCESS),
    }
}

async fn run_until_interrupted(cli: Cli) -> Result<Option<RunReport>> {
    tokio::select! {
        report = app::run(cli) => report.map(Some),
        _ = tokio::signal::ctrl_c() => {
            ui::print_aborted();
            Ok(None)
        }
    }
}
