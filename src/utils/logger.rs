//! Logging initialization and configuration.
//!
//! Logs are written to files in the `logs/` directory next to the executable
//! so they never mix with the command's own stdout/stderr output.
//!
//! # Configuration
//!
//! Logging is off unless `RUST_LOG` is set:
//! - `RUST_LOG=debug` - Show debug and higher level logs
//! - `RUST_LOG=info` - Show info and higher level logs
//! - `RUST_LOG=warn` - Show warnings and errors only
//! - `RUST_LOG=error` - Show errors only

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize file logging if `RUST_LOG` is set.
///
/// Each run writes to its own file, e.g.
/// `logs/rusty-cmd.2024-12-06-14-30-25.log`. The returned guard must be
/// kept alive until exit so buffered lines are flushed.
pub fn init_logging() -> Result<Option<WorkerGuard>> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => return Ok(None),
    };

    let log_dir = log_dir();
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create logs directory {}", log_dir.display()))?;

    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let log_path = log_dir.join(format!("rusty-cmd.{}.log", timestamp));
    let log_file = fs::File::create(&log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("Logging initialized - writing to {}", log_path.display());
    Ok(Some(guard))
}

fn log_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("logs")))
        .unwrap_or_else(|| PathBuf::from("logs"))
}
