//! RustyCmd - natural language to a single shell command, via a local Ollama server.
//!
//! This library provides the pieces of the `rusty-cmd` pipeline:
//! - Configuration resolution (CLI flag, environment, `.env` file, defaults)
//! - Command generation and response normalization
//! - Destructive-command detection and the confirmation gate
//! - Shell execution of approved commands
//!
//! # Example
//!
//! ```no_run
//! use rusty_cmd::ai::{CommandGenerator, InferenceClient, normalize};
//! use rusty_cmd::config::ConfigResolver;
//! use rusty_cmd::security::analyze_command;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigResolver::new().resolve(None);
//!     let client = InferenceClient::new(&config)?;
//!
//!     if let Some(raw) = client.generate(&config.model, "show disk usage").await {
//!         if let Some(command) = normalize(&raw) {
//!             println!("{} -> {:?}", command, analyze_command(&command));
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod app;
pub mod cli;
pub mod config;
pub mod security;
pub mod shell;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use app::{RunOutcome, RunReport, run_pipeline};
pub use cli::Cli;
pub use config::{ConfigResolver, Configuration};
pub use security::{DestructiveVerdict, VerdictReason, analyze_command};
