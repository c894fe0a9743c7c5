//! Shell subprocess execution for approved commands.
//!
//! Commands run through `/bin/sh -c` with stdout and stderr captured. There
//! is no timeout: the run blocks until the command exits.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::process::Command;
use tracing::{info, warn};

const SHELL: &str = "/bin/sh";

/// Captured result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionResult {
    pub stdout: String,
    pub stderr: String,
    /// `-1` when the process was terminated by a signal.
    pub exit_code: i32,
}

impl ExecutionResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Anything that can run a shell command line.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, command: &str) -> Result<ExecutionResult>;
}

#[derive(Debug, Clone, Default)]
pub struct ShellExecutor;

impl ShellExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellExecutor {
    async fn run(&self, command: &str) -> Result<ExecutionResult> {
        info!(command, "executing command");

        let output = Command::new(SHELL)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::inherit())
            .output()
            .await
            .with_context(|| format!("Failed to spawn {} for '{}'", SHELL, command))?;

        let result = ExecutionResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
        };

        if !result.success() {
            warn!(exit_code = result.exit_code, "command exited with non-zero status");
        }
        Ok(result)
    }
}
