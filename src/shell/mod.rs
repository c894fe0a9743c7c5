//! Shell execution and process management module.
//!
//! This module runs approved commands in a subprocess and captures their
//! output for display.

mod subprocess;
pub use subprocess::{CommandRunner, ExecutionResult, ShellExecutor};
