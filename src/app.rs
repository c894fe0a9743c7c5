//! The request pipeline.
//!
//! configuration -> generation -> normalization -> safety check ->
//! confirmation gate -> execution. Every stage runs once, in order, on a
//! single task. A failed generation never reaches the executor.

use anyhow::Result;
use tracing::info;

use crate::ai::{self, CommandGenerator, InferenceClient};
use crate::cli::Cli;
use crate::config::{self, ConfigResolver, Configuration};
use crate::security::{ConfirmationGate, GateState, Prompter, RunMode, analyze_command};
use crate::shell::{CommandRunner, ExecutionResult, ShellExecutor};
use crate::ui::{self, TerminalPrompter};

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The backend failed or the answer held no usable command.
    NoCommand,
    /// Interactive mode was not requested.
    NotExecuted,
    /// The user answered something other than `y`.
    Declined,
    /// End-of-input or Ctrl-C at the prompt.
    Aborted,
    Executed(ExecutionResult),
    /// The shell could not be started.
    LaunchFailed,
}

impl RunOutcome {
    /// Process exit status. A failing executed command still exits 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::NoCommand => 1,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub suggestion: Option<String>,
    pub outcome: RunOutcome,
}

impl RunReport {
    pub fn exit_code(&self) -> u8 {
        self.outcome.exit_code()
    }
}

/// Resolve configuration from the real environment and run the pipeline
/// against the configured Ollama server.
pub async fn run(cli: Cli) -> Result<RunReport> {
    let resolver = ConfigResolver::new();
    let config = resolver.resolve(cli.model.as_deref());
    if let Some(path) = resolver.config_file() {
        config::load_config_file_into_env(path);
    }

    let client = InferenceClient::new(&config)?;
    let mut prompter = TerminalPrompter::new();
    let executor = ShellExecutor::new();

    Ok(run_pipeline(&config, &cli.prompt, cli.run_mode(), &client, &mut prompter, &executor).await)
}

pub async fn run_pipeline(
    config: &Configuration,
    user_prompt: &str,
    mode: RunMode,
    generator: &impl CommandGenerator,
    prompter: &mut impl Prompter,
    runner: &impl CommandRunner,
) -> RunReport {
    let Some(raw) = generator.generate(&config.model, user_prompt).await else {
        return RunReport {
            suggestion: None,
            outcome: RunOutcome::NoCommand,
        };
    };
    let Some(command) = ai::normalize(&raw) else {
        return RunReport {
            suggestion: None,
            outcome: RunOutcome::NoCommand,
        };
    };

    ui::print_suggestion(&command);
    info!(command = %command, ?mode, "command suggested");

    let mut gate = ConfirmationGate::new(mode);
    let outcome = match gate.run(|| analyze_command(&command), prompter).await {
        GateState::Confirmed => execute(&command, runner).await,
        GateState::Aborted => RunOutcome::Aborted,
        GateState::Cancelled if mode.interactive => RunOutcome::Declined,
        GateState::Cancelled | GateState::AwaitingDecision => RunOutcome::NotExecuted,
    };

    RunReport {
        suggestion: Some(command),
        outcome,
    }
}

async fn execute(command: &str, runner: &impl CommandRunner) -> RunOutcome {
    ui::print_execution_header(command);
    match runner.run(command).await {
        Ok(result) => {
            ui::print_execution_result(&result);
            RunOutcome::Executed(result)
        }
        Err(e) => {
            ui::print_launch_failure(&e);
            RunOutcome::LaunchFailed
        }
    }
}
