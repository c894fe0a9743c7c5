//! Console output for the command-line front end.
//!
//! Progress and results go to stdout, warnings and diagnostics to stderr.

use crossterm::style::Stylize;

use crate::security::PromptKind;
use crate::security::gate::Notice;
use crate::shell::ExecutionResult;

mod prompt;
pub use prompt::TerminalPrompter;

const RULE_WIDTH: usize = 20;

pub fn print_suggestion(command: &str) {
    println!("\n Suggested command: {}", command.blue().bold());
}

pub fn print_notice(notice: Notice) {
    match notice {
        Notice::InteractiveRequired => {
            println!("\n Command not executed. Use -i flag to execute with confirmation.");
        }
        Notice::AutoConfirmedDestructive => {
            eprintln!(
                "\n{} Executing destructive command without confirmation due to -y flag.",
                " WARNING!".red().bold()
            );
        }
    }
}

/// Text shown before reading a yes/no answer.
pub fn prompt_text(kind: PromptKind) -> String {
    match kind {
        PromptKind::Destructive => format!(
            "\n{} This command appears destructive or requires elevated privileges.\n Do you want to execute it anyway? (y/N): ",
            " WARNING!".red().bold()
        ),
        PromptKind::Plain => "\n Do you want to execute this command? (y/N): ".to_string(),
    }
}

pub fn print_declined() {
    println!(" Execution cancelled by user.");
}

pub fn print_aborted() {
    println!("\n Execution cancelled.");
}

pub fn print_execution_header(command: &str) {
    println!("\n Executing: {}", command);
    println!("{}", "-".repeat(RULE_WIDTH));
}

pub fn print_execution_result(result: &ExecutionResult) {
    if !result.stdout.is_empty() {
        println!("Output (stdout):");
        println!("{}", result.stdout);
    }
    if !result.stderr.is_empty() {
        eprintln!("Errors (stderr):");
        eprintln!("{}", result.stderr);
    }
    if !result.success() {
        eprintln!("\nWarning! Command finished with error code: {}", result.exit_code);
    }
}

pub fn print_launch_failure(err: &anyhow::Error) {
    eprintln!("\nError trying to execute the command: {:#}", err);
}
