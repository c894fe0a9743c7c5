//! Interactive yes/no prompt on the controlling terminal.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tracing::warn;

use crate::security::{PromptKind, Prompter, Reply};

/// Reads answers from stdin. Ctrl-C while waiting counts as an interrupt.
pub struct TerminalPrompter {
    stdin: BufReader<Stdin>,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            stdin: BufReader::new(tokio::io::stdin()),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    async fn ask(&mut self, kind: PromptKind) -> Reply {
        print!("{}", super::prompt_text(kind));
        if let Err(e) = std::io::stdout().flush() {
            warn!("Failed to flush prompt: {}", e);
        }

        let mut line = String::new();
        let read = tokio::select! {
            _ = tokio::signal::ctrl_c() => None,
            res = self.stdin.read_line(&mut line) => Some(res),
        };

        match read {
            None => Reply::Interrupted,
            Some(Ok(0)) => Reply::EndOfInput,
            Some(Ok(_)) => Reply::Line(line),
            Some(Err(e)) => {
                warn!("Failed to read answer: {}", e);
                Reply::EndOfInput
            }
        }
    }
}
