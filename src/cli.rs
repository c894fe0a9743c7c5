//! Command-line arguments.

use clap::Parser;

use crate::security::RunMode;

#[derive(Debug, Clone, Parser)]
#[command(
    name = "rusty-cmd",
    version,
    about = "AI assistant to generate and execute Linux commands via Ollama."
)]
pub struct Cli {
    /// Natural language description of the desired command.
    #[arg(short, long)]
    pub prompt: String,

    /// Ask for confirmation before executing the command.
    #[arg(short, long)]
    pub interactive: bool,

    /// Skip confirmation when used with -i (USE WITH EXTREME CAUTION!).
    #[arg(short, long)]
    pub yes: bool,

    /// Ollama model name to use for this execution
    /// [default: $OLLAMA_DEFAULT_MODEL, else gemma3:1b].
    #[arg(long, value_name = "NAME")]
    pub model: Option<String>,
}

impl Cli {
    pub fn run_mode(&self) -> RunMode {
        RunMode {
            interactive: self.interactive,
            auto_confirm: self.yes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from(["rusty-cmd", "-p", "list files", "-i", "-y"]).unwrap();
        assert_eq!(cli.prompt, "list files");
        assert_eq!(
            cli.run_mode(),
            RunMode {
                interactive: true,
                auto_confirm: true
            }
        );
        assert_eq!(cli.model, None);
    }

    #[test]
    fn test_long_flags_and_model() {
        let cli = Cli::try_parse_from(["rusty-cmd", "--prompt", "show disk usage", "--model", "llama3.2"]).unwrap();
        assert_eq!(cli.model.as_deref(), Some("llama3.2"));
        assert!(!cli.interactive);
        assert!(!cli.yes);
    }

    #[test]
    fn test_prompt_is_required() {
        assert!(Cli::try_parse_from(["rusty-cmd", "-i"]).is_err());
    }
}
