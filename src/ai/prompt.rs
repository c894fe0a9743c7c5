//! Prompt building utilities for AI requests.
//!
//! The model is asked for exactly one bare shell command. The instruction
//! text and the few-shot examples are plain data so they can be tuned
//! without touching the client.

/// Returned by the model when a request cannot be mapped to a command.
pub const ERROR_SENTINEL: &str = "ERROR: Could not generate command.";

/// System prompt that defines the assistant's behavior.
pub const SYSTEM_PROMPT: &str = "\
You are an expert Linux assistant. Your sole task is to translate the user's request
into a SINGLE executable Linux terminal command.
DO NOT add explanations, ANY introductory or concluding text, ANY notes.
DO NOT use markdown formatting (like ```bash ... ```).
ONLY return the pure, executable Linux command.
If the request cannot be reasonably translated into a Linux command or is ambiguous,
return the string 'ERROR: Could not generate command.'.";

/// A single few-shot exchange shown to the model.
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub user: &'static str,
    pub assistant: &'static str,
}

pub const FEW_SHOT_EXAMPLES: &[Example] = &[
    Example {
        user: "I want to know the size of the current folder",
        assistant: "du -sh .",
    },
    Example {
        user: "list the files in long format",
        assistant: "ls -l",
    },
    Example {
        user: "delete the temporary file",
        assistant: "rm temporary.log",
    },
    Example {
        user: "What's the weather like?",
        assistant: ERROR_SENTINEL,
    },
];

/// Stop sequences that keep the model from inventing further turns.
pub const STOP_SEQUENCES: &[&str] = &["\nUser:", "\nAssistant:"];

/// Build the complete prompt for a user request.
pub fn build_prompt(user_query: &str) -> String {
    let mut prompt = String::from(SYSTEM_PROMPT);

    prompt.push_str("\n\nExamples:\n");
    for example in FEW_SHOT_EXAMPLES {
        prompt.push_str(&format!("User: {}\n", example.user));
        prompt.push_str(&format!("Assistant: {}\n", example.assistant));
    }

    prompt.push_str(&format!("\nUser: {}\nAssistant:", user_query.trim()));
    prompt
}
