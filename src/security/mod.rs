//! Security module for command analysis and the execution gate.
//!
//! This module classifies generated commands against a fixed table of
//! destructive programs and decides, together with the run flags and the
//! user, whether a command may be executed.

mod analyzer;
pub mod gate;
pub mod rules;

pub use analyzer::analyze_command;
pub use gate::{ConfirmationGate, GateState, PromptKind, Prompter, Reply, RunMode};

/// Why a command was (or was not) flagged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerdictReason {
    None,
    ElevatedPrivilege,
    MatchedKeyword,
    /// Shell word splitting failed, so the command could not be inspected.
    Unparseable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestructiveVerdict {
    pub is_destructive: bool,
    pub reason: VerdictReason,
    /// Rule table entry that triggered the verdict.
    pub matched: Option<&'static str>,
}

impl DestructiveVerdict {
    pub fn safe() -> Self {
        Self {
            is_destructive: false,
            reason: VerdictReason::None,
            matched: None,
        }
    }

    pub fn destructive(reason: VerdictReason, matched: Option<&'static str>) -> Self {
        Self {
            is_destructive: true,
            reason,
            matched,
        }
    }
}
