//! Confirmation gate in front of command execution.
//!
//! The gate is a small state machine. It starts in `AwaitingDecision` and
//! ends in exactly one terminal state. Rules, in order:
//!
//! 1. Not interactive: cancelled, no prompt.
//! 2. Destructive without `--yes`: warning prompt.
//! 3. Destructive with `--yes`: confirmed, with a warning.
//! 4. Safe without `--yes`: plain prompt.
//! 5. Safe with `--yes`: confirmed silently.
//!
//! A prompt is accepted only by `y` (any case). End-of-input or an
//! interrupt while prompting aborts the whole run.

use tracing::info;

use super::DestructiveVerdict;
use crate::ui;

/// Flags that control the execution path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunMode {
    pub interactive: bool,
    pub auto_confirm: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    AwaitingDecision,
    Confirmed,
    /// Declined, or execution was never requested.
    Cancelled,
    /// Prompt hit end-of-input or was interrupted; the run must stop.
    Aborted,
}

impl GateState {
    pub fn is_terminal(self) -> bool {
        self != GateState::AwaitingDecision
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Red warning plus "execute it anyway?"
    Destructive,
    Plain,
}

/// What the user answered to a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Line(String),
    EndOfInput,
    Interrupted,
}

/// Message to show when the gate resolves without asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    InteractiveRequired,
    AutoConfirmedDestructive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStep {
    Prompt(PromptKind),
    Resolved {
        state: GateState,
        notice: Option<Notice>,
    },
}

/// Source of yes/no answers.
#[allow(async_fn_in_trait)]
pub trait Prompter {
    async fn ask(&mut self, kind: PromptKind) -> Reply;
}

#[derive(Debug)]
pub struct ConfirmationGate {
    mode: RunMode,
    state: GateState,
    pending: Option<PromptKind>,
}

impl ConfirmationGate {
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            state: GateState::AwaitingDecision,
            pending: None,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    /// Apply the rules. `classify` only runs in interactive mode.
    pub fn step(&mut self, classify: impl FnOnce() -> DestructiveVerdict) -> GateStep {
        if self.state.is_terminal() {
            return GateStep::Resolved {
                state: self.state,
                notice: None,
            };
        }
        if let Some(kind) = self.pending {
            return GateStep::Prompt(kind);
        }

        if !self.mode.interactive {
            return self.resolve(GateState::Cancelled, Some(Notice::InteractiveRequired));
        }

        let verdict = classify();
        info!(?verdict, auto_confirm = self.mode.auto_confirm, "gate evaluating command");

        match (verdict.is_destructive, self.mode.auto_confirm) {
            (true, false) => self.prompt(PromptKind::Destructive),
            (true, true) => self.resolve(GateState::Confirmed, Some(Notice::AutoConfirmedDestructive)),
            (false, false) => self.prompt(PromptKind::Plain),
            (false, true) => self.resolve(GateState::Confirmed, None),
        }
    }

    /// Feed the answer to a pending prompt.
    pub fn answer(&mut self, reply: Reply) -> GateState {
        if self.pending.take().is_none() {
            return self.state;
        }
        self.state = match reply {
            Reply::Line(line) if line.trim().eq_ignore_ascii_case("y") => GateState::Confirmed,
            Reply::Line(_) => GateState::Cancelled,
            Reply::EndOfInput | Reply::Interrupted => GateState::Aborted,
        };
        self.state
    }

    /// Drive the gate to a terminal state, prompting through `prompter`.
    pub async fn run(
        &mut self,
        classify: impl FnOnce() -> DestructiveVerdict,
        prompter: &mut impl Prompter,
    ) -> GateState {
        let state = match self.step(classify) {
            GateStep::Resolved { state, notice } => {
                if let Some(notice) = notice {
                    ui::print_notice(notice);
                }
                state
            }
            GateStep::Prompt(kind) => {
                let reply = prompter.ask(kind).await;
                self.answer(reply)
            }
        };

        match state {
            GateState::Cancelled if self.mode.interactive => ui::print_declined(),
            GateState::Aborted => ui::print_aborted(),
            _ => {}
        }
        state
    }

    fn prompt(&mut self, kind: PromptKind) -> GateStep {
        self.pending = Some(kind);
        GateStep::Prompt(kind)
    }

    fn resolve(&mut self, state: GateState, notice: Option<Notice>) -> GateStep {
        self.state = state;
        GateStep::Resolved { state, notice }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::security::VerdictReason;
    use std::collections::VecDeque;

    struct ScriptedPrompter {
        replies: VecDeque<Reply>,
        asked: Vec<PromptKind>,
    }

    impl ScriptedPrompter {
        fn new(replies: Vec<Reply>) -> Self {
            Self {
                replies: replies.into(),
                asked: Vec::new(),
            }
        }
    }

    impl Prompter for ScriptedPrompter {
        async fn ask(&mut self, kind: PromptKind) -> Reply {
            self.asked.push(kind);
            self.replies.pop_front().unwrap_or(Reply::EndOfInput)
        }
    }

    fn destructive() -> DestructiveVerdict {
        DestructiveVerdict::destructive(VerdictReason::MatchedKeyword, Some("rm"))
    }

    fn safe() -> DestructiveVerdict {
        DestructiveVerdict::safe()
    }

    fn mode(interactive: bool, auto_confirm: bool) -> RunMode {
        RunMode {
            interactive,
            auto_confirm,
        }
    }

    #[test]
    fn test_non_interactive_always_cancels() {
        for auto_confirm in [false, true] {
            for verdict in [destructive(), safe()] {
                let mut gate = ConfirmationGate::new(mode(false, auto_confirm));
                let step = gate.step(|| verdict);
                assert_eq!(
                    step,
                    GateStep::Resolved {
                        state: GateState::Cancelled,
                        notice: Some(Notice::InteractiveRequired),
                    }
                );
            }
        }
    }

    #[test]
    fn test_non_interactive_skips_classification() {
        let mut gate = ConfirmationGate::new(mode(false, false));
        gate.step(|| panic!("classifier must not run"));
        assert_eq!(gate.state(), GateState::Cancelled);
    }

    #[test]
    fn test_destructive_with_yes_confirms_with_warning() {
        let mut gate = ConfirmationGate::new(mode(true, true));
        assert_eq!(
            gate.step(destructive),
            GateStep::Resolved {
                state: GateState::Confirmed,
                notice: Some(Notice::AutoConfirmedDestructive),
            }
        );
    }

    #[test]
    fn test_safe_with_yes_confirms_silently() {
        let mut gate = ConfirmationGate::new(mode(true, true));
        assert_eq!(
            gate.step(safe),
            GateStep::Resolved {
                state: GateState::Confirmed,
                notice: None,
            }
        );
    }

    #[test]
    fn test_prompt_kinds() {
        let mut gate = ConfirmationGate::new(mode(true, false));
        assert_eq!(gate.step(destructive), GateStep::Prompt(PromptKind::Destructive));
        assert_eq!(gate.state(), GateState::AwaitingDecision);

        let mut gate = ConfirmationGate::new(mode(true, false));
        assert_eq!(gate.step(safe), GateStep::Prompt(PromptKind::Plain));
    }

    #[test]
    fn test_answers() {
        let cases = [
            (Reply::Line("y\n".to_string()), GateState::Confirmed),
            (Reply::Line("Y".to_string()), GateState::Confirmed),
            (Reply::Line("n".to_string()), GateState::Cancelled),
            (Reply::Line("yes".to_string()), GateState::Cancelled),
            (Reply::Line(String::new()), GateState::Cancelled),
            (Reply::EndOfInput, GateState::Aborted),
            (Reply::Interrupted, GateState::Aborted),
        ];
        for (reply, expected) in cases {
            let mut gate = ConfirmationGate::new(mode(true, false));
            gate.step(safe);
            assert_eq!(gate.answer(reply.clone()), expected, "reply {:?}", reply);
        }
    }

    #[test]
    fn test_answer_without_prompt_is_ignored() {
        let mut gate = ConfirmationGate::new(mode(true, true));
        gate.step(safe);
        assert_eq!(gate.answer(Reply::Line("n".to_string())), GateState::Confirmed);
    }

    #[tokio::test]
    async fn test_run_safe_declined() {
        let mut prompter = ScriptedPrompter::new(vec![Reply::Line("n".to_string())]);
        let mut gate = ConfirmationGate::new(mode(true, false));

        let state = gate.run(safe, &mut prompter).await;

        assert_eq!(state, GateState::Cancelled);
        assert_eq!(prompter.asked, vec![PromptKind::Plain]);
    }

    #[tokio::test]
    async fn test_run_destructive_accepted() {
        let mut prompter = ScriptedPrompter::new(vec![Reply::Line("y".to_string())]);
        let mut gate = ConfirmationGate::new(mode(true, false));

        let state = gate.run(destructive, &mut prompter).await;

        assert_eq!(state, GateState::Confirmed);
        assert_eq!(prompter.asked, vec![PromptKind::Destructive]);
    }

    #[tokio::test]
    async fn test_run_auto_confirm_never_prompts() {
        let mut prompter = ScriptedPrompter::new(vec![]);
        let mut gate = ConfirmationGate::new(mode(true, true));

        let state = gate.run(destructive, &mut prompter).await;

        assert_eq!(state, GateState::Confirmed);
        assert!(prompter.asked.is_empty());
    }

    #[tokio::test]
    async fn test_run_interrupt_aborts() {
        let mut prompter = ScriptedPrompter::new(vec![Reply::Interrupted]);
        let mut gate = ConfirmationGate::new(mode(true, false));

        assert_eq!(gate.run(destructive, &mut prompter).await, GateState::Aborted);
    }
}
