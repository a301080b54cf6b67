//! Normal mode: operators, motions and text objects.
//!
//! The grammar walks the plain and operator-pending command tables. A sequence
//! such as `d a w` goes through these steps:
//!
//! ```text
//! OperatorOrMotion --d--> Run(Operator) --> OperatorPending --a--> Run(TextObject)
//!     --w--> Run(Terminal(aw)) --> done
//! ```
//!
//! Any step may instead request more input (the keys stay buffered and the
//! whole sequence is re-parsed when the next key arrives) or record an error.

use super::resolver::{resolve, Grammar, Resolution};
use super::{Mode, ModeName};
use crate::command::{lookup, Command, Context, MotionKind, Operation, ParseError};
use crate::input::keys::is_escape;
use crate::input::InputState;
use anyhow::Result;

/// Keys that leave Normal mode for Insert mode.
pub const INSERT_KEYS: [&str; 6] = ["i", "I", "a", "A", "o", "O"];

/// Key that leaves Normal mode for Visual mode.
pub const VISUAL_KEY: &str = "v";

/// Mode key queued by operators that continue in insert mode (`c`).
const CHANGE_MODE_KEY: &str = "i";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalMode {
    terminator: String,
}

/// Parse steps of the Normal mode grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalStep {
    /// First key of a sequence.
    OperatorOrMotion,
    /// An operator is queued and the next key names its target.
    OperatorPending,
    /// A table entry was found; run its command shape.
    Run(Command),
}

impl NormalMode {
    /// Creates the mode; `terminator` ends the argument of `t`.
    pub fn new(terminator: impl Into<String>) -> Self {
        Self {
            terminator: terminator.into(),
        }
    }

    fn operator_or_motion(&self, state: &mut InputState) -> Option<NormalStep> {
        let key = state.next()?;

        if is_escape(&key) {
            state.request_mode(key);
            return None;
        }

        if INSERT_KEYS.contains(&key.as_str()) || key == VISUAL_KEY {
            state.push(Operation::change_mode(key));
            state.push(Operation::StopRequestingInput);
            return None;
        }

        match lookup(Context::Plain, &key) {
            Some(command) => Some(NormalStep::Run(command)),
            None => {
                let sequence = state.cumulative();
                state.error(ParseError::UnknownCommand { sequence });
                None
            }
        }
    }

    fn operator_pending(&self, state: &mut InputState) -> Option<NormalStep> {
        let key = state.next()?;

        if let Some(command) = lookup(Context::OperatorPending, &key) {
            return Some(NormalStep::Run(command));
        }

        // Doubled-key idioms (dd, yy, cc) replace whatever the operator queued.
        let sequence = state.cumulative();
        if let Some(command) = lookup(Context::Plain, &sequence) {
            state.clear_queue();
            return Some(NormalStep::Run(command));
        }

        state.error(ParseError::UnknownCommand { sequence });
        None
    }

    fn run(&self, command: Command, state: &mut InputState) -> Option<NormalStep> {
        match command {
            Command::Operator(kind) => {
                state.push(Operation::operator(kind));
                Self::await_target(state)
            }
            Command::ChangingOperator(kind) => {
                state.push(Operation::operator(kind));
                state.push(Operation::change_mode(CHANGE_MODE_KEY));
                Self::await_target(state)
            }
            Command::Terminal(operation) => {
                state.push(operation);
                state.push(Operation::StopRequestingInput);
                None
            }
            Command::ChangingTerminal(operation) => {
                state.push(operation);
                state.push(Operation::change_mode(CHANGE_MODE_KEY));
                state.push(Operation::StopRequestingInput);
                None
            }
            Command::TextObject => Self::text_object(state),
            Command::FindChar {
                backward,
                selecting,
            } => {
                if state.is_at_eof() {
                    state.request_input();
                    return None;
                }
                let arg = state.next()?;
                let kind = if backward {
                    MotionKind::FindBackward(arg)
                } else {
                    MotionKind::Find(arg)
                };
                state.push(Operation::Motion { kind, selecting });
                state.push(Operation::StopRequestingInput);
                None
            }
            Command::UntilTerminator { selecting } => self.until_terminator(selecting, state),
        }
    }

    fn await_target(state: &mut InputState) -> Option<NormalStep> {
        if state.is_at_eof() {
            state.request_input();
            None
        } else {
            Some(NormalStep::OperatorPending)
        }
    }

    fn text_object(state: &mut InputState) -> Option<NormalStep> {
        // Re-read the prefix so it stays part of the sequence on a later retry.
        state.backup();
        let prefix = state.next()?;
        if state.is_at_eof() {
            state.request_input();
            return None;
        }

        let arg = state.next()?;
        let sequence = format!("{}{}", prefix, arg);
        match lookup(Context::OperatorPending, &sequence) {
            Some(command @ Command::Terminal(_)) => Some(NormalStep::Run(command)),
            _ => {
                state.error(ParseError::BadTextObject { sequence });
                None
            }
        }
    }

    fn until_terminator(&self, selecting: bool, state: &mut InputState) -> Option<NormalStep> {
        let mut args = String::new();
        while let Some(key) = state.next() {
            if key == self.terminator {
                state.push(Operation::Motion {
                    kind: MotionKind::Until(args),
                    selecting,
                });
                state.push(Operation::StopRequestingInput);
                return None;
            }
            args.push_str(&key);
        }

        // An unterminated argument abandons the whole queue, not just this step.
        state.clear_queue();
        state.request_input();
        None
    }
}

impl Default for NormalMode {
    fn default() -> Self {
        Self::new("enter")
    }
}

impl Grammar for NormalMode {
    type Step = NormalStep;

    fn start(&self) -> NormalStep {
        NormalStep::OperatorOrMotion
    }

    fn advance(&self, step: NormalStep, state: &mut InputState) -> Option<NormalStep> {
        match step {
            NormalStep::OperatorOrMotion => self.operator_or_motion(state),
            NormalStep::OperatorPending => self.operator_pending(state),
            NormalStep::Run(command) => self.run(command, state),
        }
    }
}

impl Mode for NormalMode {
    fn name(&self) -> ModeName {
        ModeName::Normal
    }

    fn should_be_activated(&self, key: &str, _current: ModeName) -> bool {
        is_escape(key)
    }

    fn handle_activation(&self, _key: &str) -> Result<Vec<Operation>> {
        Ok(vec![Operation::motion(MotionKind::Left)])
    }

    fn handle_keys(&self, state: &mut InputState) -> Resolution {
        resolve(self, state)
    }
}
