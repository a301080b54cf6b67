//! Visual mode: motions extend the selection, operators consume it.

use super::normal::VISUAL_KEY;
use super::resolver::{resolve, Grammar, Resolution};
use super::{Mode, ModeName};
use crate::command::table::motion;
use crate::command::{MotionKind, Operation, OperatorKind, ParseError};
use crate::input::keys::is_escape;
use crate::input::InputState;

/// Key queued after an operator to drop back to Normal mode.
const LEAVE_KEY: &str = "esc";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisualMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualStep {
    Start,
    FindChar { backward: bool },
}

impl Grammar for VisualMode {
    type Step = VisualStep;

    fn start(&self) -> VisualStep {
        VisualStep::Start
    }

    fn advance(&self, step: VisualStep, state: &mut InputState) -> Option<VisualStep> {
        match step {
            VisualStep::Start => {
                let key = state.next()?;

                if is_escape(&key) {
                    state.request_mode(key);
                    return None;
                }

                let operator = match key.as_str() {
                    "d" | "x" => Some(OperatorKind::Delete),
                    "y" => Some(OperatorKind::Copy),
                    ">" => Some(OperatorKind::Indent),
                    "<" => Some(OperatorKind::Outdent),
                    "f" => return Some(VisualStep::FindChar { backward: false }),
                    "F" => return Some(VisualStep::FindChar { backward: true }),
                    _ => None,
                };

                if let Some(kind) = operator {
                    state.push(Operation::operator(kind));
                    state.push(Operation::change_mode(LEAVE_KEY));
                } else if let Some(kind) = motion(&key) {
                    state.push(Operation::selecting(kind));
                } else {
                    let sequence = state.cumulative();
                    state.error(ParseError::UnknownCommand { sequence });
                    return None;
                }
                state.push(Operation::StopRequestingInput);
                None
            }
            VisualStep::FindChar { backward } => {
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
                state.push(Operation::selecting(kind));
                state.push(Operation::StopRequestingInput);
                None
            }
        }
    }
}

impl Mode for VisualMode {
    fn name(&self) -> ModeName {
        ModeName::Visual
    }

    fn should_be_activated(&self, key: &str, current: ModeName) -> bool {
        current == ModeName::Normal && key == VISUAL_KEY
    }

    fn handle_keys(&self, state: &mut InputState) -> Resolution {
        resolve(self, state)
    }
}
