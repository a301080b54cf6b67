//! Insert mode: every key is text until escape.

use super::normal::INSERT_KEYS;
use super::resolver::{resolve, Grammar, Resolution};
use super::{Mode, ModeName};
use crate::command::{MotionKind, Operation, OperatorKind, ParseError};
use crate::input::keys::is_escape;
use crate::input::InputState;
use anyhow::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertMode;

impl InsertMode {
    /// Text inserted for `key`, if it is a text key.
    fn text_for(key: &str) -> Option<String> {
        match key {
            "enter" => Some("\n".to_string()),
            "tab" => Some("\t".to_string()),
            "space" => Some(" ".to_string()),
            k if k.chars().count() == 1 => Some(k.to_string()),
            _ => None,
        }
    }
}

impl Grammar for InsertMode {
    type Step = ();

    fn start(&self) {}

    fn advance(&self, _step: (), state: &mut InputState) -> Option<()> {
        let key = state.next()?;

        if is_escape(&key) {
            state.request_mode(key);
            return None;
        }

        let operation = if key == "backspace" {
            Operation::operator(OperatorKind::DeleteBackward)
        } else if let Some(text) = Self::text_for(&key) {
            Operation::operator(OperatorKind::Insert(text))
        } else {
            let sequence = state.cumulative();
            state.error(ParseError::UnknownCommand { sequence });
            return None;
        };

        state.push(operation);
        state.push(Operation::StopRequestingInput);
        None
    }
}

impl Mode for InsertMode {
    fn name(&self) -> ModeName {
        ModeName::Insert
    }

    fn should_be_activated(&self, key: &str, current: ModeName) -> bool {
        current == ModeName::Normal && INSERT_KEYS.contains(&key)
    }

    /// Places the cursor where typing starts for the key that entered the mode.
    fn handle_activation(&self, key: &str) -> Result<Vec<Operation>> {
        let effects = match key {
            "a" => vec![Operation::motion(MotionKind::Right)],
            "A" => vec![Operation::motion(MotionKind::LineEnd)],
            "I" => vec![Operation::motion(MotionKind::LineStart)],
            "o" => vec![Operation::operator(OperatorKind::OpenLineBelow)],
            "O" => vec![Operation::operator(OperatorKind::OpenLineAbove)],
            _ => Vec::new(),
        };
        Ok(effects)
    }

    fn handle_keys(&self, state: &mut InputState) -> Resolution {
        resolve(self, state)
    }
}
