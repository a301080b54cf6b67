//! Modes and the dispatcher that switches between them.
//!
//! This module provides the `ModeName` enum, the [`Mode`] trait each mode
//! implements, and the collaborator traits the dispatcher hands its results to.
//! Following vim-style modal editing, exactly one mode is active at a time and
//! it decides how incoming keys are parsed.
//!
//! # Modes
//!
//! - **Normal**: The default mode for motions and operators
//! - **Insert**: Typed keys become text insertions
//! - **Visual**: Motions extend a selection that operators then apply to
//!
//! # Example
//!
//! ```
//! use modalkeys::mode::ModeName;
//!
//! let mode = ModeName::default();
//! assert_eq!(mode, ModeName::Normal);
//! assert_eq!(format!("{}", ModeName::Insert), "INSERT");
//! ```

pub mod dispatcher;
pub mod insert;
pub mod normal;
pub mod resolver;
pub mod visual;

pub use dispatcher::{KeyOutcome, ModeDispatcher};
pub use insert::InsertMode;
pub use normal::NormalMode;
pub use resolver::{resolve, Grammar, Resolution};
pub use visual::VisualMode;

use crate::command::Operation;
use crate::input::InputState;
use anyhow::Result;
use std::fmt;

/// Identity of a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ModeName {
    /// Default mode for motions and operators.
    #[default]
    Normal,
    /// Mode for typing text.
    Insert,
    /// Mode for selecting a region.
    Visual,
}

impl fmt::Display for ModeName {
    /// Formats the mode as an uppercase string suitable for the status line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeName::Normal => write!(f, "NORMAL"),
            ModeName::Insert => write!(f, "INSERT"),
            ModeName::Visual => write!(f, "VISUAL"),
        }
    }
}

/// Behaviour of one mode.
///
/// Modes hold no mutable state: whether a mode is active is tracked by the
/// [`ModeDispatcher`], and the in-progress sequence lives in the
/// [`InputState`] it passes in.
pub trait Mode {
    fn name(&self) -> ModeName;

    /// Returns true if this mode claims `key` while `current` is active.
    fn should_be_activated(&self, key: &str, current: ModeName) -> bool;

    /// Called after this mode becomes active; returns effects for the executor.
    fn handle_activation(&self, _key: &str) -> Result<Vec<Operation>> {
        Ok(Vec::new())
    }

    /// Called before another mode becomes active.
    fn handle_deactivation(&self) -> Result<Vec<Operation>> {
        Ok(Vec::new())
    }

    /// Parses the buffered keys.
    fn handle_keys(&self, state: &mut InputState) -> Resolution;
}

/// Applies resolved descriptor queues, e.g. to a text buffer.
///
/// Fire-and-forget: nothing flows back into the parser.
pub trait Executor {
    fn execute(&mut self, operations: Vec<Operation>);
}

/// Receives the mode indicator text on every mode switch.
pub trait StatusDisplay {
    fn show(&mut self, text: &str);
}

/// Returns the modes every dispatcher starts with, default mode first.
pub fn default_modes(argument_terminator: &str) -> Vec<Box<dyn Mode>> {
    vec![
        Box::new(NormalMode::new(argument_terminator)),
        Box::new(InsertMode),
        Box::new(VisualMode),
    ]
}
