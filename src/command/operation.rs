//! Operation descriptors produced by a resolved key sequence.
//!
//! A descriptor says *what* should happen (move a word right, delete the current
//! line, switch to insert mode) and never touches a document itself. An external
//! [`Executor`](crate::mode::Executor) applies the queue in order.

use serde::Serialize;
use std::fmt;

/// Cursor motion kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "arg")]
pub enum MotionKind {
    Left,
    Right,
    Up,
    Down,
    WordLeft,
    WordRight,
    LineStart,
    LineEnd,
    /// Text object `aw`
    AroundWord,
    /// Text object `iw`
    InnerWord,
    /// Text object `aW`
    AroundBigWord,
    /// Text object `iW`
    InnerBigWord,
    /// `f<char>`: forward to the next occurrence of the character
    Find(String),
    /// `F<char>`: backward to the previous occurrence of the character
    FindBackward(String),
    /// `t<text><terminator>`: forward until the collected text
    Until(String),
}

/// Operator kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text")]
pub enum OperatorKind {
    Delete,
    DeleteBackward,
    Copy,
    Undo,
    Indent,
    Outdent,
    OpenLineBelow,
    OpenLineAbove,
    Insert(String),
}

/// A range an operator applies to without needing a following motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TargetRange {
    /// The whole current line (`dd`, `yy`)
    FullLine,
    /// From the cursor to the end of the line (`D`, `C`)
    ToLineEnd,
}

/// One semantic action handed to the executor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op")]
pub enum Operation {
    /// Move the cursor; `selecting` extends the pending operator's region or the
    /// visual selection instead of just moving.
    Motion { kind: MotionKind, selecting: bool },
    /// Apply an operator, optionally to a fixed range.
    Operator {
        kind: OperatorKind,
        range: Option<TargetRange>,
    },
    /// Ask the dispatcher to switch to the mode claiming this key.
    ChangeMode { key: String },
    /// The sequence needs another key before it resolves.
    RequestInput,
    /// The sequence is complete.
    StopRequestingInput,
}

impl Operation {
    pub fn motion(kind: MotionKind) -> Self {
        Operation::Motion {
            kind,
            selecting: false,
        }
    }

    pub fn selecting(kind: MotionKind) -> Self {
        Operation::Motion {
            kind,
            selecting: true,
        }
    }

    pub fn operator(kind: OperatorKind) -> Self {
        Operation::Operator { kind, range: None }
    }

    pub fn operator_on(kind: OperatorKind, range: TargetRange) -> Self {
        Operation::Operator {
            kind,
            range: Some(range),
        }
    }

    pub fn change_mode(key: impl Into<String>) -> Self {
        Operation::ChangeMode { key: key.into() }
    }

    /// Returns true for `RequestInput` and `StopRequestingInput`.
    pub fn is_control(&self) -> bool {
        matches!(
            self,
            Operation::RequestInput | Operation::StopRequestingInput
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Motion { kind, selecting } => {
                write!(f, "motion {:?}", kind)?;
                if *selecting {
                    write!(f, " (selecting)")?;
                }
                Ok(())
            }
            Operation::Operator { kind, range } => match range {
                Some(range) => write!(f, "operator {:?} on {:?}", kind, range),
                None => write!(f, "operator {:?}", kind),
            },
            Operation::ChangeMode { key } => write!(f, "change mode '{}'", key),
            Operation::RequestInput => write!(f, "request input"),
            Operation::StopRequestingInput => write!(f, "stop"),
        }
    }
}
