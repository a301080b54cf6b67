//! Normal mode command tables.
//!
//! Each parsing context maps a key, or a cumulative key sequence such as `dd`,
//! to the shape of the command it starts. The shape tells the resolver how many
//! further keys it needs and what to queue once they arrive.

use super::operation::{MotionKind, Operation, OperatorKind, TargetRange};

/// Parsing context a key is looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    /// Top-level keys, and cumulative sequences like `dd`.
    Plain,
    /// Keys valid right after an operator, awaiting its target.
    OperatorPending,
}

/// The shape of a command found in a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// An operator that needs a target (`d`, `y`).
    Operator(OperatorKind),
    /// An operator that also enters insert mode once its target resolves (`c`).
    ChangingOperator(OperatorKind),
    /// Complete on its own (`x`, `dd`, `w`).
    Terminal(Operation),
    /// Complete on its own, then enters insert mode (`cc`, `C`).
    ChangingTerminal(Operation),
    /// `a`/`i` prefix of a two-key text object.
    TextObject,
    /// Takes exactly one more key as its argument (`f`, `F`).
    FindChar { backward: bool, selecting: bool },
    /// Collects keys until the argument terminator (`t`).
    UntilTerminator { selecting: bool },
}

/// Looks up `key` in the table for `context`.
pub fn lookup(context: Context, key: &str) -> Option<Command> {
    match context {
        Context::Plain => plain(key),
        Context::OperatorPending => operator_pending(key),
    }
}

fn plain(key: &str) -> Option<Command> {
    use Command::*;

    let command = match key {
        "d" => Operator(OperatorKind::Delete),
        "y" => Operator(OperatorKind::Copy),
        ">" => Operator(OperatorKind::Indent),
        "<" => Operator(OperatorKind::Outdent),
        "c" => ChangingOperator(OperatorKind::Delete),

        "u" => Terminal(Operation::operator(OperatorKind::Undo)),
        "x" => Terminal(Operation::operator(OperatorKind::Delete)),
        "X" => Terminal(Operation::operator(OperatorKind::DeleteBackward)),
        "D" => Terminal(Operation::operator_on(
            OperatorKind::Delete,
            TargetRange::ToLineEnd,
        )),
        "dd" => Terminal(Operation::operator_on(
            OperatorKind::Delete,
            TargetRange::FullLine,
        )),
        "yy" | "Y" => Terminal(Operation::operator_on(
            OperatorKind::Copy,
            TargetRange::FullLine,
        )),
        ">>" => Terminal(Operation::operator_on(
            OperatorKind::Indent,
            TargetRange::FullLine,
        )),
        "<<" => Terminal(Operation::operator_on(
            OperatorKind::Outdent,
            TargetRange::FullLine,
        )),

        "cc" | "S" => ChangingTerminal(Operation::operator_on(
            OperatorKind::Delete,
            TargetRange::FullLine,
        )),
        "C" => ChangingTerminal(Operation::operator_on(
            OperatorKind::Delete,
            TargetRange::ToLineEnd,
        )),

        "f" => FindChar {
            backward: false,
            selecting: false,
        },
        "F" => FindChar {
            backward: true,
            selecting: false,
        },
        "t" => UntilTerminator { selecting: false },

        other => return motion(other).map(|kind| Terminal(Operation::motion(kind))),
    };

    Some(command)
}

fn operator_pending(key: &str) -> Option<Command> {
    use Command::*;

    let command = match key {
        "a" | "i" => TextObject,
        "aw" => Terminal(Operation::selecting(MotionKind::AroundWord)),
        "iw" => Terminal(Operation::selecting(MotionKind::InnerWord)),
        "aW" => Terminal(Operation::selecting(MotionKind::AroundBigWord)),
        "iW" => Terminal(Operation::selecting(MotionKind::InnerBigWord)),
        "f" => FindChar {
            backward: false,
            selecting: true,
        },
        "F" => FindChar {
            backward: true,
            selecting: true,
        },
        "t" => UntilTerminator { selecting: true },
        other => return motion(other).map(|kind| Terminal(Operation::selecting(kind))),
    };

    Some(command)
}

/// Single-key motions shared by both contexts.
pub(crate) fn motion(key: &str) -> Option<MotionKind> {
    let kind = match key {
        "h" | "left" => MotionKind::Left,
        "j" | "down" => MotionKind::Down,
        "k" | "up" => MotionKind::Up,
        "l" | "right" => MotionKind::Right,
        "w" | "W" => MotionKind::WordRight,
        "b" | "B" => MotionKind::WordLeft,
        "0" | "home" => MotionKind::LineStart,
        "$" | "end" => MotionKind::LineEnd,
        _ => return None,
    };
    Some(kind)
}
