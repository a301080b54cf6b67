//! Shared driver loop for mode grammars.
//!
//! Every mode parses keys as a small state machine: a [`Grammar`] names its
//! steps and advances one step at a time against the [`InputState`]. The
//! [`resolve`] loop runs the steps and turns the state's flags into a
//! [`Resolution`] once the chain stops.

use crate::command::{Operation, ParseError};
use crate::input::InputState;

/// Outcome of one resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The sequence resolved; the queue is ready for the executor.
    Complete(Vec<Operation>),
    /// The sequence is a valid prefix. Buffered keys and the partial queue are
    /// kept until the next key arrives.
    AwaitingInput,
    /// A mode change was requested while parsing; nothing is executed.
    ModeChange(String),
    /// The sequence can't resolve; nothing is executed.
    Failed(Vec<ParseError>),
}

/// A mode's key grammar as an explicit state machine.
pub trait Grammar {
    type Step;

    /// The step every attempt starts from.
    fn start(&self) -> Self::Step;

    /// Runs one step. Returns the next step, or None when this branch of the
    /// parse is finished (the state's flags say how).
    fn advance(&self, step: Self::Step, state: &mut InputState) -> Option<Self::Step>;
}

/// Resolves the keys buffered in `state` with `grammar`.
///
/// After each step the state is checked for, in order, a mode-change request,
/// an input request and recorded errors; any of them stops the attempt. The
/// state is reset on every outcome except [`Resolution::AwaitingInput`].
///
/// Each call re-parses the whole buffer, so a sequence of n keys fed one at a
/// time costs O(n^2) steps in total. Sequences are a handful of keys; only a
/// long `t` argument makes this noticeable.
pub fn resolve<G: Grammar + ?Sized>(grammar: &G, state: &mut InputState) -> Resolution {
    state.rewind();

    let mut step = Some(grammar.start());
    while let Some(current) = step {
        step = grammar.advance(current, state);

        if let Some(key) = state.next_mode() {
            let key = key.to_string();
            state.reset();
            return Resolution::ModeChange(key);
        }
        if state.input_requested() {
            return Resolution::AwaitingInput;
        }
        if !state.errors().is_empty() {
            let errors = state.take_errors();
            state.reset();
            return Resolution::Failed(errors);
        }
    }

    let queue = state.take_queue();
    state.reset();
    Resolution::Complete(queue)
}
