//! Input state for the key sequence currently being resolved.
//!
//! Keys received so far are buffered here across key events until the sequence
//! completes, fails, or is cancelled by a mode change. Each resolution attempt
//! re-reads the buffer from the start, so a sequence split across several key
//! events parses exactly like the same keys arriving together.

use crate::command::{Operation, ParseError};

/// Read cursor, descriptor queue and terminal flags for one key sequence.
///
/// The flags can only be raised through [`request_input`](Self::request_input),
/// [`request_mode`](Self::request_mode) and [`error`](Self::error). Once any of
/// them is raised, or `StopRequestingInput` has been queued, the state is halted
/// and [`next`](Self::next) yields nothing more.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    keys: Vec<String>,
    position: usize,
    queue: Vec<Operation>,
    next_mode: Option<String>,
    input_requested: bool,
    errors: Vec<ParseError>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a key to the sequence buffer.
    pub fn add_key(&mut self, key: impl Into<String>) {
        self.keys.push(key.into());
    }

    /// All keys buffered for the current sequence.
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Returns true when no keys are buffered.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns the next key and advances the read cursor.
    pub fn next(&mut self) -> Option<String> {
        if self.is_at_eof() {
            return None;
        }
        let key = self.keys[self.position].clone();
        self.position += 1;
        Some(key)
    }

    /// Rewinds the read cursor by exactly one key.
    pub fn backup(&mut self) {
        self.position = self.position.saturating_sub(1);
    }

    /// Returns true when [`next`](Self::next) would yield nothing.
    pub fn is_at_eof(&self) -> bool {
        self.is_halted() || self.position >= self.keys.len()
    }

    /// Concatenation of the keys consumed in this attempt.
    pub fn cumulative(&self) -> String {
        self.keys[..self.position].concat()
    }

    /// Number of keys consumed in this attempt.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn push(&mut self, operation: Operation) {
        self.queue.push(operation);
    }

    /// Descriptors queued so far.
    pub fn queue(&self) -> &[Operation] {
        &self.queue
    }

    pub fn clear_queue(&mut self) {
        self.queue.clear();
    }

    /// Queues `RequestInput` and marks the sequence as awaiting more keys.
    pub fn request_input(&mut self) {
        self.queue.push(Operation::RequestInput);
        self.input_requested = true;
    }

    pub fn input_requested(&self) -> bool {
        self.input_requested
    }

    /// Asks the dispatcher to change mode using `key` before anything executes.
    pub fn request_mode(&mut self, key: impl Into<String>) {
        self.next_mode = Some(key.into());
    }

    pub fn next_mode(&self) -> Option<&str> {
        self.next_mode.as_deref()
    }

    /// Records an error; the sequence is aborted.
    pub fn error(&mut self, error: ParseError) {
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Returns true once no further keys of this sequence may be consumed.
    pub fn is_halted(&self) -> bool {
        self.next_mode.is_some()
            || self.input_requested
            || !self.errors.is_empty()
            || matches!(self.queue.last(), Some(Operation::StopRequestingInput))
    }

    /// Prepares a new resolution attempt over the buffered keys.
    ///
    /// The read cursor goes back to the first key; the queue, flags and errors of
    /// the previous attempt are dropped.
    pub fn rewind(&mut self) {
        self.position = 0;
        self.queue.clear();
        self.next_mode = None;
        self.input_requested = false;
        self.errors.clear();
    }

    /// Moves the queued descriptors out, leaving the queue empty.
    pub fn take_queue(&mut self) -> Vec<Operation> {
        std::mem::take(&mut self.queue)
    }

    /// Moves the recorded errors out.
    pub fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }

    /// Discards everything, including buffered keys.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
