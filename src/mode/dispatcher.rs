//! Routes keys to the active mode and performs mode switches.

use super::resolver::Resolution;
use super::{default_modes, Executor, Mode, ModeName, StatusDisplay};
use crate::command::{Operation, ParseError};
use crate::config::Config;
use crate::input::{InputState, KeyTranslator, KeyboardLayout};
use anyhow::{bail, Context, Result};
use tracing::{debug, info, warn};

/// What a single key event led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// A sequence resolved and its queue went to the executor.
    Executed,
    /// The keys so far are a valid prefix; they stay buffered.
    AwaitingInput,
    /// The active mode asked for a mode change with this key; the sequence was
    /// dropped.
    ModeRequested(String),
    /// The sequence failed to parse; nothing was executed.
    Rejected(Vec<ParseError>),
}

/// Owns the modes, the active-mode selection and the in-progress sequence.
///
/// # Example
///
/// ```
/// use modalkeys::command::Operation;
/// use modalkeys::config::Config;
/// use modalkeys::mode::{Executor, KeyOutcome, ModeDispatcher, ModeName, StatusDisplay};
///
/// #[derive(Default)]
/// struct Log(Vec<Vec<Operation>>);
/// impl Executor for Log {
///     fn execute(&mut self, operations: Vec<Operation>) {
///         self.0.push(operations);
///     }
/// }
///
/// #[derive(Default)]
/// struct Status(String);
/// impl StatusDisplay for Status {
///     fn show(&mut self, text: &str) {
///         self.0 = text.to_string();
///     }
/// }
///
/// let mut dispatcher =
///     ModeDispatcher::new(&Config::default(), Log::default(), Status::default()).unwrap();
/// assert_eq!(dispatcher.handle_key_event("d").unwrap(), KeyOutcome::AwaitingInput);
/// assert_eq!(dispatcher.handle_key_event("d").unwrap(), KeyOutcome::Executed);
/// assert_eq!(dispatcher.executor().0.len(), 1);
///
/// dispatcher.handle_key_event("i").unwrap();
/// assert_eq!(dispatcher.active_mode(), ModeName::Insert);
/// assert_eq!(dispatcher.status().0, "INSERT");
/// ```
pub struct ModeDispatcher<E: Executor, S: StatusDisplay> {
    modes: Vec<Box<dyn Mode>>,
    current: usize,
    state: InputState,
    translator: Box<dyn KeyTranslator>,
    executor: E,
    status: S,
}

impl<E: Executor, S: StatusDisplay> ModeDispatcher<E, S> {
    /// Creates a dispatcher with the Normal, Insert and Visual modes, translating
    /// keys with the configured keyboard layout.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured keyboard layout is unknown.
    pub fn new(config: &Config, executor: E, status: S) -> Result<Self> {
        let layout = KeyboardLayout::from_config(config)?;
        Self::with_modes(
            default_modes(&config.argument_terminator),
            Box::new(layout),
            executor,
            status,
        )
    }

    /// Creates a dispatcher over a custom set of modes. Normal mode starts active.
    ///
    /// # Errors
    ///
    /// Returns an error if no mode is named [`ModeName::Normal`].
    pub fn with_modes(
        modes: Vec<Box<dyn Mode>>,
        translator: Box<dyn KeyTranslator>,
        executor: E,
        mut status: S,
    ) -> Result<Self> {
        let Some(current) = modes.iter().position(|m| m.name() == ModeName::Normal) else {
            bail!("A dispatcher needs a Normal mode");
        };

        status.show("");

        Ok(Self {
            modes,
            current,
            state: InputState::new(),
            translator,
            executor,
            status,
        })
    }

    /// Returns the active mode.
    pub fn active_mode(&self) -> ModeName {
        self.modes[self.current].name()
    }

    /// Status text for the active mode: empty for Normal, the uppercased name
    /// otherwise.
    pub fn status_text(&self) -> String {
        match self.active_mode() {
            ModeName::Normal => String::new(),
            other => other.to_string(),
        }
    }

    /// Keys buffered for the sequence awaiting more input.
    pub fn pending_keys(&self) -> &[String] {
        self.state.keys()
    }

    /// Descriptors built so far for the sequence awaiting more input.
    pub fn pending_queue(&self) -> &[Operation] {
        self.state.queue()
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn status(&self) -> &S {
        &self.status
    }

    /// Drops any partially entered sequence.
    pub fn reset(&mut self) {
        self.state.reset();
    }

    /// Handles one raw key from the host.
    ///
    /// The key is translated, appended to the pending sequence and parsed by the
    /// active mode. A resolved queue is moved to the executor, after which every
    /// `ChangeMode` it carries is applied.
    ///
    /// # Errors
    ///
    /// Returns an error if a mode's activation or deactivation hook fails. The
    /// pending sequence is dropped either way.
    pub fn handle_key_event(&mut self, raw: &str) -> Result<KeyOutcome> {
        let key = self.translator.translate(raw);
        debug!(raw, key = %key, mode = %self.active_mode(), "key_event");

        self.state.add_key(key);
        let resolution = self.modes[self.current].handle_keys(&mut self.state);

        match resolution {
            Resolution::Complete(queue) => {
                debug!(operations = queue.len(), "sequence_resolved");
                let mode_keys: Vec<String> = queue
                    .iter()
                    .filter_map(|op| match op {
                        Operation::ChangeMode { key } => Some(key.clone()),
                        _ => None,
                    })
                    .collect();

                self.dispatch(queue);
                for key in mode_keys {
                    self.handle_mode_change(&key)?;
                }
                Ok(KeyOutcome::Executed)
            }
            Resolution::AwaitingInput => {
                debug!(pending = ?self.state.keys(), "awaiting_input");
                Ok(KeyOutcome::AwaitingInput)
            }
            Resolution::ModeChange(key) => {
                self.handle_mode_change(&key)?;
                Ok(KeyOutcome::ModeRequested(key))
            }
            Resolution::Failed(errors) => {
                for error in &errors {
                    warn!(mode = %self.active_mode(), error = %error, "sequence_rejected");
                }
                Ok(KeyOutcome::Rejected(errors))
            }
        }
    }

    /// Feeds several keys as separate key events.
    pub fn feed<'a>(&mut self, keys: impl IntoIterator<Item = &'a str>) -> Result<Vec<KeyOutcome>> {
        keys.into_iter()
            .map(|key| self.handle_key_event(key))
            .collect()
    }

    /// Switches to the inactive mode claiming `key`, if any.
    ///
    /// When several modes claim the key, the last one in registration order
    /// wins. Returns true if the mode changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the old mode's deactivation hook or the new mode's
    /// activation hook fails. A failed deactivation leaves the old mode active.
    pub fn handle_mode_change(&mut self, key: &str) -> Result<bool> {
        let from = self.active_mode();

        let mut winner = None;
        for (index, mode) in self.modes.iter().enumerate() {
            if index != self.current && mode.should_be_activated(key, from) {
                winner = Some(index);
            }
        }

        let Some(next) = winner else {
            debug!(key, mode = %from, "mode_change_unclaimed");
            return Ok(false);
        };

        self.state.reset();

        let effects = self.modes[self.current]
            .handle_deactivation()
            .with_context(|| format!("Failed to leave {} mode", from))?;
        self.dispatch(effects);

        self.current = next;
        let text = self.status_text();
        self.status.show(&text);

        let to = self.active_mode();
        info!(from = %from, to = %to, key, "mode_changed");

        let effects = self.modes[next]
            .handle_activation(key)
            .with_context(|| format!("Failed to enter {} mode", to))?;
        self.dispatch(effects);

        Ok(true)
    }

    fn dispatch(&mut self, operations: Vec<Operation>) {
        if !operations.is_empty() {
            self.executor.execute(operations);
        }
    }
}
