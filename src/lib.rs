//! modalkeys - An incremental vim-style key sequence interpreter.
//!
//! Keys arrive one at a time as canonical tokens (`"d"`, `"esc"`, `"enter"`).
//! The [`mode::ModeDispatcher`] hands them to the active mode, whose grammar
//! resolves them into an ordered queue of [`command::Operation`] descriptors
//! for an external [`mode::Executor`] to apply. Sequences that are still a
//! valid prefix (`d`, `d a`, `f`) stay buffered until more keys arrive.
//!
//! # Example
//!
//! ```
//! use modalkeys::config::Config;
//! use modalkeys::mode::{KeyOutcome, ModeName};
//! use modalkeys::ui::status_line::StatusLine;
//! use modalkeys::ui::transcript::Transcript;
//! use modalkeys::ui::Session;
//!
//! let mut session =
//!     Session::new(&Config::default(), Transcript::default(), StatusLine::default()).unwrap();
//!
//! session.feed(["c", "w"]).unwrap();
//! assert_eq!(session.active_mode(), ModeName::Insert);
//! assert_eq!(session.status().indicator(), "-- INSERT --");
//!
//! let outcome = session.handle_key_event("esc").unwrap();
//! assert_eq!(outcome, KeyOutcome::ModeRequested("esc".to_string()));
//! assert_eq!(session.active_mode(), ModeName::Normal);
//! ```

pub mod command;
pub mod config;
pub mod input;
pub mod mode;
pub mod theme;
pub mod ui;
