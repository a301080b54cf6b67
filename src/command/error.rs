//! Error types for key sequence resolution.

use std::fmt;

/// Errors that abort the sequence being parsed.
///
/// Both kinds are local: the in-progress queue is discarded and the next key
/// starts a fresh sequence in the same mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No command matched the key or the cumulative sequence.
    UnknownCommand { sequence: String },
    /// A text object prefix was followed by a key that forms no text object.
    BadTextObject { sequence: String },
}

impl ParseError {
    /// The keys that were consumed when the error was recorded.
    pub fn sequence(&self) -> &str {
        match self {
            ParseError::UnknownCommand { sequence } | ParseError::BadTextObject { sequence } => {
                sequence
            }
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownCommand { sequence } => {
                write!(f, "Unknown command '{}'", sequence)
            }
            ParseError::BadTextObject { sequence } => {
                write!(f, "Bad text object '{}'", sequence)
            }
        }
    }
}

impl std::error::Error for ParseError {}
