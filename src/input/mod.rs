//! Key tokens, layout translation and the per-sequence input state.

pub mod keys;
pub mod layout;
pub mod state;

pub use keys::key_token;
pub use layout::{KeyTranslator, KeyboardLayout};
pub use state::InputState;
