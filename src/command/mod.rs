//! Operation descriptors, command tables and parse errors.

pub mod error;
pub mod operation;
pub mod table;

pub use error::ParseError;
pub use operation::{MotionKind, Operation, OperatorKind, TargetRange};
pub use table::{lookup, Command, Context};
