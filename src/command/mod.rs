//! Command module for stepper-pulse.
//!
//! Parses console lines into [`Command`]s and dispatches them to a
//! [`Shell`] that owns one axis and its collaborators.

mod parser;
mod shell;

pub use parser::{lookup, Command, CommandInfo, CommandKind, COMMANDS};
pub use shell::{Response, Shell};
