//! Command trait for kagami CLI
//!
//! This module defines the `Command` trait that all kagami commands
//! implement. It provides a uniform interface for command execution,
//! making it easier to test, extend, and maintain commands.

use crate::error::Result;

/// Trait for all kagami commands
///
/// Commands carry their own parsed arguments; `execute` performs the work
/// and returns the command's output. Most commands return `()`; `parity`
/// returns the process exit code so the caller can distinguish
/// "mismatches found" from harness failures.
pub trait Command {
    /// The type returned by this command
    type Output;

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` if the command fails to execute. Error
    /// messages should be descriptive enough for the user to understand
    /// what went wrong.
    fn execute(&self) -> Result<Self::Output>;
}
