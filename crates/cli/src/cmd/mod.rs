//! Subcommand implementations

pub mod parity;
pub mod rules;
pub mod sync;
