//! Kagami CLI library
//!
//! This library contains all the CLI logic for kagami, making it reusable
//! for testing and integration with other tools.

pub mod cmd;
pub mod command;
pub mod error;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use command::Command;

/// Kagami - mirror file trees through rsync with layered ignore filters
#[derive(Parser)]
#[command(name = "kagami")]
#[command(about = "Mirror file trees through rsync with layered ignore filters")]
#[command(version)]
#[command(long_about = "Mirror file trees through rsync with layered ignore filters

Kagami wraps the system rsync binary and compiles gitignore-like patterns,
explicit whitelists, and per-side exclude lists into rsync filter rules.
The same rules can be evaluated locally to list what the filters drop, to
build change reports, and to cross-validate against rsync's own behavior.

Pattern sources on the source side, in precedence order:
  • .kagamiignore in the source tree
  • .gitignore (with --use-source-gitignore)
  • --ignore-src values and config file entries")]
pub struct Cli {
    /// Enable verbose output (shows DEBUG level logs)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write logs to a file (useful for debugging)
    #[arg(long, env = "KAGAMI_LOG_FILE", value_name = "FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for kagami CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Mirror the source tree into the destination
    Sync(cmd::sync::SyncCommand),

    /// Cross-validate the local evaluator against rsync's dry run
    Parity(cmd::parity::ParityCommand),

    /// Print the compiled rule lines for a pattern list
    Rules(cmd::rules::RulesCommand),
}

/// Main entry point for the CLI logic
///
/// # Errors
///
/// Returns an error if:
/// - Logging initialization fails
/// - Configuration loading fails
/// - Command execution fails
pub fn run(cli: Cli) -> Result<ExitCode> {
    // Initialize logging based on verbosity
    kagami_config::logging::init(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Sync(sync_cmd) => {
            sync_cmd.execute()?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Parity(parity_cmd) => Ok(parity_cmd.execute()?),
        Commands::Rules(rules_cmd) => {
            rules_cmd.execute()?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
