//! Rules command implementation
//!
//! Debugging aid: prints the compiled rule lines for a pattern list, the
//! exact text the sync path would hand to the transfer tool.

use crate::command::Command;
use crate::error::Result;
use clap::Args;
use kagami_engine::driver::default_excludes;
use kagami_filter::{Mode, RuleSet};

/// Print the compiled rule lines for a pattern list
#[derive(Debug, Args)]
pub struct RulesCommand {
    /// Pattern to compile (repeatable)
    #[arg(long = "pattern", value_name = "PATTERN", required = true)]
    pub pattern: Vec<String>,

    /// Compile as a whitelist instead of include/exclude rules
    #[arg(long)]
    pub whitelist: bool,

    /// Append the default excludes the sync path would add
    #[arg(long)]
    pub with_defaults: bool,

    /// With --with-defaults, also exclude hidden directories
    #[arg(long, requires = "with_defaults")]
    pub exclude_hidden_dirs: bool,
}

impl Command for RulesCommand {
    type Output = ();

    fn execute(&self) -> Result<()> {
        let defaults = if self.with_defaults {
            default_excludes(self.exclude_hidden_dirs)
        } else {
            Vec::new()
        };
        let mode = if self.whitelist {
            Mode::WhitelistOnly
        } else {
            Mode::Normal
        };

        let set = RuleSet::compile(mode, &self.pattern, &defaults);
        for line in set.lines() {
            println!("{line}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic)]
    use super::*;

    #[test]
    fn test_rules_command_runs() {
        let cmd = RulesCommand {
            pattern: vec!["*.log".to_string(), "!keep.log".to_string()],
            whitelist: false,
            with_defaults: true,
            exclude_hidden_dirs: false,
        };
        assert!(cmd.execute().is_ok());
    }
}
