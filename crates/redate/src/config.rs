// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! CLI configuration
//!
//! Everything except the window size is collected interactively, so the
//! surface stays one optional positional argument plus logging control.

use clap::Parser;

/// Interactively rewrite the dates, authors, and messages of recent commits
#[derive(Parser, Debug, Clone)]
#[command(name = "redate")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Number of recent commits to offer for selection
    ///
    /// One extra commit beyond this window is always fetched so that a
    /// rebase anchor exists even when the oldest visible commit is
    /// selected.
    #[arg(default_value_t = 10)]
    pub count: usize,

    /// Enable verbose logging (debug level)
    ///
    /// Logs are written to stderr so they never interleave with the
    /// interactive prompts.
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - suppress info-level logs
    ///
    /// Only errors and warnings will be logged.
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            count: 10,
            verbose: false,
            quiet: false,
        }
    }
}

impl Config {
    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.count, 10);
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_count_defaults_to_ten() {
        let config = Config::parse_from(["redate"]);
        assert_eq!(config.count, 10);
    }

    #[test]
    fn test_count_from_positional_argument() {
        let config = Config::parse_from(["redate", "25"]);
        assert_eq!(config.count, 25);
    }

    #[test]
    fn test_log_level_default() {
        let config = Config::default();
        assert_eq!(config.log_level(), tracing::Level::INFO);
    }

    #[test]
    fn test_log_level_verbose() {
        let config = Config {
            verbose: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_log_level_quiet() {
        let config = Config {
            quiet: true,
            ..Default::default()
        };
        assert_eq!(config.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
