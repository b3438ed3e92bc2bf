//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the collector using clap.

pub mod commands;

use crate::config::LoadOptions;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// nos-config-collector - network device configuration collector
#[derive(Parser, Debug)]
#[command(name = "ncc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Load the development override file before reading the environment
    #[arg(long)]
    pub dev: bool,

    /// Development override file (defaults to config.env)
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); overrides NCC_LOG_LEVEL
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Settings-loader options derived from the global flags
    ///
    /// Passing `--env-file` implies development mode.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            dev_mode: self.dev || self.env_file.is_some(),
            env_file: self.env_file.clone(),
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP submission service
    Serve(commands::serve::ServeArgs),

    /// Resolve and validate settings, then print a redacted summary
    ValidateConfig(commands::validate::ValidateArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_serve() {
        let cli = Cli::parse_from(["ncc", "serve"]);
        assert!(matches!(cli.command, Commands::Serve(_)));
        assert!(!cli.dev);
        assert!(!cli.load_options().dev_mode);
    }

    #[test]
    fn test_cli_parse_serve_overrides() {
        let cli = Cli::parse_from(["ncc", "serve", "--host", "127.0.0.1", "--port", "9000"]);
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
                assert_eq!(args.port, Some(9000));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["ncc", "--log-level", "debug", "serve"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["ncc", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_env_file_implies_dev_mode() {
        let cli = Cli::parse_from(["ncc", "--env-file", "local.env", "validate-config"]);
        let options = cli.load_options();
        assert!(options.dev_mode);
        assert_eq!(options.env_file, Some(PathBuf::from("local.env")));
    }
}
