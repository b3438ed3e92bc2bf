//! Configuration management for the collector.
//!
//! Settings are resolved once at startup from `NCC_*` environment variables
//! and passed, immutable, into each component.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use nos_config_collector::config::{load_config, LoadOptions};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config(&LoadOptions::default())?;
//! println!("Base branch: {}", config.repository.base_branch);
//! println!("Listening on {}", config.server.bind_address());
//! # Ok(())
//! # }
//! ```
//!
//! # Development mode
//!
//! With `NCC_DEV_MODE=true` (or `ncc --dev`), a `config.env` file in the
//! working directory is read first and overrides the process environment:
//!
//! ```bash
//! NCC_CONFIG_DIRECTORY=/tmp/ncc-collection
//! NCC_REPOSITORY_URL=https://github.com/example/network-device-configs.git
//! NCC_REPOSITORY_OWNER=example
//! NCC_REPOSITORY_NAME=network-device-configs
//! NCC_GITHUB_TOKEN=ghp_...
//! ```
//!
//! # Structure
//!
//! - [`ApplicationConfig`] - Log level and mode
//! - [`ServerConfig`] - Listener and form categories
//! - [`RepositoryConfig`] - Working copy, remote and base branch
//! - [`GitHubConfig`] - Pull request API
//! - [`LoggingConfig`] - File logging

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{config_from_lookup, load_config, LoadOptions};
pub use schema::{
    ApplicationConfig, CollectorConfig, GitHubConfig, LoggingConfig, RepositoryConfig,
    ServerConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
