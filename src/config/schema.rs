//! Configuration schema types
//!
//! This module defines the resolved settings of the collector. Values are
//! produced by [`loader`](super::loader) and never mutated afterwards.

use crate::anonymization::AnonymizationConfig;
use crate::config::SecretString;
use crate::domain::{NosCategory, OTHER_NOS};
use std::path::PathBuf;

/// Main collector configuration
///
/// Built once at startup and handed to each component at construction time.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Application-level settings
    pub application: ApplicationConfig,

    /// HTTP listener and form settings
    pub server: ServerConfig,

    /// Git collection settings
    pub repository: RepositoryConfig,

    /// Hosting API settings
    pub github: GitHubConfig,

    /// Anonymization settings
    pub anonymization: AnonymizationConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl CollectorConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.server.validate()?;
        self.repository.validate()?;
        self.github.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Whether the development override file was consulted
    pub dev_mode: bool,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            dev_mode: false,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen host
    pub host: String,

    /// Listen port
    pub port: u16,

    /// Known device OS categories offered by the submission form
    pub nos_categories: Vec<String>,
}

impl ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("server host cannot be empty".to_string());
        }
        for nos in &self.nos_categories {
            NosCategory::new(nos.as_str()).map_err(|e| format!("Invalid NOS category: {e}"))?;
        }
        Ok(())
    }

    /// Socket address string to bind
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Categories shown in the form: configured ones plus `other`, sorted and de-duplicated
    pub fn form_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .nos_categories
            .iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();
        categories.push(OTHER_NOS.to_string());
        categories.sort();
        categories.dedup();
        categories
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            nos_categories: default_nos_categories(),
        }
    }
}

/// Git collection configuration
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    /// Local working copy path
    pub config_directory: PathBuf,

    /// Remote URL cloned into `config_directory` when it is not a repository yet
    pub url: String,

    /// Branch new submission branches start from and target
    pub base_branch: String,

    /// Default author/committer name
    pub author_name: String,

    /// Default author/committer email
    pub author_email: String,
}

impl RepositoryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.config_directory.as_os_str().is_empty() {
            return Err("repository config_directory cannot be empty".to_string());
        }
        if self.url.trim().is_empty() {
            return Err("repository url cannot be empty".to_string());
        }
        if self.base_branch.trim().is_empty() {
            return Err("base_branch cannot be empty".to_string());
        }
        if !git2::Reference::is_valid_name(&format!("refs/heads/{}", self.base_branch)) {
            return Err(format!("Invalid base_branch '{}'", self.base_branch));
        }
        if self.author_name.trim().is_empty() || self.author_email.trim().is_empty() {
            return Err("default git author name and email cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Hosting API configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// Repository owner (user or organization)
    pub owner: String,

    /// Repository name
    pub name: String,

    /// API token, used for pull requests and authenticated clone URLs
    /// Stored securely in memory and automatically zeroized on drop
    pub token: SecretString,

    /// API base URL
    pub api_url: String,

    /// Timeout for a single API call
    pub timeout_seconds: u64,
}

impl GitHubConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        if self.owner.trim().is_empty() {
            return Err("repository owner cannot be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("repository name cannot be empty".to_string());
        }
        if self.token.expose_secret().is_empty() {
            return Err("github token cannot be empty".to_string());
        }
        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            return Err(format!(
                "github api_url must start with http:// or https://, got '{}'",
                self.api_url
            ));
        }
        if self.timeout_seconds == 0 {
            return Err("request timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    pub local_enabled: bool,

    /// Directory for log files
    pub local_path: String,

    /// Log rotation (daily, hourly, never)
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("local_path cannot be empty when file logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_port() -> u16 {
    8000
}

pub(crate) fn default_base_branch() -> String {
    "main".to_string()
}

pub(crate) fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

pub(crate) fn default_timeout_seconds() -> u64 {
    15
}

pub(crate) fn default_author_name() -> String {
    "nos-config-collector".to_string()
}

pub(crate) fn default_author_email() -> String {
    "nos-config-collector@localhost".to_string()
}

pub(crate) fn default_local_path() -> String {
    "./logs".to_string()
}

pub(crate) fn default_local_rotation() -> String {
    "daily".to_string()
}

pub(crate) fn default_nos_categories() -> Vec<String> {
    [
        "arista_eos",
        "cisco_asa",
        "cisco_ios",
        "cisco_iosxr",
        "cisco_nxos",
        "cumulus_linux",
        "f5_bigip",
        "fortinet_fortios",
        "juniper_junos",
        "mikrotik_routeros",
        "paloalto_panos",
        "vyos",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
