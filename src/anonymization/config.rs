//! Anonymization configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Salt used when none is configured
pub const DEFAULT_SALT: &str = "ncc";

/// Anonymization configuration
///
/// The salt makes generated tokens and IP mappings deterministic for one
/// deployment while keeping them unguessable without it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymizationConfig {
    /// Replace IPv4 addresses with prefix-preserving substitutes
    #[serde(default = "default_true")]
    pub anon_ip: bool,

    /// Replace passwords, secrets and keys
    #[serde(default = "default_true")]
    pub anon_pwd: bool,

    /// Salt for token generation
    #[serde(default = "default_salt")]
    pub salt: String,

    /// Words that are never replaced
    #[serde(default)]
    pub reserved_words: Vec<String>,
}

impl Default for AnonymizationConfig {
    fn default() -> Self {
        Self {
            anon_ip: true,
            anon_pwd: true,
            salt: default_salt(),
            reserved_words: Vec::new(),
        }
    }
}

impl AnonymizationConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.salt.is_empty() {
            anyhow::bail!("Anonymization salt cannot be empty");
        }
        Ok(())
    }

    /// Whether `value` is a reserved word (case-insensitive)
    pub fn is_reserved(&self, value: &str) -> bool {
        self.reserved_words
            .iter()
            .any(|w| w.eq_ignore_ascii_case(value))
    }
}

fn default_true() -> bool {
    true
}

fn default_salt() -> String {
    DEFAULT_SALT.to_string()
}
