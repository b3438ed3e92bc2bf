//! Anonymization strategy module
//!
//! Provides the strategies that turn a detected token into its replacement.

pub mod ipv4;
pub mod salted;

use crate::anonymization::models::SensitiveToken;
use anyhow::Result;

/// Trait for anonymization strategy implementations
///
/// Implementations are deterministic: the same token always yields the same
/// replacement for a given salt.
pub trait Anonymizer: Send + Sync {
    /// Replacement text for a detected token
    fn anonymize(&self, token: &SensitiveToken) -> Result<String>;
}
