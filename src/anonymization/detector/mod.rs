//! Sensitive token detection module
//!
//! Provides the trait-based detection interface and the line detectors used
//! by the engine.

pub mod ipv4;
pub mod password;
pub mod words;

use crate::anonymization::models::SensitiveToken;
use anyhow::Result;

/// Trait for sensitive token detection implementations
pub trait TokenDetector: Send + Sync {
    /// Detect sensitive tokens in a single configuration line
    fn detect(&self, line: &str) -> Result<Vec<SensitiveToken>>;
}
