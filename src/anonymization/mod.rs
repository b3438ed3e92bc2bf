//! Anonymization module
//!
//! Line-oriented anonymization of network device configurations before they
//! are submitted. Passwords, IPv4 addresses and caller-supplied sensitive
//! words are replaced with deterministic, salted substitutes.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Detection**: regex-based token detectors ([`detector`])
//! - **Anonymization**: salted token and prefix-preserving IPv4 strategies ([`anonymizer`])
//! - **Engine**: per-line orchestration ([`engine`])
//!
//! The HTTP layer only sees the [`Redactor`] capability, so tests can swap the
//! engine for a double.
//!
//! # Usage
//!
//! ```rust
//! use nos_config_collector::anonymization::{AnonymizationConfig, AnonymizationEngine, Redactor};
//!
//! let engine = AnonymizationEngine::new(AnonymizationConfig::default()).unwrap();
//! let redacted = engine.redact("hostname test-device", &[]).unwrap();
//! assert_eq!(redacted, "hostname test-device");
//! ```

pub mod anonymizer;
pub mod config;
pub mod detector;
pub mod engine;
pub mod models;

// Re-export main types
pub use config::AnonymizationConfig;
pub use engine::{effective_sensitive_words, AnonymizationEngine, SENTINEL_WORD};
pub use models::{SensitiveToken, TokenCategory};

/// Capability: redact sensitive tokens from configuration text
pub trait Redactor: Send + Sync {
    /// Return `content` with sensitive tokens replaced
    ///
    /// Blank entries in `sensitive_words` are ignored.
    fn redact(&self, content: &str, sensitive_words: &[String]) -> anyhow::Result<String>;
}
