//! Domain models and types for the collector.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Validated names** ([`NosCategory`], [`ContentHash`])
//! - **Domain models** ([`Submission`], [`StoredConfiguration`])
//! - **Error types** ([`CollectorError`], [`RepositoryError`], [`GitHubError`])
//! - **Result type alias** ([`Result`])
//!
//! # Naming
//!
//! A submission's storage path and branch are derived from its content only:
//!
//! ```rust
//! use nos_config_collector::domain::Submission;
//!
//! let first = Submission::new("interface Ethernet1");
//! let second = Submission::new("interface Ethernet1");
//! assert_eq!(first.hash().branch_name(), second.hash().branch_name());
//! ```

pub mod errors;
pub mod ids;
pub mod result;
pub mod submission;

// Re-export commonly used types for convenience
pub use errors::{CollectorError, GitHubError, RepositoryError};
pub use ids::{ContentHash, NosCategory, OTHER_NOS};
pub use result::Result;
pub use submission::{StoredConfiguration, Submission, CONFIGURATIONS_DIR};
