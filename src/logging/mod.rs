//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable levels
//! - Optional JSON file logging with rotation
//! - Event macros for the submission lifecycle
//!
//! # Example
//!
//! ```no_run
//! use nos_config_collector::config::LoggingConfig;
//! use nos_config_collector::logging::init_logging;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Collector started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an incoming submission
///
/// # Example
///
/// ```no_run
/// use nos_config_collector::domain::Submission;
/// use nos_config_collector::log_submission_received;
///
/// let submission = Submission::new("hostname edge-1");
/// log_submission_received!(&submission);
/// ```
#[macro_export]
macro_rules! log_submission_received {
    ($submission:expr) => {
        tracing::info!(
            hash = %$submission.hash(),
            nos = %$submission.nos(),
            bytes = $submission.content().len(),
            "Submission received"
        );
    };
}

/// Log a submission whose branch already exists
#[macro_export]
macro_rules! log_duplicate_submission {
    ($branch:expr) => {
        tracing::info!(branch = %$branch, "Configuration already present, skipping");
    };
}

/// Log a pushed submission and its review request
///
/// # Example
///
/// ```no_run
/// use nos_config_collector::log_submission_published;
///
/// log_submission_published!("add/0123", "https://github.com/acme/configs/pull/1");
/// ```
#[macro_export]
macro_rules! log_submission_published {
    ($branch:expr, $pr_link:expr) => {
        tracing::info!(
            branch = %$branch,
            pr_link = %$pr_link,
            "Submission published"
        );
    };
}

/// Log an upstream failure with context
///
/// Upstream failures are reported to the caller; the details only go to the
/// debug log.
///
/// # Example
///
/// ```no_run
/// use nos_config_collector::domain::GitHubError;
/// use nos_config_collector::log_upstream_failure;
///
/// let error = GitHubError::ConnectionFailed("connection reset".to_string());
/// log_upstream_failure!(&error, "Failed to open pull request");
/// ```
#[macro_export]
macro_rules! log_upstream_failure {
    ($error:expr, $context:expr) => {
        tracing::debug!(
            error = %$error,
            context = $context,
            "Upstream operation failed"
        );
    };
}
