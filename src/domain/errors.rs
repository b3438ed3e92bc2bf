//! Domain error types
//!
//! This module defines the error hierarchy for the collector.
//! Errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main collector error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CollectorError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Git collection errors
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Hosting API errors
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    /// Anonymization errors
    #[error("Anonymization error: {0}")]
    Anonymization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Errors raised while maintaining the local working copy of the collection.
///
/// A branch that already exists is not an error; it is reported as
/// [`StoreOutcome::AlreadyExists`](crate::adapters::git::StoreOutcome).
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The working copy could not be opened for a reason other than "not a repository"
    #[error("Failed to open working copy at {path}: {message}")]
    OpenFailed { path: String, message: String },

    /// Cloning the remote failed
    #[error("Failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Fetching the base branch failed
    #[error("Failed to fetch base branch '{branch}': {message}")]
    FetchFailed { branch: String, message: String },

    /// The base branch is missing both locally and on the remote
    #[error("Base branch not found: {0}")]
    BaseBranchNotFound(String),

    /// Writing the configuration file failed
    #[error("Failed to write {path}: {message}")]
    WriteFailed { path: String, message: String },

    /// Creating or checking out the submission branch failed
    #[error("Failed to prepare branch '{branch}': {message}")]
    BranchFailed { branch: String, message: String },

    /// Staging or committing failed
    #[error("Failed to commit: {0}")]
    CommitFailed(String),

    /// Pushing the branch failed or was rejected
    #[error("Failed to push branch '{branch}': {message}")]
    PushFailed { branch: String, message: String },

    /// The blocking repository task did not complete
    #[error("Repository task aborted: {0}")]
    TaskFailed(String),
}

/// Errors that occur when talking to the hosting API.
///
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum GitHubError {
    /// The request could not be sent or timed out
    #[error("Failed to reach GitHub API: {0}")]
    ConnectionFailed(String),

    /// The API answered with a non-success status; `body` is relayed verbatim
    #[error("GitHub API returned {status}: {body}")]
    RequestFailed { status: u16, body: String },

    /// The API answered 2xx but the body could not be understood
    #[error("Invalid response from GitHub API: {0}")]
    InvalidResponse(String),
}

impl GitHubError {
    /// Opaque message surfaced to the submitter
    ///
    /// For rejected requests this is the raw response body, otherwise the
    /// error's display text.
    pub fn user_message(&self) -> String {
        match self {
            GitHubError::RequestFailed { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for CollectorError {
    fn from(err: std::io::Error) -> Self {
        CollectorError::Io(err.to_string())
    }
}
