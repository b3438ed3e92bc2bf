//! Submission outcomes

use serde::Serialize;

/// How a submission ended when the repository work did not fail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Branch pushed and pull request opened
    Published { branch: String, pr_link: String },

    /// Branch pushed but the pull request could not be opened
    PublishFailed { branch: String, error: String },

    /// The same content was submitted before
    Duplicate { branch: String },
}

impl SubmissionOutcome {
    /// Branch the outcome refers to
    pub fn branch(&self) -> &str {
        match self {
            SubmissionOutcome::Published { branch, .. }
            | SubmissionOutcome::PublishFailed { branch, .. }
            | SubmissionOutcome::Duplicate { branch } => branch,
        }
    }
}
