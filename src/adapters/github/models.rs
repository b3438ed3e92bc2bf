//! GitHub REST API models
//!
//! Only the fields the collector reads or writes are modelled.

use serde::{Deserialize, Serialize};

/// Title of every pull request opened by the collector
pub const PULL_REQUEST_TITLE: &str =
    "Add new configuration file submitted through the network-device-config-collector";

/// Body of every pull request opened by the collector
pub const PULL_REQUEST_BODY: &str =
    "Pull Request submitted through the network-device-config-collector.";

/// Body of `POST /repos/{owner}/{repo}/pulls`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CreatePullRequest {
    pub title: String,
    pub body: String,
    /// `<owner>:<branch>` holding the changes
    pub head: String,
    /// Branch the changes should be merged into
    pub base: String,
}

impl CreatePullRequest {
    /// Request for merging `head` into `base` with the collector's fixed wording
    pub fn for_branch(head: impl Into<String>, base: impl Into<String>) -> Self {
        Self {
            title: PULL_REQUEST_TITLE.to_string(),
            body: PULL_REQUEST_BODY.to_string(),
            head: head.into(),
            base: base.into(),
        }
    }
}

/// Subset of the pull request object returned on creation
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequest {
    /// Browser URL of the pull request
    pub html_url: String,
}
