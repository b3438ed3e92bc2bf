//! Request and response bodies
//!
//! Request bodies reject unknown fields so a typo surfaces as a 422 instead
//! of being dropped silently.

use serde::{Deserialize, Serialize};

/// Body of `POST /configurations/anonymize/`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnonymizeRequest {
    pub content: String,

    /// Words to scrub in addition to the built-in rules
    #[serde(default)]
    pub sensitive_words: Option<Vec<String>>,
}

/// Response of `POST /configurations/anonymize/`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnonymizeResponse {
    pub content: String,
}

/// Body of `POST /configurations/`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitRequest {
    pub content: String,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub email: Option<String>,

    /// Device OS category; `other` when absent or blank
    #[serde(default)]
    pub nos: Option<String>,
}

/// Response of `POST /configurations/`
///
/// Exactly one of the two fields is set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitResponse {
    pub pr_link: Option<String>,
    pub error: Option<String>,
}

impl SubmitResponse {
    pub fn published(pr_link: impl Into<String>) -> Self {
        Self {
            pr_link: Some(pr_link.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            pr_link: None,
            error: Some(error.into()),
        }
    }
}

/// Body of every 422 response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationErrorResponse {
    pub error: String,
    pub detail: String,
}

/// Response of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
