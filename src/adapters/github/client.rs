//! GitHub pull request client

use super::models::{CreatePullRequest, PullRequest};
use crate::config::{GitHubConfig, SecretString};
use crate::domain::GitHubError;
use async_trait::async_trait;
use reqwest::{header, Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;

const USER_AGENT: &str = concat!("nos-config-collector/", env!("CARGO_PKG_VERSION"));

/// Capability: open a review request for a pushed branch
#[async_trait]
pub trait ReviewRequestPublisher: Send + Sync {
    /// Open a pull request from `branch` into the base branch and return its URL
    ///
    /// `branch` is a bare branch name; the owner qualifier is added here.
    async fn open_review_request(&self, branch: &str) -> Result<String, GitHubError>;
}

/// Opens pull requests through the GitHub REST API
///
/// # Example
///
/// ```no_run
/// use nos_config_collector::adapters::github::{GitHubPublisher, ReviewRequestPublisher};
/// use nos_config_collector::config::{secret_string, GitHubConfig};
///
/// # async fn example() -> Result<(), nos_config_collector::domain::GitHubError> {
/// let config = GitHubConfig {
///     owner: "acme".to_string(),
///     name: "configs".to_string(),
///     token: secret_string("ghp_example".to_string()),
///     api_url: "https://api.github.com".to_string(),
///     timeout_seconds: 15,
/// };
/// let publisher = GitHubPublisher::new(&config, "main")?;
/// let url = publisher.open_review_request("add/0123abcd").await?;
/// println!("{url}");
/// # Ok(())
/// # }
/// ```
pub struct GitHubPublisher {
    client: Client,
    pulls_url: String,
    owner: String,
    token: SecretString,
    base_branch: String,
}

impl GitHubPublisher {
    /// Create a publisher targeting `{api_url}/repos/{owner}/{name}/pulls`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &GitHubConfig, base_branch: impl Into<String>) -> Result<Self, GitHubError> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GitHubError::ConnectionFailed(e.to_string()))?;

        let pulls_url = format!(
            "{}/repos/{}/{}/pulls",
            config.api_url.trim_end_matches('/'),
            config.owner,
            config.name
        );

        Ok(Self {
            client,
            pulls_url,
            owner: config.owner.clone(),
            token: config.token.clone(),
            base_branch: base_branch.into(),
        })
    }

    /// Endpoint pull requests are created at
    pub fn pulls_url(&self) -> &str {
        &self.pulls_url
    }
}

#[async_trait]
impl ReviewRequestPublisher for GitHubPublisher {
    async fn open_review_request(&self, branch: &str) -> Result<String, GitHubError> {
        let head = format!("{}:{}", self.owner, branch);
        let request = CreatePullRequest::for_branch(head, self.base_branch.as_str());

        tracing::debug!(url = %self.pulls_url, head = %branch, "Opening pull request");

        let response = self
            .client
            .post(&self.pulls_url)
            .header(header::ACCEPT, "application/vnd.github+json")
            .header(
                header::AUTHORIZATION,
                format!("Bearer {}", self.token.expose_secret().as_str()),
            )
            .json(&request)
            .send()
            .await
            .map_err(|e| GitHubError::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GitHubError::ConnectionFailed(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), body = %body, "Pull request rejected");
            return Err(GitHubError::RequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        let pull_request: PullRequest = serde_json::from_str(&body)
            .map_err(|e| GitHubError::InvalidResponse(e.to_string()))?;

        tracing::info!(url = %pull_request.html_url, head = %branch, "Pull request opened");
        Ok(pull_request.html_url)
    }
}
