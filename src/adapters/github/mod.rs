//! GitHub adapter
//!
//! Opens one pull request per pushed submission branch.

pub mod client;
pub mod models;

pub use client::{GitHubPublisher, ReviewRequestPublisher};
pub use models::{CreatePullRequest, PullRequest, PULL_REQUEST_BODY, PULL_REQUEST_TITLE};
