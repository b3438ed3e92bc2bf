//! Submission workflow - stores a submission then opens its review request

use super::outcome::SubmissionOutcome;
use crate::adapters::git::{ConfigurationStore, GitCollection, StoreOutcome};
use crate::adapters::github::{GitHubPublisher, ReviewRequestPublisher};
use crate::config::CollectorConfig;
use crate::domain::{CollectorError, Result, Submission};
use std::sync::Arc;
use std::time::Instant;

/// Submission workflow
pub struct SubmissionWorkflow {
    store: Arc<dyn ConfigurationStore>,
    publisher: Arc<dyn ReviewRequestPublisher>,
}

impl SubmissionWorkflow {
    /// Create a workflow from its two collaborators
    pub fn new(
        store: Arc<dyn ConfigurationStore>,
        publisher: Arc<dyn ReviewRequestPublisher>,
    ) -> Self {
        Self { store, publisher }
    }

    /// Wire the git collection and the GitHub publisher from configuration
    pub fn from_config(config: &CollectorConfig) -> Result<Self> {
        let store = Arc::new(GitCollection::from_config(config));
        let publisher = Arc::new(GitHubPublisher::new(
            &config.github,
            config.repository.base_branch.clone(),
        )?);
        Ok(Self::new(store, publisher))
    }

    /// Store `submission` and open a pull request for it
    ///
    /// # Errors
    ///
    /// Repository failures are returned as errors. A failed pull request is
    /// not an error: the branch is already pushed, so it is reported as
    /// [`SubmissionOutcome::PublishFailed`].
    pub async fn submit(&self, submission: Submission) -> Result<SubmissionOutcome> {
        let start = Instant::now();
        crate::log_submission_received!(&submission);

        let stored = match self.store.store(submission).await {
            Ok(StoreOutcome::Stored(stored)) => stored,
            Ok(StoreOutcome::AlreadyExists { branch }) => {
                crate::log_duplicate_submission!(branch);
                return Ok(SubmissionOutcome::Duplicate { branch });
            }
            Err(e) => {
                let error = CollectorError::from(e);
                crate::log_upstream_failure!(&error, "Failed to store configuration");
                return Err(error);
            }
        };

        let outcome = match self.publisher.open_review_request(&stored.branch).await {
            Ok(pr_link) => {
                crate::log_submission_published!(stored.branch, pr_link);
                SubmissionOutcome::Published {
                    branch: stored.branch,
                    pr_link,
                }
            }
            Err(e) => {
                crate::log_upstream_failure!(&e, "Failed to open pull request");
                SubmissionOutcome::PublishFailed {
                    branch: stored.branch,
                    error: e.user_message(),
                }
            }
        };

        tracing::debug!(
            branch = outcome.branch(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Submission handled"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GitHubError, RepositoryError, StoredConfiguration};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    enum StoreBehaviour {
        Store,
        Exists,
        Fail,
    }

    struct FakeStore(StoreBehaviour);

    #[async_trait]
    impl ConfigurationStore for FakeStore {
        async fn store(
            &self,
            submission: Submission,
        ) -> std::result::Result<StoreOutcome, RepositoryError> {
            let hash = submission.hash();
            match self.0 {
                StoreBehaviour::Store => Ok(StoreOutcome::Stored(StoredConfiguration {
                    branch: hash.branch_name(),
                    relative_path: submission.relative_path(),
                    hash,
                    commit_id: "0".repeat(40),
                })),
                StoreBehaviour::Exists => Ok(StoreOutcome::AlreadyExists {
                    branch: hash.branch_name(),
                }),
                StoreBehaviour::Fail => Err(RepositoryError::PushFailed {
                    branch: hash.branch_name(),
                    message: "rejected".to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct FakePublisher {
        calls: AtomicUsize,
        branches: Mutex<Vec<String>>,
        reject: bool,
    }

    #[async_trait]
    impl ReviewRequestPublisher for FakePublisher {
        async fn open_review_request(
            &self,
            branch: &str,
        ) -> std::result::Result<String, GitHubError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.branches.lock().unwrap().push(branch.to_string());
            if self.reject {
                Err(GitHubError::RequestFailed {
                    status: 422,
                    body: r#"{"message":"Validation Failed"}"#.to_string(),
                })
            } else {
                Ok("https://github.com/acme/configs/pull/1".to_string())
            }
        }
    }

    fn workflow(store: StoreBehaviour, publisher: Arc<FakePublisher>) -> SubmissionWorkflow {
        SubmissionWorkflow::new(Arc::new(FakeStore(store)), publisher)
    }

    #[tokio::test]
    async fn test_published() {
        let publisher = Arc::new(FakePublisher::default());
        let submission = Submission::new("hostname r1");
        let branch = submission.hash().branch_name();

        let outcome = workflow(StoreBehaviour::Store, publisher.clone())
            .submit(submission)
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SubmissionOutcome::Published {
                branch: branch.clone(),
                pr_link: "https://github.com/acme/configs/pull/1".to_string(),
            }
        );
        assert_eq!(*publisher.branches.lock().unwrap(), vec![branch]);
    }

    #[tokio::test]
    async fn test_duplicate_skips_publisher() {
        let publisher = Arc::new(FakePublisher::default());
        let outcome = workflow(StoreBehaviour::Exists, publisher.clone())
            .submit(Submission::new("hostname r1"))
            .await
            .unwrap();

        assert!(matches!(outcome, SubmissionOutcome::Duplicate { .. }));
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_publish_failure_is_reported() {
        let publisher = Arc::new(FakePublisher {
            reject: true,
            ..FakePublisher::default()
        });
        let outcome = workflow(StoreBehaviour::Store, publisher)
            .submit(Submission::new("hostname r1"))
            .await
            .unwrap();

        match outcome {
            SubmissionOutcome::PublishFailed { error, .. } => {
                assert_eq!(error, r#"{"message":"Validation Failed"}"#);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_repository_failure_is_error() {
        let publisher = Arc::new(FakePublisher::default());
        let result = workflow(StoreBehaviour::Fail, publisher.clone())
            .submit(Submission::new("hostname r1"))
            .await;

        assert!(matches!(
            result,
            Err(CollectorError::Repository(RepositoryError::PushFailed { .. }))
        ));
        assert_eq!(publisher.calls.load(Ordering::SeqCst), 0);
    }
}
