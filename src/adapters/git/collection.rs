//! Async facade over the working copy

use super::working_copy::{StoreOutcome, WorkingCopy};
use crate::config::{CollectorConfig, RepositoryConfig, SecretString};
use crate::domain::{RepositoryError, Submission};
use async_trait::async_trait;
use secrecy::ExposeSecret;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Capability: persist a submission into the collection
#[async_trait]
pub trait ConfigurationStore: Send + Sync {
    /// Store `submission` on its own branch and push it
    async fn store(&self, submission: Submission) -> Result<StoreOutcome, RepositoryError>;
}

/// The git collection backing the service
///
/// All repository work for one collection runs one submission at a time on
/// the blocking thread pool.
pub struct GitCollection {
    config: RepositoryConfig,
    token: SecretString,
    lock: Arc<Mutex<()>>,
}

impl GitCollection {
    /// Create a collection handle; nothing touches disk until the first store
    pub fn new(config: RepositoryConfig, token: SecretString) -> Self {
        Self {
            config,
            token,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Build from the resolved service configuration
    pub fn from_config(config: &CollectorConfig) -> Self {
        Self::new(config.repository.clone(), config.github.token.clone())
    }

    /// Open or clone the working copy ahead of the first submission
    pub async fn prepare(&self) -> Result<(), RepositoryError> {
        let _guard = self.lock.lock().await;
        let config = self.config.clone();
        let token = self.token.clone();

        tokio::task::spawn_blocking(move || {
            WorkingCopy::open_or_clone(&config, token.expose_secret().as_str()).map(|_| ())
        })
        .await
        .map_err(|e| RepositoryError::TaskFailed(e.to_string()))?
    }
}

#[async_trait]
impl ConfigurationStore for GitCollection {
    async fn store(&self, submission: Submission) -> Result<StoreOutcome, RepositoryError> {
        let _guard = self.lock.lock().await;
        let config = self.config.clone();
        let token = self.token.clone();

        tokio::task::spawn_blocking(move || {
            let copy = WorkingCopy::open_or_clone(&config, token.expose_secret().as_str())?;
            copy.store(&submission)
        })
        .await
        .map_err(|e| RepositoryError::TaskFailed(e.to_string()))?
    }
}
