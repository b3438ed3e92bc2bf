//! HTTP surface
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /` | submission form |
//! | `GET /static/script.js` | form script |
//! | `GET /health` | liveness probe |
//! | `POST /configurations/anonymize/` | anonymize text, no side effects |
//! | `POST /configurations/` | store a configuration and open a pull request |

pub mod error;
pub mod extract;
pub mod handlers;
pub mod schemas;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use crate::adapters::git::GitCollection;
use crate::anonymization::AnonymizationEngine;
use crate::config::CollectorConfig;
use crate::core::collector::SubmissionWorkflow;
use crate::domain::{CollectorError, NosCategory, Result};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/static/script.js", get(handlers::script))
        .route("/health", get(handlers::health))
        .route("/configurations/anonymize/", post(handlers::anonymize))
        .route("/configurations/", post(handlers::submit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build handler state from configuration
///
/// # Errors
///
/// Fails if the anonymization engine or the GitHub client cannot be built,
/// or if a configured category is not a safe path component.
pub fn build_state(config: &CollectorConfig) -> Result<AppState> {
    let workflow = SubmissionWorkflow::from_config(config)?;
    let engine = AnonymizationEngine::new(config.anonymization.clone())
        .map_err(|e| CollectorError::Anonymization(format!("{e:#}")))?;
    let categories = config
        .server
        .form_categories()
        .into_iter()
        .map(NosCategory::new)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(CollectorError::Configuration)?;

    Ok(AppState::new(Arc::new(workflow), Arc::new(engine), categories))
}

/// Serve until `shutdown` flips to `true`
///
/// The working copy is cloned up front; a failure there is logged and
/// retried by the first submission.
pub async fn serve(config: &CollectorConfig, mut shutdown: watch::Receiver<bool>) -> Result<()> {
    let state = build_state(config)?;

    if let Err(e) = GitCollection::from_config(config).prepare().await {
        tracing::warn!(error = %e, "Working copy not ready, will retry on first submission");
    }

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .map_err(|e| CollectorError::Io(format!("Failed to bind {address}: {e}")))?;

    tracing::info!(address = %address, "Listening for submissions");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            while !*shutdown.borrow() {
                if shutdown.changed().await.is_err() {
                    break;
                }
            }
            tracing::info!("Shutting down HTTP server");
        })
        .await
        .map_err(|e| CollectorError::Io(format!("HTTP server error: {e}")))
}
