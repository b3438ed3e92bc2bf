//! Route handlers

use super::error::ApiError;
use super::extract::ValidatedJson;
use super::schemas::{
    AnonymizeRequest, AnonymizeResponse, HealthResponse, SubmitRequest, SubmitResponse,
};
use super::state::AppState;
use crate::core::collector::SubmissionOutcome;
use crate::domain::{NosCategory, Submission};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse};
use axum::Json;

const INDEX_TEMPLATE: &str = include_str!("assets/index.html");
const SCRIPT: &str = include_str!("assets/script.js");
const NOS_OPTIONS_PLACEHOLDER: &str = "{{NOS_OPTIONS}}";

/// `GET /` - submission form
pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(render_index(&state.categories))
}

/// `GET /static/script.js`
pub async fn script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        SCRIPT,
    )
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `POST /configurations/anonymize/`
pub async fn anonymize(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AnonymizeRequest>,
) -> Result<Json<AnonymizeResponse>, ApiError> {
    let redactor = state.redactor.clone();
    let words = request.sensitive_words.unwrap_or_default();

    let content = tokio::task::spawn_blocking(move || redactor.redact(&request.content, &words))
        .await
        .map_err(|e| ApiError::Internal(format!("Anonymization task aborted: {e}")))?
        .map_err(|e| {
            tracing::debug!(error = %format!("{e:#}"), "Anonymization failed");
            ApiError::Internal(format!("Anonymization failed: {e}"))
        })?;

    Ok(Json(AnonymizeResponse { content }))
}

/// `POST /configurations/`
pub async fn submit(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SubmitRequest>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let nos = match request.nos.as_deref().map(str::trim) {
        None | Some("") => NosCategory::other(),
        Some(nos) => NosCategory::new(nos)
            .map_err(|e| ApiError::validation("Invalid field 'nos'", e))?,
    };

    let submission = Submission::new(request.content)
        .with_author(request.author)
        .with_email(request.email)
        .with_nos(nos);

    let outcome = state
        .workflow
        .submit(submission)
        .await
        .map_err(|e| ApiError::SubmissionFailed(e.to_string()))?;

    match outcome {
        SubmissionOutcome::Published { pr_link, .. } => {
            Ok((StatusCode::OK, Json(SubmitResponse::published(pr_link))))
        }
        SubmissionOutcome::PublishFailed { error, .. } => {
            Ok((StatusCode::OK, Json(SubmitResponse::failed(error))))
        }
        SubmissionOutcome::Duplicate { branch } => Err(ApiError::Conflict(format!(
            "Configuration already present in the collection (branch {branch})"
        ))),
    }
}

/// Fill the device OS select of the form
///
/// A [`NosCategory`] only holds `[A-Za-z0-9._-]`, so names are inserted as is.
pub fn render_index(categories: &[NosCategory]) -> String {
    let options = categories
        .iter()
        .map(|nos| format!("                <option value=\"{nos}\">{nos}</option>"))
        .collect::<Vec<_>>()
        .join("\n");
    INDEX_TEMPLATE.replace(NOS_OPTIONS_PLACEHOLDER, &options)
}
