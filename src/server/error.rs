//! HTTP error responses

use super::schemas::{SubmitResponse, ValidationErrorResponse};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Errors a handler can answer with
#[derive(Debug)]
pub enum ApiError {
    /// Request body or field failed validation (422)
    Validation { error: String, detail: String },

    /// Content already collected (409)
    Conflict(String),

    /// Submission could not be stored (500), answered in the submission shape
    SubmissionFailed(String),

    /// Any other server-side failure (500)
    Internal(String),
}

impl ApiError {
    pub fn validation(error: impl Into<String>, detail: impl Into<String>) -> Self {
        ApiError::Validation {
            error: error.into(),
            detail: detail.into(),
        }
    }

    /// Status code the error maps to
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::SubmissionFailed(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation("Invalid request body", rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation { error, detail } => {
                (status, Json(ValidationErrorResponse { error, detail })).into_response()
            }
            ApiError::Conflict(error) | ApiError::SubmissionFailed(error) => {
                (status, Json(SubmitResponse::failed(error))).into_response()
            }
            ApiError::Internal(error) => (status, Json(json!({ "error": error }))).into_response(),
        }
    }
}
