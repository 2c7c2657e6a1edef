//! HTTP error mapping
//!
//! Every failed request renders as the structured failure envelope
//! `{result: 0}`; the existing client keys off `result` alone, so the body
//! carries nothing else. The status code still distinguishes missing (404),
//! rejected (400) and failed (500).

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::domain::error::DomainError;

/// Handler-level error wrapper around the domain taxonomy
#[derive(Debug)]
pub struct ApiError(DomainError);

pub type ApiResult<T> = Result<T, ApiError>;

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        Self(DomainError::validation(format!("malformed upload: {err}")))
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        Self(DomainError::validation(format!(
            "expected a multipart form: {rejection}"
        )))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(DomainError::validation(format!(
            "malformed request body: {rejection}"
        )))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        match &self.0 {
            DomainError::Storage(message) => {
                tracing::error!(error = %message, "Request failed on storage")
            }
            other => tracing::debug!(error = %other, "Request rejected"),
        }

        (status, Json(json!({ "result": 0 }))).into_response()
    }
}
