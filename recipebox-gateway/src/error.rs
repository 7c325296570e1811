//! Error types for the gateway crate.
//!
//! [`ApiError`] is the single place where failures become HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use recipebox_core::Violation;
use recipebox_store::StoreError;
use serde_json::json;

/// Errors that can occur while handling a recipe request.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// No recipe exists with this (well-formed) id.
    #[error("recipe with id {0} not found")]
    NotFound(String),

    /// The path id is not a 24-character hex object id.
    #[error("{0} is not a valid id")]
    InvalidIdentifier(String),

    /// The payload broke one or more field constraints.
    #[error("validation failed: {}", summarize(.0))]
    ValidationFailed(Vec<Violation>),

    /// The request body was not JSON at all.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// A numeric path segment did not parse.
    #[error("{name} must be an integer, got '{value}'")]
    InvalidParameter { name: &'static str, value: String },

    /// Actor resolution failed.
    #[error("unauthorized: {0}")]
    Unauthorized(&'static str),

    /// The store rejected or failed the operation. The message is passed through.
    #[error("{0}")]
    StoreFailure(String),
}

impl ApiError {
    /// The HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::InvalidIdentifier(_)
            | ApiError::ValidationFailed(_)
            | ApiError::MalformedBody(_)
            | ApiError::InvalidParameter { .. }
            | ApiError::StoreFailure(_) => StatusCode::BAD_REQUEST,
        }
    }
}

fn summarize(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::StoreFailure(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::warn!(status = status.as_u16(), error = %self, "request rejected");

        let mut body = json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        });
        if let ApiError::ValidationFailed(violations) = &self {
            body["violations"] = json!(violations);
        }
        (status, Json(body)).into_response()
    }
}
