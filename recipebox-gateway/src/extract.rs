//! Request extractors.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
};
use recipebox_core::Validate;
use serde_json::{Map, Value};

use crate::error::ApiError;

/// A request body that passed the validation gate for shape `T`.
///
/// Rejects with [`ApiError::MalformedBody`] if the body is not JSON and with
/// [`ApiError::ValidationFailed`] if it is JSON of the wrong shape, so the
/// handler only ever runs with a well-formed payload. An empty or blank body
/// is read as `{}`. The `Content-Type` header is not consulted.
#[derive(Debug, Clone)]
pub struct Validated<T>(pub T);

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::MalformedBody(e.body_text()))?;
        let value = if bytes.iter().all(u8::is_ascii_whitespace) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice(&bytes).map_err(|e| ApiError::MalformedBody(e.to_string()))?
        };
        T::validate(&value).map(Validated).map_err(ApiError::ValidationFailed)
    }
}
