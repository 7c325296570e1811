//! Actor resolution.
//!
//! Every recipe route runs behind [`require_actor`], which turns the bearer
//! token into an [`Actor`] and stores it in the request extensions. Requests
//! that fail resolution never reach a handler.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use recipebox_core::UserId;

use crate::{error::ApiError, state::AppState};

/// The identity a request acts as. Used to stamp recipe authorship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
}

/// Maps request credentials to an [`Actor`].
#[async_trait]
pub trait ActorResolver: Send + Sync {
    /// Resolve a bearer token, or `None` if it is not recognised.
    async fn resolve(&self, token: &str) -> Option<Actor>;
}

/// Static bearer-token table, populated from configuration.
#[derive(Debug, Default, Clone)]
pub struct TokenTable {
    tokens: HashMap<String, UserId>,
}

impl TokenTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `token` as acting for `user_id`, replacing any previous mapping.
    pub fn insert(&mut self, token: impl Into<String>, user_id: UserId) {
        self.tokens.insert(token.into(), user_id);
    }
}

#[async_trait]
impl ActorResolver for TokenTable {
    async fn resolve(&self, token: &str) -> Option<Actor> {
        self.tokens.get(token).map(|&user_id| Actor { user_id })
    }
}

/// Middleware that resolves the actor for every request it wraps.
///
/// # Errors
/// Returns [`ApiError::Unauthorized`] if the `Authorization` header is
/// missing, not valid UTF-8, not a `Bearer` credential, or names an unknown token.
pub async fn require_actor(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(ApiError::Unauthorized("missing Authorization header"))?;
    let value = auth_header
        .to_str()
        .map_err(|_| ApiError::Unauthorized("invalid Authorization header"))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or(ApiError::Unauthorized("expected a Bearer token"))?;

    let actor = state
        .actors
        .resolve(token.trim())
        .await
        .ok_or(ApiError::Unauthorized("invalid or expired token"))?;

    tracing::debug!(actor = %actor.user_id, "actor resolved");
    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn token_table_resolves_known_tokens_only() {
        let user_id = UserId::generate();
        let mut table = TokenTable::new();
        table.insert("s3cret", user_id);

        assert_eq!(table.resolve("s3cret").await, Some(Actor { user_id }));
        assert_eq!(table.resolve("S3CRET").await, None);
        assert_eq!(table.resolve("").await, None);
    }

    #[tokio::test]
    async fn reinserting_a_token_replaces_its_user() {
        let first = UserId::generate();
        let second = UserId::generate();
        let mut table = TokenTable::new();
        table.insert("t", first);
        table.insert("t", second);
        assert_eq!(table.resolve("t").await.map(|a| a.user_id), Some(second));
    }
}
