//! Shared handler state.

use std::sync::Arc;

use recipebox_core::{User, UserId};
use recipebox_store::{MemoryStore, RecipeStore};
use tracing::info;

use crate::{
    auth::{ActorResolver, TokenTable},
    config::{ConfigError, GatewayConfig},
};

/// Handles injected into every request. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecipeStore>,
    pub actors: Arc<dyn ActorResolver>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecipeStore>, actors: Arc<dyn ActorResolver>) -> Self {
        Self { store, actors }
    }

    /// Build an in-memory deployment: seed the configured users and register their tokens.
    ///
    /// # Errors
    /// Returns [`ConfigError::SeedUser`] if a seed user has a malformed id, or
    /// [`ConfigError::Store`] if two seed users share an id.
    pub async fn from_config(config: &GatewayConfig) -> Result<Self, ConfigError> {
        let store = MemoryStore::new();
        let mut tokens = TokenTable::new();

        for seed in &config.users {
            let id = match &seed.id {
                Some(raw) => raw.parse::<UserId>().map_err(|e| ConfigError::SeedUser {
                    name: seed.name.clone(),
                    reason: e.to_string(),
                })?,
                None => UserId::generate(),
            };
            store
                .insert_user(User::with_id(id, &seed.name, &seed.email, &seed.password))
                .await?;
            tokens.insert(&seed.token, id);
            info!(user = %id, name = %seed.name, "seeded user");
        }

        Ok(Self::new(Arc::new(store), Arc::new(tokens)))
    }
}
