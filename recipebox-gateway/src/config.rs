//! Gateway configuration.
//!
//! Layered with figment: built-in defaults, then an optional TOML file
//! (`RECIPEBOX_CONFIG`, default `recipebox.toml`), then `RECIPEBOX_*`
//! environment variables.

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use recipebox_store::StoreError;
use serde::{Deserialize, Serialize};

/// Environment variable naming the TOML config file.
pub const CONFIG_PATH_VAR: &str = "RECIPEBOX_CONFIG";

const DEFAULT_CONFIG_PATH: &str = "recipebox.toml";
const ENV_PREFIX: &str = "RECIPEBOX_";

/// Errors raised while loading configuration or bootstrapping from it.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// A provider failed or a value had the wrong type.
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A seed user could not be created.
    #[error("invalid seed user '{name}': {reason}")]
    SeedUser { name: String, reason: String },

    /// The store refused a seed user.
    #[error("failed to seed store: {0}")]
    Store(#[from] StoreError),
}

/// Runtime settings for the HTTP gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Socket address to bind.
    pub listen_addr: String,
    /// Path prefix the recipe routes are mounted under, e.g. `/recipes`.
    pub resource_prefix: String,
    /// Users created at startup, each with a bearer token.
    pub users: Vec<SeedUser>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:3000".to_owned(),
            resource_prefix: "/recipes".to_owned(),
            users: Vec::new(),
        }
    }
}

/// A user to create at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedUser {
    /// Fixed 24-hex id; generated when absent.
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub password: String,
    /// Bearer token that acts as this user.
    pub token: String,
}

impl GatewayConfig {
    /// Load from the default file location and environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::Figment`] if a source is unreadable or a value is mistyped.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_owned());
        Self::load_from(path)
    }

    /// Load from an explicit TOML path (missing files are skipped) and environment.
    ///
    /// # Errors
    /// Returns [`ConfigError::Figment`] if a source is unreadable or a value is mistyped.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let mut config: Self = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"]))
            .extract()
            .map_err(Box::new)?;
        config.resource_prefix = normalize_prefix(&config.resource_prefix);
        Ok(config)
    }
}

/// Force a leading `/` and drop trailing ones. The root prefix becomes `""`.
#[must_use]
pub fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
