//! HTTP gateway for the recipebox service.
//!
//! Exposes the recipe CRUD resource: listing (full or filtered, sorted and
//! paged), lookup by id, author-stamped creation, partial update and delete.
//! Every recipe route requires a resolved actor; mutating routes pass the
//! validation gate before their handler runs.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod auth;
pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;

pub use config::GatewayConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
