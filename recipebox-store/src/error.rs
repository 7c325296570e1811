//! Error types for the store crate.

use recipebox_core::UserId;

/// Errors reported by a [`RecipeStore`](crate::RecipeStore).
///
/// The gateway does not distinguish between these: all of them reach the
/// client as a 400 carrying this message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The paging window started before the first record.
    #[error("skip value must be non-negative, but received: {0}")]
    NegativeSkip(i64),

    /// A query could not be compiled or executed.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A user with this id already exists.
    #[error("duplicate key: user {0} already exists")]
    DuplicateUser(UserId),

    /// The backing store is unavailable or failed mid-operation.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
