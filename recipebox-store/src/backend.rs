//! Document store abstraction trait.
//!
//! Handlers talk to storage only through [`RecipeStore`], so the in-memory
//! store and any real database client are interchangeable.

use async_trait::async_trait;
use recipebox_core::{NewRecipe, Recipe, RecipeFilter, RecipeId, RecipePatch, RecipeQuery, User, UserId};

use crate::StoreError;

/// Persistence contract for recipes and the users that author them.
///
/// Implementations must be `Send + Sync` so a single handle can be shared by
/// every request. Single-document writes ([`update_by_id`](Self::update_by_id),
/// [`delete_by_id`](Self::delete_by_id)) are atomic; nothing else is coordinated.
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Count the recipes selected by `filter`.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidQuery`] if the filter cannot be evaluated.
    async fn count(&self, filter: &RecipeFilter) -> Result<u64, StoreError>;

    /// Run a filtered, optionally sorted and paged listing.
    ///
    /// Without a sort the store's natural order is returned. A `limit` of zero
    /// means unlimited; a negative `limit` is read as its absolute value.
    ///
    /// # Errors
    /// Returns [`StoreError::NegativeSkip`] if `query.skip < 0`, or
    /// [`StoreError::InvalidQuery`] if the filter cannot be evaluated.
    async fn find(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, StoreError>;

    /// Fetch one recipe.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, StoreError>;

    /// Persist a new recipe and return it with its generated id.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError>;

    /// Apply `patch` to one recipe and return its post-update state.
    ///
    /// Returns `Ok(None)` if no recipe has this id.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    async fn update_by_id(&self, id: &RecipeId, patch: &RecipePatch) -> Result<Option<Recipe>, StoreError>;

    /// Remove one recipe, returning what was removed.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    async fn delete_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, StoreError>;

    /// Look up a user, credential included. Callers strip it before responding.
    ///
    /// # Errors
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    async fn find_user(&self, id: &UserId) -> Result<Option<User>, StoreError>;

    /// Register a user.
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateUser`] if the id is taken.
    async fn insert_user(&self, user: User) -> Result<(), StoreError>;
}
