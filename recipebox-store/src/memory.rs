//! In-process [`RecipeStore`] backed by insertion-ordered maps.

use std::collections::HashMap;

use async_trait::async_trait;
use indexmap::IndexMap;
use recipebox_core::{NewRecipe, Recipe, RecipeFilter, RecipeId, RecipePatch, RecipeQuery, User, UserId};
use regex::{Regex, RegexBuilder};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{RecipeStore, StoreError};

/// Thread-safe in-memory document store.
///
/// Natural order is insertion order. Every write takes the lock once, so
/// single-document updates and deletes are atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    recipes: RwLock<IndexMap<RecipeId, Recipe>>,
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Compiled form of a [`RecipeFilter`].
enum Matcher {
    All,
    Pattern(Regex),
}

impl Matcher {
    /// The keyword is a case-insensitive regular expression. An invalid
    /// pattern is a [`StoreError::InvalidQuery`].
    fn compile(filter: &RecipeFilter) -> Result<Self, StoreError> {
        match filter {
            RecipeFilter::All => Ok(Self::All),
            RecipeFilter::Keyword(keyword) => RegexBuilder::new(keyword)
                .case_insensitive(true)
                .build()
                .map(Self::Pattern)
                .map_err(|e| StoreError::InvalidQuery(e.to_string())),
        }
    }

    fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            Self::All => true,
            Self::Pattern(re) => re.is_match(&recipe.name) || re.is_match(&recipe.description),
        }
    }
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn count(&self, filter: &RecipeFilter) -> Result<u64, StoreError> {
        let matcher = Matcher::compile(filter)?;
        let recipes = self.recipes.read().await;
        let count = recipes.values().filter(|r| matcher.matches(r)).count();
        Ok(u64::try_from(count).unwrap_or(u64::MAX))
    }

    async fn find(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, StoreError> {
        let skip = usize::try_from(query.skip).map_err(|_| StoreError::NegativeSkip(query.skip))?;
        let limit = match query.limit.unsigned_abs() {
            0 => usize::MAX,
            n => usize::try_from(n).unwrap_or(usize::MAX),
        };
        let matcher = Matcher::compile(&query.filter)?;

        let mut selected: Vec<Recipe> = {
            let recipes = self.recipes.read().await;
            recipes.values().filter(|r| matcher.matches(r)).cloned().collect()
        };
        if let Some(sort) = &query.sort {
            // Stable: ties keep insertion order.
            selected.sort_by(|a, b| sort.compare(a, b));
        }

        let page: Vec<Recipe> = selected.into_iter().skip(skip).take(limit).collect();
        debug!(skip, limit = query.limit, returned = page.len(), "recipe query");
        Ok(page)
    }

    async fn find_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, StoreError> {
        Ok(self.recipes.read().await.get(id).cloned())
    }

    async fn insert(&self, recipe: NewRecipe) -> Result<Recipe, StoreError> {
        let mut recipes = self.recipes.write().await;
        let mut id = RecipeId::generate();
        while recipes.contains_key(&id) {
            id = RecipeId::generate();
        }
        let stored = Recipe::from_new(id, recipe);
        recipes.insert(id, stored.clone());
        debug!(id = %id, "recipe inserted");
        Ok(stored)
    }

    async fn update_by_id(&self, id: &RecipeId, patch: &RecipePatch) -> Result<Option<Recipe>, StoreError> {
        let mut recipes = self.recipes.write().await;
        Ok(recipes.get_mut(id).map(|recipe| {
            recipe.apply(patch);
            recipe.clone()
        }))
    }

    async fn delete_by_id(&self, id: &RecipeId) -> Result<Option<Recipe>, StoreError> {
        Ok(self.recipes.write().await.shift_remove(id))
    }

    async fn find_user(&self, id: &UserId) -> Result<Option<User>, StoreError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn insert_user(&self, user: User) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) {
            return Err(StoreError::DuplicateUser(user.id));
        }
        users.insert(user.id, user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recipebox_core::{SortDirection, SortField, SortSpec};

    fn new_recipe(name: &str, description: &str) -> NewRecipe {
        NewRecipe {
            author: UserId::generate(),
            name: name.to_owned(),
            description: description.to_owned(),
            ingredients: vec![],
        }
    }

    async fn names(store: &MemoryStore, query: &RecipeQuery) -> Vec<String> {
        match store.find(query).await {
            Ok(items) => items.into_iter().map(|r| r.name).collect(),
            Err(e) => panic!("query failed: {e}"),
        }
    }

    #[tokio::test]
    async fn keyword_is_a_case_insensitive_pattern() {
        let store = MemoryStore::new();
        for (name, description) in [("Soup A", ""), ("Tomato soup", ""), ("Cake", "")] {
            if let Err(e) = store.insert(new_recipe(name, description)).await {
                panic!("insert failed: {e}");
            }
        }
        let anchored = RecipeQuery::new(RecipeFilter::Keyword("^soup".to_owned()));
        assert_eq!(names(&store, &anchored).await, vec!["Soup A"]);

        let either = RecipeQuery::new(RecipeFilter::Keyword("soup|cake".to_owned()));
        assert_eq!(names(&store, &either).await, vec!["Soup A", "Tomato soup", "Cake"]);
    }

    #[tokio::test]
    async fn invalid_keyword_pattern_is_an_invalid_query() {
        let store = MemoryStore::new();
        let filter = RecipeFilter::Keyword("(".to_owned());
        assert!(matches!(store.count(&filter).await, Err(StoreError::InvalidQuery(_))));
        let result = store.find(&RecipeQuery::new(filter)).await;
        assert!(matches!(result, Err(StoreError::InvalidQuery(_))), "got {result:?}");
    }

    #[tokio::test]
    async fn zero_limit_is_unlimited_and_negative_limit_uses_magnitude() {
        let store = MemoryStore::new();
        for name in ["a", "b", "c"] {
            if let Err(e) = store.insert(new_recipe(name, "")).await {
                panic!("insert failed: {e}");
            }
        }
        let base = RecipeQuery::new(RecipeFilter::All);
        assert_eq!(names(&store, &base.clone().paged(0, 0)).await.len(), 3);
        assert_eq!(names(&store, &base.paged(1, -1)).await, vec!["b"]);
    }

    #[tokio::test]
    async fn negative_skip_is_a_store_error() {
        let store = MemoryStore::new();
        let result = store.find(&RecipeQuery::new(RecipeFilter::All).paged(-1, 10)).await;
        assert_eq!(result, Err(StoreError::NegativeSkip(-1)));
    }

    #[tokio::test]
    async fn equal_sort_keys_keep_insertion_order() {
        let store = MemoryStore::new();
        for (name, description) in [("first", "same"), ("second", "same"), ("third", "aaa")] {
            if let Err(e) = store.insert(new_recipe(name, description)).await {
                panic!("insert failed: {e}");
            }
        }
        let query = RecipeQuery::new(RecipeFilter::All)
            .sorted(SortSpec::new(SortField::Description, SortDirection::Descending));
        assert_eq!(names(&store, &query).await, vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn duplicate_user_is_rejected() {
        let store = MemoryStore::new();
        let user = User::new("Ada", "ada@example.com", "pw");
        assert!(store.insert_user(user.clone()).await.is_ok());
        assert_eq!(store.insert_user(user.clone()).await, Err(StoreError::DuplicateUser(user.id)));
    }
}
