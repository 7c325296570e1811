use serde::{Deserialize, Serialize};

use crate::id::{RecipeId, UserId};
use crate::input::{CreateRecipeInput, RecipePatch};
use crate::user::PublicUser;

/// A persisted recipe.
///
/// `id` is assigned by the store and `author` is stamped from the creating
/// actor; neither changes after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub author: UserId,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
}

impl Recipe {
    /// Materializes a stored record from an insert request and its new id.
    #[must_use]
    pub fn from_new(id: RecipeId, new: NewRecipe) -> Self {
        Self {
            id,
            author: new.author,
            name: new.name,
            description: new.description,
            ingredients: new.ingredients,
        }
    }

    /// Applies the supplied fields of `patch`. `id` and `author` are untouched.
    pub fn apply(&mut self, patch: &RecipePatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(ingredients) = &patch.ingredients {
            self.ingredients.clone_from(ingredients);
        }
    }

    /// Resolves the author reference. `None` means the user no longer exists.
    #[must_use]
    pub fn populate(self, author: Option<PublicUser>) -> PopulatedRecipe {
        PopulatedRecipe {
            id: self.id,
            author,
            name: self.name,
            description: self.description,
            ingredients: self.ingredients,
        }
    }
}

/// What the store persists on insert: a validated payload plus its author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecipe {
    pub author: UserId,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
}

impl NewRecipe {
    /// Binds a validated create payload to the actor creating it.
    #[must_use]
    pub fn new(author: UserId, input: CreateRecipeInput) -> Self {
        Self {
            author,
            name: input.name,
            description: input.description,
            ingredients: input.ingredients,
        }
    }
}

/// A recipe with `author` expanded into the public user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulatedRecipe {
    pub id: RecipeId,
    pub author: Option<PublicUser>,
    pub name: String,
    pub description: String,
    pub ingredients: Vec<String>,
}
