//! Core types for the recipebox service.
//!
//! Defines the recipe entity and its author reference, document identifiers,
//! the create/update payloads with their validation gate, and the query types
//! used for filtered, sorted and paged listings.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod id;
pub mod input;
pub mod query;
pub mod recipe;
pub mod user;

pub use error::CoreError;
pub use id::{ObjectId, RecipeId, UserId};
pub use input::{validate_create, validate_patch, Constraint, CreateRecipeInput, RecipePatch, Validate, Violation};
pub use query::{RecipeFilter, RecipeList, RecipeQuery, SortDirection, SortField, SortSpec};
pub use recipe::{NewRecipe, PopulatedRecipe, Recipe};
pub use user::{PublicUser, User};
