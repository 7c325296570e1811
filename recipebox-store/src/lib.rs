//! Document store layer for the recipebox service.
//!
//! Defines the [`RecipeStore`] contract the HTTP handlers are written
//! against, and [`MemoryStore`], an in-process implementation of it.

#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]

pub mod backend;
pub mod error;
pub mod memory;

pub use backend::RecipeStore;
pub use error::StoreError;
pub use memory::MemoryStore;
