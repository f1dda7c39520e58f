//! Remote recipe table.
//!
//! `RecipeStore` is the narrow contract the repository consumes. The real
//! implementation talks to a hosted PostgREST table; the in-memory one backs
//! offline mode and the tests.

pub mod memory;
pub mod supabase;

pub use memory::MemoryStore;
pub use supabase::SupabaseStore;

use crate::models::{Category, Recipe, RecipeFormData};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// Transport failure before a response arrived
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the remote table
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("Recipe not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Store configuration error: {0}")]
    Config(String),

    /// Failure reported by a store that is not HTTP backed
    #[error("{0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Request/response operations on the remote recipe table
#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// All recipes, newest first, optionally restricted to one category
    async fn list(&self, category: Option<Category>) -> StoreResult<Vec<Recipe>>;

    /// Inserts a record; the store assigns id and timestamps
    async fn insert(&self, data: &RecipeFormData) -> StoreResult<Recipe>;

    /// Replaces every mutable field of the record with `id`
    async fn update(&self, id: &str, data: &RecipeFormData) -> StoreResult<Recipe>;

    /// Removes the record. An unknown id is `StoreError::NotFound`.
    async fn delete(&self, id: &str) -> StoreResult<()>;

    async fn get(&self, id: &str) -> StoreResult<Recipe>;

    /// Short name for logs and the header bar
    fn describe(&self) -> String;
}
