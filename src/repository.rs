//! Cached view of the remote recipe table.
//!
//! The repository owns the list the UI renders, a `loading` flag for fetches
//! and the last error message. Store failures never escape: each operation
//! records the message and hands back `None` / `false` instead.
//!
//! Every operation exists in two halves. `begin_*` prepares local state and
//! `finish_*` applies a store result, so the TUI can run the remote call on
//! the worker runtime and apply the outcome on the UI thread later. The
//! `async` methods chain both halves for callers that can simply await.

use crate::models::{CategoryFilter, Recipe, RecipeFormData};
use crate::store::{RecipeStore, StoreError, StoreResult};
use std::sync::Arc;
use tracing::{debug, error, info};

const FETCH_FAILED: &str = "Failed to fetch recipes";
const CREATE_FAILED: &str = "Failed to create recipe";
const UPDATE_FAILED: &str = "Failed to update recipe";
const DELETE_FAILED: &str = "Failed to delete recipe";

/// Identifies one fetch. Only the most recently issued ticket may replace
/// the cache, so an older response arriving late is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(u64);

pub struct RecipeRepository {
    store: Arc<dyn RecipeStore>,
    recipes: Vec<Recipe>,
    loading: bool,
    error: Option<String>,
    /// The stored error came from a fetch rather than a mutation
    fetch_failed: bool,
    last_ticket: u64,
}

impl std::fmt::Debug for RecipeRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeRepository")
            .field("store", &self.store.describe())
            .field("recipes", &self.recipes.len())
            .field("loading", &self.loading)
            .field("error", &self.error)
            .field("fetch_failed", &self.fetch_failed)
            .finish()
    }
}

impl RecipeRepository {
    pub fn new(store: Arc<dyn RecipeStore>) -> Self {
        Self {
            store,
            recipes: Vec::new(),
            loading: false,
            error: None,
            fetch_failed: false,
            last_ticket: 0,
        }
    }

    pub fn store(&self) -> Arc<dyn RecipeStore> {
        Arc::clone(&self.store)
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// True when the stored error is a failed fetch
    pub fn fetch_failed(&self) -> bool {
        self.error.is_some() && self.fetch_failed
    }

    /// Looks a recipe up in the cache
    pub fn find(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }

    // Fetch

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.last_ticket += 1;
        self.loading = true;
        self.error = None;
        FetchTicket(self.last_ticket)
    }

    /// Applies a fetch result. Returns true when the cache was replaced.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: StoreResult<Vec<Recipe>>) -> bool {
        if ticket.0 != self.last_ticket {
            debug!(ticket = ticket.0, latest = self.last_ticket, "discarding stale fetch");
            return false;
        }

        self.loading = false;
        match result {
            Ok(recipes) => {
                debug!(count = recipes.len(), "recipes fetched");
                self.recipes = recipes;
                self.error = None;
                true
            }
            Err(e) => {
                error!("Error fetching recipes: {}", e);
                self.error = Some(failure_message(&e, FETCH_FAILED));
                self.fetch_failed = true;
                false
            }
        }
    }

    /// Replaces the cache with the store's recipes, newest first
    pub async fn fetch(&mut self, category: CategoryFilter) -> bool {
        let ticket = self.begin_fetch();
        let result = self.store.list(category.category()).await;
        self.finish_fetch(ticket, result)
    }

    // Mutations

    /// Clears the previous error before a create, update or delete
    pub fn begin_mutation(&mut self) {
        self.error = None;
    }

    pub fn finish_create(&mut self, result: StoreResult<Recipe>) -> Option<Recipe> {
        match result {
            Ok(recipe) => {
                info!(id = %recipe.id, title = %recipe.title, "recipe created");
                self.recipes.insert(0, recipe.clone());
                Some(recipe)
            }
            Err(e) => {
                error!("Error creating recipe: {}", e);
                self.error = Some(failure_message(&e, CREATE_FAILED));
                self.fetch_failed = false;
                None
            }
        }
    }

    pub async fn create(&mut self, data: &RecipeFormData) -> Option<Recipe> {
        self.begin_mutation();
        let result = self.store.insert(data).await;
        self.finish_create(result)
    }

    /// On success the cached entry is replaced where it stands
    pub fn finish_update(&mut self, id: &str, result: StoreResult<Recipe>) -> Option<Recipe> {
        match result {
            Ok(recipe) => {
                info!(id, "recipe updated");
                for cached in self.recipes.iter_mut().filter(|r| r.id == id) {
                    *cached = recipe.clone();
                }
                Some(recipe)
            }
            Err(e) => {
                error!("Error updating recipe: {}", e);
                self.error = Some(failure_message(&e, UPDATE_FAILED));
                self.fetch_failed = false;
                None
            }
        }
    }

    pub async fn update(&mut self, id: &str, data: &RecipeFormData) -> Option<Recipe> {
        self.begin_mutation();
        let result = self.store.update(id, data).await;
        self.finish_update(id, result)
    }

    pub fn finish_delete(&mut self, id: &str, result: StoreResult<()>) -> bool {
        match result {
            Ok(()) => {
                info!(id, "recipe deleted");
                self.recipes.retain(|r| r.id != id);
                true
            }
            Err(e) => {
                error!("Error deleting recipe: {}", e);
                self.error = Some(failure_message(&e, DELETE_FAILED));
                self.fetch_failed = false;
                false
            }
        }
    }

    pub async fn delete(&mut self, id: &str) -> bool {
        self.begin_mutation();
        let result = self.store.delete(id).await;
        self.finish_delete(id, result)
    }

    /// Point lookup straight against the store; the cache is not consulted
    /// or changed, and any failure reads as `None`
    pub async fn get_by_id(&self, id: &str) -> Option<Recipe> {
        match self.store.get(id).await {
            Ok(recipe) => Some(recipe),
            Err(e) => {
                error!("Error fetching recipe {}: {}", id, e);
                None
            }
        }
    }
}

fn failure_message(err: &StoreError, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
