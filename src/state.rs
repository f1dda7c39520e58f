//! Interaction state of the recipe list: which popups are open, the active
//! filters, and the favorites set.
//!
//! Every field is private and changes only through the named actions below.
//! Favorites are the one part that outlives the session: they are read from
//! local storage when the store is built and written back on every change.

use crate::models::{CategoryFilter, StorageManager};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Document key the favorites set is stored under
pub const FAVORITES_KEY: &str = "recipe-collection-store";

/// Persisted shape: favorites only, no UI or filter state
#[derive(Debug, Default, Serialize, Deserialize)]
struct FavoritesDocument {
    favorites: Vec<String>,
}

#[derive(Debug)]
pub struct UiStore {
    form_modal_open: bool,
    detail_modal_open: bool,
    editing_recipe_id: Option<String>,
    viewing_recipe_id: Option<String>,
    selected_category: CategoryFilter,
    showing_favorites: bool,
    search_query: String,
    favorites: BTreeSet<String>,
    storage: Option<StorageManager>,
}

impl Default for UiStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl UiStore {
    /// Builds the store and restores favorites from `storage` when available
    pub fn new(storage: Option<StorageManager>) -> Self {
        let favorites = storage
            .as_ref()
            .map(load_favorites)
            .unwrap_or_default();

        Self {
            form_modal_open: false,
            detail_modal_open: false,
            editing_recipe_id: None,
            viewing_recipe_id: None,
            selected_category: CategoryFilter::All,
            showing_favorites: false,
            search_query: String::new(),
            favorites,
            storage,
        }
    }

    // Modal state

    pub fn is_form_modal_open(&self) -> bool {
        self.form_modal_open
    }

    pub fn is_detail_modal_open(&self) -> bool {
        self.detail_modal_open
    }

    pub fn editing_recipe_id(&self) -> Option<&str> {
        self.editing_recipe_id.as_deref()
    }

    pub fn viewing_recipe_id(&self) -> Option<&str> {
        self.viewing_recipe_id.as_deref()
    }

    /// `None` opens the form for a new recipe
    pub fn open_form_modal(&mut self, recipe_id: Option<String>) {
        self.form_modal_open = true;
        self.editing_recipe_id = recipe_id;
    }

    pub fn close_form_modal(&mut self) {
        self.form_modal_open = false;
        self.editing_recipe_id = None;
    }

    pub fn open_detail_modal(&mut self, recipe_id: String) {
        self.detail_modal_open = true;
        self.viewing_recipe_id = Some(recipe_id);
    }

    pub fn close_detail_modal(&mut self) {
        self.detail_modal_open = false;
        self.viewing_recipe_id = None;
    }

    // Filter state

    pub fn selected_category(&self) -> CategoryFilter {
        self.selected_category
    }

    pub fn showing_favorites(&self) -> bool {
        self.showing_favorites
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn set_selected_category(&mut self, category: CategoryFilter) {
        self.selected_category = category;
    }

    pub fn toggle_show_favorites(&mut self) {
        self.showing_favorites = !self.showing_favorites;
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.search_query = query.into();
    }

    /// Back to defaults for everything except favorites
    pub fn reset_ui(&mut self) {
        self.form_modal_open = false;
        self.detail_modal_open = false;
        self.editing_recipe_id = None;
        self.viewing_recipe_id = None;
        self.selected_category = CategoryFilter::All;
        self.showing_favorites = false;
        self.search_query.clear();
    }

    // Favorites

    pub fn favorites(&self) -> &BTreeSet<String> {
        &self.favorites
    }

    pub fn is_favorite(&self, recipe_id: &str) -> bool {
        self.favorites.contains(recipe_id)
    }

    pub fn add_favorite(&mut self, recipe_id: impl Into<String>) {
        if self.favorites.insert(recipe_id.into()) {
            self.persist_favorites();
        }
    }

    pub fn remove_favorite(&mut self, recipe_id: &str) {
        if self.favorites.remove(recipe_id) {
            self.persist_favorites();
        }
    }

    /// Adds the id if absent, removes it if present. Returns the new membership.
    pub fn toggle_favorite(&mut self, recipe_id: &str) -> bool {
        if self.is_favorite(recipe_id) {
            self.remove_favorite(recipe_id);
            false
        } else {
            self.add_favorite(recipe_id);
            true
        }
    }

    pub fn clear_favorites(&mut self) {
        self.favorites.clear();
        self.persist_favorites();
    }

    fn persist_favorites(&self) {
        let Some(storage) = &self.storage else {
            return;
        };

        let document = FavoritesDocument {
            favorites: self.favorites.iter().cloned().collect(),
        };
        match storage.save(FAVORITES_KEY, &document) {
            Ok(()) => debug!(count = document.favorites.len(), "favorites saved"),
            Err(e) => warn!("Failed to save favorites: {:#}", e),
        }
    }
}

/// Reads the favorites set; an unreadable document yields an empty set
pub fn load_favorites(storage: &StorageManager) -> BTreeSet<String> {
    match storage.load::<FavoritesDocument>(FAVORITES_KEY) {
        Ok(Some(document)) => document.favorites.into_iter().collect(),
        Ok(None) => BTreeSet::new(),
        Err(e) => {
            warn!("Ignoring unreadable favorites: {:#}", e);
            BTreeSet::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn form_modal_close_clears_editing_id() {
        let mut ui = UiStore::default();
        ui.open_form_modal(Some("r1".into()));
        assert!(ui.is_form_modal_open());
        assert_eq!(ui.editing_recipe_id(), Some("r1"));

        ui.close_form_modal();
        assert!(!ui.is_form_modal_open());
        assert_eq!(ui.editing_recipe_id(), None);

        ui.open_form_modal(None);
        assert!(ui.is_form_modal_open());
        assert_eq!(ui.editing_recipe_id(), None);
    }

    #[test]
    fn modals_are_independent() {
        let mut ui = UiStore::default();
        ui.open_detail_modal("r2".into());
        ui.open_form_modal(Some("r2".into()));
        assert!(ui.is_detail_modal_open() && ui.is_form_modal_open());

        ui.close_detail_modal();
        assert_eq!(ui.viewing_recipe_id(), None);
        assert!(ui.is_form_modal_open());
    }

    #[test]
    fn toggle_favorite_twice_restores_membership() {
        let mut ui = UiStore::default();
        ui.add_favorite("keep");
        let before = ui.favorites().clone();

        assert!(ui.toggle_favorite("r3"));
        assert!(ui.is_favorite("r3"));
        assert!(!ui.toggle_favorite("r3"));
        assert_eq!(ui.favorites(), &before);
    }

    #[test]
    fn reset_ui_keeps_favorites() {
        let mut ui = UiStore::default();
        ui.add_favorite("r1");
        ui.set_selected_category(CategoryFilter::Only(Category::Lunch));
        ui.toggle_show_favorites();
        ui.set_search_query("soup");
        ui.open_detail_modal("r1".into());

        ui.reset_ui();

        assert_eq!(ui.selected_category(), CategoryFilter::All);
        assert!(!ui.showing_favorites());
        assert_eq!(ui.search_query(), "");
        assert!(!ui.is_detail_modal_open());
        assert!(ui.is_favorite("r1"));
    }

    #[test]
    fn favorites_survive_a_new_session() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::at(dir.path()).unwrap();

        let mut ui = UiStore::new(Some(storage.clone()));
        ui.toggle_favorite("a");
        ui.toggle_favorite("b");
        ui.toggle_favorite("a");
        ui.set_search_query("not persisted");

        let restored = UiStore::new(Some(storage));
        assert_eq!(
            restored.favorites().iter().cloned().collect::<Vec<_>>(),
            vec!["b".to_string()]
        );
        assert_eq!(restored.search_query(), "");
    }
}
