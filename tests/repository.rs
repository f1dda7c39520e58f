//! Repository behaviour against the in-memory store

use recipebox::models::{Category, CategoryFilter, Ingredient, RecipeFormData};
use recipebox::repository::RecipeRepository;
use recipebox::store::{MemoryStore, RecipeStore, StoreError};
use std::sync::Arc;

fn form(title: &str, category: Category) -> RecipeFormData {
    RecipeFormData {
        title: title.to_string(),
        category,
        ..RecipeFormData::default()
    }
}

fn pancakes() -> RecipeFormData {
    RecipeFormData {
        title: "Pancakes".to_string(),
        category: Category::Breakfast,
        servings: 4,
        ingredients: vec![Ingredient::new("flour", 2.0, "cup")],
        ..RecipeFormData::default()
    }
}

async fn seeded() -> (Arc<MemoryStore>, RecipeRepository) {
    let store = Arc::new(MemoryStore::new());
    store.insert(&form("Soup", Category::Lunch)).await.unwrap();
    store.insert(&form("Brownies", Category::Dessert)).await.unwrap();
    store.insert(&form("Stew", Category::Dinner)).await.unwrap();

    let mut repo = RecipeRepository::new(store.clone());
    assert!(repo.fetch(CategoryFilter::All).await);
    (store, repo)
}

fn titles(repo: &RecipeRepository) -> Vec<&str> {
    repo.recipes().iter().map(|r| r.title.as_str()).collect()
}

#[tokio::test]
async fn fetch_lists_newest_first_and_filters_by_category() {
    let (_store, mut repo) = seeded().await;
    assert_eq!(titles(&repo), vec!["Stew", "Brownies", "Soup"]);
    assert!(!repo.loading());
    assert_eq!(repo.error(), None);

    assert!(repo.fetch(CategoryFilter::Only(Category::Dessert)).await);
    assert_eq!(titles(&repo), vec!["Brownies"]);
}

#[tokio::test]
async fn failed_fetch_keeps_previous_cache() {
    let (store, mut repo) = seeded().await;
    store.fail_with("connection refused");

    assert!(!repo.fetch(CategoryFilter::Only(Category::Lunch)).await);
    assert_eq!(titles(&repo), vec!["Stew", "Brownies", "Soup"]);
    assert_eq!(repo.error(), Some("connection refused"));
    assert!(repo.fetch_failed());
    assert!(!repo.loading());

    store.recover();
    assert!(repo.fetch(CategoryFilter::All).await);
    assert_eq!(repo.error(), None);
}

#[tokio::test]
async fn create_prepends_the_stored_record() {
    let (_store, mut repo) = seeded().await;

    let created = repo.create(&pancakes()).await.expect("created");
    assert!(!created.id.is_empty());
    assert_eq!(repo.recipes().len(), 4);
    assert_eq!(repo.recipes()[0].id, created.id);
    assert_eq!(repo.recipes()[0].ingredients, vec![Ingredient::new("flour", 2.0, "cup")]);
}

#[tokio::test]
async fn failed_create_records_error_and_returns_none() {
    let (store, mut repo) = seeded().await;
    store.fail_with("insert denied");

    assert!(repo.create(&pancakes()).await.is_none());
    assert_eq!(repo.recipes().len(), 3);
    assert_eq!(repo.error(), Some("insert denied"));
}

#[tokio::test]
async fn update_replaces_entry_in_place() {
    let (_store, mut repo) = seeded().await;
    let id = repo.recipes()[1].id.clone();

    let mut data = repo.recipes()[1].to_form_data();
    data.title = "Fudge Brownies".to_string();
    let updated = repo.update(&id, &data).await.expect("updated");

    assert_eq!(updated.title, "Fudge Brownies");
    assert_eq!(titles(&repo), vec!["Stew", "Fudge Brownies", "Soup"]);
}

#[tokio::test]
async fn update_of_unknown_id_fails() {
    let (_store, mut repo) = seeded().await;
    assert!(repo.update("missing", &pancakes()).await.is_none());
    assert!(repo.error().is_some());
    assert_eq!(repo.recipes().len(), 3);
}

#[tokio::test]
async fn delete_removes_entry() {
    let (store, mut repo) = seeded().await;
    let id = repo.recipes()[0].id.clone();

    assert!(repo.delete(&id).await);
    assert_eq!(titles(&repo), vec!["Brownies", "Soup"]);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn delete_of_nonexistent_id_fails_and_keeps_cache() {
    let (_store, mut repo) = seeded().await;

    assert!(!repo.delete("does-not-exist").await);
    assert_eq!(repo.recipes().len(), 3);
    assert!(repo.error().unwrap().contains("does-not-exist"));
    assert!(!repo.fetch_failed());
}

#[tokio::test]
async fn mutation_clears_previous_error() {
    let (store, mut repo) = seeded().await;
    store.fail_with("flaky");
    assert!(!repo.fetch(CategoryFilter::All).await);

    store.recover();
    assert!(repo.create(&pancakes()).await.is_some());
    assert_eq!(repo.error(), None);
}

#[tokio::test]
async fn get_by_id_bypasses_cache() {
    let (store, repo) = seeded().await;
    let outside = store.insert(&form("Late addition", Category::Snack)).await.unwrap();

    assert!(repo.find(&outside.id).is_none());
    let found = repo.get_by_id(&outside.id).await.expect("found");
    assert_eq!(found.title, "Late addition");
    assert!(repo.get_by_id("nope").await.is_none());
    assert_eq!(repo.recipes().len(), 3);
}

#[tokio::test]
async fn stale_fetch_result_is_discarded() {
    let (store, mut repo) = seeded().await;

    let first = repo.begin_fetch();
    let second = repo.begin_fetch();

    let dinner = store.list(Some(Category::Dinner)).await;
    assert!(repo.finish_fetch(second, dinner));

    let everything = store.list(None).await;
    assert!(!repo.finish_fetch(first, everything));
    assert_eq!(titles(&repo), vec!["Stew"]);
    assert!(!repo.loading());
}

#[tokio::test]
async fn loading_stays_set_while_a_newer_fetch_is_outstanding() {
    let (_store, mut repo) = seeded().await;

    let first = repo.begin_fetch();
    let _second = repo.begin_fetch();
    assert!(!repo.finish_fetch(first, Err(StoreError::Backend("late".into()))));
    assert!(repo.loading());
    assert_eq!(repo.error(), None);
}
