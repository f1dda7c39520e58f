use crate::models::{Category, Ingredient, Recipe, RecipeFormData};
use crate::store::{RecipeStore, StoreError, StoreResult};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::{Mutex, MutexGuard};
use uuid::Uuid;

/// In-process recipe table. Used for `--offline` runs and as the test double
/// for the repository; `fail_with` makes every following call fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Recipe>>,
    failure: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_recipes(recipes: Vec<Recipe>) -> Self {
        Self {
            rows: Mutex::new(recipes),
            failure: Mutex::new(None),
        }
    }

    /// A couple of recipes so offline mode has something to show
    pub fn with_samples() -> Self {
        let now = Utc::now();
        let pancakes = Recipe::from_form(
            Uuid::new_v4().to_string(),
            RecipeFormData {
                title: "Classic Pancakes".into(),
                description: Some("Fluffy weekend pancakes".into()),
                category: Category::Breakfast,
                prep_time: Some(10),
                cook_time: Some(15),
                servings: 4,
                ingredients: vec![
                    Ingredient::new("flour", 1.5, "cup"),
                    Ingredient::new("milk", 1.25, "cup"),
                    Ingredient::new("egg", 1.0, ""),
                    Ingredient::new("sugar", 1.0, "tbsp"),
                ],
                instructions: vec![
                    "Whisk the dry ingredients".into(),
                    "Beat in milk and egg".into(),
                    "Cook on a hot griddle until golden".into(),
                ],
                ..RecipeFormData::default()
            },
            now - Duration::minutes(5),
        );
        let cake = Recipe::from_form(
            Uuid::new_v4().to_string(),
            RecipeFormData {
                title: "Chocolate Cake".into(),
                category: Category::Dessert,
                prep_time: Some(20),
                cook_time: Some(35),
                servings: 8,
                ingredients: vec![
                    Ingredient::new("flour", 2.0, "cup"),
                    Ingredient::new("cocoa powder", 0.75, "cup"),
                    Ingredient::new("chocolate chips", 1.0, "cup"),
                ],
                instructions: vec!["Mix".into(), "Bake at 180C".into()],
                ..RecipeFormData::default()
            },
            now,
        );
        Self::with_recipes(vec![cake, pancakes])
    }

    /// Every call fails with `message` until `recover` is called
    pub fn fail_with(&self, message: impl Into<String>) {
        *lock(&self.failure) = Some(message.into());
    }

    pub fn recover(&self) {
        *lock(&self.failure) = None;
    }

    pub fn len(&self) -> usize {
        lock(&self.rows).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check(&self) -> StoreResult<()> {
        match lock(&self.failure).as_ref() {
            Some(message) => Err(StoreError::Backend(message.clone())),
            None => Ok(()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[async_trait]
impl RecipeStore for MemoryStore {
    async fn list(&self, category: Option<Category>) -> StoreResult<Vec<Recipe>> {
        self.check()?;
        let mut recipes: Vec<Recipe> = lock(&self.rows)
            .iter()
            .filter(|r| category.is_none_or(|c| r.category == c))
            .cloned()
            .collect();
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(recipes)
    }

    async fn insert(&self, data: &RecipeFormData) -> StoreResult<Recipe> {
        self.check()?;
        let recipe = Recipe::from_form(Uuid::new_v4().to_string(), data.clone(), Utc::now());
        lock(&self.rows).insert(0, recipe.clone());
        Ok(recipe)
    }

    async fn update(&self, id: &str, data: &RecipeFormData) -> StoreResult<Recipe> {
        self.check()?;
        let mut rows = lock(&self.rows);
        let recipe = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        recipe.apply_form(data.clone(), Utc::now());
        Ok(recipe.clone())
    }

    async fn delete(&self, id: &str) -> StoreResult<()> {
        self.check()?;
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|r| r.id != id);
        if rows.len() == before {
            return Err(StoreError::NotFound(id.to_string()));
        }
        Ok(())
    }

    async fn get(&self, id: &str) -> StoreResult<Recipe> {
        self.check()?;
        lock(&self.rows)
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn describe(&self) -> String {
        "offline".to_string()
    }
}
