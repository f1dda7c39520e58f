pub mod form;
pub mod recipe;
pub mod storage;

pub use form::{FormField, RecipeForm};
pub use recipe::{Category, CategoryFilter, Ingredient, Recipe, RecipeFormData};
pub use storage::StorageManager;
