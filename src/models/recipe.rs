use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A single line of a recipe's ingredient list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, amount: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            amount,
            unit: unit.into(),
        }
    }

    /// An ingredient row is kept on submit only when it names something
    /// and has a positive amount
    pub fn is_blank(&self) -> bool {
        self.name.trim().is_empty() || !(self.amount > 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Breakfast,
    Lunch,
    Dinner,
    Dessert,
    Snack,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Breakfast,
        Category::Lunch,
        Category::Dinner,
        Category::Dessert,
        Category::Snack,
    ];

    /// Column value used by the remote table
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Breakfast => "breakfast",
            Category::Lunch => "lunch",
            Category::Dinner => "dinner",
            Category::Dessert => "dessert",
            Category::Snack => "snack",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Breakfast => "Breakfast",
            Category::Lunch => "Lunch",
            Category::Dinner => "Dinner",
            Category::Dessert => "Dessert",
            Category::Snack => "Snack",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::Breakfast => "🍳",
            Category::Lunch => "🥗",
            Category::Dinner => "🍝",
            Category::Dessert => "🍰",
            Category::Snack => "🍿",
        }
    }

    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let index = Self::ALL.iter().position(|c| c == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Ok(Category::Breakfast),
            "lunch" => Ok(Category::Lunch),
            "dinner" => Ok(Category::Dinner),
            "dessert" => Ok(Category::Dessert),
            "snack" => Ok(Category::Snack),
            other => Err(format!("unknown category: {}", other)),
        }
    }
}

/// Category selection applied when fetching from the remote table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// "All" followed by every category, in tab order
    pub fn tabs() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.iter().copied().map(CategoryFilter::Only))
            .collect()
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(*category),
        }
    }

    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(selected) => *selected == category,
        }
    }

    pub fn next(&self) -> Self {
        let tabs = Self::tabs();
        let index = tabs.iter().position(|t| t == self).unwrap_or(0);
        tabs[(index + 1) % tabs.len()]
    }

    pub fn previous(&self) -> Self {
        let tabs = Self::tabs();
        let index = tabs.iter().position(|t| t == self).unwrap_or(0);
        tabs[(index + tabs.len() - 1) % tabs.len()]
    }

    pub fn label(&self) -> String {
        match self {
            CategoryFilter::All => "🍽️ All".to_string(),
            CategoryFilter::Only(category) => {
                format!("{} {}", category.icon(), category.display_name())
            }
        }
    }
}

impl From<Option<Category>> for CategoryFilter {
    fn from(category: Option<Category>) -> Self {
        category.map_or(CategoryFilter::All, CategoryFilter::Only)
    }
}

/// A recipe as stored in the remote table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Category,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: u32,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub instructions: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Builds a stored record from a form payload. The store assigns id and timestamps.
    pub fn from_form(id: String, data: RecipeFormData, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: data.title,
            description: data.description,
            image_url: data.image_url,
            category: data.category,
            prep_time: data.prep_time,
            cook_time: data.cook_time,
            servings: data.servings,
            ingredients: data.ingredients,
            instructions: data.instructions,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every mutable field, keeping id and creation time
    pub fn apply_form(&mut self, data: RecipeFormData, now: DateTime<Utc>) {
        self.title = data.title;
        self.description = data.description;
        self.image_url = data.image_url;
        self.category = data.category;
        self.prep_time = data.prep_time;
        self.cook_time = data.cook_time;
        self.servings = data.servings;
        self.ingredients = data.ingredients;
        self.instructions = data.instructions;
        self.updated_at = now;
    }

    /// Prep plus cook time, counting a missing value as zero
    pub fn total_time(&self) -> u32 {
        self.prep_time
            .unwrap_or(0)
            .saturating_add(self.cook_time.unwrap_or(0))
    }

    pub fn to_form_data(&self) -> RecipeFormData {
        RecipeFormData {
            title: self.title.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
            category: self.category,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            servings: self.servings,
            ingredients: self.ingredients.clone(),
            instructions: self.instructions.clone(),
        }
    }
}

/// Mutable payload accepted by create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeFormData {
    pub title: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub category: Category,
    pub prep_time: Option<u32>,
    pub cook_time: Option<u32>,
    pub servings: u32,
    pub ingredients: Vec<Ingredient>,
    pub instructions: Vec<String>,
}

impl Default for RecipeFormData {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: None,
            image_url: None,
            category: Category::Dinner,
            prep_time: None,
            cook_time: None,
            servings: 4,
            ingredients: Vec::new(),
            instructions: Vec::new(),
        }
    }
}

impl RecipeFormData {
    /// Drops blank ingredient rows and steps, trims text and keeps servings at
    /// least one. Empty optional text becomes `None`.
    pub fn sanitized(mut self) -> Self {
        self.title = self.title.trim().to_string();
        self.description = non_empty(self.description);
        self.image_url = non_empty(self.image_url);
        self.servings = self.servings.max(1);
        self.ingredients.retain(|ingredient| !ingredient.is_blank());
        for ingredient in &mut self.ingredients {
            ingredient.name = ingredient.name.trim().to_string();
            ingredient.unit = ingredient.unit.trim().to_string();
        }
        self.instructions = self
            .instructions
            .into_iter()
            .map(|step| step.trim().to_string())
            .filter(|step| !step.is_empty())
            .collect();
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Recipe title is required".to_string());
        }
        Ok(())
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_lowercase_names() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
        assert!("brunch".parse::<Category>().is_err());
    }

    #[test]
    fn category_filter_tabs_wrap_in_both_directions() {
        assert_eq!(
            CategoryFilter::All.previous(),
            CategoryFilter::Only(Category::Snack)
        );
        assert_eq!(
            CategoryFilter::Only(Category::Snack).next(),
            CategoryFilter::All
        );
        assert_eq!(CategoryFilter::tabs().len(), 6);
    }

    #[test]
    fn sanitized_drops_blank_rows_and_keeps_servings_positive() {
        let data = RecipeFormData {
            title: "  Pancakes ".into(),
            description: Some("   ".into()),
            servings: 0,
            ingredients: vec![
                Ingredient::new("flour", 2.0, "cup"),
                Ingredient::new("  ", 1.0, "tsp"),
                Ingredient::new("salt", 0.0, "pinch"),
            ],
            instructions: vec!["Mix".into(), "  ".into(), "Cook".into()],
            ..RecipeFormData::default()
        }
        .sanitized();

        assert_eq!(data.title, "Pancakes");
        assert_eq!(data.description, None);
        assert_eq!(data.servings, 1);
        assert_eq!(data.ingredients, vec![Ingredient::new("flour", 2.0, "cup")]);
        assert_eq!(data.instructions, vec!["Mix", "Cook"]);
    }

    #[test]
    fn zero_prep_time_is_kept_distinct_from_missing() {
        let data = RecipeFormData {
            title: "Toast".into(),
            prep_time: Some(0),
            ..RecipeFormData::default()
        }
        .sanitized();
        assert_eq!(data.prep_time, Some(0));
        assert_eq!(data.cook_time, None);
    }

    #[test]
    fn total_time_treats_missing_as_zero() {
        let data = RecipeFormData {
            title: "Soup".into(),
            cook_time: Some(30),
            ..RecipeFormData::default()
        };
        let recipe = Recipe::from_form("r1".into(), data, Utc::now());
        assert_eq!(recipe.total_time(), 30);
    }

    #[test]
    fn total_time_saturates_on_huge_remote_values() {
        let data = RecipeFormData {
            title: "Sourdough starter".into(),
            prep_time: Some(u32::MAX),
            cook_time: Some(45),
            ..RecipeFormData::default()
        };
        let recipe = Recipe::from_form("r2".into(), data, Utc::now());
        assert_eq!(recipe.total_time(), u32::MAX);
    }

    #[test]
    fn recipe_deserializes_remote_row_with_nulls() {
        let json = r#"{
            "id": "7c0e",
            "title": "Chocolate Cake",
            "description": null,
            "image_url": null,
            "category": "dessert",
            "prep_time": null,
            "cook_time": 45,
            "servings": 8,
            "ingredients": [{"name": "chocolate chips", "amount": 1.5, "unit": "cup"}],
            "instructions": ["Bake"],
            "created_at": "2024-03-01T10:00:00.123456+00:00",
            "updated_at": "2024-03-01T10:00:00+00:00"
        }"#;
        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe.category, Category::Dessert);
        assert_eq!(recipe.description, None);
        assert_eq!(recipe.cook_time, Some(45));
        assert_eq!(recipe.ingredients[0].amount, 1.5);
    }
}
