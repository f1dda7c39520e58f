use crate::models::Recipe;
use std::collections::BTreeSet;

/// Narrows an already category-filtered recipe list to what the list view shows.
///
/// Favorites-only keeps recipes whose id is in `favorites`; a non-empty
/// trimmed `query` keeps recipes whose title, description or any ingredient
/// name contains it, ignoring case. Both filters must pass. Input order is
/// preserved.
pub fn filter_recipes<'a>(
    recipes: &'a [Recipe],
    favorites_only: bool,
    favorites: &BTreeSet<String>,
    query: &str,
) -> Vec<&'a Recipe> {
    let query = query.trim().to_lowercase();

    recipes
        .iter()
        .filter(|recipe| !favorites_only || favorites.contains(&recipe.id))
        .filter(|recipe| query.is_empty() || matches_query(recipe, &query))
        .collect()
}

/// `query` must already be lowercased
fn matches_query(recipe: &Recipe, query: &str) -> bool {
    if recipe.title.to_lowercase().contains(query) {
        return true;
    }

    if let Some(desc) = &recipe.description {
        if desc.to_lowercase().contains(query) {
            return true;
        }
    }

    recipe
        .ingredients
        .iter()
        .any(|ingredient| ingredient.name.to_lowercase().contains(query))
}

/// Banner shown above the list while either filter is active
pub fn status_line(favorites_only: bool, query: &str, result_count: usize) -> Option<String> {
    let query = query.trim();
    if !favorites_only && query.is_empty() {
        return None;
    }

    let mut parts = Vec::new();
    if favorites_only {
        parts.push("❤️ Showing favorites".to_string());
    }
    if !query.is_empty() {
        parts.push(format!("🔍 Searching for \"{}\"", query));
    }
    parts.push(format!("{} recipe(s) found", result_count));

    Some(parts.join(" • "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Ingredient, RecipeFormData};
    use chrono::Utc;

    fn recipe(id: &str, title: &str, description: Option<&str>, ingredients: &[&str]) -> Recipe {
        let data = RecipeFormData {
            title: title.to_string(),
            description: description.map(String::from),
            category: Category::Dessert,
            ingredients: ingredients
                .iter()
                .map(|name| Ingredient::new(*name, 1.0, "cup"))
                .collect(),
            ..RecipeFormData::default()
        };
        Recipe::from_form(id.to_string(), data, Utc::now())
    }

    fn catalog() -> Vec<Recipe> {
        vec![
            recipe("1", "Chocolate Cake", None, &["flour", "cocoa"]),
            recipe("2", "Cookies", Some("Chewy and sweet"), &["chocolate chips"]),
            recipe("3", "Omelette", Some("Quick breakfast"), &["eggs"]),
        ]
    }

    fn ids(recipes: &[&Recipe]) -> Vec<String> {
        recipes.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn query_matches_title_or_ingredient_ignoring_case() {
        let recipes = catalog();
        let found = filter_recipes(&recipes, false, &BTreeSet::new(), "CHOC");
        assert_eq!(ids(&found), vec!["1", "2"]);
    }

    #[test]
    fn query_matches_description() {
        let recipes = catalog();
        let found = filter_recipes(&recipes, false, &BTreeSet::new(), "breakfast");
        assert_eq!(ids(&found), vec!["3"]);
    }

    #[test]
    fn blank_query_disables_text_filter() {
        let recipes = catalog();
        let found = filter_recipes(&recipes, false, &BTreeSet::new(), "   ");
        assert_eq!(found.len(), 3);
    }

    #[test]
    fn favorites_only_with_no_favorites_is_empty() {
        let recipes = catalog();
        assert!(filter_recipes(&recipes, true, &BTreeSet::new(), "").is_empty());
        assert!(filter_recipes(&recipes, true, &BTreeSet::new(), "choc").is_empty());
    }

    #[test]
    fn favorites_and_query_compose() {
        let recipes = catalog();
        let favorites: BTreeSet<String> = ["2".to_string(), "3".to_string(), "gone".to_string()]
            .into_iter()
            .collect();
        let found = filter_recipes(&recipes, true, &favorites, "choc");
        assert_eq!(ids(&found), vec!["2"]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let recipes = catalog();
        let favorites: BTreeSet<String> = ["1".to_string(), "2".to_string()].into_iter().collect();
        let once: Vec<Recipe> = filter_recipes(&recipes, true, &favorites, "c")
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_recipes(&once, true, &favorites, "c");
        assert_eq!(ids(&twice), once.iter().map(|r| r.id.clone()).collect::<Vec<_>>());
    }

    #[test]
    fn status_line_only_when_filtering() {
        assert_eq!(status_line(false, "  ", 3), None);
        assert_eq!(
            status_line(true, "soup", 1).as_deref(),
            Some("❤️ Showing favorites • 🔍 Searching for \"soup\" • 1 recipe(s) found")
        );
    }
}
