use crate::calculator::format_amount;
use crate::models::{Category, CategoryFilter, Recipe, StorageManager};
use crate::repository::RecipeRepository;
use crate::search::{filter_recipes, status_line};
use crate::state::load_favorites;
use anyhow::{Result, bail};
use colored::Colorize;
use std::collections::BTreeSet;

fn gutter() -> colored::ColoredString {
    "┃".bright_magenta()
}

fn favorites_of(storage: Option<&StorageManager>) -> BTreeSet<String> {
    storage.map(load_favorites).unwrap_or_default()
}

async fn fetch(repository: &mut RecipeRepository, filter: CategoryFilter) -> Result<()> {
    if !repository.fetch(filter).await {
        bail!(
            "{}",
            repository.error().unwrap_or("Failed to fetch recipes").to_string()
        );
    }
    Ok(())
}

/// One-line summary used by every listing
pub fn recipe_line(recipe: &Recipe, favorite: bool) -> String {
    let marker = if favorite { "♥" } else { " " };
    let total = recipe.total_time();
    let time = if total > 0 {
        format!("{} min", total)
    } else {
        "-".to_string()
    };

    format!(
        "{} {:<32} {:<10} {:>8}  serves {:<3} {}",
        marker.bright_red(),
        recipe.title.bright_white(),
        recipe.category.display_name().bright_cyan(),
        time,
        recipe.servings,
        recipe.id.bright_black()
    )
}

fn print_recipes(recipes: &[&Recipe], favorites: &BTreeSet<String>) {
    if recipes.is_empty() {
        println!("{}  No recipes found", gutter());
        return;
    }
    for recipe in recipes {
        println!("{}  {}", gutter(), recipe_line(recipe, favorites.contains(&recipe.id)));
    }
    println!("{}  {} recipe(s)", gutter(), recipes.len().to_string().yellow());
}

pub async fn list_recipes(
    repository: &mut RecipeRepository,
    category: Option<Category>,
    storage: Option<&StorageManager>,
) -> Result<()> {
    fetch(repository, CategoryFilter::from(category)).await?;
    let favorites = favorites_of(storage);

    let heading = match category {
        Some(category) => format!("RECIPES ❯ {}", category.display_name().to_uppercase()),
        None => "RECIPES".to_string(),
    };
    println!("{}  {}", gutter(), heading.bright_green().bold());
    println!("{}", "─".repeat(60).bright_magenta());

    let recipes: Vec<&Recipe> = repository.recipes().iter().collect();
    print_recipes(&recipes, &favorites);
    Ok(())
}

/// Shows a recipe by id, falling back to an exact then partial title match
pub async fn show_recipe(repository: &mut RecipeRepository, id_or_title: &str) -> Result<()> {
    if let Some(recipe) = repository.get_by_id(id_or_title).await {
        display_recipe(&recipe);
        return Ok(());
    }

    fetch(repository, CategoryFilter::All).await?;
    match find_by_title(repository.recipes(), id_or_title) {
        Some(recipe) => display_recipe(recipe),
        None => {
            println!(
                "{}  No recipe found with name: {}",
                gutter(),
                id_or_title
            );
            println!("{}  Available recipes:", gutter());
            println!("{}", "─".repeat(60).bright_magenta());
            for (idx, recipe) in repository.recipes().iter().enumerate().take(10) {
                println!(
                    "{}  {}. {}",
                    gutter(),
                    (idx + 1).to_string().yellow(),
                    recipe.title.bright_white()
                );
            }
            if repository.recipes().len() > 10 {
                println!(
                    "{}  ... and {} more",
                    gutter(),
                    repository.recipes().len() - 10
                );
            }
        }
    }
    Ok(())
}

pub fn find_by_title<'a>(recipes: &'a [Recipe], title: &str) -> Option<&'a Recipe> {
    let name = title.trim().to_lowercase();
    recipes
        .iter()
        .find(|r| r.title.to_lowercase() == name)
        .or_else(|| recipes.iter().find(|r| r.title.to_lowercase().contains(&name)))
}

fn display_recipe(recipe: &Recipe) {
    println!(
        "{}  {} {}",
        gutter(),
        "RECIPE".bright_green().bold(),
        recipe.title.bold()
    );
    println!("{}", "─".repeat(60).bright_magenta());

    println!(
        "{}  {}: {} {}",
        gutter(),
        "Category".bright_blue(),
        recipe.category.icon(),
        recipe.category.display_name()
    );
    if let Some(prep) = recipe.prep_time {
        println!("{}  {}: {} min", gutter(), "Prep".bright_yellow(), prep);
    }
    if let Some(cook) = recipe.cook_time {
        println!("{}  {}: {} min", gutter(), "Cook".bright_yellow(), cook);
    }
    println!("{}  {}: {}", gutter(), "Servings".bright_yellow(), recipe.servings);
    if let Some(desc) = &recipe.description {
        println!("{}  {}: {}", gutter(), "Description".bright_cyan(), desc);
    }
    println!("{}  {}: {}", gutter(), "ID".bright_black(), recipe.id);
    println!("{}", "─".repeat(60).bright_magenta());

    println!("{}  {}", gutter(), "INGREDIENTS".bright_yellow());
    for ingredient in &recipe.ingredients {
        println!(
            "{}    • {} {} {}",
            gutter(),
            format_amount(ingredient.amount).bold(),
            ingredient.unit,
            ingredient.name
        );
    }

    println!("{}  {}", gutter(), "INSTRUCTIONS".bright_yellow());
    for (idx, step) in recipe.instructions.iter().enumerate() {
        println!("{}   {}. {}", gutter(), (idx + 1).to_string().yellow(), step);
    }
}

pub async fn search_recipes(
    repository: &mut RecipeRepository,
    query: &str,
    favorites_only: bool,
    storage: Option<&StorageManager>,
) -> Result<()> {
    fetch(repository, CategoryFilter::All).await?;
    let favorites = favorites_of(storage);
    let matches = filter_recipes(repository.recipes(), favorites_only, &favorites, query);

    if let Some(status) = status_line(favorites_only, query, matches.len()) {
        println!("{}  {}", gutter(), status.bright_green());
        println!("{}", "─".repeat(60).bright_magenta());
    }
    print_recipes(&matches, &favorites);
    Ok(())
}

pub async fn list_favorites(
    repository: &mut RecipeRepository,
    storage: Option<&StorageManager>,
) -> Result<()> {
    let favorites = favorites_of(storage);
    if favorites.is_empty() {
        println!("{}  No favorite recipes yet", gutter());
        println!(
            "{}  Press [f] on a recipe in the TUI to add one",
            gutter()
        );
        return Ok(());
    }

    fetch(repository, CategoryFilter::All).await?;
    let matches = filter_recipes(repository.recipes(), true, &favorites, "");

    println!("{}  {}", gutter(), "FAVORITES".bright_green().bold());
    println!("{}", "─".repeat(60).bright_magenta());
    print_recipes(&matches, &favorites);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecipeFormData;
    use crate::store::MemoryStore;
    use chrono::Utc;
    use std::sync::Arc;

    fn titled(title: &str) -> Recipe {
        Recipe::from_form(
            title.to_lowercase().replace(' ', "-"),
            RecipeFormData {
                title: title.to_string(),
                ..RecipeFormData::default()
            },
            Utc::now(),
        )
    }

    #[test]
    fn exact_title_wins_over_partial() {
        let recipes = vec![titled("Tomato Soup Deluxe"), titled("Tomato Soup")];
        assert_eq!(find_by_title(&recipes, "tomato soup").unwrap().id, "tomato-soup");
        assert_eq!(
            find_by_title(&recipes, "deluxe").unwrap().id,
            "tomato-soup-deluxe"
        );
        assert!(find_by_title(&recipes, "curry").is_none());
    }

    #[tokio::test]
    async fn fetch_failure_surfaces_as_error() {
        let store = Arc::new(MemoryStore::with_samples());
        store.fail_with("offline");
        let mut repository = RecipeRepository::new(store);

        let err = list_recipes(&mut repository, None, None).await.unwrap_err();
        assert_eq!(err.to_string(), "offline");
    }

    #[tokio::test]
    async fn favorites_without_any_saved_skip_the_fetch() {
        let store = Arc::new(MemoryStore::with_samples());
        store.fail_with("should not be called");
        let mut repository = RecipeRepository::new(store);

        assert!(list_favorites(&mut repository, None).await.is_ok());
    }
}
