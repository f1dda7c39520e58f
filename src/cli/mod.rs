//! CLI Module for recipebox
//! Command-line access to the recipe catalog for scripting, without
//! launching the full TUI application.

pub mod commands;

use crate::models::{Category, StorageManager};
use crate::repository::RecipeRepository;
use crate::store::RecipeStore;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

/// Personal recipe catalog. Run without a command to open the TUI.
#[derive(Debug, Parser)]
#[command(name = "recipebox", version, about)]
pub struct Cli {
    /// Use the built-in sample recipes instead of the remote table
    #[arg(long, global = true)]
    pub offline: bool,

    /// Path to config.toml
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List recipes, newest first
    #[command(alias = "ls")]
    List {
        /// Only recipes in this category
        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Display a recipe by id or title (partial titles work)
    #[command(aliases = ["view", "cat"])]
    Show {
        #[arg(value_name = "ID|TITLE")]
        recipe: String,
    },
    /// Search titles, descriptions and ingredients
    #[command(alias = "find")]
    Search {
        query: String,
        /// Restrict to favorites
        #[arg(short, long)]
        favorites: bool,
    },
    /// List favorite recipes
    #[command(alias = "fav")]
    Favorites,
}

/// Executes one CLI command against the given store
pub fn execute_cli(
    command: Command,
    store: Arc<dyn RecipeStore>,
    storage: Option<StorageManager>,
) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start runtime")?;
    let mut repository = RecipeRepository::new(store);

    runtime.block_on(async {
        match command {
            Command::List { category } => {
                commands::list_recipes(&mut repository, category, storage.as_ref()).await
            }
            Command::Show { recipe } => commands::show_recipe(&mut repository, &recipe).await,
            Command::Search { query, favorites } => {
                commands::search_recipes(&mut repository, &query, favorites, storage.as_ref())
                    .await
            }
            Command::Favorites => commands::list_favorites(&mut repository, storage.as_ref()).await,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_category_and_global_flags() {
        let cli = Cli::try_parse_from(["recipebox", "list", "--category", "dessert", "--offline"])
            .unwrap();
        assert!(cli.offline);
        match cli.command {
            Some(Command::List { category }) => assert_eq!(category, Some(Category::Dessert)),
            other => panic!("unexpected command: {:?}", other),
        }

        assert!(Cli::try_parse_from(["recipebox", "list", "-c", "brunch"]).is_err());
    }

    #[test]
    fn no_command_means_tui() {
        let cli = Cli::try_parse_from(["recipebox", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(cli.command.is_none());
    }
}
