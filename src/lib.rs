//! recipebox - Personal Recipe Catalog
//!
//! A terminal client for a recipe collection kept in a hosted table. Recipes
//! can be browsed by category, searched, favorited, created, edited and
//! deleted; the detail view rescales ingredient amounts to any number of
//! servings.

pub mod app;
pub mod auth;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod handlers;
pub mod models;
pub mod notifications;
pub mod repository;
pub mod search;
pub mod state;
pub mod store;
pub mod ui;
