//! User Interface Module
//!
//! Rendering for the terminal client. Each screen reads the `App` state and
//! draws it; no rendering function mutates application state.

pub mod colors;
pub mod components;
pub mod login;
pub mod recipe_detail;
pub mod recipe_form;
pub mod recipe_list;
