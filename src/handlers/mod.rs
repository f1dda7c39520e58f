//! Event Handling Module
//!
//! Translates terminal events and finished remote calls into application
//! state changes.
//!
//! # Module Organization
//!
//! - **`keys`**: Keyboard input processing and navigation logic
//! - **`remote`**: Background runtime that runs store calls off the UI thread
//!

pub mod keys;
pub mod remote;
