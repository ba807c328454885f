//! bibtui - a terminal browser for bibliography libraries
//!
//! This library exposes modules for use in integration tests.

pub mod app;
pub mod commands;
pub mod config;
pub mod error;
pub mod events;
pub mod external;
pub mod format;
pub mod models;
pub mod query;
pub mod repository;
pub mod terminal;
pub mod ui;
pub mod view_state;
