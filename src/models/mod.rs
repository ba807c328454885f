//! Data models shared across the application.

pub mod document;

pub use document::{Document, FieldValue};
