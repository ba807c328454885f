//! View-state error types.
//!
//! These errors are returned as values by the document list mutators; none of
//! them propagates as a hard failure. A failed narrowing operation leaves the
//! model exactly as it was, so the caller can surface the message and retry.

use std::fmt;

/// Errors produced by view-state operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewError {
    /// A narrowing operation would produce zero items.
    EmptyResult {
        operation: String,
    },

    /// A search query matched no documents.
    NoMatch {
        query: String,
    },

    /// A sort spec named a field no document in the library carries.
    InvalidSortKey {
        key: String,
    },

    /// An operation needing a selected document ran against an empty view.
    NoSelection,
}

impl ViewError {
    /// One-line advisory message for the message bar.
    pub fn user_message(&self) -> String {
        match self {
            ViewError::EmptyResult { operation } => match operation.as_str() {
                "view_marked" => "No documents marked".to_string(),
                _ => format!("{} would leave nothing to show", operation),
            },
            ViewError::NoMatch { .. } => "No matching documents found".to_string(),
            ViewError::InvalidSortKey { key } => {
                format!("Unknown sort key '{}'", key)
            }
            ViewError::NoSelection => "No document selected".to_string(),
        }
    }

    /// Short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ViewError::EmptyResult { .. } => "E_VIEW_EMPTY",
            ViewError::NoMatch { .. } => "E_VIEW_NO_MATCH",
            ViewError::InvalidSortKey { .. } => "E_VIEW_SORT_KEY",
            ViewError::NoSelection => "E_VIEW_NO_SELECTION",
        }
    }

    /// Whether this error indicates a programming defect rather than a
    /// user-visible condition. `NoSelection` cannot occur while the
    /// nonempty-view invariant holds.
    pub fn is_defect(&self) -> bool {
        matches!(self, ViewError::NoSelection)
    }
}

impl fmt::Display for ViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewError::EmptyResult { operation } => {
                write!(f, "empty result from '{}'", operation)
            }
            ViewError::NoMatch { query } => {
                write!(f, "no documents match '{}'", query)
            }
            ViewError::InvalidSortKey { key } => {
                write!(f, "invalid sort key '{}'", key)
            }
            ViewError::NoSelection => write!(f, "no selection available"),
        }
    }
}

impl std::error::Error for ViewError {}
