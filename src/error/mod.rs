//! Error types for bibtui.
//!
//! View-state operations return structured errors as values; nothing in the
//! core raises through to the UI loop. The only hard failures are terminal
//! setup and repository IO, which go through `color_eyre` in `main`.

mod view;

pub use view::ViewError;

/// Result alias for view-state operations.
pub type ViewResult<T> = Result<T, ViewError>;
