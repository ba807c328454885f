//! Document repository boundary.
//!
//! The view-state core treats the bibliography store as an abstract
//! collaborator: it can list documents, answer match queries, compare two
//! documents on a named field, and persist a changed document. Everything
//! behind that seam — file formats, query grammar — is replaceable.

mod library;
mod matcher;
mod memory;

pub use library::LibraryRepository;
pub use matcher::query_matches;
pub use memory::MemoryRepository;

use std::cmp::Ordering;
use std::path::PathBuf;

use thiserror::Error;

use crate::models::Document;

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("library directory not found: {0}")]
    LibraryNotFound(PathBuf),

    #[error("failed to read document {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write document {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed document {path}: {source}")]
    ParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to serialize document {reference}: {source}")]
    SerializeFailed {
        reference: String,
        source: serde_json::Error,
    },

    #[error("unknown document reference: {0}")]
    UnknownReference(String),
}

/// Abstract bibliography store.
///
/// The core only ever calls through this trait; concrete stores live behind
/// it (a JSON library directory in the binary, an in-memory vector in tests).
pub trait DocumentRepository {
    /// All documents known to the store, in its native order.
    fn list_all(&self) -> Result<Vec<Document>, RepositoryError>;

    /// Whether `doc` matches the (already alias-rewritten) query string.
    fn matches(&self, doc: &Document, query: &str) -> bool;

    /// Compare two documents on a named field. Documents missing the field
    /// sort before documents that carry it.
    fn compare(&self, a: &Document, b: &Document, field: &str) -> Ordering {
        match (a.field(field), b.field(field)) {
            (Some(va), Some(vb)) => va.compare(vb),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    /// Whether any document in the store carries the named field.
    /// Backs sort-key validation.
    fn has_field(&self, field: &str) -> bool;

    /// Persist a changed document.
    fn save(&mut self, doc: &Document) -> Result<(), RepositoryError>;
}
