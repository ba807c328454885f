//! In-memory repository, used by unit and integration tests.

use std::cmp::Ordering;

use crate::models::Document;

use super::{query_matches, DocumentRepository, RepositoryError};

/// A repository over a plain vector of documents.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    docs: Vec<Document>,
}

impl MemoryRepository {
    /// Create a repository holding `docs`.
    pub fn new(docs: Vec<Document>) -> Self {
        Self { docs }
    }

    /// Number of documents held.
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    /// Whether the repository holds no documents.
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}

impl DocumentRepository for MemoryRepository {
    fn list_all(&self) -> Result<Vec<Document>, RepositoryError> {
        Ok(self.docs.clone())
    }

    fn matches(&self, doc: &Document, query: &str) -> bool {
        query_matches(doc, query)
    }

    fn has_field(&self, field: &str) -> bool {
        self.docs.iter().any(|d| d.has_field(field))
    }

    fn save(&mut self, doc: &Document) -> Result<(), RepositoryError> {
        match self.docs.iter_mut().find(|d| d.reference == doc.reference) {
            Some(existing) => {
                *existing = doc.clone();
                Ok(())
            }
            None => Err(RepositoryError::UnknownReference(doc.reference.clone())),
        }
    }
}

// Keep the trait object usable in tests that need explicit ordering checks.
impl MemoryRepository {
    /// Compare through the trait's default implementation.
    pub fn compare_field(&self, a: &Document, b: &Document, field: &str) -> Ordering {
        self.compare(a, b, field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_all_preserves_order() {
        let repo = MemoryRepository::new(vec![Document::new("b"), Document::new("a")]);
        let docs = repo.list_all().unwrap();
        assert_eq!(docs[0].reference, "b");
        assert_eq!(docs[1].reference, "a");
    }

    #[test]
    fn test_has_field() {
        let repo = MemoryRepository::new(vec![
            Document::new("a").with_field("year", 2000),
            Document::new("b"),
        ]);
        assert!(repo.has_field("year"));
        assert!(!repo.has_field("doi"));
    }

    #[test]
    fn test_save_updates_existing() {
        let mut repo = MemoryRepository::new(vec![Document::new("a").with_field("title", "old")]);
        let updated = Document::new("a").with_field("title", "new");
        repo.save(&updated).unwrap();
        let docs = repo.list_all().unwrap();
        assert_eq!(docs[0].field_text("title"), "new");
    }

    #[test]
    fn test_save_unknown_reference_fails() {
        let mut repo = MemoryRepository::new(vec![]);
        let err = repo.save(&Document::new("ghost")).unwrap_err();
        assert!(matches!(err, RepositoryError::UnknownReference(_)));
    }
}
