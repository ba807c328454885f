//! Library repository backed by a directory of JSON documents.
//!
//! Each document lives in `<dir>/<ref>.json`. The directory is re-read on
//! every `list_all` call, which is what backs the `reload` command. The union
//! of field names seen during the last load answers `has_field` for sort-key
//! validation.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::models::Document;

use super::{query_matches, DocumentRepository, RepositoryError};

/// Repository over a directory of per-document JSON files.
#[derive(Debug)]
pub struct LibraryRepository {
    dir: PathBuf,
    /// Field names seen across documents during the last load.
    field_names: RefCell<HashSet<String>>,
}

impl LibraryRepository {
    /// Open a library directory. Fails when the directory does not exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, RepositoryError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(RepositoryError::LibraryNotFound(dir));
        }
        Ok(Self {
            dir,
            field_names: RefCell::new(HashSet::new()),
        })
    }

    /// Path of the JSON file backing a reference key.
    fn doc_path(&self, reference: &str) -> PathBuf {
        self.dir.join(format!("{}.json", reference))
    }

    fn read_doc(&self, path: &Path) -> Result<Document, RepositoryError> {
        let text = fs::read_to_string(path).map_err(|source| RepositoryError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| RepositoryError::ParseFailed {
            path: path.to_path_buf(),
            source,
        })
    }
}

impl DocumentRepository for LibraryRepository {
    fn list_all(&self) -> Result<Vec<Document>, RepositoryError> {
        let mut paths: Vec<PathBuf> = fs::read_dir(&self.dir)
            .map_err(|source| RepositoryError::ReadFailed {
                path: self.dir.clone(),
                source,
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
            .collect();
        // Filename order keeps loads deterministic before any sort applies.
        paths.sort();

        let mut docs = Vec::with_capacity(paths.len());
        let mut fields = HashSet::new();
        for path in &paths {
            match self.read_doc(path) {
                Ok(doc) => {
                    fields.extend(doc.fields.keys().cloned());
                    docs.push(doc);
                }
                Err(err) => {
                    // A single malformed file should not take down the session.
                    warn!(path = %path.display(), error = %err, "skipping unreadable document");
                }
            }
        }
        *self.field_names.borrow_mut() = fields;
        debug!(count = docs.len(), dir = %self.dir.display(), "library loaded");
        Ok(docs)
    }

    fn matches(&self, doc: &Document, query: &str) -> bool {
        query_matches(doc, query)
    }

    fn compare(&self, a: &Document, b: &Document, field: &str) -> Ordering {
        match (a.field(field), b.field(field)) {
            (Some(va), Some(vb)) => va.compare(vb),
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }

    fn has_field(&self, field: &str) -> bool {
        self.field_names.borrow().contains(field)
    }

    fn save(&mut self, doc: &Document) -> Result<(), RepositoryError> {
        let path = self.doc_path(&doc.reference);
        let text = serde_json::to_string_pretty(doc).map_err(|source| {
            RepositoryError::SerializeFailed {
                reference: doc.reference.clone(),
                source,
            }
        })?;
        fs::write(&path, text).map_err(|source| RepositoryError::WriteFailed { path, source })?;
        self.field_names
            .borrow_mut()
            .extend(doc.fields.keys().cloned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_doc(dir: &Path, reference: &str, body: &str) {
        fs::write(dir.join(format!("{}.json", reference)), body).unwrap();
    }

    #[test]
    fn test_open_missing_dir_fails() {
        let err = LibraryRepository::open("/nonexistent/library").unwrap_err();
        assert!(matches!(err, RepositoryError::LibraryNotFound(_)));
    }

    #[test]
    fn test_list_all_reads_documents_in_filename_order() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "b2", r#"{"ref": "b2", "title": "Second"}"#);
        write_doc(tmp.path(), "a1", r#"{"ref": "a1", "title": "First", "year": 2001}"#);

        let repo = LibraryRepository::open(tmp.path()).unwrap();
        let docs = repo.list_all().unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].reference, "a1");
        assert_eq!(docs[1].reference, "b2");
        assert!(repo.has_field("year"));
        assert!(!repo.has_field("doi"));
    }

    #[test]
    fn test_malformed_document_is_skipped() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "good", r#"{"ref": "good"}"#);
        write_doc(tmp.path(), "bad", "not json");

        let repo = LibraryRepository::open(tmp.path()).unwrap();
        let docs = repo.list_all().unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].reference, "good");
    }

    #[test]
    fn test_save_round_trips() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "a1", r#"{"ref": "a1", "title": "Old"}"#);

        let mut repo = LibraryRepository::open(tmp.path()).unwrap();
        let mut doc = repo.list_all().unwrap().remove(0);
        doc.set_tags("tags", vec!["to-read".to_string()]);
        repo.save(&doc).unwrap();

        let docs = repo.list_all().unwrap();
        assert_eq!(docs[0].tags("tags"), vec!["to-read".to_string()]);
        assert!(repo.has_field("tags"));
    }
}
