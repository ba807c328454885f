//! Bibliography document model.
//!
//! A `Document` is an opaque handle identified by its reference key plus a
//! map of named fields (author, title, year, tags, files, ...). The view-state
//! core never interprets fields itself; sorting and matching go through the
//! repository boundary, and rendering goes through `format` templates.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A single field value on a document.
///
/// Serialized untagged so library files read naturally:
/// `"year": 2001`, `"title": "..."`, `"tags": ["a", "b"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Numeric field (years, volume numbers, page counts).
    Number(f64),
    /// Free text field.
    Text(String),
    /// List field (tags, file attachments).
    List(Vec<String>),
}

impl FieldValue {
    /// Canonical string form used for display and lexicographic comparison.
    pub fn as_text(&self) -> String {
        match self {
            FieldValue::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            FieldValue::Text(s) => s.clone(),
            FieldValue::List(items) => items.join(", "),
        }
    }

    /// Numeric interpretation, if this value is or parses as a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            FieldValue::List(_) => None,
        }
    }

    /// Type-aware ordering: numeric when both sides are numeric,
    /// lexicographic on the canonical string form otherwise.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self.as_number(), other.as_number()) {
            (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
            _ => self.as_text().cmp(&other.as_text()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

/// A bibliography document: a reference key plus named fields.
///
/// Identity (`Eq`, `Hash`) is the reference key alone; two documents with the
/// same ref are the same document even if their fields diverge across a
/// reload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Reference key, unique within a library ("knuth1997art").
    #[serde(rename = "ref")]
    pub reference: String,
    /// Named fields used by sort, filter, and rendering.
    #[serde(flatten)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl Document {
    /// Create a document with no fields.
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field assignment.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Field as display text; empty string when absent.
    pub fn field_text(&self, name: &str) -> String {
        self.field(name).map(FieldValue::as_text).unwrap_or_default()
    }

    /// Whether the document carries the named field.
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Tags stored under `tag_field`, normalized to a list.
    ///
    /// A scalar text value is treated as a single tag, matching the
    /// permissive shapes found in real library files.
    pub fn tags(&self, tag_field: &str) -> Vec<String> {
        match self.field(tag_field) {
            Some(FieldValue::List(items)) => items.clone(),
            Some(FieldValue::Text(s)) if !s.is_empty() => vec![s.clone()],
            _ => Vec::new(),
        }
    }

    /// Replace the tag list under `tag_field`.
    pub fn set_tags(&mut self, tag_field: &str, tags: Vec<String>) {
        self.fields.insert(tag_field.to_string(), FieldValue::List(tags));
    }

    /// File attachment paths, if any.
    pub fn files(&self) -> Vec<String> {
        match self.field("files") {
            Some(FieldValue::List(items)) => items.clone(),
            Some(FieldValue::Text(s)) if !s.is_empty() => vec![s.clone()],
            _ => Vec::new(),
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.reference == other.reference
    }
}

impl Eq for Document {}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.reference.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_value_as_text() {
        assert_eq!(FieldValue::Number(2001.0).as_text(), "2001");
        assert_eq!(FieldValue::Number(1.5).as_text(), "1.5");
        assert_eq!(FieldValue::Text("abc".into()).as_text(), "abc");
        assert_eq!(
            FieldValue::List(vec!["a".into(), "b".into()]).as_text(),
            "a, b"
        );
    }

    #[test]
    fn test_field_value_numeric_compare() {
        let a = FieldValue::Number(9.0);
        let b = FieldValue::Text("10".into());
        // "10" parses as a number, so 9 < 10 numerically (not "10" < "9").
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn test_field_value_text_compare() {
        let a = FieldValue::Text("apple".into());
        let b = FieldValue::Text("banana".into());
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn test_document_identity_is_reference() {
        let a = Document::new("k1").with_field("title", "one");
        let b = Document::new("k1").with_field("title", "two");
        assert_eq!(a, b);
    }

    #[test]
    fn test_document_field_text_missing() {
        let doc = Document::new("k1");
        assert_eq!(doc.field_text("title"), "");
    }

    #[test]
    fn test_tags_from_scalar() {
        let doc = Document::new("k1").with_field("tags", "rust");
        assert_eq!(doc.tags("tags"), vec!["rust".to_string()]);
    }

    #[test]
    fn test_tags_from_list() {
        let doc = Document::new("k1").with_field("tags", vec!["a".to_string(), "b".to_string()]);
        assert_eq!(doc.tags("tags"), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_set_tags_replaces() {
        let mut doc = Document::new("k1").with_field("tags", "old");
        doc.set_tags("tags", vec!["new".to_string()]);
        assert_eq!(doc.tags("tags"), vec!["new".to_string()]);
    }

    #[test]
    fn test_serde_round_trip() {
        let doc = Document::new("knuth1997art")
            .with_field("title", "The Art of Computer Programming")
            .with_field("year", 1997)
            .with_field("tags", vec!["classic".to_string()]);
        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(back.reference, "knuth1997art");
        assert_eq!(back.field_text("year"), "1997");
        assert_eq!(back.tags("tags"), vec!["classic".to_string()]);
    }
}
