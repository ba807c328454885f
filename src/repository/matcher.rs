//! Query matching over document fields.
//!
//! The grammar is deliberately small: whitespace-separated terms, where
//! `field:value` restricts the match to one field and a bare term matches
//! anywhere in the document. All terms must match (implicit AND), matching is
//! case-insensitive substring containment, and the empty query matches
//! everything.

use crate::models::Document;

/// One parsed query term.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Term {
    /// `field:value` — substring match against a single field.
    Field { name: String, needle: String },
    /// Bare word — substring match against any field or the reference key.
    Free(String),
}

fn parse_terms(query: &str) -> Vec<Term> {
    query
        .split_whitespace()
        .map(|token| match token.split_once(':') {
            Some((name, needle)) if !name.is_empty() => Term::Field {
                name: name.to_lowercase(),
                needle: needle.to_lowercase(),
            },
            _ => Term::Free(token.to_lowercase()),
        })
        .collect()
}

/// Whether `doc` matches `query`.
pub fn query_matches(doc: &Document, query: &str) -> bool {
    parse_terms(query).iter().all(|term| match term {
        Term::Field { name, needle } => doc.field_text(name).to_lowercase().contains(needle),
        Term::Free(needle) => {
            doc.reference.to_lowercase().contains(needle)
                || doc
                    .fields
                    .values()
                    .any(|v| v.as_text().to_lowercase().contains(needle))
        }
    })
}
