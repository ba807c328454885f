//! Stable multi-key document sorting.
//!
//! A sort spec is an ordered list of `(field, descending)` keys parsed from
//! tokens like `year-` or `author+` (trailing `-` sorts descending, trailing
//! `+` or nothing ascending). Two strategies produce the ordering:
//!
//! - [`sort_documents`]: sort by the first key, then stable-sort each run of
//!   documents equal on all previous keys by the next key, recursing down the
//!   key list.
//! - [`sort_documents_composite`]: one stable sort with the full key tuple as
//!   comparator.
//!
//! Both must agree on every input; the equivalence is asserted in tests.
//! Ties at the final key preserve input order because every pass is a stable
//! sort. Field comparison is delegated to the repository, which compares
//! numerically where both sides are numeric.

use std::cmp::Ordering;
use std::fmt;

use crate::models::Document;
use crate::repository::DocumentRepository;

/// One sort key: a field name and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    /// Ascending key on `field`.
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    /// Descending key on `field`.
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.descending {
            write!(f, "{}-", self.field)
        } else {
            write!(f, "{}", self.field)
        }
    }
}

/// Parse whitespace-separated sort tokens.
///
/// `"year- author"` becomes `[year descending, author ascending]`.
pub fn parse_sort_keys(spec: &str) -> Vec<SortKey> {
    spec.split_whitespace()
        .filter_map(|token| {
            let (field, descending) = match token.strip_suffix('-') {
                Some(field) => (field, true),
                None => (token.strip_suffix('+').unwrap_or(token), false),
            };
            if field.is_empty() {
                None
            } else {
                Some(SortKey {
                    field: field.to_string(),
                    descending,
                })
            }
        })
        .collect()
}

/// Render a key list back to the spec string form.
pub fn format_sort_keys(keys: &[SortKey]) -> String {
    keys.iter()
        .map(|k| k.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn key_ordering(
    repo: &dyn DocumentRepository,
    a: &Document,
    b: &Document,
    key: &SortKey,
) -> Ordering {
    let ord = repo.compare(a, b, &key.field);
    if key.descending {
        ord.reverse()
    } else {
        ord
    }
}

fn sort_by_single_key(docs: &mut [Document], key: &SortKey, repo: &dyn DocumentRepository) {
    docs.sort_by(|a, b| key_ordering(repo, a, b, key));
}

/// Composite ordering over the full key tuple.
pub fn composite_ordering(
    repo: &dyn DocumentRepository,
    a: &Document,
    b: &Document,
    keys: &[SortKey],
) -> Ordering {
    for key in keys {
        match key_ordering(repo, a, b, key) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

/// Sort by the run-grouping strategy.
///
/// An empty key list returns the input unchanged. Runs are delimited by a
/// change in any already-sorted key, so a later pass never reorders across a
/// boundary established by an earlier one.
pub fn sort_documents(
    mut docs: Vec<Document>,
    keys: &[SortKey],
    repo: &dyn DocumentRepository,
) -> Vec<Document> {
    let Some(first) = keys.first() else {
        return docs;
    };
    sort_by_single_key(&mut docs, first, repo);

    for idx in 1..keys.len() {
        let prefix = &keys[..idx];
        let next = &keys[idx];
        let mut out: Vec<Document> = Vec::with_capacity(docs.len());
        let mut run: Vec<Document> = Vec::new();

        for doc in docs {
            let boundary = run.last().is_some_and(|last| {
                prefix
                    .iter()
                    .any(|k| repo.compare(last, &doc, &k.field) != Ordering::Equal)
            });
            if boundary {
                let mut finished = std::mem::take(&mut run);
                sort_by_single_key(&mut finished, next, repo);
                out.append(&mut finished);
            }
            run.push(doc);
        }
        sort_by_single_key(&mut run, next, repo);
        out.append(&mut run);
        docs = out;
    }
    docs
}

/// Sort with a single stable pass over the composite key tuple.
pub fn sort_documents_composite(
    mut docs: Vec<Document>,
    keys: &[SortKey],
    repo: &dyn DocumentRepository,
) -> Vec<Document> {
    if keys.is_empty() {
        return docs;
    }
    docs.sort_by(|a, b| composite_ordering(repo, a, b, keys));
    docs
}
