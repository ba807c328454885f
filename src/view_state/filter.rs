//! Order-preserving document filtering.
//!
//! The filter's only duties are selecting a subsequence of the input without
//! reordering it, and reporting "zero results" as a distinguishable outcome
//! so callers can keep their prior view intact.

use crate::models::Document;

/// Filter `items` by `predicate`, preserving relative order.
///
/// Returns `None` when nothing matches; callers translate that into the
/// appropriate view error and leave their state untouched.
pub fn filter_documents<P>(items: &[Document], predicate: P) -> Option<Vec<Document>>
where
    P: Fn(&Document) -> bool,
{
    let matched: Vec<Document> = items.iter().filter(|d| predicate(d)).cloned().collect();
    if matched.is_empty() {
        None
    } else {
        Some(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs() -> Vec<Document> {
        ["a", "b", "c", "d", "e"]
            .iter()
            .map(|r| Document::new(*r))
            .collect()
    }

    #[test]
    fn test_preserves_relative_order() {
        let matched = filter_documents(&docs(), |d| d.reference != "b" && d.reference != "d");
        let refs: Vec<&str> = matched
            .as_ref()
            .unwrap()
            .iter()
            .map(|d| d.reference.as_str())
            .collect();
        assert_eq!(refs, vec!["a", "c", "e"]);
    }

    #[test]
    fn test_result_is_subsequence_of_input() {
        let input = docs();
        let matched = filter_documents(&input, |d| d.reference > "a".to_string()).unwrap();
        let mut cursor = input.iter();
        for kept in &matched {
            assert!(
                cursor.any(|orig| orig == kept),
                "{} out of order",
                kept.reference
            );
        }
    }

    #[test]
    fn test_zero_results_is_none() {
        assert!(filter_documents(&docs(), |_| false).is_none());
    }

    #[test]
    fn test_all_match_returns_everything() {
        assert_eq!(filter_documents(&docs(), |_| true).unwrap().len(), 5);
    }
}
