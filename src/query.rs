//! Search query alias rewriting.
//!
//! Users can configure shorthand keywords ("to-read") that expand to a full
//! query expression ("tags:to-read") before the query reaches the match
//! boundary. Substitution is whole-word via `\b` boundaries, so an alias must
//! begin and end with word characters to ever match; an empty alias table is
//! a silent no-op.

use std::collections::HashMap;

use regex::Regex;

/// Configured query keyword aliases.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: HashMap<String, String>,
}

impl AliasTable {
    /// Build a table from configured alias pairs.
    pub fn new(aliases: HashMap<String, String>) -> Self {
        Self { aliases }
    }

    /// Whether any aliases are configured.
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Rewrite every whole-word occurrence of an alias in `query`.
    pub fn rewrite(&self, query: &str) -> String {
        let mut rewritten = query.to_string();
        for (alias, expansion) in &self.aliases {
            let pattern = format!(r"\b{}\b", regex::escape(alias));
            // The alias is regex-escaped, so the pattern always compiles.
            let re = Regex::new(&pattern).expect("escaped alias pattern");
            rewritten = re.replace_all(&rewritten, expansion.as_str()).into_owned();
        }
        rewritten
    }
}
