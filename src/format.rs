//! Display-text helpers over a document's field map.
//!
//! Templates are plain `{field}` substitution — the styling/markup grammar of
//! richer formatters is out of scope here. These are free functions rather
//! than methods on `Document` so the model stays a plain data handle.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::UnicodeWidthChar;
use unicode_width::UnicodeWidthStr;

use crate::models::Document;

static FIELD_PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("placeholder pattern"));

/// Expand `{field}` placeholders against a document.
///
/// `{ref}` expands to the reference key; unknown fields expand to the empty
/// string, so a sparse document still renders.
pub fn expand_template(doc: &Document, template: &str) -> String {
    FIELD_PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| {
            let name = &caps[1];
            if name == "ref" {
                doc.reference.clone()
            } else {
                doc.field_text(name)
            }
        })
        .into_owned()
}

/// Fit `text` into exactly `width` display columns, truncating or padding
/// with spaces. Width is measured in terminal cells, not chars.
pub fn fit_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    for _ in used..width {
        out.push(' ');
    }
    out
}
