//! Display styles and page-size arithmetic.

use serde::{Deserialize, Serialize};

/// How the document list presents each item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStyle {
    /// One row per document plus a header row.
    Table,
    /// A multi-row card per document with a blank separator row.
    Card,
}

impl DisplayStyle {
    /// The other style.
    pub fn toggled(self) -> Self {
        match self {
            DisplayStyle::Table => DisplayStyle::Card,
            DisplayStyle::Card => DisplayStyle::Table,
        }
    }
}

/// Number of documents that fit on one page.
///
/// Table style reserves one header row; card style reserves two margin rows
/// and one separator row per card. Clamped to at least one row so selection
/// arithmetic never divides by zero.
pub fn rows_per_page(style: DisplayStyle, viewport_height: u16, card_height: usize) -> usize {
    let height = viewport_height as usize;
    let rows = match style {
        DisplayStyle::Table => height.saturating_sub(1),
        DisplayStyle::Card => height.saturating_sub(2) / (card_height + 1),
    };
    rows.max(1)
}

/// Largest valid window offset on the last page.
///
/// `view_len % rows_per_page - 1` would underflow when the view count is an
/// exact multiple of the page size; in that case the last page is full and
/// the offset is `rows_per_page - 1`.
pub fn last_page_offset(view_len: usize, rows_per_page: usize) -> usize {
    match view_len % rows_per_page {
        0 => rows_per_page - 1,
        remainder => remainder - 1,
    }
}
