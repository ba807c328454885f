//! View-state engine for the document list.
//!
//! This is the heart of the application: the sort, filter, layout, and
//! viewport components that own the "all items / current view / window /
//! selection / marks" relationship. Rendering and input live elsewhere and
//! talk to this module through pull accessors and command-style mutators.

mod document_list;
mod filter;
mod layout;
mod sort;

pub use document_list::{DocumentList, RowEntry, StatusInfo};
pub use filter::filter_documents;
pub use layout::{last_page_offset, rows_per_page, DisplayStyle};
pub use sort::{
    composite_ordering, format_sort_keys, parse_sort_keys, sort_documents,
    sort_documents_composite, SortKey,
};
