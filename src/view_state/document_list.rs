//! The document list view-state engine.
//!
//! `DocumentList` owns the relationship between the full item set, the
//! currently browsable view, the mark set, and the visible window. Every
//! mutator is atomic: it either moves the model to a new state satisfying the
//! invariants below or, on failure, leaves it untouched.
//!
//! Invariants held after every mutation:
//!
//! - `top_index <= selected_index < view.len()` (view nonempty)
//! - `0 <= selected_window_index < rows_per_page`
//! - `rows_per_page >= 1`
//! - the selected document is always `view[top_index + selected_window_index]`
//!
//! Rendering is pull-based: the UI asks for [`DocumentList::visible_rows`]
//! and [`DocumentList::status_info`]; no mutator pushes draw calls. Mutators
//! return whether state changed so the caller's event loop can decide to
//! redraw.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ViewError, ViewResult};
use crate::models::Document;
use crate::repository::DocumentRepository;

use super::filter::filter_documents;
use super::layout::{last_page_offset, rows_per_page, DisplayStyle};
use super::sort::{format_sort_keys, sort_documents, SortKey};

/// One row handed to the presentation layer.
#[derive(Debug, Clone, Copy)]
pub struct RowEntry<'a> {
    pub document: &'a Document,
    pub is_selected: bool,
    pub is_marked: bool,
}

/// Context information for the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    /// 1-based position of the selection within the view.
    pub selected_ordinal: usize,
    /// 1-based position of the selection within the window.
    pub window_ordinal: usize,
    pub marked_count: usize,
    pub view_count: usize,
    pub item_count: usize,
    /// Active sort keys in spec form (`"year- author"`), empty when unsorted.
    pub sort_keys: String,
}

/// Scrollable, sortable, filterable document list state.
#[derive(Debug, Clone)]
pub struct DocumentList {
    /// Full corpus known to the session, in sorted order.
    items: Vec<Document>,
    /// Currently browsable subset of `items` (or of a previous view).
    view: Vec<Document>,
    /// Marked document references; independent of the view.
    marked: HashSet<String>,
    sort_keys: Vec<SortKey>,
    style: DisplayStyle,
    viewport_height: u16,
    card_height: usize,
    rows_per_page: usize,
    /// Index into `view` of the first rendered row.
    top_index: usize,
    /// Row offset of the selection within the rendered window.
    selected_window_index: usize,
}

impl DocumentList {
    /// Create a list over `items`, applying `sort_keys` immediately.
    pub fn new(
        items: Vec<Document>,
        sort_keys: Vec<SortKey>,
        style: DisplayStyle,
        viewport_height: u16,
        card_height: usize,
        repo: &dyn DocumentRepository,
    ) -> Self {
        let items = sort_documents(items, &sort_keys, repo);
        let view = items.clone();
        let rows = rows_per_page(style, viewport_height, card_height);
        let list = Self {
            items,
            view,
            marked: HashSet::new(),
            sort_keys,
            style,
            viewport_height,
            card_height,
            rows_per_page: rows,
            top_index: 0,
            selected_window_index: 0,
        };
        list.assert_invariants();
        list
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Index into the view of the selected document.
    pub fn selected_index(&self) -> usize {
        self.top_index + self.selected_window_index
    }

    pub fn top_index(&self) -> usize {
        self.top_index
    }

    pub fn selected_window_index(&self) -> usize {
        self.selected_window_index
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn style(&self) -> DisplayStyle {
        self.style
    }

    pub fn card_height(&self) -> usize {
        self.card_height
    }

    pub fn view_len(&self) -> usize {
        self.view.len()
    }

    pub fn item_len(&self) -> usize {
        self.items.len()
    }

    pub fn sort_keys(&self) -> &[SortKey] {
        &self.sort_keys
    }

    /// The selected document; `NoSelection` only on an empty view, which the
    /// nonempty-view invariant rules out in a live session.
    pub fn selected_document(&self) -> ViewResult<&Document> {
        self.view
            .get(self.selected_index())
            .ok_or(ViewError::NoSelection)
    }

    /// Whether a document is marked.
    pub fn is_marked(&self, doc: &Document) -> bool {
        self.marked.contains(&doc.reference)
    }

    /// The marked documents (if any), otherwise the selection — the target
    /// set for tag and open commands.
    pub fn marked_or_selected(&self) -> ViewResult<Vec<Document>> {
        let marked: Vec<Document> = self
            .items
            .iter()
            .filter(|d| self.marked.contains(&d.reference))
            .cloned()
            .collect();
        if marked.is_empty() {
            Ok(vec![self.selected_document()?.clone()])
        } else {
            Ok(marked)
        }
    }

    /// The window slice plus selection and mark flags, for rendering.
    pub fn visible_rows(&self) -> Vec<RowEntry<'_>> {
        let end = (self.top_index + self.rows_per_page).min(self.view.len());
        self.view[self.top_index..end]
            .iter()
            .enumerate()
            .map(|(offset, document)| RowEntry {
                document,
                is_selected: offset == self.selected_window_index,
                is_marked: self.marked.contains(&document.reference),
            })
            .collect()
    }

    /// Status-bar counters and sort description.
    pub fn status_info(&self) -> StatusInfo {
        StatusInfo {
            selected_ordinal: self.selected_index() + 1,
            window_ordinal: self.selected_window_index + 1,
            marked_count: self.marked.len(),
            view_count: self.view.len(),
            item_count: self.items.len(),
            sort_keys: format_sort_keys(&self.sort_keys),
        }
    }

    // ------------------------------------------------------------------
    // Item set and sort
    // ------------------------------------------------------------------

    /// Replace the item set (reload). The current sort spec is re-applied and
    /// the view keeps the documents still present in the new set; when none
    /// survive, the view falls back to the full set so it never goes empty
    /// while items exist.
    pub fn set_items(&mut self, new_items: Vec<Document>, repo: &dyn DocumentRepository) -> bool {
        self.items = sort_documents(new_items, &self.sort_keys, repo);
        let view_refs: HashSet<&str> = self.view.iter().map(|d| d.reference.as_str()).collect();
        self.view = self
            .items
            .iter()
            .filter(|d| view_refs.contains(d.reference.as_str()))
            .cloned()
            .collect();
        if self.view.is_empty() {
            self.view = self.items.clone();
        }
        self.clamp_selection();
        self.assert_invariants();
        debug!(
            items = self.items.len(),
            view = self.view.len(),
            "item set replaced"
        );
        true
    }

    /// Replace the sort spec. Every key must name a field known to the
    /// repository; an unknown key rejects the whole spec and keeps the prior
    /// one. On success the item set is re-sorted, the view recomputed
    /// preserving membership, and the selection reset to the top.
    pub fn set_sort(
        &mut self,
        keys: Vec<SortKey>,
        repo: &dyn DocumentRepository,
    ) -> ViewResult<bool> {
        if let Some(bad) = keys.iter().find(|k| !repo.has_field(&k.field)) {
            return Err(ViewError::InvalidSortKey {
                key: bad.field.clone(),
            });
        }
        self.sort_keys = keys;
        let items = std::mem::take(&mut self.items);
        let changed = self.set_items(items, repo);
        self.jump_top();
        Ok(changed)
    }

    // ------------------------------------------------------------------
    // Scrolling and paging
    // ------------------------------------------------------------------

    /// Move the selection one row down. At the bottom window row the window
    /// slides instead; at the last item this is a no-op.
    pub fn scroll_down(&mut self) -> bool {
        let changed = if self.selected_window_index + 1 == self.rows_per_page
            && self.top_index + self.rows_per_page < self.view.len()
        {
            self.top_index += 1;
            true
        } else if self.selected_window_index + 1 < self.rows_per_page
            && self.selected_index() + 1 < self.view.len()
        {
            self.selected_window_index += 1;
            true
        } else {
            false
        };
        self.assert_invariants();
        changed
    }

    /// Move the selection one row up. At the top window row the window slides
    /// instead; at the first item this is a no-op.
    pub fn scroll_up(&mut self) -> bool {
        let changed = if self.top_index > 0 && self.selected_window_index == 0 {
            self.top_index -= 1;
            true
        } else if self.selected_window_index > 0 {
            self.selected_window_index -= 1;
            true
        } else {
            false
        };
        self.assert_invariants();
        changed
    }

    /// Move one page down; no-op on the last page.
    pub fn page_down(&mut self) -> bool {
        self.page(1)
    }

    /// Move one page up; no-op on the first page.
    pub fn page_up(&mut self) -> bool {
        self.page(-1)
    }

    fn page(&mut self, direction: i64) -> bool {
        if self.view.is_empty() {
            return false;
        }
        // 0-based index of the actual last page. Counting `len / rows` would
        // be one page too many when the view count is an exact multiple of
        // the page size.
        let last_page = (self.view.len() - 1) / self.rows_per_page;
        let current_page = self.selected_index() / self.rows_per_page;
        let next_page = current_page as i64 + direction;

        // Landing on a partial last page cannot keep a window offset past its
        // item count.
        if next_page == last_page as i64 {
            self.selected_window_index = self
                .selected_window_index
                .min(last_page_offset(self.view.len(), self.rows_per_page));
        }

        let changed = if direction < 0 && current_page > 0 {
            self.top_index = self.top_index.saturating_sub(self.rows_per_page);
            true
        } else if direction > 0 && current_page < last_page {
            self.top_index += self.rows_per_page;
            true
        } else {
            false
        };
        self.assert_invariants();
        changed
    }

    /// Select the first document in the view.
    pub fn jump_top(&mut self) -> bool {
        let changed = self.top_index != 0 || self.selected_window_index != 0;
        self.top_index = 0;
        self.selected_window_index = 0;
        self.assert_invariants();
        changed
    }

    /// Select the last document in the view, filling the window maximally.
    pub fn jump_bottom(&mut self) -> bool {
        if self.view.is_empty() {
            return false;
        }
        let before = (self.top_index, self.selected_window_index);
        if self.view.len() >= self.rows_per_page {
            self.top_index = self.view.len() - self.rows_per_page;
            self.selected_window_index = self.rows_per_page - 1;
        } else {
            self.top_index = 0;
            self.selected_window_index = self.view.len() - 1;
        }
        self.assert_invariants();
        before != (self.top_index, self.selected_window_index)
    }

    // ------------------------------------------------------------------
    // Marks
    // ------------------------------------------------------------------

    /// Toggle the mark on the selected document.
    pub fn mark_selected(&mut self) -> ViewResult<bool> {
        let reference = self.selected_document()?.reference.clone();
        if !self.marked.insert(reference.clone()) {
            self.marked.remove(&reference);
        }
        Ok(true)
    }

    /// Mark every document in the current view.
    pub fn mark_view(&mut self) -> bool {
        self.marked
            .extend(self.view.iter().map(|d| d.reference.clone()));
        true
    }

    /// Clear all marks.
    pub fn unmark_all(&mut self) -> bool {
        let changed = !self.marked.is_empty();
        self.marked.clear();
        changed
    }

    // ------------------------------------------------------------------
    // View narrowing
    // ------------------------------------------------------------------

    /// Narrow the view to its marked documents. Narrows the *current* view
    /// rather than the full item set; a mark outside the view stays marked
    /// but does not re-enter it. Fails without touching state when no marked
    /// document is visible.
    pub fn view_marked(&mut self) -> ViewResult<bool> {
        let narrowed = filter_documents(&self.view, |d| self.marked.contains(&d.reference))
            .ok_or_else(|| ViewError::EmptyResult {
                operation: "view_marked".to_string(),
            })?;
        self.view = narrowed;
        self.jump_top();
        self.assert_invariants();
        Ok(true)
    }

    /// Restore the view to the full item set and reset the selection.
    pub fn view_reset(&mut self) -> bool {
        self.view = self.items.clone();
        self.jump_top();
        self.assert_invariants();
        true
    }

    /// Filter the full item set by an (already alias-rewritten) query.
    /// Zero matches fail with `NoMatch`, leaving the prior view bit-for-bit
    /// intact so the caller can retry.
    pub fn search(&mut self, query: &str, repo: &dyn DocumentRepository) -> ViewResult<bool> {
        let results = filter_documents(&self.items, |d| repo.matches(d, query)).ok_or_else(|| {
            ViewError::NoMatch {
                query: query.to_string(),
            }
        })?;
        debug!(query, matches = results.len(), "search narrowed view");
        self.view = results;
        self.jump_top();
        self.assert_invariants();
        Ok(true)
    }

    // ------------------------------------------------------------------
    // Layout changes
    // ------------------------------------------------------------------

    /// Recompute the page size for a new viewport height. When the selection
    /// would fall below the shrunken window, the window is pulled forward so
    /// the selected document stays visible on the bottom row.
    pub fn resize(&mut self, viewport_height: u16) -> bool {
        self.viewport_height = viewport_height;
        self.reflow();
        true
    }

    /// Switch between table and card presentation; the window reclamps
    /// exactly as on resize.
    pub fn toggle_style(&mut self) -> bool {
        self.style = self.style.toggled();
        self.reflow();
        true
    }

    fn reflow(&mut self) {
        self.rows_per_page = rows_per_page(self.style, self.viewport_height, self.card_height);
        if self.selected_window_index >= self.rows_per_page {
            self.top_index = self.selected_index() + 1 - self.rows_per_page;
            self.selected_window_index = self.rows_per_page - 1;
        }
        self.assert_invariants();
    }

    // ------------------------------------------------------------------
    // Internal
    // ------------------------------------------------------------------

    /// Pull the selection back inside the view after the view shrank.
    fn clamp_selection(&mut self) {
        if self.view.is_empty() {
            self.top_index = 0;
            self.selected_window_index = 0;
            return;
        }
        let last = self.view.len() - 1;
        let selected = self.selected_index().min(last);
        self.top_index = self.top_index.min(selected);
        if selected - self.top_index >= self.rows_per_page {
            self.top_index = selected + 1 - self.rows_per_page;
        }
        self.selected_window_index = selected - self.top_index;
    }

    fn assert_invariants(&self) {
        debug_assert!(self.rows_per_page >= 1);
        debug_assert!(self.selected_window_index < self.rows_per_page);
        if !self.view.is_empty() {
            debug_assert!(
                self.selected_index() < self.view.len(),
                "selection {} out of view {}",
                self.selected_index(),
                self.view.len()
            );
        }
    }
}
