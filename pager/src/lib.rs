//! Page/window bookkeeping for list views.
//!
//! This crate is UI-framework agnostic: it never holds the listed items, only
//! the item count, so any view can slice its own collection with the exposed
//! window.
//!
//! DESIGN
//! ======
//! The requested page is stored as-is and clamped on every read, so a view
//! whose item count shrinks (filter, refresh) always observes a valid
//! `current_page`/`total_pages` pair without a separate revalidation call.
//! An empty list is one empty page, never zero pages.
//!
//! Invalid inputs (non-positive sizes, out-of-range pages) degrade to the
//! nearest valid state instead of failing: the pager is view state, not a
//! validating API boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Page size used when none (or a non-positive one) is configured.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Page a fresh pager starts on, and returns to when reset triggers change.
pub const DEFAULT_INITIAL_PAGE: i64 = 1;

/// Construction options for [`Pagination`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationOptions {
    /// Items per page. Non-positive values fall back to [`DEFAULT_PAGE_SIZE`].
    pub initial_page_size: i64,
    /// 1-indexed starting page; also the target of trigger resets.
    pub initial_page: i64,
}

impl Default for PaginationOptions {
    fn default() -> Self {
        Self {
            initial_page_size: DEFAULT_PAGE_SIZE as i64,
            initial_page: DEFAULT_INITIAL_PAGE,
        }
    }
}

impl PaginationOptions {
    /// Options with a custom page size and the default initial page.
    #[must_use]
    pub fn with_page_size(initial_page_size: i64) -> Self {
        Self {
            initial_page_size,
            ..Self::default()
        }
    }
}

/// Stateful pagination over an externally supplied item count.
///
/// `K` is the type of the reset-trigger values: whenever the trigger list
/// passed to [`Pagination::observe`] differs from the previous observation,
/// the page jumps back to the configured initial page.
#[derive(Clone, Debug)]
pub struct Pagination<K = ()> {
    item_count: usize,
    page_size: usize,
    requested_page: i64,
    initial_page: i64,
    reset_triggers: Vec<K>,
}

impl Pagination {
    /// Create a pager without reset triggers.
    #[must_use]
    pub fn new(item_count: usize, options: PaginationOptions) -> Self {
        let page_size = usize::try_from(options.initial_page_size)
            .ok()
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);
        Self {
            item_count,
            page_size,
            requested_page: options.initial_page,
            initial_page: options.initial_page,
            reset_triggers: Vec::new(),
        }
    }

    /// Attach the initial reset-trigger values.
    ///
    /// The first observation is the baseline; only later changes reset.
    #[must_use]
    pub fn with_reset_triggers<K>(self, triggers: Vec<K>) -> Pagination<K> {
        Pagination {
            item_count: self.item_count,
            page_size: self.page_size,
            requested_page: self.requested_page,
            initial_page: self.initial_page,
            reset_triggers: triggers,
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(0, PaginationOptions::default())
    }
}

impl<K> Pagination<K> {
    /// Number of items currently being paginated.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Items per page (always at least 1).
    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// `max(1, ceil(item_count / page_size))`.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.item_count.div_ceil(self.page_size).max(1)
    }

    /// The requested page clamped into `[1, total_pages]`.
    #[must_use]
    pub fn current_page(&self) -> usize {
        let total = self.total_pages_i64();
        let page = self.requested_page.clamp(1, total);
        usize::try_from(page).unwrap_or(1)
    }

    /// Inclusive slice start for the current page.
    #[must_use]
    pub fn start_idx(&self) -> usize {
        (self.current_page() - 1).saturating_mul(self.page_size)
    }

    /// Exclusive slice end for the current page. May exceed `item_count` on
    /// the last page; use [`PageWindow::slice`] to clip.
    #[must_use]
    pub fn end_idx(&self) -> usize {
        self.start_idx().saturating_add(self.page_size)
    }

    /// Snapshot of every derived value at once.
    #[must_use]
    pub fn window(&self) -> PageWindow {
        PageWindow {
            current_page: self.current_page(),
            page_size: self.page_size,
            total_pages: self.total_pages(),
            start_idx: self.start_idx(),
            end_idx: self.end_idx(),
            item_count: self.item_count,
        }
    }

    /// Clamp `page` into `[1, total_pages]` and commit it.
    pub fn set_current_page(&mut self, page: i64) {
        self.requested_page = page.clamp(1, self.total_pages_i64());
    }

    /// Commit a new page size and return to page 1. Non-positive sizes are ignored.
    pub fn set_page_size(&mut self, size: i64) {
        if size <= 0 {
            return;
        }
        self.page_size = usize::try_from(size).unwrap_or(usize::MAX);
        self.requested_page = 1;
    }

    pub fn previous_page(&mut self) {
        self.set_current_page(self.current_page_i64().saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.set_current_page(self.current_page_i64().saturating_add(1));
    }

    pub fn first_page(&mut self) {
        self.set_current_page(1);
    }

    pub fn last_page(&mut self) {
        self.set_current_page(self.total_pages_i64());
    }

    /// Record a new external item count.
    ///
    /// A page that fell out of range is committed back to the new last page,
    /// so growing the list again does not jump to the stale request.
    pub fn set_item_count(&mut self, item_count: usize) {
        self.item_count = item_count;
        let total = self.total_pages_i64();
        if self.requested_page > total {
            self.requested_page = total;
        }
    }

    fn total_pages_i64(&self) -> i64 {
        i64::try_from(self.total_pages()).unwrap_or(i64::MAX)
    }

    fn current_page_i64(&self) -> i64 {
        i64::try_from(self.current_page()).unwrap_or(i64::MAX)
    }
}

impl<K: PartialEq + Clone> Pagination<K> {
    /// Observe the current item count and reset-trigger values.
    ///
    /// Any difference from the previously observed triggers (value, length,
    /// or order) sends the pager back to its initial page.
    pub fn observe(&mut self, item_count: usize, triggers: &[K]) {
        if self.reset_triggers.as_slice() != triggers {
            self.reset_triggers = triggers.to_vec();
            self.requested_page = self.initial_page;
        }
        self.set_item_count(item_count);
    }
}

/// Read-only view of a pager at one point in time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub start_idx: usize,
    pub end_idx: usize,
    pub item_count: usize,
}

impl PageWindow {
    /// The items of the current page, with `end_idx` clipped to `items.len()`.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.start_idx.min(items.len());
        let end = self.end_idx.min(items.len());
        &items[start..end]
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {} of {}", self.current_page, self.total_pages)
    }
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
