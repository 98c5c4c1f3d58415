//! Page bookkeeping for long entry lists.
//!
//! A [`Paginator`] is plain state: create one per list you want to page
//! through. It never sees the entries themselves, only their count, and
//! slices whatever list it is handed.

use serde::{Deserialize, Serialize};

/// Default page size: three columns of seven rows.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 21;

/// Default number of page links shown at once.
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 7;

/// Snapshot of a paginator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub current_page: usize,
    pub items_per_page: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

/// Stateful pager over a list of `total_items` things.
#[derive(Debug, Clone)]
pub struct Paginator {
    state: PaginationState,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_ITEMS_PER_PAGE)
    }
}

impl Paginator {
    /// Create a paginator. A page size of 0 is treated as 1.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            state: PaginationState {
                current_page: 1,
                items_per_page: items_per_page.max(1),
                total_items: 0,
                total_pages: 0,
            },
        }
    }

    /// Recompute page counts for a new item total.
    ///
    /// A different total means a different list, so the current page goes
    /// back to 1. Otherwise the current page is only clamped into range.
    pub fn initialize(&mut self, total_items: usize) {
        let previous_total = self.state.total_items;
        self.state.total_items = total_items;
        self.state.total_pages = total_items.div_ceil(self.state.items_per_page);

        if previous_total != total_items {
            self.state.current_page = 1;
        } else {
            self.state.current_page = self
                .state
                .current_page
                .clamp(1, self.state.total_pages.max(1));
        }
    }

    pub fn state(&self) -> PaginationState {
        self.state
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    pub fn total_pages(&self) -> usize {
        self.state.total_pages
    }

    pub fn items_per_page(&self) -> usize {
        self.state.items_per_page
    }

    /// Jump to `page`. Out-of-range pages are refused and change nothing.
    pub fn set_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.state.total_pages {
            return false;
        }
        self.state.current_page = page;
        true
    }

    pub fn next_page(&mut self) -> bool {
        self.set_page(self.state.current_page + 1)
    }

    pub fn previous_page(&mut self) -> bool {
        match self.state.current_page.checked_sub(1) {
            Some(page) => self.set_page(page),
            None => false,
        }
    }

    pub fn first_page(&mut self) {
        self.state.current_page = 1;
    }

    pub fn last_page(&mut self) {
        self.state.current_page = self.state.total_pages.max(1);
    }

    pub fn has_next_page(&self) -> bool {
        self.state.current_page < self.state.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.state.current_page > 1
    }

    /// The part of `items` on the current page.
    pub fn current_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = (self.state.current_page - 1).saturating_mul(self.state.items_per_page);
        if start >= items.len() {
            return &[];
        }
        let end = start
            .saturating_add(self.state.items_per_page)
            .min(items.len());
        &items[start..end]
    }

    /// Page numbers to show in pagination controls.
    ///
    /// Keeps the current page centered where possible. When the window runs
    /// into the last page it extends further left instead.
    pub fn page_window(&self, max_visible: usize) -> Vec<usize> {
        let PaginationState {
            current_page,
            total_pages,
            ..
        } = self.state;

        if total_pages <= max_visible {
            return (1..=total_pages).collect();
        }
        if max_visible == 0 {
            return Vec::new();
        }

        let half = max_visible / 2;
        let mut start = current_page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(total_pages);

        if end - start + 1 < max_visible {
            start = (end + 1).saturating_sub(max_visible).max(1);
        }

        (start..=end).collect()
    }

    /// Back to an empty list, keeping the page size.
    pub fn reset(&mut self) {
        self.state.current_page = 1;
        self.state.total_items = 0;
        self.state.total_pages = 0;
    }
}
