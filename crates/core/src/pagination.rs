//! Pagination authority and page-window math
//!
//! This module owns the canonical paging state ("which page am I on, out of how many")
//! and derives the bounded-width list of page buttons shown to the user. The window math
//! is exposed as pure functions; [`Pagination`] wraps it in an explicitly owned state
//! object that notifies subscribers whenever the current page or page count changes.

use std::fmt;
use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::config::ViewConfig;

/// Default number of page buttons rendered in the window
pub const DEFAULT_MAX_VISIBLE_PAGES: usize = 5;

/// Canonical paging state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingState {
    pub current_page: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub max_visible_pages: usize,
}

impl PagingState {
    /// Number of pages derived from `total_items` and `items_per_page`
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.items_per_page)
    }
}

impl Default for PagingState {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_items: 0,
            items_per_page: 1,
            max_visible_pages: DEFAULT_MAX_VISIBLE_PAGES,
        }
    }
}

/// A single entry of the rendered page list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PageEntry {
    Page { value: usize, active: bool },
    Ellipsis,
}

impl PageEntry {
    /// Page number of a `Page` entry, `None` for ellipsis markers
    pub fn page(&self) -> Option<usize> {
        match self {
            PageEntry::Page { value, .. } => Some(*value),
            PageEntry::Ellipsis => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, PageEntry::Page { active: true, .. })
    }

    pub fn is_ellipsis(&self) -> bool {
        matches!(self, PageEntry::Ellipsis)
    }
}

/// Read-only projection of the paging state handed to renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PagingSnapshot {
    pub current_page: usize,
    pub total_pages: usize,
    pub is_previous_disabled: bool,
    pub is_next_disabled: bool,
    pub show_pagination: bool,
    pub entries: Vec<PageEntry>,
}

/// Compute the number of pages for a list of `total_items`.
///
/// `items_per_page` of zero is treated as one so the result is always defined.
pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    total_items.div_ceil(items_per_page.max(1))
}

/// Build the windowed list of page entries.
///
/// The window is `max_visible` pages wide and slides with `current`, clamping to the
/// first or last page near the edges instead of shrinking. With an even width the window
/// holds one more page to the left of `current` than to the right. An ellipsis marks
/// pages skipped before or after the window.
pub fn page_entries(current: usize, total: usize, max_visible: usize) -> Vec<PageEntry> {
    let max_visible = max_visible.max(1);

    if total == 0 {
        return Vec::new();
    }

    let page = |value: usize| PageEntry::Page {
        value,
        active: value == current,
    };

    if total <= max_visible {
        return (1..=total).map(page).collect();
    }

    let (start, end) = window_bounds(current, total, max_visible);

    let mut entries = Vec::with_capacity(max_visible + 2);
    if start > 1 {
        entries.push(PageEntry::Ellipsis);
    }
    entries.extend((start..=end).map(page));
    if end < total {
        entries.push(PageEntry::Ellipsis);
    }
    entries
}

/// Inclusive window bounds for `total > max_visible`
fn window_bounds(current: usize, total: usize, max_visible: usize) -> (usize, usize) {
    let half = max_visible / 2;

    if current <= half + 1 {
        (1, max_visible)
    } else if current >= total - half {
        (total - max_visible + 1, total)
    } else {
        let start = current - half;
        (start, start + max_visible - 1)
    }
}

/// What triggered a [`PageChange`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeCause {
    Initialized,
    Navigated,
    TotalItemsChanged,
    ItemsPerPageChanged,
    Reset,
}

/// Event delivered to subscribers after the state has been written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageChange {
    pub previous_page: usize,
    pub current_page: usize,
    pub total_pages: usize,
    pub cause: ChangeCause,
}

/// Handle returned by [`Pagination::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&PageChange)>;

/// Single writable source of truth for the current page.
///
/// Every mutation goes through one of the methods below. Listeners run synchronously,
/// in subscription order, once the new state is fully in place.
pub struct Pagination {
    state: PagingState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pagination")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new()
    }
}

impl Pagination {
    pub fn new() -> Self {
        Self {
            state: PagingState::default(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Create an authority using the density and window width from a view config
    pub fn from_config(config: &ViewConfig) -> Self {
        let mut pagination = Self::new();
        pagination.state.items_per_page = config.items_per_page.max(1);
        pagination.state.max_visible_pages = config.max_visible_pages.max(1);
        pagination
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn state(&self) -> PagingState {
        self.state
    }

    pub fn current_page(&self) -> usize {
        self.state.current_page
    }

    pub fn total_items(&self) -> usize {
        self.state.total_items
    }

    pub fn items_per_page(&self) -> usize {
        self.state.items_per_page
    }

    pub fn max_visible_pages(&self) -> usize {
        self.state.max_visible_pages
    }

    pub fn total_pages(&self) -> usize {
        self.state.total_pages()
    }

    pub fn is_previous_disabled(&self) -> bool {
        self.state.current_page <= 1
    }

    pub fn is_next_disabled(&self) -> bool {
        self.state.current_page >= self.total_pages()
    }

    pub fn show_pagination(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn entries(&self) -> Vec<PageEntry> {
        page_entries(
            self.state.current_page,
            self.total_pages(),
            self.state.max_visible_pages,
        )
    }

    pub fn snapshot(&self) -> PagingSnapshot {
        PagingSnapshot {
            current_page: self.state.current_page,
            total_pages: self.total_pages(),
            is_previous_disabled: self.is_previous_disabled(),
            is_next_disabled: self.is_next_disabled(),
            show_pagination: self.show_pagination(),
            entries: self.entries(),
        }
    }

    /// Half-open range of item indices shown on the current page.
    ///
    /// Empty when there are no pages or the current page rests outside `1..=total_pages`.
    pub fn item_range(&self) -> Range<usize> {
        let current = self.state.current_page;
        if current == 0 || current > self.total_pages() {
            return 0..0;
        }

        let start = (current - 1) * self.state.items_per_page;
        let end = (start + self.state.items_per_page).min(self.state.total_items);
        start..end
    }

    // ------------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------------

    /// Reset all paging fields.
    ///
    /// `start_page` is stored as given, even when it lies beyond the new page count.
    /// Navigation afterwards is checked against the recomputed total.
    pub fn initialize(&mut self, total_items: usize, items_per_page: usize, start_page: usize) {
        let previous_page = self.state.current_page;
        self.state.total_items = total_items;
        self.state.items_per_page = items_per_page.max(1);
        self.state.current_page = start_page;
        self.emit(previous_page, ChangeCause::Initialized);
    }

    /// Move to `page`. Returns `false` and leaves the state alone when out of range.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }

        let previous_page = self.state.current_page;
        self.state.current_page = page;
        self.emit(previous_page, ChangeCause::Navigated);
        true
    }

    /// Update the item count, falling back to page 1 if the current page no longer exists
    pub fn set_total_items(&mut self, total: usize) {
        let previous_page = self.state.current_page;
        let previous_total = self.total_pages();

        self.state.total_items = total;
        if self.total_pages() < self.state.current_page {
            self.state.current_page = 1;
        }

        if previous_page != self.state.current_page || previous_total != self.total_pages() {
            self.emit(previous_page, ChangeCause::TotalItemsChanged);
        }
    }

    /// Update the page density. Always returns to page 1.
    pub fn set_items_per_page(&mut self, per_page: usize) {
        let previous_page = self.state.current_page;
        let previous_total = self.total_pages();

        self.state.items_per_page = per_page.max(1);
        self.state.current_page = 1;

        if previous_page != self.state.current_page || previous_total != self.total_pages() {
            self.emit(previous_page, ChangeCause::ItemsPerPageChanged);
        }
    }

    /// Change the window width; does not move the current page
    pub fn set_max_visible_pages(&mut self, max_visible: usize) {
        self.state.max_visible_pages = max_visible.max(1);
    }

    pub fn previous_page(&mut self) -> bool {
        self.go_to_page(self.state.current_page.saturating_sub(1))
    }

    pub fn next_page(&mut self) -> bool {
        self.go_to_page(self.state.current_page.saturating_add(1))
    }

    pub fn go_to_first(&mut self) -> bool {
        self.go_to_page(1)
    }

    pub fn go_to_last(&mut self) -> bool {
        self.go_to_page(self.total_pages())
    }

    /// Back to page 1 with no items. Density and window width are kept.
    pub fn reset(&mut self) {
        let previous_page = self.state.current_page;
        self.state.current_page = 1;
        self.state.total_items = 0;
        self.emit(previous_page, ChangeCause::Reset);
    }

    // ------------------------------------------------------------------------
    // Observation
    // ------------------------------------------------------------------------

    /// Register a listener for page changes
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&PageChange) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn emit(&mut self, previous_page: usize, cause: ChangeCause) {
        let change = PageChange {
            previous_page,
            current_page: self.state.current_page,
            total_pages: self.total_pages(),
            cause,
        };

        for (_, listener) in self.listeners.iter_mut() {
            listener(&change);
        }
    }
}
