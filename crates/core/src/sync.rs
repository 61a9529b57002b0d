//! Binding between grouped article content and the pagination authority
//!
//! [`ArticleView`] is a page-number driven consumer of a [`Pagination`]. It feeds the
//! number of grouped pages into the authority whenever the content changes and mirrors
//! the authority's current page into its own state through a subscription. The
//! authority stays the only writer of the current page; the view only requests
//! navigation.
//!
//! The view holds the authority by mutable borrow for as long as it is mounted, so two
//! views can never drive the same authority at once. Dropping the view unsubscribes its
//! listeners, resets the authority and releases the cached content.

use std::cell::Cell;
use std::rc::Rc;

use log::debug;

use crate::config::ViewConfig;
use crate::content::{find_page, group, ContentRecord, PagedContent};
use crate::pagination::{ChangeCause, PageChange, Pagination, PagingSnapshot, SubscriptionId};

/// Rendering collaborator that can move the viewport back to its origin
pub trait Viewport {
    fn scroll_to_top(&mut self);
}

/// Viewport for headless consumers
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopViewport;

impl Viewport for NoopViewport {
    fn scroll_to_top(&mut self) {}
}

/// Article view synchronized with a pagination authority
pub struct ArticleView<'a, V: Viewport = NoopViewport> {
    authority: &'a mut Pagination,
    config: ViewConfig,
    viewport: V,
    content: Vec<PagedContent>,
    local_page: Rc<Cell<usize>>,
    subscriptions: Vec<SubscriptionId>,
}

impl<'a> ArticleView<'a, NoopViewport> {
    /// Mount a headless view
    pub fn mount(authority: &'a mut Pagination, config: ViewConfig) -> Self {
        Self::with_viewport(authority, config, NoopViewport)
    }
}

impl<'a, V: Viewport> ArticleView<'a, V> {
    /// Mount a view that scrolls `viewport` after navigation when the config asks for it
    pub fn with_viewport(authority: &'a mut Pagination, config: ViewConfig, viewport: V) -> Self {
        authority.set_max_visible_pages(config.max_visible_pages);

        let local_page = Rc::new(Cell::new(authority.current_page()));
        let mirror = Rc::clone(&local_page);
        let subscription = authority.subscribe(move |change: &PageChange| {
            mirror.set(change.current_page);
        });

        debug!(
            "article view mounted at page {} (max visible pages {})",
            local_page.get(),
            config.max_visible_pages
        );

        Self {
            authority,
            config,
            viewport,
            content: Vec::new(),
            local_page,
            subscriptions: vec![subscription],
        }
    }

    /// Regroup `records` and publish the result
    pub fn set_records(&mut self, records: &[ContentRecord]) {
        self.set_content(group(records));
    }

    /// Replace the grouped content and re-initialize the authority with its page count.
    ///
    /// The content is swapped in before the authority is touched, so the mirrored page
    /// written by the re-initialization is always read against the new content. Pending
    /// navigation against the old content has no effect afterwards.
    pub fn set_content(&mut self, content: Vec<PagedContent>) {
        self.content = content;

        let start_page = self.local_page.get();
        debug!(
            "re-initializing pagination with {} pages at page {}",
            self.content.len(),
            start_page
        );
        self.authority.initialize(self.content.len(), 1, start_page);
    }

    pub fn go_to_page(&mut self, page: usize) -> bool {
        self.navigate(|authority| authority.go_to_page(page))
    }

    pub fn next_page(&mut self) -> bool {
        self.navigate(Pagination::next_page)
    }

    pub fn previous_page(&mut self) -> bool {
        self.navigate(Pagination::previous_page)
    }

    pub fn go_to_first(&mut self) -> bool {
        self.navigate(Pagination::go_to_first)
    }

    pub fn go_to_last(&mut self) -> bool {
        self.navigate(Pagination::go_to_last)
    }

    fn navigate<F>(&mut self, request: F) -> bool
    where
        F: FnOnce(&mut Pagination) -> bool,
    {
        let moved = request(&mut *self.authority);
        if moved && self.config.scroll_to_top {
            self.viewport.scroll_to_top();
        }
        moved
    }

    /// Register a hook called once per successful navigation with the new page.
    ///
    /// The hook is removed when the view is torn down.
    pub fn on_page_change<F>(&mut self, mut hook: F) -> SubscriptionId
    where
        F: FnMut(usize) + 'static,
    {
        let subscription = self.authority.subscribe(move |change: &PageChange| {
            if change.cause == ChangeCause::Navigated {
                hook(change.current_page);
            }
        });
        self.subscriptions.push(subscription);
        subscription
    }

    /// Locally mirrored current page
    pub fn current_page(&self) -> usize {
        self.local_page.get()
    }

    /// Content for the authority's current page, `None` when there is nothing to show
    pub fn current_content(&self) -> Option<&PagedContent> {
        if self.authority.total_pages() == 0 {
            return None;
        }
        find_page(&self.content, self.authority.current_page())
    }

    pub fn content(&self) -> &[PagedContent] {
        &self.content
    }

    pub fn snapshot(&self) -> PagingSnapshot {
        self.authority.snapshot()
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn viewport(&self) -> &V {
        &self.viewport
    }

    /// Tear the view down explicitly. Equivalent to dropping it.
    pub fn close(self) {}

    fn teardown(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            self.authority.unsubscribe(subscription);
        }
        self.authority.reset();
        self.content.clear();
        debug!("article view disposed, pagination reset");
    }
}

impl<V: Viewport> Drop for ArticleView<'_, V> {
    fn drop(&mut self) {
        self.teardown();
    }
}
