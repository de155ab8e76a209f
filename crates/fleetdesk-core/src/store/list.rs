// ── Paginated list state ──
//
// The cached page of one resource plus its counters and loading flags.
// Pagination changes refetch explicitly through `Pagination`; there is
// no polling and nothing refetches behind the caller's back.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use fleetdesk_api::types::{PageParams, Paginated};

use crate::format::DEFAULT_PAGE_SIZE;

/// Snapshot of the cached page. Cloning is cheap (items are shared).
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Arc<Vec<T>>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(Vec::new()),
            total: 0,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl<T> Page<T> {
    pub fn params(&self) -> PageParams {
        PageParams::new(self.page, self.page_size)
    }

    /// Number of pages needed for `total` items, at least one.
    pub fn page_count(&self) -> u64 {
        if self.page_size == 0 {
            return 1;
        }
        self.total.div_ceil(u64::from(self.page_size)).max(1)
    }
}

/// Reactive list state shared by the paginated stores.
#[derive(Debug)]
pub struct ListState<T> {
    page: watch::Sender<Page<T>>,
    loading: watch::Sender<bool>,
    mutating: watch::Sender<bool>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListState<T> {
    pub fn new() -> Self {
        let (page, _) = watch::channel(Page::default());
        let (loading, _) = watch::channel(false);
        let (mutating, _) = watch::channel(false);
        Self {
            page,
            loading,
            mutating,
        }
    }

    // ── Readers ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Page<T> {
        let page = self.page.borrow();
        Page {
            items: Arc::clone(&page.items),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Page<T>> {
        self.page.subscribe()
    }

    pub fn params(&self) -> PageParams {
        self.page.borrow().params()
    }

    /// A list fetch is in flight.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// A single-entity mutation is in flight.
    pub fn is_mutating(&self) -> bool {
        *self.mutating.borrow()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    // ── Writers (store-internal) ─────────────────────────────────────

    pub(crate) fn loading_guard(&self) -> Busy<'_> {
        Busy::start(&self.loading)
    }

    pub(crate) fn mutation_guard(&self) -> Busy<'_> {
        Busy::start(&self.mutating)
    }

    /// Replace items and every counter with the server's answer.
    ///
    /// Counters the server left at zero keep their current value.
    pub(crate) fn apply<P: Paginated<Item = T>>(&self, response: P) {
        let (items, info) = response.into_parts();
        self.page.send_modify(|page| {
            page.items = Arc::new(items);
            page.total = info.total;
            if info.page > 0 {
                page.page = info.page;
            }
            if info.page_size > 0 {
                page.page_size = info.page_size;
            }
        });
    }

    /// Replace items and total only; the requested page stays as is.
    pub(crate) fn apply_items(&self, items: Vec<T>, total: u64) {
        self.page.send_modify(|page| {
            page.items = Arc::new(items);
            page.total = total;
        });
    }

    pub(crate) fn clear_items(&self) {
        self.page.send_modify(|page| page.items = Arc::new(Vec::new()));
    }

    /// Back to an empty first page with the default size.
    pub(crate) fn reset(&self) {
        self.page.send_replace(Page::default());
    }

    /// Update the requested page and/or size. Returns `true` when a value
    /// actually changed. Zero is ignored.
    pub(crate) fn set_params(&self, page: Option<u32>, page_size: Option<u32>) -> bool {
        self.page.send_if_modified(|current| {
            let mut changed = false;
            if let Some(p) = page.filter(|p| *p > 0 && *p != current.page) {
                current.page = p;
                changed = true;
            }
            if let Some(s) = page_size.filter(|s| *s > 0 && *s != current.page_size) {
                current.page_size = s;
                changed = true;
            }
            changed
        })
    }
}

// ── Loading guard ────────────────────────────────────────────────────

/// Raises a loading flag for its lifetime and lowers it on drop, so
/// every exit path (including `?` and panics) resets the flag.
#[derive(Debug)]
pub(crate) struct Busy<'a> {
    flag: &'a watch::Sender<bool>,
}

impl<'a> Busy<'a> {
    pub(crate) fn start(flag: &'a watch::Sender<bool>) -> Self {
        flag.send_replace(true);
        Self { flag }
    }
}

impl Drop for Busy<'_> {
    fn drop(&mut self) {
        self.flag.send_replace(false);
    }
}

// ── Reactive pagination ──────────────────────────────────────────────

/// Explicit replacement for "refetch when page or size changes".
///
/// Each setter refetches exactly once, and only when a value changed.
/// `mount` performs the initial fetch.
pub trait Pagination: Sync {
    type Item: Send + Sync + 'static;

    fn list(&self) -> &ListState<Self::Item>;

    /// Fetch the current page into the list state.
    fn fetch(&self) -> impl Future<Output = ()> + Send;

    fn mount(&self) -> impl Future<Output = ()> + Send {
        self.fetch()
    }

    fn set_page(&self, page: u32) -> impl Future<Output = ()> + Send {
        self.set_pagination(Some(page), None)
    }

    fn set_page_size(&self, page_size: u32) -> impl Future<Output = ()> + Send {
        self.set_pagination(None, Some(page_size))
    }

    fn set_pagination(
        &self,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> impl Future<Output = ()> + Send {
        async move {
            if self.list().set_params(page, page_size) {
                self.fetch().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use fleetdesk_api::types::AddressPage;

    use super::*;

    #[test]
    fn set_params_reports_real_changes_only() {
        let list: ListState<u8> = ListState::new();
        assert!(!list.set_params(Some(1), Some(DEFAULT_PAGE_SIZE)));
        assert!(!list.set_params(Some(0), None));
        assert!(list.set_params(Some(2), None));
        assert!(!list.set_params(Some(2), None));
        assert!(list.set_params(None, Some(25)));
        assert_eq!(list.params(), PageParams::new(2, 25));
    }

    #[test]
    fn busy_guard_resets_flag_on_drop() {
        let list: ListState<u8> = ListState::new();
        {
            let _busy = list.loading_guard();
            assert!(list.is_loading());
        }
        assert!(!list.is_loading());
    }

    #[test]
    fn apply_keeps_counters_the_server_omitted() {
        let list = ListState::new();
        list.set_params(Some(3), Some(5));
        list.apply(AddressPage {
            addresses: Vec::new(),
            total: 12,
            page: 0,
            page_size: 0,
        });
        let snap = list.snapshot();
        assert_eq!((snap.total, snap.page, snap.page_size), (12, 3, 5));
        assert_eq!(snap.page_count(), 3);
    }
}
