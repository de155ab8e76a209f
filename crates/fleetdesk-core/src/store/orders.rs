// ── Orders store ──
//
// Orders are created from a dedicated page rather than a modal, so there
// is no form state here; `current` holds the order open in the detail or
// edit view. Cancellation is a lifecycle transition and re-throws.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use fleetdesk_api::types::{Order, OrderFormData};

use super::list::{ListState, Pagination};
use super::StoreContext;
use crate::error::CoreError;
use crate::i18n::MessageKey;

#[derive(Debug, Clone)]
pub struct OrdersStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    ctx: StoreContext,
    list: ListState<Order>,
    current: watch::Sender<Option<Order>>,
}

impl OrdersStore {
    pub fn new(ctx: StoreContext) -> Self {
        let (current, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                ctx,
                list: ListState::new(),
                current,
            }),
        }
    }

    /// The order loaded by [`load`](Self::load), if any.
    pub fn current(&self) -> Option<Order> {
        self.inner.current.borrow().clone()
    }

    pub fn subscribe_current(&self) -> watch::Receiver<Option<Order>> {
        self.inner.current.subscribe()
    }

    /// Fetch the current page. On failure the last-known list is kept.
    pub async fn fetch_orders(&self) {
        let inner = &self.inner;
        let _busy = inner.list.loading_guard();
        let params = inner.list.params();
        debug!(page = params.page, "fetching orders");

        match inner.ctx.api().get_all_orders(Some(&params)).await {
            Ok(page) => inner.list.apply(page),
            Err(e) => inner.ctx.fail(&e, MessageKey::FailedToLoadOrders),
        }
    }

    /// Create an order, refetch the list and return the new id.
    pub async fn create(&self, data: &OrderFormData) -> Option<String> {
        let inner = &self.inner;
        let _busy = inner.list.mutation_guard();

        match inner.ctx.api().create_order(data).await {
            Ok(order) => {
                inner.ctx.success(MessageKey::OrderCreated);
                self.fetch_orders().await;
                Some(order.id)
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToSaveOrder);
                None
            }
        }
    }

    pub async fn edit(&self, order_id: &str, data: &OrderFormData) -> bool {
        let inner = &self.inner;
        let _busy = inner.list.mutation_guard();

        match inner.ctx.api().update_order(order_id, data).await {
            Ok(order) => {
                inner.ctx.success(MessageKey::OrderUpdated);
                inner
                    .current
                    .send_if_modified(|cur| replace_if_same(cur, order));
                self.fetch_orders().await;
                true
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToSaveOrder);
                false
            }
        }
    }

    /// Cancel an order. Notifies either way; a failure is also returned
    /// so confirmation flows can tell.
    pub async fn cancel(&self, order_id: &str) -> Result<(), CoreError> {
        let inner = &self.inner;

        match inner.ctx.api().cancel_order(order_id).await {
            Ok(order) => {
                inner.ctx.success(MessageKey::OrderCancelled);
                inner
                    .current
                    .send_if_modified(|cur| replace_if_same(cur, order));
                self.fetch_orders().await;
                Ok(())
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToCancelOrder);
                Err(e.into())
            }
        }
    }

    /// Load one order into `current`. On failure `current` is cleared.
    pub async fn load(&self, order_id: &str) -> Option<Order> {
        let inner = &self.inner;
        let _busy = inner.list.mutation_guard();

        match inner.ctx.api().get_order_by_id(order_id).await {
            Ok(order) => {
                inner.current.send_replace(Some(order.clone()));
                Some(order)
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToLoadOrder);
                inner.current.send_replace(None);
                None
            }
        }
    }
}

/// Swap in `fresh` when it is the order already held.
fn replace_if_same(current: &mut Option<Order>, fresh: Order) -> bool {
    match current {
        Some(held) if held.id == fresh.id => {
            *held = fresh;
            true
        }
        _ => false,
    }
}

impl Pagination for OrdersStore {
    type Item = Order;

    fn list(&self) -> &ListState<Order> {
        &self.inner.list
    }

    async fn fetch(&self) {
        self.fetch_orders().await;
    }
}
