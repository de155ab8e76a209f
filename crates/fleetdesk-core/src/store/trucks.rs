// ── Trucks store ──

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use fleetdesk_api::types::{Truck, TruckFormData};

use super::form::FormModal;
use super::list::{ListState, Pagination};
use super::StoreContext;
use crate::i18n::MessageKey;

/// Cached page of trucks, the shared create/edit form, the truck shown in
/// the detail view and the kg/tonnes display toggle.
#[derive(Debug, Clone)]
pub struct TrucksStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    ctx: StoreContext,
    list: ListState<Truck>,
    form: FormModal<Truck>,
    selected: watch::Sender<Option<Truck>>,
    weight_in_tonnes: watch::Sender<bool>,
}

impl TrucksStore {
    pub fn new(ctx: StoreContext) -> Self {
        let (selected, _) = watch::channel(None);
        let (weight_in_tonnes, _) = watch::channel(false);
        Self {
            inner: Arc::new(Inner {
                ctx,
                list: ListState::new(),
                form: FormModal::new(),
                selected,
                weight_in_tonnes,
            }),
        }
    }

    pub fn form(&self) -> &FormModal<Truck> {
        &self.inner.form
    }

    // ── Actions ──────────────────────────────────────────────────────

    /// Fetch the current page. On failure the last-known list is kept.
    pub async fn fetch_trucks(&self) {
        let inner = &self.inner;
        let _busy = inner.list.loading_guard();
        let params = inner.list.params();
        debug!(page = params.page, "fetching trucks");

        match inner.ctx.api().get_all_trucks(Some(&params)).await {
            Ok(page) => inner.list.apply(page),
            Err(e) => inner.ctx.fail(&e, MessageKey::FailedToLoadTrucks),
        }
    }

    pub async fn add(&self, data: &TruckFormData) -> bool {
        let inner = &self.inner;
        let _busy = inner.list.mutation_guard();

        match inner.ctx.api().create_truck(data).await {
            Ok(_) => {
                inner.ctx.success(MessageKey::TruckCreated);
                self.fetch_trucks().await;
                inner.form.close();
                true
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToSaveTruck);
                false
            }
        }
    }

    /// Update the truck open in the form; a no-op without one.
    pub async fn edit(&self, data: &TruckFormData) -> bool {
        let inner = &self.inner;
        let Some(edited) = inner.form.edited() else {
            return false;
        };
        let _busy = inner.list.mutation_guard();

        match inner.ctx.api().update_truck(&edited.id, data).await {
            Ok(_) => {
                inner.ctx.success(MessageKey::TruckUpdated);
                self.fetch_trucks().await;
                inner.form.close();
                true
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToSaveTruck);
                false
            }
        }
    }

    pub async fn submit_form(&self, data: &TruckFormData) -> bool {
        if self.inner.form.is_editing() {
            self.edit(data).await
        } else {
            self.add(data).await
        }
    }

    pub async fn remove(&self, id: &str) -> bool {
        let inner = &self.inner;
        let _busy = inner.list.mutation_guard();

        match inner.ctx.api().delete_truck(id).await {
            Ok(()) => {
                inner.ctx.success(MessageKey::TruckDeleted);
                self.fetch_trucks().await;
                true
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToDeleteTruck);
                false
            }
        }
    }

    // ── View state ───────────────────────────────────────────────────

    pub fn open_modal(&self, truck: Option<Truck>) {
        self.inner.form.open(truck);
    }

    pub fn close_modal(&self) {
        self.inner.form.close();
    }

    pub fn open_details(&self, truck: Truck) {
        self.inner.selected.send_replace(Some(truck));
    }

    pub fn close_details(&self) {
        self.inner.selected.send_replace(None);
    }

    pub fn selected(&self) -> Option<Truck> {
        self.inner.selected.borrow().clone()
    }

    pub fn weight_in_tonnes(&self) -> bool {
        *self.inner.weight_in_tonnes.borrow()
    }

    pub fn set_weight_in_tonnes(&self, tonnes: bool) {
        self.inner.weight_in_tonnes.send_replace(tonnes);
    }

    /// Empty the list and return to the first page with the default size.
    pub fn reset(&self) {
        self.inner.list.reset();
    }
}

impl Pagination for TrucksStore {
    type Item = Truck;

    fn list(&self) -> &ListState<Truck> {
        &self.inner.list
    }

    async fn fetch(&self) {
        self.fetch_trucks().await;
    }
}
