// ── Addresses store ──

use std::sync::Arc;

use tracing::debug;

use fleetdesk_api::types::{Address, AddressFormData};

use super::form::FormModal;
use super::list::{ListState, Pagination};
use super::StoreContext;
use crate::i18n::MessageKey;

/// Cached page of addresses plus the shared create/edit form.
///
/// Mutations report success as a `bool`; failures are surfaced as
/// notifications only.
#[derive(Debug, Clone)]
pub struct AddressesStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    ctx: StoreContext,
    list: ListState<Address>,
    form: FormModal<Address>,
}

impl AddressesStore {
    pub fn new(ctx: StoreContext) -> Self {
        Self {
            inner: Arc::new(Inner {
                ctx,
                list: ListState::new(),
                form: FormModal::new(),
            }),
        }
    }

    pub fn form(&self) -> &FormModal<Address> {
        &self.inner.form
    }

    /// Fetch the current page. On failure the last-known list is kept.
    pub async fn fetch_addresses(&self) {
        let inner = &self.inner;
        let _busy = inner.list.loading_guard();
        let params = inner.list.params();
        debug!(page = params.page, "fetching addresses");

        match inner.ctx.api().get_all_addresses(Some(&params)).await {
            Ok(page) => inner.list.apply(page),
            Err(e) => inner.ctx.fail(&e, MessageKey::FailedToLoadAddresses),
        }
    }

    pub async fn add(&self, data: &AddressFormData) -> bool {
        let inner = &self.inner;
        let _busy = inner.list.mutation_guard();

        match inner.ctx.api().create_address(data).await {
            Ok(_) => {
                inner.ctx.success(MessageKey::AddressCreated);
                self.fetch_addresses().await;
                inner.form.close();
                true
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToSaveAddress);
                false
            }
        }
    }

    /// Update the address currently open in the form. Without one this
    /// does nothing and returns `false`.
    pub async fn edit(&self, data: &AddressFormData) -> bool {
        let inner = &self.inner;
        let Some(edited) = inner.form.edited() else {
            return false;
        };
        let _busy = inner.list.mutation_guard();

        match inner.ctx.api().update_address(&edited.id, data).await {
            Ok(_) => {
                inner.ctx.success(MessageKey::AddressUpdated);
                self.fetch_addresses().await;
                inner.form.close();
                true
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToSaveAddress);
                false
            }
        }
    }

    /// Edit when an address is open in the form, create otherwise.
    pub async fn submit_form(&self, data: &AddressFormData) -> bool {
        if self.inner.form.is_editing() {
            self.edit(data).await
        } else {
            self.add(data).await
        }
    }

    pub async fn remove(&self, id: &str) -> bool {
        let inner = &self.inner;
        let _busy = inner.list.mutation_guard();

        match inner.ctx.api().delete_address(id).await {
            Ok(()) => {
                inner.ctx.success(MessageKey::AddressDeleted);
                self.fetch_addresses().await;
                true
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToDeleteAddress);
                false
            }
        }
    }

    pub fn open_modal(&self, address: Option<Address>) {
        self.inner.form.open(address);
    }

    pub fn close_modal(&self) {
        self.inner.form.close();
    }
}

impl Pagination for AddressesStore {
    type Item = Address;

    fn list(&self) -> &ListState<Address> {
        &self.inner.list
    }

    async fn fetch(&self) {
        self.fetch_addresses().await;
    }
}
