// ── Domain stores ──
//
// One store per resource. Each owns a cache of the current page plus
// loading flags, exposed through `watch` channels. Only a store's own
// actions write to its state; consumers read snapshots or subscribe.

mod addresses;
mod auth;
mod form;
mod list;
mod orders;
mod trips;
mod trucks;

use std::sync::Arc;

use tracing::warn;

use fleetdesk_api::ApiClient;

use crate::i18n::{MessageKey, Translate};
use crate::notify::Notifications;

pub use addresses::AddressesStore;
pub use auth::AuthStore;
pub use form::{FormModal, FormState};
pub use list::{ListState, Page, Pagination};
pub use orders::OrdersStore;
pub use trips::TripsStore;
pub use trucks::TrucksStore;

/// Collaborators every store needs: the API client, the notification hub
/// and the message catalogue.
#[derive(Clone)]
pub struct StoreContext {
    api: Arc<ApiClient>,
    notifications: Notifications,
    i18n: Arc<dyn Translate>,
}

impl StoreContext {
    pub fn new(
        api: Arc<ApiClient>,
        notifications: Notifications,
        i18n: Arc<dyn Translate>,
    ) -> Self {
        Self {
            api,
            notifications,
            i18n,
        }
    }

    pub fn api(&self) -> &Arc<ApiClient> {
        &self.api
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn i18n(&self) -> &Arc<dyn Translate> {
        &self.i18n
    }

    pub(crate) fn success(&self, key: MessageKey) {
        self.notifications.success(self.i18n.translate(key));
    }

    /// Report a failed call: the server's message when it sent one,
    /// otherwise the translated fallback.
    pub(crate) fn fail(&self, err: &fleetdesk_api::Error, fallback: MessageKey) {
        warn!(error = %err, context = fallback.key(), "request failed");
        let message = err
            .server_message()
            .map_or_else(|| self.i18n.translate(fallback).into_owned(), str::to_owned);
        self.notifications.error(message);
    }
}

impl std::fmt::Debug for StoreContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreContext")
            .field("api", &self.api)
            .finish_non_exhaustive()
    }
}
