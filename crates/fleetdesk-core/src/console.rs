// ── Console context ──
//
// One `Console` per session owns the API client and every store. It is
// passed explicitly to whatever renders views; nothing is reachable
// through globals.

use std::sync::Arc;

use tracing::debug;

use fleetdesk_api::ApiClient;

use crate::error::CoreError;
use crate::guard::{self, Navigation, Route};
use crate::i18n::{English, Translate};
use crate::notify::Notifications;
use crate::store::{AddressesStore, AuthStore, OrdersStore, StoreContext, TripsStore, TrucksStore};
use crate::workflow::{Confirm, TripWorkflow};

/// Session-scoped service container. Cheap to clone.
#[derive(Debug, Clone)]
pub struct Console {
    ctx: StoreContext,
    auth: AuthStore,
    addresses: AddressesStore,
    trucks: TrucksStore,
    orders: OrdersStore,
    trips: TripsStore,
}

impl Console {
    /// Build a console with the English catalogue.
    pub fn new(api: ApiClient) -> Self {
        Self::with_translator(api, Arc::new(English))
    }

    pub fn with_translator(api: ApiClient, i18n: Arc<dyn Translate>) -> Self {
        let api = Arc::new(api);
        let ctx = StoreContext::new(Arc::clone(&api), Notifications::new(), i18n);
        Self {
            auth: AuthStore::new(api),
            addresses: AddressesStore::new(ctx.clone()),
            trucks: TrucksStore::new(ctx.clone()),
            orders: OrdersStore::new(ctx.clone()),
            trips: TripsStore::new(ctx.clone()),
            ctx,
        }
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn api(&self) -> &Arc<ApiClient> {
        self.ctx.api()
    }

    pub fn notifications(&self) -> &Notifications {
        self.ctx.notifications()
    }

    pub fn i18n(&self) -> &Arc<dyn Translate> {
        self.ctx.i18n()
    }

    pub fn auth(&self) -> &AuthStore {
        &self.auth
    }

    pub fn addresses(&self) -> &AddressesStore {
        &self.addresses
    }

    pub fn trucks(&self) -> &TrucksStore {
        &self.trucks
    }

    pub fn orders(&self) -> &OrdersStore {
        &self.orders
    }

    pub fn trips(&self) -> &TripsStore {
        &self.trips
    }

    /// Confirmation-gated trip actions using `confirm` for prompts.
    pub fn trip_workflow<C: Confirm>(&self, confirm: C) -> TripWorkflow<C> {
        TripWorkflow::new(self.trips.clone(), confirm, Arc::clone(self.ctx.i18n()))
    }

    // ── Navigation ───────────────────────────────────────────────────

    /// Run the navigation guard for `path`.
    pub async fn navigate(&self, path: &str) -> Result<Navigation, CoreError> {
        let route: Route = path.parse()?;
        let decision = guard::before_each(&self.auth, route).await;
        debug!(path, target = %decision.target(), redirect = decision.is_redirect(), "navigation");
        Ok(decision)
    }

    /// Point the API client at another backend.
    pub fn set_base_url(&self, url: &str) -> Result<(), CoreError> {
        self.ctx.api().set_base_url(url)?;
        Ok(())
    }
}
