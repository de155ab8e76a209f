// ── Trips store ──
//
// Holds the paginated general trip listing plus the trips and available
// trucks of the order being planned. Unlike the CRUD stores, every trip
// action re-throws after notifying, and list failures reset the list.
// Every successful action reloads the list it changed.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use fleetdesk_api::types::{
    CompleteTripData, CreateOrderTripData, OrderTrip, Paginated, Truck, UpdateOrderTripData,
};

use super::list::{Busy, ListState, Pagination};
use super::StoreContext;
use crate::error::CoreError;
use crate::i18n::MessageKey;

#[derive(Debug, Clone)]
pub struct TripsStore {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    ctx: StoreContext,
    /// General listing; its mutation flag covers single-trip operations.
    list: ListState<OrderTrip>,
    order_trips: watch::Sender<Arc<Vec<OrderTrip>>>,
    available_trucks: watch::Sender<Arc<Vec<Truck>>>,
    loading_trucks: watch::Sender<bool>,
    edited: watch::Sender<Option<OrderTrip>>,
}

impl TripsStore {
    pub fn new(ctx: StoreContext) -> Self {
        let (order_trips, _) = watch::channel(Arc::new(Vec::new()));
        let (available_trucks, _) = watch::channel(Arc::new(Vec::new()));
        let (loading_trucks, _) = watch::channel(false);
        let (edited, _) = watch::channel(None);
        Self {
            inner: Arc::new(Inner {
                ctx,
                list: ListState::new(),
                order_trips,
                available_trucks,
                loading_trucks,
                edited,
            }),
        }
    }

    // ── Readers ──────────────────────────────────────────────────────

    pub fn order_trips(&self) -> Arc<Vec<OrderTrip>> {
        Arc::clone(&self.inner.order_trips.borrow())
    }

    pub fn subscribe_order_trips(&self) -> watch::Receiver<Arc<Vec<OrderTrip>>> {
        self.inner.order_trips.subscribe()
    }

    pub fn available_trucks(&self) -> Arc<Vec<Truck>> {
        Arc::clone(&self.inner.available_trucks.borrow())
    }

    pub fn is_loading_trucks(&self) -> bool {
        *self.inner.loading_trucks.borrow()
    }

    /// The trip currently open for editing (truck reassignment).
    pub fn edited(&self) -> Option<OrderTrip> {
        self.inner.edited.borrow().clone()
    }

    // ── Listing ──────────────────────────────────────────────────────

    /// Fetch the current page of all trips. Only the items and the total
    /// are taken from the answer; on failure the list is emptied.
    pub async fn fetch_all(&self) {
        let inner = &self.inner;
        let _busy = inner.list.loading_guard();
        let params = inner.list.params();
        debug!(page = params.page, "fetching trips");

        match inner.ctx.api().get_all_trips(Some(&params)).await {
            Ok(page) => {
                let (trips, info) = page.into_parts();
                inner.list.apply_items(trips, info.total);
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToLoadTrips);
                inner.list.clear_items();
            }
        }
    }

    /// Load the trips of one order. On failure the list is emptied.
    pub async fn fetch_order_trips(&self, order_id: &str) {
        let inner = &self.inner;
        let _busy = inner.list.loading_guard();

        match inner.ctx.api().get_order_trips(order_id).await {
            Ok(trips) => {
                inner.order_trips.send_replace(Arc::new(trips));
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToLoadTrips);
                inner.order_trips.send_replace(Arc::new(Vec::new()));
            }
        }
    }

    /// Trucks with remaining capacity for this order. On failure the list
    /// is emptied.
    pub async fn fetch_available_trucks(&self, order_id: &str) {
        let inner = &self.inner;
        let _busy = Busy::start(&inner.loading_trucks);

        match inner.ctx.api().get_available_trucks_for_order(order_id).await {
            Ok(trucks) => {
                inner.available_trucks.send_replace(Arc::new(trucks));
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToLoadAvailableTrucks);
                inner.available_trucks.send_replace(Arc::new(Vec::new()));
            }
        }
    }

    // ── Operations ───────────────────────────────────────────────────

    /// Create a trip for an order, then reload the order's trips.
    pub async fn create_trip(
        &self,
        order_id: &str,
        data: &CreateOrderTripData,
    ) -> Result<OrderTrip, CoreError> {
        let inner = &self.inner;
        let _busy = inner.list.mutation_guard();

        match inner.ctx.api().create_order_trip(order_id, data).await {
            Ok(trip) => {
                inner.ctx.success(MessageKey::TripCreated);
                self.fetch_order_trips(order_id).await;
                Ok(trip)
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToCreateTrip);
                Err(e.into())
            }
        }
    }

    /// Partial update, typically a truck reassignment. The trips of the
    /// trip's order are reloaded afterwards.
    pub async fn update_trip(
        &self,
        trip_id: &str,
        data: &UpdateOrderTripData,
    ) -> Result<OrderTrip, CoreError> {
        let inner = &self.inner;
        let _busy = inner.list.mutation_guard();

        match inner.ctx.api().update_trip(trip_id, data).await {
            Ok(trip) => {
                inner.ctx.success(MessageKey::TripUpdated);
                self.fetch_order_trips(&trip.order_id).await;
                Ok(trip)
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToUpdateTrip);
                Err(e.into())
            }
        }
    }

    pub async fn start_trip(&self, trip_id: &str) -> Result<OrderTrip, CoreError> {
        let inner = &self.inner;
        let _busy = inner.list.mutation_guard();

        match inner.ctx.api().start_trip(trip_id).await {
            Ok(trip) => {
                inner.ctx.success(MessageKey::TripStarted);
                self.fetch_all().await;
                Ok(trip)
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToStartTrip);
                Err(e.into())
            }
        }
    }

    pub async fn complete_trip(
        &self,
        trip_id: &str,
        data: &CompleteTripData,
    ) -> Result<(), CoreError> {
        let inner = &self.inner;
        let _busy = inner.list.mutation_guard();

        match inner.ctx.api().complete_trip(trip_id, data).await {
            Ok(_) => {
                inner.ctx.success(MessageKey::TripCompleted);
                self.fetch_all().await;
                Ok(())
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToCompleteTrip);
                Err(e.into())
            }
        }
    }

    /// Delete a trip, then reload the trip listing.
    pub async fn delete_trip(&self, trip_id: &str) -> Result<bool, CoreError> {
        let inner = &self.inner;
        let _busy = inner.list.mutation_guard();

        match inner.ctx.api().delete_trip(trip_id).await {
            Ok(()) => {
                inner.ctx.success(MessageKey::TripDeleted);
                self.fetch_all().await;
                Ok(true)
            }
            Err(e) => {
                inner.ctx.fail(&e, MessageKey::FailedToDeleteTrip);
                Err(e.into())
            }
        }
    }

    // ── View state ───────────────────────────────────────────────────

    pub fn set_edited(&self, trip: OrderTrip) {
        self.inner.edited.send_replace(Some(trip));
    }

    pub fn clear_edited(&self) {
        self.inner.edited.send_replace(None);
    }

    /// Drop every cached list and return to the first page.
    pub fn reset(&self) {
        let inner = &self.inner;
        inner.list.reset();
        inner.order_trips.send_replace(Arc::new(Vec::new()));
        inner.available_trucks.send_replace(Arc::new(Vec::new()));
    }
}

impl Pagination for TripsStore {
    type Item = OrderTrip;

    fn list(&self) -> &ListState<OrderTrip> {
        &self.inner.list
    }

    async fn fetch(&self) {
        self.fetch_all().await;
    }
}
