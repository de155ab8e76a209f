// Trip endpoints
//
// Two families: the general `/trips` listing with its lifecycle actions,
// and the order-scoped `/orders/{id}/trips` sub-resource used while
// planning deliveries.

use tracing::debug;

use super::page_config;
use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{
    CompleteTripData, CreateOrderTripData, OrderTrip, PageParams, TripPage, Truck,
    UpdateOrderTripData,
};

impl ApiClient {
    // ── General listing ──────────────────────────────────────────────

    /// `GET /trips[?page=&pageSize=]`
    pub async fn get_all_trips(&self, params: Option<&PageParams>) -> Result<TripPage, Error> {
        self.get("/trips", page_config(params).as_ref()).await
    }

    /// Partial update; also used to (re)assign a truck.
    ///
    /// `PUT /trips/{id}`
    pub async fn update_trip(
        &self,
        id: &str,
        data: &UpdateOrderTripData,
    ) -> Result<OrderTrip, Error> {
        debug!(id, "updating trip");
        self.put(&format!("/trips/{id}"), Some(data), None).await
    }

    /// `PATCH /trips/{id}/start` (no body)
    pub async fn start_trip(&self, id: &str) -> Result<OrderTrip, Error> {
        debug!(id, "starting trip");
        self.patch::<_, ()>(&format!("/trips/{id}/start"), None, None).await
    }

    /// Record actual fuel and duration and close the trip.
    ///
    /// `PATCH /trips/{id}/complete` with `{"actualFuel", "actualDuration"}`
    pub async fn complete_trip(
        &self,
        id: &str,
        data: &CompleteTripData,
    ) -> Result<OrderTrip, Error> {
        debug!(id, "completing trip");
        self.patch(&format!("/trips/{id}/complete"), Some(data), None).await
    }

    /// `DELETE /trips/{id}`
    pub async fn delete_trip(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting trip");
        let _: Option<serde_json::Value> = self.delete(&format!("/trips/{id}"), None).await?;
        Ok(())
    }

    // ── Order-scoped ─────────────────────────────────────────────────

    /// `GET /orders/{order_id}/trips`
    pub async fn get_order_trips(&self, order_id: &str) -> Result<Vec<OrderTrip>, Error> {
        self.get(&format!("/orders/{order_id}/trips"), None).await
    }

    /// `POST /orders/{order_id}/trips`
    pub async fn create_order_trip(
        &self,
        order_id: &str,
        data: &CreateOrderTripData,
    ) -> Result<OrderTrip, Error> {
        debug!(order_id, truck_id = %data.truck_id, "creating trip");
        self.post(&format!("/orders/{order_id}/trips"), Some(data), None).await
    }

    /// Trucks that still have capacity for this order.
    ///
    /// `GET /orders/{order_id}/available-trucks`
    pub async fn get_available_trucks_for_order(
        &self,
        order_id: &str,
    ) -> Result<Vec<Truck>, Error> {
        self.get(&format!("/orders/{order_id}/available-trucks"), None).await
    }
}
