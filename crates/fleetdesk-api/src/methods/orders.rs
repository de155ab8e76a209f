// Order endpoints
//
// Orders are never deleted from the console; cancellation is a status
// transition with its own endpoint.

use tracing::debug;

use super::page_config;
use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Order, OrderFormData, OrderPage, PageParams};

impl ApiClient {
    /// `GET /orders[?page=&pageSize=]`
    pub async fn get_all_orders(&self, params: Option<&PageParams>) -> Result<OrderPage, Error> {
        self.get("/orders", page_config(params).as_ref()).await
    }

    /// `GET /orders/{id}`
    pub async fn get_order_by_id(&self, id: &str) -> Result<Order, Error> {
        self.get(&format!("/orders/{id}"), None).await
    }

    /// `POST /orders`
    pub async fn create_order(&self, data: &OrderFormData) -> Result<Order, Error> {
        debug!(destination = %data.destination, "creating order");
        self.post("/orders", Some(data), None).await
    }

    /// `PUT /orders/{id}`
    pub async fn update_order(&self, id: &str, data: &OrderFormData) -> Result<Order, Error> {
        debug!(id, "updating order");
        self.put(&format!("/orders/{id}"), Some(data), None).await
    }

    /// Move an order to `cancelled`.
    ///
    /// `PATCH /orders/{id}/cancel` (no body)
    pub async fn cancel_order(&self, id: &str) -> Result<Order, Error> {
        debug!(id, "cancelling order");
        self.patch::<_, ()>(&format!("/orders/{id}/cancel"), None, None)
            .await
    }
}
