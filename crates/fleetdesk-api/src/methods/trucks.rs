// Truck endpoints

use tracing::debug;

use super::page_config;
use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{PageParams, Truck, TruckFormData, TruckPage};

impl ApiClient {
    /// `GET /trucks[?page=&pageSize=]`
    pub async fn get_all_trucks(&self, params: Option<&PageParams>) -> Result<TruckPage, Error> {
        self.get("/trucks", page_config(params).as_ref()).await
    }

    /// `GET /trucks/{id}`
    pub async fn get_truck_by_id(&self, id: &str) -> Result<Truck, Error> {
        self.get(&format!("/trucks/{id}"), None).await
    }

    /// `POST /trucks`
    ///
    /// Dimension fields are sent exactly as entered.
    pub async fn create_truck(&self, data: &TruckFormData) -> Result<Truck, Error> {
        debug!(plate = %data.plate_number, "creating truck");
        self.post("/trucks", Some(data), None).await
    }

    /// `PUT /trucks/{id}`
    pub async fn update_truck(&self, id: &str, data: &TruckFormData) -> Result<Truck, Error> {
        debug!(id, "updating truck");
        self.put(&format!("/trucks/{id}"), Some(data), None).await
    }

    /// `DELETE /trucks/{id}`
    pub async fn delete_truck(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting truck");
        let _: Option<serde_json::Value> = self.delete(&format!("/trucks/{id}"), None).await?;
        Ok(())
    }
}
