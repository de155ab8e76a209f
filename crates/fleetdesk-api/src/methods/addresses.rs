// Address endpoints

use tracing::debug;

use super::page_config;
use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{Address, AddressFormData, AddressPage, PageParams};

impl ApiClient {
    /// `GET /addresses[?page=&pageSize=]`
    pub async fn get_all_addresses(
        &self,
        params: Option<&PageParams>,
    ) -> Result<AddressPage, Error> {
        self.get("/addresses", page_config(params).as_ref()).await
    }

    /// `GET /addresses/{id}`
    pub async fn get_address_by_id(&self, id: &str) -> Result<Address, Error> {
        self.get(&format!("/addresses/{id}"), None).await
    }

    /// `POST /addresses`
    pub async fn create_address(&self, data: &AddressFormData) -> Result<Address, Error> {
        debug!(city = %data.city, "creating address");
        self.post("/addresses", Some(data), None).await
    }

    /// `PUT /addresses/{id}`
    pub async fn update_address(&self, id: &str, data: &AddressFormData) -> Result<Address, Error> {
        debug!(id, "updating address");
        self.put(&format!("/addresses/{id}"), Some(data), None).await
    }

    /// `DELETE /addresses/{id}`
    pub async fn delete_address(&self, id: &str) -> Result<(), Error> {
        debug!(id, "deleting address");
        let _: Option<serde_json::Value> = self.delete(&format!("/addresses/{id}"), None).await?;
        Ok(())
    }
}
