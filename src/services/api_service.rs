use std::sync::Arc;

use crate::api::models::{ApiEntry, ApiEntryQuery, ApiEntryRequest};
use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};
use crate::types::{Page, PageQuery};

/// Registered backend routes (`/admin/apis`).
pub struct ApiService {
    gateway: Arc<Gateway>,
}

impl ApiService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, page: PageQuery, filter: &ApiEntryQuery) -> Result<Page<ApiEntry>, GatewayError> {
        let request = ApiRequest::get("/admin/apis").query(&page)?.query(filter)?;
        self.gateway.send(request).await
    }

    pub async fn create(&self, entry: &ApiEntryRequest) -> Result<(), GatewayError> {
        let request = ApiRequest::post("/admin/apis").json(entry)?;
        self.gateway.send_unit(request).await
    }

    pub async fn update(&self, id: u64, entry: &ApiEntryRequest) -> Result<(), GatewayError> {
        let request = ApiRequest::put(format!("/admin/apis/{}", id)).json(entry)?;
        self.gateway.send_unit(request).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        self.gateway
            .send_unit(ApiRequest::delete(format!("/admin/apis/{}", id)))
            .await
    }
}
