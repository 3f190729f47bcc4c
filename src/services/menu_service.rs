use std::sync::Arc;

use crate::api::models::{Menu, MenuQuery, MenuRequest};
use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};
use crate::types::{Page, PageQuery};

pub struct MenuService {
    gateway: Arc<Gateway>,
}

impl MenuService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, page: PageQuery, filter: &MenuQuery) -> Result<Page<Menu>, GatewayError> {
        let request = ApiRequest::get("/admin/menus").query(&page)?.query(filter)?;
        self.gateway.send(request).await
    }

    pub async fn create(&self, menu: &MenuRequest) -> Result<(), GatewayError> {
        let request = ApiRequest::post("/admin/menus").json(menu)?;
        self.gateway.send_unit(request).await
    }

    pub async fn update(&self, id: u64, menu: &MenuRequest) -> Result<(), GatewayError> {
        let request = ApiRequest::put(format!("/admin/menus/{}", id)).json(menu)?;
        self.gateway.send_unit(request).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        self.gateway
            .send_unit(ApiRequest::delete(format!("/admin/menus/{}", id)))
            .await
    }
}
