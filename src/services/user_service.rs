use std::sync::Arc;

use crate::api::models::{User, UserQuery, UserRequest};
use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};
use crate::types::{Page, PageQuery};

/// User administration (`/admin/users`).
pub struct UserService {
    gateway: Arc<Gateway>,
}

impl UserService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, page: PageQuery, filter: &UserQuery) -> Result<Page<User>, GatewayError> {
        let request = ApiRequest::get("/admin/users").query(&page)?.query(filter)?;
        self.gateway.send(request).await
    }

    pub async fn create(&self, user: &UserRequest) -> Result<(), GatewayError> {
        let request = ApiRequest::post("/admin/users").json(user)?;
        self.gateway.send_unit(request).await
    }

    pub async fn update(&self, id: u64, user: &UserRequest) -> Result<(), GatewayError> {
        let request = ApiRequest::put(format!("/admin/users/{}", id)).json(user)?;
        self.gateway.send_unit(request).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        self.gateway
            .send_unit(ApiRequest::delete(format!("/admin/users/{}", id)))
            .await
    }
}
