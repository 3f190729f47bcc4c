use std::sync::Arc;

use crate::api::models::{PermissionList, Role, RolePermissionsUpdate, RoleQuery, RoleRequest};
use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};
use crate::types::{Page, PageQuery};

/// Role administration and role permission grants (`/admin/roles`).
pub struct RoleService {
    gateway: Arc<Gateway>,
}

impl RoleService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    pub async fn list(&self, page: PageQuery, filter: &RoleQuery) -> Result<Page<Role>, GatewayError> {
        let request = ApiRequest::get("/admin/roles").query(&page)?.query(filter)?;
        self.gateway.send(request).await
    }

    pub async fn create(&self, role: &RoleRequest) -> Result<(), GatewayError> {
        let request = ApiRequest::post("/admin/roles").json(role)?;
        self.gateway.send_unit(request).await
    }

    pub async fn update(&self, id: u64, role: &RoleRequest) -> Result<(), GatewayError> {
        let request = ApiRequest::put(format!("/admin/roles/{}", id)).json(role)?;
        self.gateway.send_unit(request).await
    }

    pub async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        self.gateway
            .send_unit(ApiRequest::delete(format!("/admin/roles/{}", id)))
            .await
    }

    /// Permission strings (`"path,method"`) granted to a casbin role.
    pub async fn permissions(&self, casbin_role: &str) -> Result<PermissionList, GatewayError> {
        let request = ApiRequest::get("/admin/roles/permissions").param("role", casbin_role);
        self.gateway.send(request).await
    }

    /// Replace the role's permission set.
    pub async fn set_permissions(&self, casbin_role: &str, permissions: Vec<String>) -> Result<(), GatewayError> {
        let body = RolePermissionsUpdate {
            role: casbin_role.to_string(),
            list: permissions,
        };
        let request = ApiRequest::put("/admin/roles/permissions").json(&body)?;
        self.gateway.send_unit(request).await
    }
}
