use serde::{Deserialize, Serialize};

use crate::types::null_as_empty;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub casbin_role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleRequest {
    pub name: String,
    pub casbin_role: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleQuery {
    /// Fuzzy match on the display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Exact match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub casbin_role: Option<String>,
}

/// Permission strings granted to a role, e.g. `"/v1/admin/users,GET"`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PermissionList {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub list: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RolePermissionsUpdate {
    pub role: String,
    pub list: Vec<String>,
}
