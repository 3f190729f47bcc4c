use serde::{Deserialize, Serialize};

/// A registered backend route, used when granting role permissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEntry {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub method: String,
}

impl ApiEntry {
    /// The permission string the backend's policy store uses for this route.
    pub fn permission(&self) -> String {
        format!("{},{}", self.path, self.method)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiEntryRequest {
    #[serde(default)]
    pub group: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub method: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ApiEntryQuery {
    /// Exact match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Exact match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}
