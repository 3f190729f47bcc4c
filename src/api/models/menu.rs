use serde::{Deserialize, Serialize};

use crate::types::null_as_empty;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub parent_id: u64,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub component: Option<String>,
    #[serde(default)]
    pub access: Option<String>,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub hide_children_in_menu: bool,
    #[serde(default)]
    pub hide_in_menu: bool,
    #[serde(default)]
    pub flat_menu: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub tooltip: Option<String>,
    #[serde(default)]
    pub disabled_tooltip: bool,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub parent_keys: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRequest {
    #[serde(default)]
    pub parent_id: u64,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub access: String,
    #[serde(default)]
    pub locale: String,
    #[serde(default)]
    pub redirect: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub hide_children_in_menu: bool,
    #[serde(default)]
    pub hide_in_menu: bool,
    #[serde(default)]
    pub flat_menu: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub tooltip: String,
    #[serde(default)]
    pub disabled_tooltip: bool,
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub parent_keys: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access: Option<String>,
}

/// A menu entry with its children, as served for the current user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuNode {
    #[serde(flatten)]
    pub menu: Menu,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// `parentKeys` arrives comma-joined.
    pub fn parent_keys(&self) -> Vec<&str> {
        self.menu
            .parent_keys
            .as_deref()
            .map(|keys| keys.split(',').filter(|k| !k.is_empty()).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DynamicMenu {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub list: Vec<MenuNode>,
}
