use serde::{Deserialize, Serialize};

use super::role::Role;
use crate::types::null_as_empty;

/// Account state as the backend encodes it: 0 pending, 1 active, 2 disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum UserStatus {
    Pending,
    Active,
    Disabled,
    Other(i64),
}

impl From<i64> for UserStatus {
    fn from(value: i64) -> Self {
        match value {
            0 => UserStatus::Pending,
            1 => UserStatus::Active,
            2 => UserStatus::Disabled,
            other => UserStatus::Other(other),
        }
    }
}

impl From<UserStatus> for i64 {
    fn from(value: UserStatus) -> Self {
        match value {
            UserStatus::Pending => 0,
            UserStatus::Active => 1,
            UserStatus::Disabled => 2,
            UserStatus::Other(other) => other,
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserStatus::Pending => write!(f, "pending"),
            UserStatus::Active => write!(f, "active"),
            UserStatus::Disabled => write!(f, "disabled"),
            UserStatus::Other(code) => write!(f, "status-{}", code),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "userid", default)]
    pub id: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    // omitempty on the server drops 0, so absence means pending
    #[serde(default = "pending")]
    pub status: UserStatus,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub roles: Vec<Role>,
}

fn pending() -> UserStatus {
    UserStatus::Pending
}

/// Body for creating/updating users and the own profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub theme: String,
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nickname: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_decodes_backend_shape() {
        let user: User = serde_json::from_value(json!({
            "userid": 7,
            "email": "zhangsan@example.com",
            "username": "zhangsan",
            "status": 1,
            "roles": [{"id": 1, "name": "Admin", "casbinRole": "admin"}]
        }))
        .unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.roles[0].casbin_role, "admin");
    }

    #[test]
    fn omitted_status_and_roles_default() {
        let user: User = serde_json::from_value(json!({"username": "lisi", "roles": null})).unwrap();
        assert_eq!(user.status, UserStatus::Pending);
        assert!(user.roles.is_empty());
    }
}
