use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Robot {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    /// Where the robot posts notifications.
    #[serde(default)]
    pub webhook: Option<String>,
    /// Where the platform calls back into the robot.
    #[serde(default)]
    pub callback: Option<String>,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub owner: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RobotRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub webhook: String,
    #[serde(default)]
    pub callback: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub owner: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RobotQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    /// Exact match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}
