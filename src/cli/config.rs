use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::FileTokenStore;
use crate::cli::notify::TerminalNotifier;
use crate::config::config;
use crate::gateway::Gateway;

const SERVER_FILE: &str = "server.json";

/// The backend this CLI talks to, as saved by `radmin server set`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub url: String,
    #[serde(default)]
    pub description: String,
    pub added_at: DateTime<Utc>,
    pub last_ping: Option<DateTime<Utc>>,
    pub status: ServerStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Up,
    Down,
    Unknown,
}

impl ServerInfo {
    pub fn new(url: String, description: String) -> Self {
        Self {
            url,
            description,
            added_at: Utc::now(),
            last_ping: None,
            status: ServerStatus::Unknown,
        }
    }

    pub fn update_ping(&mut self, status: ServerStatus) {
        self.last_ping = Some(Utc::now());
        self.status = status;
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = match &config().session.config_dir {
        Some(custom_dir) => custom_dir.clone(),
        None => {
            let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
            PathBuf::from(home).join(".config").join("radmin")
        }
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_server_info() -> anyhow::Result<Option<ServerInfo>> {
    let server_file = get_config_dir()?.join(SERVER_FILE);

    if !server_file.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(server_file)?;
    Ok(Some(serde_json::from_str(&content)?))
}

pub fn save_server_info(info: &ServerInfo) -> anyhow::Result<()> {
    let server_file = get_config_dir()?.join(SERVER_FILE);

    let content = serde_json::to_string_pretty(info)?;
    fs::write(server_file, content)?;
    Ok(())
}

/// `--server` wins, then the saved server, then the environment's default.
pub fn resolve_server_url(server_override: Option<&str>) -> anyhow::Result<String> {
    if let Some(url) = server_override {
        return Ok(url.trim_end_matches('/').to_string());
    }
    if let Some(info) = load_server_info()? {
        return Ok(info.url);
    }
    Ok(config().api.base_url.clone())
}

/// Gateway backed by the on-disk session and printing notices to the terminal.
pub fn open_gateway(server_override: Option<&str>) -> anyhow::Result<Arc<Gateway>> {
    let base_url = resolve_server_url(server_override)?;
    let store = FileTokenStore::in_dir(&get_config_dir()?);
    let terminal = Arc::new(TerminalNotifier);

    let gateway = Gateway::builder(config().gateway(Some(base_url.as_str())))
        .token_store(Arc::new(store))
        .notifier(terminal.clone())
        .navigator(terminal)
        .build()?;

    tracing::debug!(base_url = %base_url, "gateway ready");
    Ok(Arc::new(gateway))
}

pub async fn ping_server(url: &str) -> ServerStatus {
    let client = reqwest::Client::new();
    let url = format!("{}/healthz", url.trim_end_matches('/'));

    match client.get(&url).timeout(std::time::Duration::from_secs(5)).send().await {
        Ok(response) if response.status().is_success() => ServerStatus::Up,
        _ => ServerStatus::Down,
    }
}
