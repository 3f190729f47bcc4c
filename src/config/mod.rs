use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub prefix: String,
    pub request_timeout_secs: u64,
    pub refresh_timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub login_path: String,
    pub config_dir: Option<PathBuf>,
}

/// Everything a [`crate::gateway::Gateway`] needs, detached from the global
/// singleton so tests can build isolated instances.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub prefix: String,
    pub request_timeout: Duration,
    pub refresh_timeout: Duration,
    pub login_path: String,
    pub user_agent: String,
}

impl GatewayConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            prefix: "/v1".to_string(),
            request_timeout: Duration::from_secs(30),
            refresh_timeout: Duration::from_secs(15),
            login_path: "/user/login".to_string(),
            user_agent: default_user_agent(),
        }
    }

    pub fn with_refresh_timeout(mut self, timeout: Duration) -> Self {
        self.refresh_timeout = timeout;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

fn default_user_agent() -> String {
    format!("radmin/{}", env!("CARGO_PKG_VERSION"))
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Presets first, then individual env vars win
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("RADMIN_API_URL") {
            self.api.base_url = v.trim_end_matches('/').to_string();
        }
        if let Ok(v) = env::var("RADMIN_API_PREFIX") {
            self.api.prefix = v;
        }
        if let Ok(v) = env::var("RADMIN_REQUEST_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }
        if let Ok(v) = env::var("RADMIN_REFRESH_TIMEOUT_SECS") {
            self.api.refresh_timeout_secs = v.parse().unwrap_or(self.api.refresh_timeout_secs);
        }

        if let Ok(v) = env::var("RADMIN_LOGIN_PATH") {
            self.session.login_path = v;
        }
        if let Ok(v) = env::var("RADMIN_CONFIG_DIR") {
            self.session.config_dir = Some(PathBuf::from(v));
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://127.0.0.1:8000".to_string(),
                prefix: "/v1".to_string(),
                request_timeout_secs: 30,
                refresh_timeout_secs: 15,
                user_agent: default_user_agent(),
            },
            session: SessionConfig {
                login_path: "/user/login".to_string(),
                config_dir: None,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.example.com".to_string(),
                prefix: "/v1".to_string(),
                request_timeout_secs: 20,
                refresh_timeout_secs: 10,
                user_agent: default_user_agent(),
            },
            session: SessionConfig {
                login_path: "/user/login".to_string(),
                config_dir: None,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://app.example.com".to_string(),
                prefix: "/v1".to_string(),
                request_timeout_secs: 15,
                refresh_timeout_secs: 10,
                user_agent: default_user_agent(),
            },
            session: SessionConfig {
                login_path: "/user/login".to_string(),
                config_dir: None,
            },
        }
    }

    /// Gateway settings for this environment, optionally pointed at another server.
    pub fn gateway(&self, base_url_override: Option<&str>) -> GatewayConfig {
        let base_url = base_url_override.unwrap_or(&self.api.base_url);
        GatewayConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            prefix: self.api.prefix.clone(),
            request_timeout: Duration::from_secs(self.api.request_timeout_secs),
            refresh_timeout: Duration::from_secs(self.api.refresh_timeout_secs),
            login_path: self.session.login_path.clone(),
            user_agent: self.api.user_agent.clone(),
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}
