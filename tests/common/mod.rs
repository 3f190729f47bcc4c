#![allow(dead_code)]

use std::sync::{Arc, Once};
use std::time::Duration;

use anyhow::Result;
use serde_json::{json, Value};
use wiremock::MockServer;
use wiremock::ResponseTemplate;

use robot_admin::auth::{MemoryTokenStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
use robot_admin::config::GatewayConfig;
use robot_admin::gateway::{Gateway, RecordingNotifier};

static TRACING: Once = Once::new();

/// A gateway wired to a fake backend, with in-memory tokens and recorded notices.
pub struct Harness {
    pub server: MockServer,
    pub gateway: Arc<Gateway>,
    pub store: Arc<MemoryTokenStore>,
    pub recorder: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn access_token(&self) -> Option<String> {
        self.store.snapshot().get(ACCESS_TOKEN_KEY).cloned()
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.snapshot().get(REFRESH_TOKEN_KEY).cloned()
    }
}

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Harness logged in as `A1` / `R1`.
pub async fn logged_in() -> Result<Harness> {
    harness(&[(ACCESS_TOKEN_KEY, "A1"), (REFRESH_TOKEN_KEY, "R1")], |c| c).await
}

pub async fn harness(
    entries: &[(&str, &str)],
    configure: impl FnOnce(GatewayConfig) -> GatewayConfig,
) -> Result<Harness> {
    init_tracing();

    let server = MockServer::start().await;
    let store = Arc::new(MemoryTokenStore::with_entries(entries));
    let recorder = Arc::new(RecordingNotifier::new());

    let config = configure(GatewayConfig::new(server.uri()).with_refresh_timeout(Duration::from_secs(2)));
    let gateway = Gateway::builder(config)
        .token_store(store.clone())
        .notifier(recorder.clone())
        .navigator(recorder.clone())
        .build()?;

    Ok(Harness {
        server,
        gateway: Arc::new(gateway),
        store,
        recorder,
    })
}

/// `200` with a successful envelope around `data`.
pub fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "data": data,
    }))
}

/// A failed envelope sent with the HTTP status the backend pairs with `code`.
pub fn fail(status: u16, code: i64, message: &str, show_type: Option<i64>) -> ResponseTemplate {
    let mut body = json!({
        "success": false,
        "data": {},
        "errorCode": code,
        "errorMessage": message,
    });
    if let Some(show_type) = show_type {
        body["errorShowType"] = json!(show_type);
    }
    ResponseTemplate::new(status).set_body_json(body)
}

pub fn unauthorized() -> ResponseTemplate {
    fail(401, 401, "Unauthorized", Some(2))
}

pub fn token_pair(access: &str, refresh: &str) -> Value {
    json!({
        "accessToken": access,
        "refreshToken": refresh,
        "expiresIn": 900,
    })
}
