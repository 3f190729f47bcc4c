//! Authenticated request gateway.
//!
//! Every backend call goes through [`Gateway`]: it attaches the persisted
//! bearer token, unwraps the response envelope, renews an expired access token
//! exactly once no matter how many requests notice the expiry together, and
//! turns server-reported failures into a single user notice each.

pub mod notify;
pub mod policy;
pub mod refresh;

use std::sync::Arc;

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::api::models::{RefreshTokenRequest, TokenPair};
use crate::api::{BizError, Envelope};
use crate::auth::{MemoryTokenStore, SessionTokens, TokenStore};
use crate::config::GatewayConfig;
use crate::error::{GatewayError, RefreshFailure};

pub use notify::{LogNotifier, Navigator, Notice, NoticeLevel, Notifier, RecordingNotifier};
pub use policy::Disposition;
use refresh::{RefreshCoordinator, RefreshOutcome, Ticket};

pub const REFRESH_PATH: &str = "/refresh-token";

/// One backend call, kept around so it can be replayed after a token refresh.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    method: Method,
    path: String,
    query: Vec<(String, String)>,
    body: Option<Value>,
    skip_error_handler: bool,
    refresh_on_unauthorized: bool,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            skip_error_handler: false,
            refresh_on_unauthorized: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Append every non-null field of `query` as a query parameter.
    pub fn query<Q: Serialize>(mut self, query: &Q) -> Result<Self, GatewayError> {
        let value = serde_json::to_value(query).map_err(|e| GatewayError::Encode(e.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(GatewayError::Encode("query parameters must serialize to an object".into()));
        };

        for (key, value) in fields {
            match value {
                Value::Null => {}
                Value::String(s) => self.query.push((key, s)),
                other => self.query.push((key, other.to_string())),
            }
        }
        Ok(self)
    }

    pub fn json<B: Serialize>(self, body: &B) -> Result<Self, GatewayError> {
        let value = serde_json::to_value(body).map_err(|e| GatewayError::Encode(e.to_string()))?;
        Ok(self.body(value))
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Hand every failure back untouched: no notice, no refresh.
    pub fn skip_error_handler(mut self) -> Self {
        self.skip_error_handler = true;
        self
    }

    /// For the session endpoints themselves: a 401 there means bad
    /// credentials, not an expired access token.
    pub fn without_refresh(mut self) -> Self {
        self.refresh_on_unauthorized = false;
        self
    }

    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Add `Authorization: Bearer <token>` when a token is present.
pub fn authorize(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

pub struct Gateway {
    http: reqwest::Client,
    config: GatewayConfig,
    session: SessionTokens,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    refresh: RefreshCoordinator,
}

pub struct GatewayBuilder {
    config: GatewayConfig,
    store: Option<Arc<dyn TokenStore>>,
    notifier: Option<Arc<dyn Notifier>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl GatewayBuilder {
    pub fn token_store(mut self, store: Arc<dyn TokenStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn build(self) -> Result<Gateway, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(self.config.request_timeout)
            .user_agent(self.config.user_agent.clone())
            .build()?;

        let store = self
            .store
            .unwrap_or_else(|| Arc::new(MemoryTokenStore::new()));

        Ok(Gateway {
            http,
            config: self.config,
            session: SessionTokens::new(store),
            notifier: self.notifier.unwrap_or_else(|| Arc::new(LogNotifier)),
            navigator: self.navigator.unwrap_or_else(|| Arc::new(LogNotifier)),
            refresh: RefreshCoordinator::new(),
        })
    }
}

impl Gateway {
    pub fn builder(config: GatewayConfig) -> GatewayBuilder {
        GatewayBuilder {
            config,
            store: None,
            notifier: None,
            navigator: None,
        }
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.config.base_url, self.config.prefix, path)
    }

    /// Run a request and decode its `data` as `T`.
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, GatewayError> {
        let data = self.execute(&request).await?;
        serde_json::from_value(data).map_err(|e| GatewayError::Decode(e.to_string()))
    }

    /// Run a request whose `data` carries nothing of interest.
    pub async fn send_unit(&self, request: ApiRequest) -> Result<(), GatewayError> {
        self.execute(&request).await.map(|_| ())
    }

    /// Run a request through the full interceptor chain and return raw `data`.
    ///
    /// Failing to read the stored token is returned as an unreported
    /// [`GatewayError::Storage`]; surfacing it is up to the caller.
    pub async fn execute(&self, request: &ApiRequest) -> Result<Value, GatewayError> {
        let token = self.session.access_token().await?;
        let err = match self.dispatch(request, token.as_deref()).await {
            Ok(data) => return Ok(data),
            Err(err) => err,
        };

        if request.skip_error_handler {
            return Err(err);
        }

        if request.refresh_on_unauthorized && err.is_unauthorized() {
            return self.recover(request, token.as_deref()).await;
        }

        Err(self.report(err))
    }

    /// Send once with the given token and unwrap the envelope. No retries, no notices.
    async fn dispatch(&self, request: &ApiRequest, token: Option<&str>) -> Result<Value, GatewayError> {
        let request_id = Uuid::new_v4();
        let mut builder = self
            .http
            .request(request.method.clone(), self.url(&request.path))
            .header("X-Request-Id", request_id.to_string());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        builder = authorize(builder, token);

        tracing::debug!(%request_id, method = %request.method, path = %request.path, "dispatching request");
        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        tracing::debug!(%request_id, status = status.as_u16(), "response received");

        match serde_json::from_slice::<Envelope>(&bytes) {
            Ok(envelope) => {
                let fallback = if status.is_success() { 0 } else { i64::from(status.as_u16()) };
                envelope.into_result(fallback).map_err(GatewayError::Business)
            }
            Err(_) if status == reqwest::StatusCode::UNAUTHORIZED => Err(GatewayError::Business(BizError {
                code: 401,
                message: "Unauthorized".to_string(),
                show_type: None,
                data: Value::Null,
            })),
            Err(_) if !status.is_success() => Err(GatewayError::HttpStatus {
                status: status.as_u16(),
            }),
            Err(e) => Err(GatewayError::Decode(e.to_string())),
        }
    }

    /// Get a fresh access token, then replay `request` with it.
    ///
    /// `sent` is the token the rejected attempt carried. If the stored token
    /// has moved on since, a refresh already finished and the request only
    /// needs replaying.
    async fn recover(&self, request: &ApiRequest, sent: Option<&str>) -> Result<Value, GatewayError> {
        let stored = self.session.access_token().await?;
        let token = match stored {
            Some(stored) if sent != Some(stored.as_str()) => {
                tracing::debug!(path = %request.path, "401 for a superseded token, skipping refresh");
                stored
            }
            _ => self.refreshed_token().await?,
        };
        tracing::debug!(method = %request.method, path = %request.path, "replaying request with refreshed token");
        self.dispatch(request, Some(&token))
            .await
            .map_err(|err| self.report(err))
    }

    /// Join the current refresh cycle, leading it if none is in flight.
    async fn refreshed_token(&self) -> Result<String, GatewayError> {
        match self.refresh.join() {
            Ticket::Leader(lease) => {
                let outcome = self.renew().await;
                if outcome.is_err() {
                    self.discard_credentials().await;
                }
                let released = lease.settle(&outcome);

                match outcome {
                    Ok(token) => {
                        tracing::info!(released, "access token refreshed");
                        Ok(token)
                    }
                    Err(failure) => {
                        tracing::warn!(%failure, released, "token refresh failed, signing out");
                        self.navigator.redirect(&self.config.login_path);
                        Err(GatewayError::SessionExpired(failure).reported())
                    }
                }
            }
            Ticket::Follower(rx) => match refresh::wait(rx).await {
                Ok(token) => Ok(token),
                // Leader went away without redirecting anyone
                Err(RefreshFailure::Abandoned) => Err(GatewayError::SessionExpired(RefreshFailure::Abandoned)),
                Err(failure) => Err(GatewayError::SessionExpired(failure).reported()),
            },
        }
    }

    /// Exchange the refresh token for a new pair and persist it.
    ///
    /// A timed-out call is dropped, not cancelled server-side. If the backend
    /// still completes it, the refresh token rotates there after the client has
    /// signed out; the next login issues a fresh family anyway.
    async fn renew(&self) -> RefreshOutcome {
        let refresh_token = match self.session.refresh_token().await {
            Ok(Some(token)) => token,
            Ok(None) => return Err(RefreshFailure::MissingRefreshToken),
            Err(e) => return Err(RefreshFailure::Storage(e.to_string())),
        };
        let current = self.session.access_token().await.ok().flatten();

        let request = ApiRequest::post(REFRESH_PATH)
            .json(&RefreshTokenRequest { refresh_token })
            .map_err(|e| RefreshFailure::Transport(e.to_string()))?;
        let call = self.dispatch(&request, current.as_deref());

        let data = match tokio::time::timeout(self.config.refresh_timeout, call).await {
            Err(_) => return Err(RefreshFailure::TimedOut(self.config.refresh_timeout)),
            Ok(Err(GatewayError::Business(biz))) => {
                let message = if biz.message.is_empty() {
                    "failed to refresh access token".to_string()
                } else {
                    biz.message
                };
                return Err(RefreshFailure::Rejected(message));
            }
            Ok(Err(other)) => return Err(RefreshFailure::Transport(other.to_string())),
            Ok(Ok(data)) => data,
        };

        let pair: TokenPair = serde_json::from_value(data)
            .map_err(|e| RefreshFailure::Rejected(format!("malformed token pair: {}", e)))?;
        if pair.access_token.is_empty() {
            return Err(RefreshFailure::Rejected("server returned an empty access token".into()));
        }

        self.session
            .save(&pair)
            .await
            .map_err(|e| RefreshFailure::Storage(e.to_string()))?;
        Ok(pair.access_token)
    }

    async fn discard_credentials(&self) {
        if let Err(e) = self.session.clear().await {
            tracing::error!(error = %e, "failed to clear stored credentials");
        }
    }

    /// Tell the user about `err` according to policy and mark it reported.
    fn report(&self, err: GatewayError) -> GatewayError {
        match &err {
            GatewayError::Business(biz) => match policy::classify(biz) {
                Disposition::Notify(notice) => self.notifier.notify(notice),
                Disposition::Silent => {
                    tracing::debug!(code = biz.code, message = %biz.message, "silent business error");
                }
                Disposition::Redirect => {
                    tracing::debug!(code = biz.code, "server requested a redirect, leaving it to the caller");
                    return err;
                }
                Disposition::Refresh => {
                    // A 401 that may not (or may no longer) trigger a refresh
                    let notice = Notice::error("Unauthorized").with_description(if biz.message.is_empty() {
                        "Please sign in again".to_string()
                    } else {
                        biz.message.clone()
                    });
                    self.notifier.notify(notice);
                }
            },
            other => match policy::notice_for(other) {
                Some(notice) => self.notifier.notify(notice),
                None => return err,
            },
        }
        err.reported()
    }

    /// Run the refresh protocol on demand, sharing any cycle already in flight.
    pub async fn refresh_now(&self) -> Result<String, GatewayError> {
        self.refreshed_token().await
    }

    /// Persist credentials from a successful login.
    pub async fn establish_session(&self, pair: &TokenPair) -> Result<(), GatewayError> {
        self.session.save(pair).await?;
        tracing::info!("session established");
        Ok(())
    }

    /// Forget the stored credentials (explicit logout).
    pub async fn end_session(&self) -> Result<(), GatewayError> {
        self.session.clear().await?;
        tracing::info!("session ended");
        Ok(())
    }

    pub async fn access_token(&self) -> Result<Option<String>, GatewayError> {
        Ok(self.session.access_token().await?)
    }

    pub async fn has_refresh_token(&self) -> Result<bool, GatewayError> {
        Ok(self.session.refresh_token().await?.is_some())
    }

    pub fn is_refreshing(&self) -> bool {
        self.refresh.is_refreshing()
    }

    pub fn pending_requests(&self) -> usize {
        self.refresh.pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Filter {
        page: u32,
        page_size: u32,
        name: Option<String>,
        enabled: bool,
    }

    #[test]
    fn query_flattens_scalars_and_skips_nulls() {
        let request = ApiRequest::get("/robots")
            .query(&Filter {
                page: 2,
                page_size: 20,
                name: None,
                enabled: true,
            })
            .unwrap();

        assert!(request.query.contains(&("page".to_string(), "2".to_string())));
        assert!(request.query.contains(&("pageSize".to_string(), "20".to_string())));
        assert!(request.query.contains(&("enabled".to_string(), "true".to_string())));
        assert!(!request.query.iter().any(|(k, _)| k == "name"));
    }

    #[test]
    fn non_object_query_is_rejected() {
        let err = ApiRequest::get("/robots").query(&vec![1, 2]).unwrap_err();
        assert!(matches!(err, GatewayError::Encode(_)));
    }

    #[test]
    fn url_joins_base_prefix_and_path() {
        let gateway = Gateway::builder(GatewayConfig::new("http://localhost:8000"))
            .build()
            .unwrap();
        assert_eq!(gateway.url("/admin/users"), "http://localhost:8000/v1/admin/users");
        assert!(!gateway.is_refreshing());
    }
}
