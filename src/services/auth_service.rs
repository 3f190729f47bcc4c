use std::sync::Arc;

use crate::api::models::{
    DynamicMenu, LoginRequest, RegisterRequest, ResetPasswordRequest, TokenPair,
    UpdatePasswordRequest, User, UserRequest,
};
use crate::error::GatewayError;
use crate::gateway::{ApiRequest, Gateway};

/// Session lifecycle and the signed-in user's own account.
pub struct AuthService {
    gateway: Arc<Gateway>,
}

impl AuthService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Exchange credentials for a token pair and persist it.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, GatewayError> {
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let request = ApiRequest::post("/login").json(&body)?.without_refresh();
        let pair: TokenPair = self.gateway.send(request).await?;

        self.gateway.establish_session(&pair).await?;
        tracing::info!(username, "logged in");
        Ok(pair)
    }

    pub async fn logout(&self) -> Result<(), GatewayError> {
        self.gateway.end_session().await
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<(), GatewayError> {
        let body = RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let request = ApiRequest::post("/register").json(&body)?.without_refresh();
        self.gateway.send_unit(request).await
    }

    pub async fn reset_password(&self, email: &str) -> Result<(), GatewayError> {
        let body = ResetPasswordRequest {
            email: email.to_string(),
        };
        let request = ApiRequest::post("/reset-password").json(&body)?.without_refresh();
        self.gateway.send_unit(request).await
    }

    /// Renew the access token now instead of waiting for a 401.
    pub async fn refresh(&self) -> Result<String, GatewayError> {
        self.gateway.refresh_now().await
    }

    pub async fn profile(&self) -> Result<User, GatewayError> {
        self.gateway.send(ApiRequest::get("/users/profile")).await
    }

    /// Like [`profile`](Self::profile) but silent on failure, for checking whether a session is alive.
    pub async fn quiet_profile(&self) -> Result<User, GatewayError> {
        self.gateway
            .send(ApiRequest::get("/users/profile").skip_error_handler())
            .await
    }

    pub async fn update_profile(&self, profile: &UserRequest) -> Result<(), GatewayError> {
        let request = ApiRequest::put("/users/profile").json(profile)?;
        self.gateway.send_unit(request).await
    }

    pub async fn update_password(&self, old_password: &str, new_password: &str) -> Result<(), GatewayError> {
        let body = UpdatePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        let request = ApiRequest::put("/users/password").json(&body)?;
        self.gateway.send_unit(request).await
    }

    /// Menu tree visible to the current user.
    pub async fn menu(&self) -> Result<DynamicMenu, GatewayError> {
        self.gateway.send(ApiRequest::get("/users/menu")).await
    }

    pub async fn user(&self, id: u64) -> Result<User, GatewayError> {
        self.gateway.send(ApiRequest::get(format!("/users/{}", id))).await
    }
}
