// Gateway error types
use thiserror::Error;

use crate::api::BizError;
use crate::auth::store::StoreError;

/// Why a request produced no usable server envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// The request went out but no response came back (timeout, reset).
    NoResponse,
    /// The request could not be sent at all (connect failure, bad URL).
    NotSent,
}

/// Why the refresh protocol gave up on the current session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshFailure {
    #[error("no refresh token available")]
    MissingRefreshToken,

    #[error("refresh rejected: {0}")]
    Rejected(String),

    #[error("refresh request failed: {0}")]
    Transport(String),

    #[error("refresh timed out after {0:?}")]
    TimedOut(std::time::Duration),

    #[error("could not persist refreshed tokens: {0}")]
    Storage(String),

    #[error("refresh was abandoned before it settled")]
    Abandoned,
}

/// Everything a call through the gateway can fail with.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{} (code {})", .0.message, .0.code)]
    Business(BizError),

    #[error("transport error: {message}")]
    Transport { kind: TransportKind, message: String },

    #[error("unexpected HTTP status {status}")]
    HttpStatus { status: u16 },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("failed to encode request: {0}")]
    Encode(String),

    #[error("session expired: {0}")]
    SessionExpired(RefreshFailure),

    #[error("token storage error: {0}")]
    Storage(#[from] StoreError),

    /// The gateway already told the user about this error.
    #[error(transparent)]
    Reported(Box<GatewayError>),
}

impl GatewayError {
    pub fn transport(kind: TransportKind, message: impl Into<String>) -> Self {
        GatewayError::Transport {
            kind,
            message: message.into(),
        }
    }

    pub(crate) fn reported(self) -> Self {
        match self {
            GatewayError::Reported(_) => self,
            other => GatewayError::Reported(Box::new(other)),
        }
    }

    /// Whether the user has already been notified (or redirected) for this error.
    pub fn is_reported(&self) -> bool {
        matches!(self, GatewayError::Reported(_))
    }

    /// The underlying error with any reporting marker peeled off.
    pub fn inner(&self) -> &GatewayError {
        match self {
            GatewayError::Reported(inner) => inner.inner(),
            other => other,
        }
    }

    pub fn business(&self) -> Option<&BizError> {
        match self.inner() {
            GatewayError::Business(err) => Some(err),
            _ => None,
        }
    }

    pub fn error_code(&self) -> Option<i64> {
        self.business().map(|err| err.code)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.business().is_some_and(BizError::is_unauthorized)
    }

    pub fn is_transport(&self) -> bool {
        matches!(self.inner(), GatewayError::Transport { .. })
    }

    pub fn is_session_expired(&self) -> bool {
        matches!(self.inner(), GatewayError::SessionExpired(_))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_connect() || err.is_builder() {
            TransportKind::NotSent
        } else {
            TransportKind::NoResponse
        };
        GatewayError::transport(kind, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn biz(code: i64) -> GatewayError {
        GatewayError::Business(BizError {
            code,
            message: "Unauthorized".to_string(),
            show_type: None,
            data: Value::Null,
        })
    }

    #[test]
    fn reported_wrapper_is_transparent_to_queries() {
        let err = biz(401).reported();
        assert!(err.is_reported());
        assert!(err.is_unauthorized());
        assert_eq!(err.error_code(), Some(401));
        assert_eq!(err.to_string(), "Unauthorized (code 401)");
    }

    #[test]
    fn reporting_twice_does_not_nest() {
        let err = biz(403).reported().reported();
        match err {
            GatewayError::Reported(inner) => assert!(!inner.is_reported()),
            other => panic!("expected reported wrapper, got {other:?}"),
        }
    }

    #[test]
    fn session_expiry_is_classified() {
        let err = GatewayError::SessionExpired(RefreshFailure::MissingRefreshToken);
        assert!(err.is_session_expired());
        assert!(!err.is_transport());
        assert_eq!(err.error_code(), None);
    }
}
