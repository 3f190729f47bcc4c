pub mod access;
pub mod session;
pub mod store;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

pub use access::Access;
pub use session::{SessionTokens, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
pub use store::{FileTokenStore, MemoryTokenStore, StoreError, TokenStore};

/// Claims the backend puts in its access and refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub userid: u64,
    #[serde(default)]
    pub jti: Option<String>,
    #[serde(default)]
    pub family: Option<String>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
}

impl Claims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::<Utc>::from_timestamp(exp, 0))
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClaimsError {
    #[error("malformed token: {0}")]
    Malformed(#[from] jsonwebtoken::errors::Error),
}

/// Read a token's claims without verifying its signature.
///
/// The client never holds the signing key; this is for display only and must
/// not be used to make authorization decisions.
pub fn inspect_token(token: &str) -> Result<Claims, ClaimsError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}
