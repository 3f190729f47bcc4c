use std::sync::Arc;

use super::store::{StoreError, TokenStore};
use crate::api::models::TokenPair;

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Fixed-key view over a [`TokenStore`].
#[derive(Clone)]
pub struct SessionTokens {
    store: Arc<dyn TokenStore>,
}

impl SessionTokens {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    pub async fn access_token(&self) -> Result<Option<String>, StoreError> {
        Ok(non_empty(self.store.read(ACCESS_TOKEN_KEY).await?))
    }

    pub async fn refresh_token(&self) -> Result<Option<String>, StoreError> {
        Ok(non_empty(self.store.read(REFRESH_TOKEN_KEY).await?))
    }

    pub async fn save(&self, pair: &TokenPair) -> Result<(), StoreError> {
        self.store
            .write(&[
                (ACCESS_TOKEN_KEY, pair.access_token.as_str()),
                (REFRESH_TOKEN_KEY, pair.refresh_token.as_str()),
            ])
            .await
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(&[ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY]).await
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::store::MemoryTokenStore;

    #[tokio::test]
    async fn empty_strings_count_as_absent() {
        let store = Arc::new(MemoryTokenStore::with_entries(&[(ACCESS_TOKEN_KEY, "")]));
        let session = SessionTokens::new(store);
        assert_eq!(session.access_token().await.unwrap(), None);
        assert_eq!(session.refresh_token().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_and_clear_touch_both_keys() {
        let store = Arc::new(MemoryTokenStore::new());
        let session = SessionTokens::new(store.clone());

        session
            .save(&TokenPair {
                access_token: "A1".into(),
                refresh_token: "R1".into(),
                expires_in: 900,
            })
            .await
            .unwrap();
        assert_eq!(store.snapshot().len(), 2);
        assert_eq!(session.refresh_token().await.unwrap().as_deref(), Some("R1"));

        session.clear().await.unwrap();
        assert!(store.snapshot().is_empty());
    }
}
