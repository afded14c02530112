use chrono::{TimeDelta, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::exchange::types::AccessToken;
use crate::utils::constants::ACCESS_TOKEN_REFRESH_MARGIN_SECS;

/// Tenant plus the sorted, de-duplicated scope set of a token request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    tenant_id: String,
    scopes: Vec<String>,
}

impl CacheKey {
    pub fn new(tenant_id: &str, scopes: &[String]) -> Self {
        let mut scopes = scopes.to_vec();
        scopes.sort();
        scopes.dedup();
        Self {
            tenant_id: tenant_id.to_owned(),
            scopes,
        }
    }
}

/// Access tokens acquired by the exchange client, keyed by tenant and scopes.
#[derive(Debug, Default)]
pub struct TokenCache {
    inner: RwLock<HashMap<CacheKey, AccessToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, key: CacheKey, token: AccessToken) {
        self.inner.write().await.insert(key, token);
    }

    /// Get token if it exists and is not within the refresh margin of its expiry
    pub async fn get(&self, key: &CacheKey) -> Option<AccessToken> {
        let refresh_at = Utc::now() + TimeDelta::seconds(ACCESS_TOKEN_REFRESH_MARGIN_SECS);
        self.inner
            .read()
            .await
            .get(key)
            .filter(|token| refresh_at < token.expires_on)
            .cloned()
    }
}
