use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};
use reqwest::{Client, Url};
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::cache::token_cache::{CacheKey, TokenCache};
use crate::error::ExchangeError;
use crate::exchange::discovery::{discover_instance, join};
use crate::exchange::tenant::{resolve_tenant, validate_tenant_id};
use crate::exchange::types::{AccessToken, ExchangeOptions, TokenRequestOptions, TokenResponse};
use crate::exchange::AssertionProvider;
use crate::helpers::time::get_instant;
use crate::resilience::retry::RetrySettings;
use crate::utils::constants::{CLIENT_ASSERTION_TYPE, DEFAULT_AUTHORITY_HOST, DEFAULT_HTTP_TIMEOUT_MS};

/// Exchanges client assertions for access tokens.
pub struct TokenExchangeClient {
    tenant_id: String,
    client_id: String,
    assertion: Arc<dyn AssertionProvider>,
    additionally_allowed_tenants: Vec<String>,
    disable_instance_discovery: bool,
    authority: Url,
    http: Client,
    retry: RetrySettings,
    discovered: OnceCell<()>,
    tokens: TokenCache,
}

impl TokenExchangeClient {
    pub fn new(
        tenant_id: &str,
        client_id: &str,
        assertion: Arc<dyn AssertionProvider>,
        options: ExchangeOptions,
    ) -> Result<Self, ExchangeError> {
        validate_tenant_id(tenant_id)?;
        if client_id.is_empty() {
            return Err(ExchangeError::InvalidClientId);
        }

        let client_options = options.client_options;
        let authority = parse_authority(client_options.authority_host.as_deref().unwrap_or(DEFAULT_AUTHORITY_HOST))?;
        let timeout = client_options
            .timeout
            .unwrap_or(Duration::from_millis(DEFAULT_HTTP_TIMEOUT_MS));
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            tenant_id: tenant_id.to_owned(),
            client_id: client_id.to_owned(),
            assertion,
            additionally_allowed_tenants: options.additionally_allowed_tenants,
            disable_instance_discovery: options.disable_instance_discovery,
            authority,
            http,
            retry: RetrySettings::from_config(client_options.retry.as_ref()),
            discovered: OnceCell::new(),
            tokens: TokenCache::new(),
        })
    }

    /// Returns a cached access token for the request, or acquires a new one.
    pub async fn get_token(&self, request: &TokenRequestOptions) -> Result<AccessToken, ExchangeError> {
        if request.scopes.is_empty() {
            return Err(ExchangeError::MissingScopes);
        }

        let tenant = resolve_tenant(
            &self.tenant_id,
            request.tenant_id.as_deref(),
            &self.additionally_allowed_tenants,
        )?;
        let key = CacheKey::new(&tenant, &request.scopes);
        if let Some(token) = self.tokens.get(&key).await {
            debug!(tenant = %tenant, "serving cached access token");
            return Ok(token);
        }

        if !self.disable_instance_discovery {
            self.discovered
                .get_or_try_init(|| discover_instance(&self.http, &self.authority, &tenant))
                .await?;
        }

        let start = get_instant();
        let token = self
            .retry
            .run_with_retry(
                || self.request_token(&tenant, &request.scopes),
                ExchangeError::is_retryable,
            )
            .await?;
        info!(
            tenant = %tenant,
            scopes = ?request.scopes,
            expires_on = %token.expires_on,
            elapsed_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
            "acquired access token"
        );

        self.tokens.set(key, token.clone()).await;
        Ok(token)
    }

    async fn request_token(&self, tenant: &str, scopes: &[String]) -> Result<AccessToken, ExchangeError> {
        let assertion = self.assertion.assertion().await.map_err(ExchangeError::Assertion)?;
        let url = join(&self.authority, &format!("{tenant}/oauth2/v2.0/token"))?;
        let scope = scopes.join(" ");
        let form = [
            ("client_id", self.client_id.as_str()),
            ("scope", scope.as_str()),
            ("grant_type", "client_credentials"),
            ("client_assertion_type", CLIENT_ASSERTION_TYPE),
            ("client_assertion", assertion.as_str()),
        ];

        let response = self.http.post(url).form(&form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ExchangeError::Status { status, body });
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| ExchangeError::InvalidResponse(e.to_string()))?;
        if body.access_token.is_empty() {
            return Err(ExchangeError::InvalidResponse("empty access_token".to_owned()));
        }

        let expires_on = TimeDelta::try_seconds(body.expires_in)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| ExchangeError::InvalidResponse("expires_in out of range".to_owned()))?;

        Ok(AccessToken::new(body.access_token, expires_on))
    }
}

impl fmt::Debug for TokenExchangeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenExchangeClient")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("authority", &self.authority.as_str())
            .field("additionally_allowed_tenants", &self.additionally_allowed_tenants)
            .field("disable_instance_discovery", &self.disable_instance_discovery)
            .finish()
    }
}

fn parse_authority(host: &str) -> Result<Url, ExchangeError> {
    let invalid = |reason: String| ExchangeError::InvalidAuthority {
        host: host.to_owned(),
        reason,
    };

    // a trailing slash keeps the host's path when joining tenant paths
    let normalized = if host.ends_with('/') {
        host.to_owned()
    } else {
        format!("{host}/")
    };
    let url = Url::parse(&normalized).map_err(|e| invalid(e.to_string()))?;
    match url.scheme() {
        "https" | "http" => Ok(url),
        scheme => Err(invalid(format!("unsupported scheme '{scheme}'"))),
    }
}
