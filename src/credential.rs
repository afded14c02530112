use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::cache::assertion_cache::CachedAssertion;
use crate::config::options::{ClientOptions, CredentialOptions};
use crate::config::resolver::{resolve, EnvSource, ProcessEnv};
use crate::error::{CredentialError, ExchangeError};
use crate::exchange::{AccessToken, ExchangeOptions, TokenExchangeClient, TokenRequestOptions};
use crate::sources::TokenSource;

/// Credential for any OIDC-compliant identity provider that supplies a JWT.
///
/// Configuration defaults to the environment variables set by the workload
/// identity webhook; [`CredentialOptions`] overrides them.
pub struct WorkloadIdentityCredential {
    client_id: String,
    tenant_id: String,
    assertion: Arc<CachedAssertion<TokenSource>>,
    client: TokenExchangeClient,
}

impl WorkloadIdentityCredential {
    pub fn new(options: Option<CredentialOptions>) -> Result<Self, CredentialError> {
        Self::with_env(options, &ProcessEnv)
    }

    pub fn with_env(options: Option<CredentialOptions>, env: &impl EnvSource) -> Result<Self, CredentialError> {
        let options = options.unwrap_or_default();
        let resolved = resolve(&options, env)?;
        let source_kind = resolved.token_source.kind();

        let assertion = Arc::new(CachedAssertion::new(resolved.token_source));
        let exchange_options = ExchangeOptions {
            additionally_allowed_tenants: resolved.additionally_allowed_tenants,
            disable_instance_discovery: options.disable_instance_discovery,
            client_options: ClientOptions {
                authority_host: resolved.authority_host,
                ..options.client_options
            },
        };
        let client = TokenExchangeClient::new(
            &resolved.tenant_id,
            &resolved.client_id,
            assertion.clone(),
            exchange_options,
        )?;

        info!(
            client_id = %resolved.client_id,
            tenant_id = %resolved.tenant_id,
            token_source = source_kind,
            "workload identity credential created"
        );

        Ok(Self {
            client_id: resolved.client_id,
            tenant_id: resolved.tenant_id,
            assertion,
            client,
        })
    }

    /// Requests an access token from the authority.
    pub async fn get_token(&self, request: &TokenRequestOptions) -> Result<AccessToken, ExchangeError> {
        self.client.get_token(request).await
    }

    /// Current client assertion, the same value the exchange client presents.
    pub async fn assertion(&self) -> Result<String> {
        self.assertion.get_assertion().await
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }
}

impl fmt::Debug for WorkloadIdentityCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkloadIdentityCredential")
            .field("client_id", &self.client_id)
            .field("tenant_id", &self.tenant_id)
            .field("token_source", self.assertion.source())
            .field("client", &self.client)
            .finish()
    }
}
