use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::options::CredentialOptions;
use crate::error::CredentialError;
use crate::sources::{StaticToken, TokenFile, TokenSource};
use crate::cache::federated_token::FederatedToken;
use crate::utils::constants::{
    AZURE_ADDITIONALLY_ALLOWED_TENANTS, AZURE_AUTHORITY_HOST, AZURE_CLIENT_ID,
    AZURE_FEDERATED_TOKEN, AZURE_FEDERATED_TOKEN_FILE, AZURE_TENANT_ID,
};

/// Lookup of fallback configuration values.
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub client_id: String,
    pub tenant_id: String,
    pub token_source: TokenSource,
    pub authority_host: Option<String>,
    pub additionally_allowed_tenants: Vec<String>,
}

/// Resolves client ID, federated token and tenant ID, in that order.
///
/// Explicit non-empty options win over the environment. Environment client
/// and tenant IDs count once they are set, even if empty; the environment
/// token must be non-empty.
pub fn resolve(options: &CredentialOptions, env: &impl EnvSource) -> Result<ResolvedConfig, CredentialError> {
    let client_id = non_empty(options.client_id.as_deref())
        .or_else(|| env.var(AZURE_CLIENT_ID))
        .ok_or(CredentialError::ClientIdMissing)?;

    let token_source = resolve_token_source(options, env).ok_or(CredentialError::TokenMissing)?;

    let tenant_id = non_empty(options.tenant_id.as_deref())
        .or_else(|| env.var(AZURE_TENANT_ID))
        .ok_or(CredentialError::TenantIdMissing)?;

    let authority_host = non_empty(options.client_options.authority_host.as_deref())
        .or_else(|| env.var(AZURE_AUTHORITY_HOST).filter(|host| !host.is_empty()));

    let additionally_allowed_tenants = if options.additionally_allowed_tenants.is_empty() {
        env.var(AZURE_ADDITIONALLY_ALLOWED_TENANTS)
            .map(|tenants| split_tenants(&tenants))
            .unwrap_or_default()
    } else {
        options.additionally_allowed_tenants.clone()
    };

    Ok(ResolvedConfig {
        client_id,
        tenant_id,
        token_source,
        authority_host,
        additionally_allowed_tenants,
    })
}

fn resolve_token_source(options: &CredentialOptions, env: &impl EnvSource) -> Option<TokenSource> {
    if let Some(token) = options.federated_token.as_ref().filter(|token| !token.is_empty()) {
        return Some(TokenSource::Static(StaticToken::new(token.clone().with_jwt_expiry())));
    }

    if let Some(value) = env.var(AZURE_FEDERATED_TOKEN).filter(|value| !value.is_empty()) {
        return Some(TokenSource::Static(StaticToken::new(FederatedToken::from_jwt(value))));
    }

    options
        .federated_token_file
        .clone()
        .filter(|path| !path.as_os_str().is_empty())
        .or_else(|| {
            env.var(AZURE_FEDERATED_TOKEN_FILE)
                .filter(|path| !path.is_empty())
                .map(PathBuf::from)
        })
        .map(|path| TokenSource::File(TokenFile::new(path)))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_owned)
}

fn split_tenants(value: &str) -> Vec<String> {
    value
        .split(';')
        .map(str::trim)
        .filter(|tenant| !tenant.is_empty())
        .map(str::to_owned)
        .collect()
}
