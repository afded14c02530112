use http::StatusCode;
use thiserror::Error;

/// Errors returned while constructing a [`WorkloadIdentityCredential`](crate::credential::WorkloadIdentityCredential).
#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("no client ID specified: set AZURE_CLIENT_ID or CredentialOptions::client_id")]
    ClientIdMissing,

    #[error("no federated token specified: set AZURE_FEDERATED_TOKEN or CredentialOptions::federated_token")]
    TokenMissing,

    #[error("no tenant ID specified: set AZURE_TENANT_ID or CredentialOptions::tenant_id")]
    TenantIdMissing,

    #[error(transparent)]
    Exchange(#[from] ExchangeError),
}

/// Errors raised by the token exchange client.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("invalid tenant ID {0:?}: only alphanumeric characters, '-' and '.' are allowed")]
    InvalidTenantId(String),

    #[error("client ID must not be empty")]
    InvalidClientId,

    #[error("invalid authority host {host:?}: {reason}")]
    InvalidAuthority { host: String, reason: String },

    #[error("at least one scope is required")]
    MissingScopes,

    #[error("tenant {0:?} is not allowed: add it to additionally_allowed_tenants or use \"*\"")]
    TenantNotAllowed(String),

    #[error("instance discovery failed: {0}")]
    InstanceDiscovery(String),

    #[error("failed to obtain client assertion: {0:#}")]
    Assertion(anyhow::Error),

    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid token response: {0}")]
    InvalidResponse(String),
}

impl ExchangeError {
    /// Transport failures, throttling and server errors are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ExchangeError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ExchangeError::Status { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }
}
