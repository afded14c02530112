use std::path::PathBuf;
use std::time::Duration;

use crate::cache::federated_token::FederatedToken;
use crate::config::settings::RetryConfig;

/// Transport settings shared with the token exchange client.
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Authority host, e.g. `https://login.microsoftonline.com/`.
    /// Defaults to `AZURE_AUTHORITY_HOST`, then the public cloud.
    pub authority_host: Option<String>,
    pub timeout: Option<Duration>,
    pub retry: Option<RetryConfig>,
}

/// Optional parameters for [`WorkloadIdentityCredential`](crate::credential::WorkloadIdentityCredential).
///
/// Empty strings are treated the same as `None`.
#[derive(Debug, Clone, Default)]
pub struct CredentialOptions {
    pub client_options: ClientOptions,

    /// Additional tenants for which the credential may acquire tokens.
    /// `"*"` allows any tenant the application is registered in.
    /// Defaults to the `;`-separated `AZURE_ADDITIONALLY_ALLOWED_TENANTS`.
    pub additionally_allowed_tenants: Vec<String>,

    /// Client ID of the service principal. Defaults to `AZURE_CLIENT_ID`.
    pub client_id: Option<String>,

    /// Skip the instance metadata request before authenticating. Only for
    /// disconnected or private clouds where the authority is known to be valid.
    pub disable_instance_discovery: bool,

    /// Tenant ID of the service principal. Defaults to `AZURE_TENANT_ID`.
    pub tenant_id: Option<String>,

    /// Federated token to present. Defaults to `AZURE_FEDERATED_TOKEN`.
    pub federated_token: Option<FederatedToken>,

    /// Projected token file, re-read whenever the assertion is refreshed.
    /// Used only when no inline token is available. Defaults to
    /// `AZURE_FEDERATED_TOKEN_FILE`.
    pub federated_token_file: Option<PathBuf>,
}
