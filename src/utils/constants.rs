//! Shared constants and invariants

// Environment variables injected by the workload identity webhook
pub const AZURE_CLIENT_ID: &str = "AZURE_CLIENT_ID";
pub const AZURE_TENANT_ID: &str = "AZURE_TENANT_ID";
pub const AZURE_FEDERATED_TOKEN: &str = "AZURE_FEDERATED_TOKEN";
pub const AZURE_FEDERATED_TOKEN_FILE: &str = "AZURE_FEDERATED_TOKEN_FILE";
pub const AZURE_AUTHORITY_HOST: &str = "AZURE_AUTHORITY_HOST";
pub const AZURE_ADDITIONALLY_ALLOWED_TENANTS: &str = "AZURE_ADDITIONALLY_ALLOWED_TENANTS";

/// Subtracted from the federated token expiry before the cached assertion is considered stale.
pub const ASSERTION_SAFETY_MARGIN_SECS: i64 = 10 * 60;
/// Cached access tokens are re-acquired once they get this close to expiry.
pub const ACCESS_TOKEN_REFRESH_MARGIN_SECS: i64 = 5 * 60;

pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com/";
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;

pub const CLIENT_ASSERTION_TYPE: &str = "urn:ietf:params:oauth:client-assertion-type:jwt-bearer";
pub const INSTANCE_DISCOVERY_API_VERSION: &str = "1.1";
