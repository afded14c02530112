use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::options::ClientOptions;

#[derive(Debug, Clone, Default)]
pub struct ExchangeOptions {
    pub additionally_allowed_tenants: Vec<String>,
    pub disable_instance_discovery: bool,
    pub client_options: ClientOptions,
}

/// Parameters of a single access token request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenRequestOptions {
    pub scopes: Vec<String>,
    /// Overrides the credential's tenant. Must be allowed by `additionally_allowed_tenants`.
    pub tenant_id: Option<String>,
}

impl TokenRequestOptions {
    pub fn new<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            scopes: scopes.into_iter().map(Into::into).collect(),
            tenant_id: None,
        }
    }

    pub fn with_tenant(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }
}

#[derive(Clone, Serialize, PartialEq, Eq)]
pub struct AccessToken {
    #[serde(rename = "access_token")]
    pub token: String,
    pub expires_on: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>, expires_on: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_on,
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"[redacted]")
            .field("expires_on", &self.expires_on)
            .finish()
    }
}

/// Successful token endpoint response.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
    pub expires_in: i64,
}

/// Instance discovery metadata. Only the fields that are checked.
#[derive(Debug, Deserialize)]
pub(crate) struct InstanceDiscoveryResponse {
    pub tenant_discovery_endpoint: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
