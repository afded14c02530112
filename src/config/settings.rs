use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::options::{ClientOptions, CredentialOptions};

/// ================================
/// Settings file for the `federated-credential` binary
/// ================================
#[derive(Debug, Deserialize, Clone, Default)]
pub struct SettingsConfig {
    pub client_id: Option<String>,
    pub tenant_id: Option<String>,
    pub federated_token_file: Option<String>,
    #[serde(default)]
    pub scopes: Vec<String>,
    #[serde(default)]
    pub additionally_allowed_tenants: Vec<String>,
    #[serde(default)]
    pub disable_instance_discovery: bool,
    pub authority_host: Option<String>,
    pub timeout_ms: Option<u64>,
    pub retry: Option<RetryConfig>,
    pub logging: Option<LoggingConfig>,
}

impl SettingsConfig {
    pub fn to_credential_options(&self) -> CredentialOptions {
        CredentialOptions {
            client_options: ClientOptions {
                authority_host: self.authority_host.clone(),
                timeout: self.timeout_ms.map(Duration::from_millis),
                retry: self.retry.clone(),
            },
            additionally_allowed_tenants: self.additionally_allowed_tenants.clone(),
            client_id: self.client_id.clone(),
            disable_instance_discovery: self.disable_instance_discovery,
            tenant_id: self.tenant_id.clone(),
            federated_token: None,
            federated_token_file: self.federated_token_file.as_ref().map(PathBuf::from),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    pub attempts: Option<u32>,
    /// will be mutiply by 2 on every attempt until max_delay_ms
    pub base_delay_ms: Option<u64>,
    /// max delay for retrying
    /// invariant: >= base_delay_ms.
    pub max_delay_ms: Option<u64>,
}

/// ================================
/// Logging
/// ================================
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String, // allowed: trace, debug, info, warn, error
    #[serde(default)]
    pub format: LogFormat,
}

impl LoggingConfig {
    pub fn new(level: String, format: LogFormat) -> Self {
        Self { level, format }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::new("info".to_owned(), LogFormat::Compact)
    }
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Compact,
}
