use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::error::ExchangeError;
use crate::exchange::types::InstanceDiscoveryResponse;
use crate::utils::constants::INSTANCE_DISCOVERY_API_VERSION;

/// Asks the authority whether it knows the tenant's authorization endpoint.
///
/// Fails unless the response names a tenant discovery endpoint.
pub async fn discover_instance(client: &Client, authority: &Url, tenant_id: &str) -> Result<(), ExchangeError> {
    let authorize = join(authority, &format!("{tenant_id}/oauth2/v2.0/authorize"))?;
    let mut url = join(authority, "common/discovery/instance")?;
    url.query_pairs_mut()
        .append_pair("api-version", INSTANCE_DISCOVERY_API_VERSION)
        .append_pair("authorization_endpoint", authorize.as_str());

    debug!(%url, "requesting instance discovery metadata");
    let response = client.get(url).send().await?;
    let status = response.status();
    let body = response.text().await?;

    let metadata: InstanceDiscoveryResponse = serde_json::from_str(&body)
        .map_err(|e| ExchangeError::InstanceDiscovery(format!("{status}: invalid response: {e}")))?;

    match metadata.tenant_discovery_endpoint {
        Some(endpoint) if status.is_success() => {
            debug!(%endpoint, "instance discovery succeeded");
            Ok(())
        }
        _ => {
            let reason = metadata
                .error_description
                .or(metadata.error)
                .unwrap_or_else(|| format!("{status}: no tenant_discovery_endpoint in response"));
            warn!(authority = %authority, "instance discovery failed: {}", reason);
            Err(ExchangeError::InstanceDiscovery(reason))
        }
    }
}

pub(crate) fn join(authority: &Url, path: &str) -> Result<Url, ExchangeError> {
    authority.join(path).map_err(|e| ExchangeError::InvalidAuthority {
        host: authority.to_string(),
        reason: e.to_string(),
    })
}
