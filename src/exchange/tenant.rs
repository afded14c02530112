use crate::error::ExchangeError;

const ANY_TENANT: &str = "*";

pub fn validate_tenant_id(tenant_id: &str) -> Result<(), ExchangeError> {
    let valid = !tenant_id.is_empty()
        && tenant_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.');
    if valid {
        Ok(())
    } else {
        Err(ExchangeError::InvalidTenantId(tenant_id.to_owned()))
    }
}

/// Picks the tenant a token request is sent to.
///
/// No requested tenant, or the credential's own, means the default tenant.
/// Any other tenant must be listed in `allowed`, or `allowed` must contain `"*"`.
pub fn resolve_tenant(
    default_tenant: &str,
    requested: Option<&str>,
    allowed: &[String],
) -> Result<String, ExchangeError> {
    let requested = match requested {
        None | Some("") => return Ok(default_tenant.to_owned()),
        Some(tenant) if tenant == default_tenant => return Ok(default_tenant.to_owned()),
        Some(tenant) => tenant,
    };

    validate_tenant_id(requested)?;

    if allowed.iter().any(|t| t == ANY_TENANT || t == requested) {
        Ok(requested.to_owned())
    } else {
        Err(ExchangeError::TenantNotAllowed(requested.to_owned()))
    }
}
