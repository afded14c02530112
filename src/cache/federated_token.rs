use std::fmt;

use anyhow::{anyhow, Result};
use base64::Engine;
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;

use crate::utils::constants::ASSERTION_SAFETY_MARGIN_SECS;

/// Externally issued OIDC token presented as the client assertion.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct FederatedToken {
    pub access_token: String,
    /// `None` when the expiry is unknown; such a token is never served from cache.
    pub expiry: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct JwtClaims {
    exp: i64,
}

impl FederatedToken {
    pub fn new(access_token: impl Into<String>, expiry: DateTime<Utc>) -> Self {
        Self {
            access_token: access_token.into(),
            expiry: Some(expiry),
        }
    }

    /// Takes the expiry from the JWT `exp` claim when the value is a decodable JWT.
    pub fn from_jwt(access_token: impl Into<String>) -> Self {
        let access_token = access_token.into();
        let expiry = jwt_expiry(&access_token).ok();
        Self { access_token, expiry }
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_empty()
    }

    /// Fills a missing expiry from the JWT `exp` claim.
    pub fn with_jwt_expiry(self) -> Self {
        match self.expiry {
            Some(_) => self,
            None => Self::from_jwt(self.access_token),
        }
    }

    /// Instant after which an assertion derived from this token is stale.
    pub fn assertion_expiry(&self) -> Option<DateTime<Utc>> {
        self.expiry.map(|expiry| {
            expiry
                .checked_sub_signed(TimeDelta::seconds(ASSERTION_SAFETY_MARGIN_SECS))
                .unwrap_or(DateTime::<Utc>::MIN_UTC)
        })
    }
}

impl fmt::Debug for FederatedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FederatedToken")
            .field("access_token", &"[redacted]")
            .field("expiry", &self.expiry)
            .finish()
    }
}

/// Reads the `exp` claim of an unverified JWT.
pub fn jwt_expiry(token: &str) -> Result<DateTime<Utc>> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(anyhow!("invalid JWT format"));
    }

    let payload = parts[1].trim_end_matches('=');
    let decoded = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| anyhow!("base64 decode error: {}", e))?;

    let claims = serde_json::from_slice::<JwtClaims>(&decoded)
        .map_err(|e| anyhow!("invalid JWT payload: {}", e))?;

    DateTime::from_timestamp(claims.exp, 0).ok_or_else(|| anyhow!("JWT exp {} out of range", claims.exp))
}
