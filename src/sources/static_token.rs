use anyhow::Result;

use crate::cache::federated_token::FederatedToken;
use crate::sources::FederatedTokenSource;

/// Token fixed at construction. Refreshing it only recomputes the expiry margin.
#[derive(Debug, Clone)]
pub struct StaticToken {
    token: FederatedToken,
}

impl StaticToken {
    pub fn new(token: FederatedToken) -> Self {
        Self { token }
    }

    pub fn token(&self) -> &FederatedToken {
        &self.token
    }
}

impl FederatedTokenSource for StaticToken {
    async fn fetch_token(&self) -> Result<FederatedToken> {
        Ok(self.token.clone())
    }
}
