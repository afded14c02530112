use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::cache::federated_token::FederatedToken;
use crate::sources::FederatedTokenSource;

/// Projected token file, rotated by the platform. Re-read on every refresh.
#[derive(Debug, Clone)]
pub struct TokenFile {
    path: PathBuf,
}

impl TokenFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FederatedTokenSource for TokenFile {
    async fn fetch_token(&self) -> Result<FederatedToken> {
        let content = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| anyhow!("failed to read federated token file {}: {}", self.path.display(), e))?;

        let value = content.trim();
        if value.is_empty() {
            return Err(anyhow!("federated token file {} is empty", self.path.display()));
        }

        let token = FederatedToken::from_jwt(value);
        debug!(path = %self.path.display(), expiry = ?token.expiry, "read federated token file");
        Ok(token)
    }
}
