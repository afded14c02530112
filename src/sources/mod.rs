//! Sources module
//!
//! Where the federated token behind the client assertion comes from.

use anyhow::Result;
use std::future::Future;

use crate::cache::federated_token::FederatedToken;

pub mod static_token;
pub mod token_file;

pub use static_token::StaticToken;
pub use token_file::TokenFile;

pub trait FederatedTokenSource: Send + Sync + 'static {
    /// Produces the token an assertion refresh is computed from.
    fn fetch_token(&self) -> impl Future<Output = Result<FederatedToken>> + Send;
}

#[derive(Debug, Clone)]
pub enum TokenSource {
    Static(StaticToken),
    File(TokenFile),
}

impl TokenSource {
    pub fn kind(&self) -> &'static str {
        match self {
            TokenSource::Static(_) => "static",
            TokenSource::File(_) => "file",
        }
    }
}

impl FederatedTokenSource for TokenSource {
    async fn fetch_token(&self) -> Result<FederatedToken> {
        match self {
            TokenSource::Static(s) => s.fetch_token().await,
            TokenSource::File(s) => s.fetch_token().await,
        }
    }
}
