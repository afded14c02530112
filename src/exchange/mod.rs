//! Token exchange client.
//!
//! Presents a client assertion to the authority's token endpoint and returns
//! the access token it issues. The assertion is pulled from an
//! [`AssertionProvider`] each time a new access token is needed.

use anyhow::Result;
use async_trait::async_trait;

pub mod client;
pub mod discovery;
pub mod tenant;
pub mod types;

pub use client::TokenExchangeClient;
pub use types::{AccessToken, ExchangeOptions, TokenRequestOptions};

/// Supplies the current client assertion.
#[async_trait]
pub trait AssertionProvider: Send + Sync {
    async fn assertion(&self) -> Result<String>;
}
