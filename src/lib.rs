//! # Workload Identity Credential
//!
//! Exchanges a federated OIDC token, typically injected into a pod by the
//! workload identity webhook, for an access token using the client
//! assertion flow.
//!
//! Modules:
//! - `config` — credential options, environment resolution, settings file
//! - `cache` — the cached client assertion and the access token cache
//! - `sources` — where the federated token comes from (inline or projected file)
//! - `exchange` — token exchange client talking to the authority
//! - `credential` — the public credential tying it all together

pub mod cache;
pub mod config;
pub mod credential;
pub mod error;
pub mod exchange;
pub mod helpers;
pub mod resilience;
pub mod sources;
pub mod utils;

#[cfg(test)]
mod tests;

pub use crate::cache::federated_token::FederatedToken;
pub use crate::config::options::{ClientOptions, CredentialOptions};
pub use crate::credential::WorkloadIdentityCredential;
pub use crate::error::{CredentialError, ExchangeError};
pub use crate::exchange::{AccessToken, AssertionProvider, TokenRequestOptions};
