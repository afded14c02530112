use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::exchange::AssertionProvider;
use crate::helpers::time::{Clock, SystemClock};
use crate::sources::FederatedTokenSource;

#[derive(Debug, Default)]
struct AssertionState {
    assertion: String,
    /// `None` until the first refresh, or while the source token has no known expiry.
    expires: Option<DateTime<Utc>>,
}

impl AssertionState {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| now < expires)
    }
}

/// Lazily refreshed client assertion.
///
/// Readers share the cached value while it is fresh. Once it goes stale the
/// first caller to take the write lock refreshes it from the source; callers
/// queued behind it re-check and reuse that result.
pub struct CachedAssertion<S, C = SystemClock> {
    source: S,
    clock: C,
    state: RwLock<AssertionState>,
}

impl<S: FederatedTokenSource> CachedAssertion<S> {
    pub fn new(source: S) -> Self {
        Self::with_clock(source, SystemClock)
    }
}

impl<S: FederatedTokenSource, C: Clock> CachedAssertion<S, C> {
    pub fn with_clock(source: S, clock: C) -> Self {
        Self {
            source,
            clock,
            state: RwLock::new(AssertionState::default()),
        }
    }

    /// Returns a non-stale assertion, refreshing it first if needed.
    ///
    /// A failed refresh leaves the previous assertion and expiry in place.
    pub async fn get_assertion(&self) -> Result<String> {
        {
            let state = self.state.read().await;
            if state.is_fresh(self.clock.now()) {
                return Ok(state.assertion.clone());
            }
        }

        let mut state = self.state.write().await;
        // another caller may have refreshed while we waited for the write lock
        if state.is_fresh(self.clock.now()) {
            return Ok(state.assertion.clone());
        }

        let token = self.source.fetch_token().await?;
        state.expires = token.assertion_expiry();
        state.assertion = token.access_token;
        debug!(expires = ?state.expires, "client assertion refreshed");

        Ok(state.assertion.clone())
    }

    /// Instant after which the cached assertion is stale.
    pub async fn expires(&self) -> Option<DateTime<Utc>> {
        self.state.read().await.expires
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

#[async_trait]
impl<S: FederatedTokenSource, C: Clock> AssertionProvider for CachedAssertion<S, C> {
    async fn assertion(&self) -> Result<String> {
        self.get_assertion().await
    }
}
