// tests/common/mod.rs
pub use axum::Router;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use base64::Engine;
use chrono::{DateTime, TimeDelta, Utc};
use serde_json::json;
use tokio::task::JoinHandle;

use crate::cache::federated_token::FederatedToken;
use crate::helpers::time::Clock;
use crate::sources::FederatedTokenSource;

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

/// Clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct ManualClock(Arc<Mutex<DateTime<Utc>>>);

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self(Arc::new(Mutex::new(start)))
    }

    pub fn advance(&self, delta: TimeDelta) {
        let mut now = self.0.lock().unwrap();
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

/// Fixed token source that counts how often it is asked for a token.
pub struct CountingSource {
    token: FederatedToken,
    calls: Arc<AtomicUsize>,
    delay: Duration,
}

impl CountingSource {
    pub fn new(token: FederatedToken) -> Self {
        Self {
            token,
            calls: Arc::new(AtomicUsize::new(0)),
            delay: Duration::ZERO,
        }
    }

    /// Holds the refresh open for `delay` so concurrent callers pile up behind it.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> Arc<AtomicUsize> {
        self.calls.clone()
    }
}

impl FederatedTokenSource for CountingSource {
    async fn fetch_token(&self) -> Result<FederatedToken> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.token.clone())
    }
}

/// Unsigned JWT carrying only `exp` and `sub`.
pub fn jwt_with_exp(exp: DateTime<Utc>) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let header = engine.encode(json!({"alg": "RS256", "typ": "JWT"}).to_string());
    let payload = engine.encode(
        json!({"exp": exp.timestamp(), "sub": "system:serviceaccount:default:workload"}).to_string(),
    );
    format!("{header}.{payload}.c2lnbmF0dXJl")
}

pub fn env_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Whole-second "now", so values survive a round trip through a JWT `exp` claim.
pub fn now_secs() -> DateTime<Utc> {
    DateTime::from_timestamp(Utc::now().timestamp(), 0).unwrap()
}
