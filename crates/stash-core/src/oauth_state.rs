//! In-memory OAuth state store.
//!
//! Suitable for a single API process. Multi-instance deployments use the
//! PostgreSQL store in `stash-db`.

use std::collections::HashMap;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use tokio::sync::Mutex;
use tracing::debug;

use crate::defaults::{OAUTH_STATE_BYTES, OAUTH_STATE_TTL_SECS};
use crate::error::Result;
use crate::traits::OAuthStateStore;

/// Generate a random URL-safe state token.
pub fn generate_state_token() -> String {
    let mut bytes = [0u8; OAUTH_STATE_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE.encode(bytes)
}

/// OAuth state store backed by a process-local map.
pub struct InMemoryStateStore {
    ttl: Duration,
    states: Mutex<HashMap<String, DateTime<Utc>>>,
}

impl InMemoryStateStore {
    /// Create a store with the default token lifetime.
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(OAUTH_STATE_TTL_SECS))
    }

    /// Create a store with a custom token lifetime.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Number of outstanding (unconsumed) tokens, including expired ones not
    /// yet swept.
    pub async fn len(&self) -> usize {
        self.states.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OAuthStateStore for InMemoryStateStore {
    async fn issue(&self) -> Result<String> {
        let state = generate_state_token();
        let now = Utc::now();
        let mut states = self.states.lock().await;
        states.retain(|_, expires_at| *expires_at > now);
        states.insert(state.clone(), now + self.ttl);
        debug!(
            subsystem = "auth",
            component = "oauth_state",
            outstanding = states.len(),
            "Issued OAuth state token"
        );
        Ok(state)
    }

    async fn consume(&self, state: &str) -> Result<bool> {
        let expires_at = self.states.lock().await.remove(state);
        Ok(matches!(expires_at, Some(t) if t > Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_url_safe() {
        let token = generate_state_token();
        assert_eq!(token.len(), 44);
        assert!(!token.contains('+') && !token.contains('/'));
        assert_ne!(token, generate_state_token());
    }

    #[tokio::test]
    async fn test_state_is_single_use() {
        let store = InMemoryStateStore::new();
        let state = store.issue().await.unwrap();

        assert!(store.consume(&state).await.unwrap());
        assert!(!store.consume(&state).await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_unknown_state_rejected() {
        let store = InMemoryStateStore::new();
        assert!(!store.consume("never-issued").await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_state_rejected() {
        let store = InMemoryStateStore::with_ttl(Duration::seconds(-1));
        let state = store.issue().await.unwrap();
        assert!(!store.consume(&state).await.unwrap());
    }

    #[tokio::test]
    async fn test_stores_are_independent() {
        let a = InMemoryStateStore::new();
        let b = InMemoryStateStore::new();
        let state = a.issue().await.unwrap();
        assert!(!b.consume(&state).await.unwrap());
        assert!(a.consume(&state).await.unwrap());
    }
}
