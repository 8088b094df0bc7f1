//! PostgreSQL OAuth state store, shared by every API instance.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::{Pool, Postgres, Row};
use tracing::debug;

use stash_core::defaults::OAUTH_STATE_TTL_SECS;
use stash_core::{generate_state_token, Error, OAuthStateStore, Result};

/// PostgreSQL implementation of OAuthStateStore.
pub struct PgOAuthStateRepository {
    pool: Pool<Postgres>,
    ttl: Duration,
}

impl PgOAuthStateRepository {
    /// Create a new PgOAuthStateRepository with the default token lifetime.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            pool,
            ttl: Duration::seconds(OAUTH_STATE_TTL_SECS),
        }
    }

    /// Override the token lifetime.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

#[async_trait]
impl OAuthStateStore for PgOAuthStateRepository {
    async fn issue(&self) -> Result<String> {
        let state = generate_state_token();
        let now = Utc::now();

        let swept = sqlx::query("DELETE FROM oauth_states WHERE expires_at <= $1")
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?
            .rows_affected();

        sqlx::query("INSERT INTO oauth_states (state, expires_at) VALUES ($1, $2)")
            .bind(&state)
            .bind(now + self.ttl)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        debug!(
            subsystem = "auth",
            component = "oauth_state",
            swept,
            "Issued OAuth state token"
        );
        Ok(state)
    }

    async fn consume(&self, state: &str) -> Result<bool> {
        // DELETE .. RETURNING makes the check-and-remove atomic across instances.
        let row = sqlx::query("DELETE FROM oauth_states WHERE state = $1 RETURNING expires_at")
            .bind(state)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row
            .map(|r| r.get::<DateTime<Utc>, _>("expires_at") > Utc::now())
            .unwrap_or(false))
    }
}
