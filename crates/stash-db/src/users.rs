//! User repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use stash_core::{Error, Result, User, UserRepository};

/// PostgreSQL implementation of UserRepository.
pub struct PgUserRepository {
    pool: Pool<Postgres>,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get(&self, id: Uuid) -> Result<User> {
        let row = sqlx::query(
            r#"
            SELECT id, twitter_id, username, display_name, profile_image,
                   auto_categorize, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or_else(|| Error::NotFound(format!("User {}", id)))?;

        Ok(User {
            id: row.get("id"),
            twitter_id: row.get("twitter_id"),
            username: row.get("username"),
            display_name: row.get("display_name"),
            profile_image: row.get("profile_image"),
            auto_categorize: row.get("auto_categorize"),
            created_at: row.get("created_at"),
        })
    }
}
