//! # stash-db
//!
//! PostgreSQL database layer for stash.
//!
//! This crate provides the PostgreSQL implementations of the repository
//! traits defined in `stash-core`:
//! - Categories, with case-insensitive idempotent creation
//! - Bookmark/category assignments
//! - Bookmarks and users
//! - OAuth `state` tokens
//!
//! # Feature Flags
//!
//! - `migrations`: embed the schema migrations and enable [`Database::migrate`]

pub mod assignments;
pub mod bookmarks;
pub mod categories;
pub mod oauth_state;
pub mod pool;
pub mod test_fixtures;
pub mod users;

pub use assignments::PgAssignmentRepository;
pub use bookmarks::PgBookmarkRepository;
pub use categories::PgCategoryRepository;
pub use oauth_state::PgOAuthStateRepository;
pub use pool::{create_pool, create_pool_with_config, PoolConfig};
pub use users::PgUserRepository;

use stash_core::Result;

#[cfg(feature = "migrations")]
use stash_core::Error;

/// Combined database access.
pub struct Database {
    pool: sqlx::Pool<sqlx::Postgres>,
    pub users: PgUserRepository,
    pub bookmarks: PgBookmarkRepository,
    pub categories: PgCategoryRepository,
    pub assignments: PgAssignmentRepository,
    pub oauth_states: PgOAuthStateRepository,
}

impl Database {
    /// Create a new Database instance from an existing pool.
    pub fn new(pool: sqlx::Pool<sqlx::Postgres>) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            bookmarks: PgBookmarkRepository::new(pool.clone()),
            categories: PgCategoryRepository::new(pool.clone()),
            assignments: PgAssignmentRepository::new(pool.clone()),
            oauth_states: PgOAuthStateRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::Pool<sqlx::Postgres> {
        &self.pool
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}
