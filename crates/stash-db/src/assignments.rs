//! Bookmark/category assignment repository implementation.

use async_trait::async_trait;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use stash_core::{AssignmentRepository, Category, Error, Result};

use crate::categories::category_from_row;

/// PostgreSQL implementation of AssignmentRepository.
pub struct PgAssignmentRepository {
    pool: Pool<Postgres>,
}

impl PgAssignmentRepository {
    /// Create a new PgAssignmentRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Fail unless both rows exist and belong to `user_id`.
    async fn check_ownership(
        &self,
        bookmark_id: Uuid,
        category_id: Uuid,
        user_id: Uuid,
    ) -> Result<()> {
        let row = sqlx::query(
            r#"
            SELECT
                EXISTS (SELECT 1 FROM bookmarks WHERE id = $1 AND user_id = $3) AS bookmark_owned,
                EXISTS (SELECT 1 FROM categories WHERE id = $2 AND user_id = $3) AS category_owned
            "#,
        )
        .bind(bookmark_id)
        .bind(category_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        if !row.get::<bool, _>("bookmark_owned") {
            return Err(Error::BookmarkNotFound(bookmark_id));
        }
        if !row.get::<bool, _>("category_owned") {
            return Err(Error::CategoryNotFound(category_id));
        }
        Ok(())
    }
}

#[async_trait]
impl AssignmentRepository for PgAssignmentRepository {
    async fn assign(&self, bookmark_id: Uuid, category_id: Uuid, user_id: Uuid) -> Result<()> {
        self.check_ownership(bookmark_id, category_id, user_id)
            .await?;

        sqlx::query(
            "INSERT INTO bookmark_categories (bookmark_id, category_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(bookmark_id)
        .bind(category_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }

    async fn unassign(&self, bookmark_id: Uuid, category_id: Uuid, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            DELETE FROM bookmark_categories bc
            USING bookmarks b
            WHERE bc.bookmark_id = $1
              AND bc.category_id = $2
              AND b.id = bc.bookmark_id
              AND b.user_id = $3
            "#,
        )
        .bind(bookmark_id)
        .bind(category_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;
        Ok(())
    }

    async fn categories_for_bookmark(&self, bookmark_id: Uuid) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            r#"
            SELECT
                c.id, c.user_id, c.name, c.color, c.icon, c.created_at,
                (SELECT COUNT(*) FROM bookmark_categories x WHERE x.category_id = c.id) AS count
            FROM categories c
            JOIN bookmark_categories bc ON bc.category_id = c.id
            WHERE bc.bookmark_id = $1
            ORDER BY c.name
            "#,
        )
        .bind(bookmark_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(category_from_row).collect())
    }
}
