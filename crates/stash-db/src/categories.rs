//! Category repository implementation.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use tracing::debug;
use uuid::Uuid;

use stash_core::{
    Category, CategoryRepository, CategoryUpsert, CreateCategoryRequest, Error, Result,
    UpdateCategoryRequest,
};

pub(crate) fn category_from_row(row: &PgRow) -> Category {
    Category {
        id: row.get("id"),
        user_id: row.get("user_id"),
        name: row.get("name"),
        color: row.get("color"),
        icon: row.get("icon"),
        created_at: row.get("created_at"),
        count: row.get("count"),
    }
}

/// Map a unique-index violation on rename to a client error.
fn map_rename_error(err: sqlx::Error, name: &str) -> Error {
    let is_unique = err
        .as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false);
    if is_unique {
        Error::InvalidInput(format!("Category '{}' already exists", name))
    } else {
        Error::Database(err)
    }
}

/// PostgreSQL implementation of CategoryRepository.
pub struct PgCategoryRepository {
    pool: Pool<Postgres>,
}

impl PgCategoryRepository {
    /// Create a new PgCategoryRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Category>> {
        let rows = sqlx::query(
            r#"
            SELECT
                c.id, c.user_id, c.name, c.color, c.icon, c.created_at,
                COUNT(bc.bookmark_id) AS count
            FROM categories c
            LEFT JOIN bookmark_categories bc ON bc.category_id = c.id
            WHERE c.user_id = $1
            GROUP BY c.id
            ORDER BY c.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        Ok(rows.iter().map(category_from_row).collect())
    }

    async fn create(&self, req: CreateCategoryRequest) -> Result<CategoryUpsert> {
        let name = req.name.trim();
        if name.is_empty() {
            return Err(Error::InvalidInput(
                "Category name cannot be empty".to_string(),
            ));
        }

        // The no-op update makes RETURNING yield the existing row on conflict;
        // xmax is 0 only for a freshly inserted tuple.
        let row = sqlx::query(
            r#"
            WITH upserted AS (
                INSERT INTO categories (user_id, name, color, icon)
                VALUES ($1, $2, $3, $4)
                ON CONFLICT (user_id, lower(name)) DO UPDATE SET name = categories.name
                RETURNING id, user_id, name, color, icon, created_at, (xmax = 0) AS inserted
            )
            SELECT
                u.*,
                (SELECT COUNT(*) FROM bookmark_categories bc WHERE bc.category_id = u.id) AS count
            FROM upserted u
            "#,
        )
        .bind(req.user_id)
        .bind(name)
        .bind(&req.color)
        .bind(&req.icon)
        .fetch_one(&self.pool)
        .await
        .map_err(Error::Database)?;

        let category = category_from_row(&row);
        let inserted: bool = row.get("inserted");
        debug!(
            subsystem = "database",
            component = "categories",
            op = "create",
            user_id = %category.user_id,
            category_id = %category.id,
            name = %category.name,
            inserted,
            "Category upserted"
        );
        Ok(CategoryUpsert { category, inserted })
    }

    async fn get(&self, id: Uuid, user_id: Uuid) -> Result<Category> {
        let row = sqlx::query(
            r#"
            SELECT
                c.id, c.user_id, c.name, c.color, c.icon, c.created_at,
                COUNT(bc.bookmark_id) AS count
            FROM categories c
            LEFT JOIN bookmark_categories bc ON bc.category_id = c.id
            WHERE c.id = $1 AND c.user_id = $2
            GROUP BY c.id
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?
        .ok_or(Error::CategoryNotFound(id))?;

        Ok(category_from_row(&row))
    }

    async fn update(&self, id: Uuid, user_id: Uuid, req: UpdateCategoryRequest) -> Result<()> {
        let name = req.name.unwrap_or_default();
        let result = sqlx::query(
            r#"
            UPDATE categories SET
                name = COALESCE(NULLIF($1, ''), name),
                color = COALESCE(NULLIF($2, ''), color),
                icon = COALESCE(NULLIF($3, ''), icon)
            WHERE id = $4 AND user_id = $5
            "#,
        )
        .bind(name.trim())
        .bind(req.color.unwrap_or_default())
        .bind(req.icon.unwrap_or_default())
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_rename_error(e, &name))?;

        if result.rows_affected() == 0 {
            return Err(Error::CategoryNotFound(id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(Error::Database)?;

        if result.rows_affected() == 0 {
            return Err(Error::CategoryNotFound(id));
        }
        Ok(())
    }
}
