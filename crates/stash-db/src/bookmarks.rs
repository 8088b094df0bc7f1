//! Bookmark repository implementation.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{Pool, Postgres, Row};
use uuid::Uuid;

use stash_core::{Bookmark, BookmarkRepository, CreateBookmarkRequest, Error, Result};

const BOOKMARK_COLUMNS: &str = "id, user_id, tweet_id, tweet_text, author_username, \
     author_display_name, tweet_url, media_urls, bookmarked_at, created_at";

fn bookmark_from_row(row: &PgRow) -> Bookmark {
    Bookmark {
        id: row.get("id"),
        user_id: row.get("user_id"),
        tweet_id: row.get("tweet_id"),
        tweet_text: row.get("tweet_text"),
        author_username: row.get("author_username"),
        author_display_name: row.get("author_display_name"),
        tweet_url: row.get("tweet_url"),
        media_urls: row.get("media_urls"),
        bookmarked_at: row.get("bookmarked_at"),
        created_at: row.get("created_at"),
    }
}

/// PostgreSQL implementation of BookmarkRepository.
pub struct PgBookmarkRepository {
    pool: Pool<Postgres>,
}

impl PgBookmarkRepository {
    /// Create a new PgBookmarkRepository with the given connection pool.
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookmarkRepository for PgBookmarkRepository {
    async fn insert(&self, req: CreateBookmarkRequest) -> Result<Option<Bookmark>> {
        let sql = format!(
            r#"
            INSERT INTO bookmarks (
                user_id, tweet_id, tweet_text, author_username,
                author_display_name, tweet_url, media_urls, bookmarked_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, tweet_id) DO NOTHING
            RETURNING {BOOKMARK_COLUMNS}
            "#
        );

        let row = sqlx::query(&sql)
            .bind(req.user_id)
            .bind(&req.tweet_id)
            .bind(&req.tweet_text)
            .bind(&req.author_username)
            .bind(&req.author_display_name)
            .bind(&req.tweet_url)
            .bind(&req.media_urls)
            .bind(req.bookmarked_at)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(row.as_ref().map(bookmark_from_row))
    }

    async fn get(&self, id: Uuid, user_id: Uuid) -> Result<Bookmark> {
        let sql = format!("SELECT {BOOKMARK_COLUMNS} FROM bookmarks WHERE id = $1 AND user_id = $2");
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Error::Database)?
            .ok_or(Error::BookmarkNotFound(id))?;

        Ok(bookmark_from_row(&row))
    }

    async fn list_uncategorized(&self, user_id: Uuid, limit: i64) -> Result<Vec<Bookmark>> {
        let sql = format!(
            r#"
            SELECT {BOOKMARK_COLUMNS}
            FROM bookmarks b
            WHERE b.user_id = $1
              AND NOT EXISTS (
                  SELECT 1 FROM bookmark_categories bc WHERE bc.bookmark_id = b.id
              )
            ORDER BY b.created_at DESC
            LIMIT $2
            "#
        );
        let rows = sqlx::query(&sql)
            .bind(user_id)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(Error::Database)?;

        Ok(rows.iter().map(bookmark_from_row).collect())
    }
}
