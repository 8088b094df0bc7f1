//! Domain models for stash.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// USER
// =============================================================================

/// An authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub twitter_id: String,
    pub username: String,
    pub display_name: String,
    pub profile_image: String,
    /// Categorize newly imported bookmarks automatically.
    pub auto_categorize: bool,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// BOOKMARK
// =============================================================================

/// A saved tweet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: Uuid,
    pub user_id: Uuid,
    pub tweet_id: String,
    pub tweet_text: String,
    pub author_username: String,
    pub author_display_name: String,
    pub tweet_url: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
    pub bookmarked_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    /// The categorization view of this bookmark.
    pub fn as_batch_item(&self) -> BatchItem {
        BatchItem {
            id: self.id,
            text: self.tweet_text.clone(),
        }
    }
}

/// One item fed to the categorization pipeline: an id and the text to
/// classify.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchItem {
    pub id: Uuid,
    pub text: String,
}

impl BatchItem {
    pub fn new(id: Uuid, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }

    /// True when the text is empty after trimming; such items are never
    /// sent to the classifier.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

impl From<&Bookmark> for BatchItem {
    fn from(b: &Bookmark) -> Self {
        b.as_batch_item()
    }
}

/// One entry of a bookmark import payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmarkImportItem {
    pub tweet_id: String,
    pub tweet_text: String,
    #[serde(default)]
    pub author_username: String,
    #[serde(default)]
    pub author_display_name: String,
    #[serde(default)]
    pub tweet_url: String,
    #[serde(default)]
    pub media_urls: Vec<String>,
    /// RFC 3339 timestamp; unparseable values fall back to the import time.
    #[serde(default)]
    pub bookmarked_at: String,
}

impl BookmarkImportItem {
    /// Parse `bookmarked_at`, falling back to `now` when absent or invalid.
    pub fn bookmarked_at_or(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(&self.bookmarked_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(now)
    }
}

/// Request for inserting a bookmark.
#[derive(Debug, Clone)]
pub struct CreateBookmarkRequest {
    pub user_id: Uuid,
    pub tweet_id: String,
    pub tweet_text: String,
    pub author_username: String,
    pub author_display_name: String,
    pub tweet_url: String,
    pub media_urls: Vec<String>,
    pub bookmarked_at: DateTime<Utc>,
}

// =============================================================================
// CATEGORY
// =============================================================================

/// A user-owned label with display styling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    /// Number of bookmarks assigned (computed)
    #[serde(default)]
    pub count: i64,
}

/// Request for creating a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCategoryRequest {
    pub user_id: Uuid,
    pub name: String,
    pub color: String,
    pub icon: String,
}

impl CreateCategoryRequest {
    /// Build a request styled with the default color and icon for `name`.
    pub fn styled(user_id: Uuid, name: impl Into<String>) -> Self {
        let name = name.into();
        let style = crate::styling::style_for(&name);
        Self {
            user_id,
            name,
            color: style.color.to_string(),
            icon: style.icon.to_string(),
        }
    }
}

/// Result of an idempotent category create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryUpsert {
    pub category: Category,
    /// False when a category with the same normalized name already existed
    /// and was returned instead.
    pub inserted: bool,
}

/// Partial category update. Empty or absent fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<String>,
}

// =============================================================================
// RESULTS
// =============================================================================

/// Aggregate counts returned by a categorization run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorizeSummary {
    /// Successful bookmark→category assignments.
    pub categorized: usize,
    /// Categories created during the run.
    pub new_categories: usize,
    /// Bookmarks submitted to the run.
    pub total_processed: usize,
}

/// Result of a bookmark import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub duplicates: usize,
    /// Assignments made by auto-categorization (0 when disabled).
    #[serde(skip_serializing_if = "is_zero")]
    pub auto_categorized: usize,
}

fn is_zero(n: &usize) -> bool {
    *n == 0
}
