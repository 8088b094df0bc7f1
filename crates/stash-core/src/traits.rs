//! Core traits for stash abstractions.
//!
//! These define the persistence and classifier boundaries the
//! categorization pipeline is written against, so storage and the external
//! classifier can be swapped for fakes in tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::{ClassifierError, Result};
use crate::models::*;

// =============================================================================
// CATEGORY REPOSITORY TRAITS
// =============================================================================

/// Repository for category operations.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List all categories owned by a user, with membership counts.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Category>>;

    /// Create a category.
    ///
    /// Implementations must be idempotent per `(user_id, lowercase(name))`:
    /// when a category with the same normalized name already exists, the
    /// existing row is returned with `inserted == false` instead of
    /// creating a second one.
    async fn create(&self, req: CreateCategoryRequest) -> Result<CategoryUpsert>;

    /// Fetch a category owned by `user_id`.
    async fn get(&self, id: Uuid, user_id: Uuid) -> Result<Category>;

    /// Update name, color or icon. Empty fields keep the stored value.
    async fn update(&self, id: Uuid, user_id: Uuid, req: UpdateCategoryRequest) -> Result<()>;

    /// Delete a category and its assignments.
    async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<()>;
}

// =============================================================================
// ASSIGNMENT REPOSITORY TRAITS
// =============================================================================

/// Repository for the bookmark↔category relation.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    /// Assign a bookmark to a category. Re-assigning an existing pair
    /// succeeds as a no-op. Both rows must belong to `user_id`.
    async fn assign(&self, bookmark_id: Uuid, category_id: Uuid, user_id: Uuid) -> Result<()>;

    /// Remove an assignment. Removing a missing pair is not an error.
    async fn unassign(&self, bookmark_id: Uuid, category_id: Uuid, user_id: Uuid) -> Result<()>;

    /// Categories a bookmark is assigned to.
    async fn categories_for_bookmark(&self, bookmark_id: Uuid) -> Result<Vec<Category>>;
}

// =============================================================================
// BOOKMARK / USER REPOSITORY TRAITS
// =============================================================================

/// Repository for bookmark operations.
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Insert a bookmark. Returns `None` when `(user_id, tweet_id)` already
    /// exists.
    async fn insert(&self, req: CreateBookmarkRequest) -> Result<Option<Bookmark>>;

    /// Fetch a bookmark owned by `user_id`.
    async fn get(&self, id: Uuid, user_id: Uuid) -> Result<Bookmark>;

    /// Bookmarks with no category assignment, newest first.
    async fn list_uncategorized(&self, user_id: Uuid, limit: i64) -> Result<Vec<Bookmark>>;
}

/// Repository for user lookups.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by id.
    async fn get(&self, id: Uuid) -> Result<User>;
}

// =============================================================================
// CLASSIFIER TRAITS
// =============================================================================

/// External text classifier suggesting category labels.
#[async_trait]
pub trait LabelClassifier: Send + Sync {
    /// Suggest up to two labels for `text`, preferring names from
    /// `known_labels`.
    ///
    /// `text` must be non-empty after trimming. Exactly one attempt is made.
    async fn classify(
        &self,
        text: &str,
        known_labels: &[String],
    ) -> std::result::Result<Vec<String>, ClassifierError>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}

// =============================================================================
// AUTH TRAITS
// =============================================================================

/// Store for single-use OAuth `state` parameters.
#[async_trait]
pub trait OAuthStateStore: Send + Sync {
    /// Issue and remember a new random state token.
    async fn issue(&self) -> Result<String>;

    /// Consume a state token. Returns `true` exactly once per issued,
    /// unexpired token.
    async fn consume(&self, state: &str) -> Result<bool>;
}
