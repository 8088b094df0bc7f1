//! Batch categorization pipeline.
//!
//! One sequential pass per batch: load the user's categories, then for each
//! item classify its text, resolve each suggested label to a category
//! (creating it when new) and assign the item to it. Only the initial
//! category load can fail the batch; every later failure is logged and
//! reduces the summary counts.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, trace, warn, Span};
use uuid::Uuid;

use stash_core::defaults::UNCATEGORIZED_BATCH_LIMIT;
use stash_core::{
    logging, AssignmentRepository, BatchItem, BookmarkImportItem, BookmarkRepository,
    CategorizeSummary, CategoryRepository, CreateBookmarkRequest, Error, ImportSummary,
    LabelClassifier, Result, UserRepository,
};
use stash_db::{
    Database, PgAssignmentRepository, PgBookmarkRepository, PgCategoryRepository,
    PgUserRepository,
};

use crate::outcome::{AppliedLabel, ItemOutcome, SkipReason};
use crate::reconciler::CategoryReconciler;
use crate::run_state::BatchRunState;

/// Failure that aborts a whole batch.
#[derive(Error, Debug)]
pub enum CategorizeError {
    /// The user's existing categories could not be loaded.
    #[error("failed to load categories: {0}")]
    LoadCategories(#[source] Error),

    /// The uncategorized bookmarks could not be loaded.
    #[error("failed to load uncategorized bookmarks: {0}")]
    LoadBookmarks(#[source] Error),
}

/// Storage handles used by the pipeline.
#[derive(Clone)]
pub struct Stores {
    pub categories: Arc<dyn CategoryRepository>,
    pub assignments: Arc<dyn AssignmentRepository>,
    pub bookmarks: Arc<dyn BookmarkRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Stores {
    /// PostgreSQL-backed stores sharing the database's pool.
    pub fn postgres(db: &Database) -> Self {
        let pool = db.pool().clone();
        Self {
            categories: Arc::new(PgCategoryRepository::new(pool.clone())),
            assignments: Arc::new(PgAssignmentRepository::new(pool.clone())),
            bookmarks: Arc::new(PgBookmarkRepository::new(pool.clone())),
            users: Arc::new(PgUserRepository::new(pool)),
        }
    }
}

/// Runs categorization batches for any user.
#[derive(Clone)]
pub struct BatchCategorizer {
    stores: Stores,
    classifier: Arc<dyn LabelClassifier>,
    reconciler: CategoryReconciler,
}

impl BatchCategorizer {
    pub fn new(stores: Stores, classifier: Arc<dyn LabelClassifier>) -> Self {
        let reconciler = CategoryReconciler::new(stores.categories.clone());
        Self {
            stores,
            classifier,
            reconciler,
        }
    }

    /// Categorize `items` for `user_id`.
    ///
    /// Items are processed in order. The token is checked before each item,
    /// and an in-flight classifier call is abandoned when it fires; the
    /// summary then reflects the items finished so far. `total_processed`
    /// is always the batch length.
    #[instrument(
        skip_all,
        fields(
            subsystem = "categorize",
            component = "orchestrator",
            op = "categorize",
            user_id = %user_id,
            item_count = items.len(),
            categorized = tracing::field::Empty,
            new_categories = tracing::field::Empty,
        )
    )]
    pub async fn categorize(
        &self,
        user_id: Uuid,
        items: &[BatchItem],
        cancel: &CancellationToken,
    ) -> std::result::Result<CategorizeSummary, CategorizeError> {
        let start = Instant::now();

        let existing = self
            .stores
            .categories
            .list_for_user(user_id)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to load categories, aborting batch");
                CategorizeError::LoadCategories(e)
            })?;
        let mut state = BatchRunState::seed(user_id, &existing);

        let mut summary = CategorizeSummary {
            total_processed: items.len(),
            ..Default::default()
        };
        if items.is_empty() {
            return Ok(summary);
        }

        info!(
            existing_categories = existing.len(),
            model = self.classifier.model_name(),
            "Starting categorization batch"
        );

        for (index, item) in items.iter().enumerate() {
            if cancel.is_cancelled() {
                info!(processed = index, "Categorization cancelled");
                break;
            }
            trace!(bookmark_id = %item.id, index, "Processing item");

            let Some(outcome) = self.process_item(&mut state, item, cancel).await else {
                info!(processed = index, "Categorization cancelled during classification");
                break;
            };
            summary.categorized += outcome.assigned_count();
            summary.new_categories += outcome.created_count();
        }

        let span = Span::current();
        span.record(logging::CATEGORIZED, summary.categorized as u64);
        span.record(logging::NEW_CATEGORIES, summary.new_categories as u64);
        info!(
            duration_ms = start.elapsed().as_millis() as u64,
            "Categorization batch complete"
        );
        Ok(summary)
    }

    /// Classify, resolve and assign one item. `None` means the token fired
    /// while the classifier call was in flight.
    async fn process_item(
        &self,
        state: &mut BatchRunState,
        item: &BatchItem,
        cancel: &CancellationToken,
    ) -> Option<ItemOutcome> {
        if item.is_blank() {
            trace!(bookmark_id = %item.id, reason = "blank text", "Skipping item");
            return Some(ItemOutcome::Skipped {
                reason: SkipReason::BlankText,
            });
        }

        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => return None,
            result = self.classifier.classify(&item.text, state.known_labels()) => result,
        };

        let labels = match result {
            Ok(labels) => labels,
            Err(e) => {
                warn!(
                    bookmark_id = %item.id,
                    error = %e,
                    "Classification failed, skipping item"
                );
                return Some(ItemOutcome::Skipped {
                    reason: SkipReason::Classifier(e.to_string()),
                });
            }
        };

        let mut applied = Vec::with_capacity(labels.len());
        for label in labels {
            if label.is_empty() {
                continue;
            }
            let outcome = self.reconciler.resolve(state, &label).await;
            let assigned = match outcome.category_id() {
                Some(category_id) => self.assign(item.id, category_id, state.user_id()).await,
                None => false,
            };
            applied.push(AppliedLabel {
                label,
                outcome,
                assigned,
            });
        }

        debug!(
            bookmark_id = %item.id,
            labels = ?applied.iter().map(|l| l.label.as_str()).collect::<Vec<_>>(),
            "Item categorized"
        );
        Some(ItemOutcome::Applied { labels: applied })
    }

    async fn assign(&self, bookmark_id: Uuid, category_id: Uuid, user_id: Uuid) -> bool {
        match self
            .stores
            .assignments
            .assign(bookmark_id, category_id, user_id)
            .await
        {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    bookmark_id = %bookmark_id,
                    category_id = %category_id,
                    error = %e,
                    "Assignment failed"
                );
                false
            }
        }
    }

    /// Categorize up to `limit` of the user's bookmarks that have no
    /// category, newest first.
    pub async fn categorize_uncategorized(
        &self,
        user_id: Uuid,
        limit: Option<i64>,
        cancel: &CancellationToken,
    ) -> std::result::Result<CategorizeSummary, CategorizeError> {
        let limit = limit.unwrap_or(UNCATEGORIZED_BATCH_LIMIT);
        let bookmarks = self
            .stores
            .bookmarks
            .list_uncategorized(user_id, limit)
            .await
            .map_err(CategorizeError::LoadBookmarks)?;

        let items: Vec<BatchItem> = bookmarks.iter().map(BatchItem::from).collect();
        self.categorize(user_id, &items, cancel).await
    }

    /// Suggest labels for one bookmark without persisting anything.
    ///
    /// Classifier failures are returned to the caller. A bookmark with blank
    /// text yields no suggestions.
    pub async fn suggest(&self, user_id: Uuid, bookmark_id: Uuid) -> Result<Vec<String>> {
        let bookmark = self.stores.bookmarks.get(bookmark_id, user_id).await?;
        let item = bookmark.as_batch_item();
        if item.is_blank() {
            return Ok(Vec::new());
        }

        let known: Vec<String> = self
            .stores
            .categories
            .list_for_user(user_id)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();

        Ok(self.classifier.classify(&item.text, &known).await?)
    }

    /// Insert imported bookmarks, then categorize the new ones when the user
    /// has auto-categorization enabled.
    ///
    /// Any insert that does not produce a row counts as a duplicate. A failed
    /// categorization pass leaves `auto_categorized` at zero; the import
    /// itself still succeeds.
    #[instrument(
        skip_all,
        fields(subsystem = "categorize", component = "import", user_id = %user_id)
    )]
    pub async fn import_bookmarks(
        &self,
        user_id: Uuid,
        items: &[BookmarkImportItem],
        cancel: &CancellationToken,
    ) -> ImportSummary {
        let now = Utc::now();
        let mut summary = ImportSummary::default();
        let mut imported = Vec::new();

        for item in items {
            let req = CreateBookmarkRequest {
                user_id,
                tweet_id: item.tweet_id.clone(),
                tweet_text: item.tweet_text.clone(),
                author_username: item.author_username.clone(),
                author_display_name: item.author_display_name.clone(),
                tweet_url: item.tweet_url.clone(),
                media_urls: item.media_urls.clone(),
                bookmarked_at: item.bookmarked_at_or(now),
            };
            match self.stores.bookmarks.insert(req).await {
                Ok(Some(bookmark)) => {
                    summary.imported += 1;
                    imported.push(bookmark.as_batch_item());
                }
                Ok(None) => summary.duplicates += 1,
                Err(e) => {
                    warn!(tweet_id = %item.tweet_id, error = %e, "Bookmark insert failed");
                    summary.duplicates += 1;
                }
            }
        }

        if !imported.is_empty() {
            summary.auto_categorized = self.auto_categorize(user_id, &imported, cancel).await;
        }

        info!(
            imported = summary.imported,
            duplicates = summary.duplicates,
            auto_categorized = summary.auto_categorized,
            "Import complete"
        );
        summary
    }

    /// Categorize freshly imported items if the user opted in. Returns the
    /// number of assignments made.
    async fn auto_categorize(
        &self,
        user_id: Uuid,
        items: &[BatchItem],
        cancel: &CancellationToken,
    ) -> usize {
        match self.stores.users.get(user_id).await {
            Ok(user) if user.auto_categorize => {}
            Ok(_) => return 0,
            Err(e) => {
                warn!(error = %e, "User lookup failed, skipping auto-categorization");
                return 0;
            }
        }

        match self.categorize(user_id, items, cancel).await {
            Ok(result) => result.categorized,
            Err(e) => {
                error!(error = %e, "Auto-categorization failed");
                0
            }
        }
    }
}
