//! Resolve suggested labels to category ids, creating categories on demand.

use std::sync::Arc;

use tracing::{debug, warn};

use stash_core::{CategoryRepository, CategoryUpsert, CreateCategoryRequest};

use crate::outcome::{LabelOutcome, SkipReason};
use crate::run_state::BatchRunState;

/// Maps labels to categories for one user, backed by storage.
#[derive(Clone)]
pub struct CategoryReconciler {
    categories: Arc<dyn CategoryRepository>,
}

impl CategoryReconciler {
    pub fn new(categories: Arc<dyn CategoryRepository>) -> Self {
        Self { categories }
    }

    /// Resolve one non-empty label.
    ///
    /// A label already in `state` costs no storage call. Otherwise a
    /// category named after the label (original casing, default styling)
    /// is created and recorded in `state`. When storage already held a
    /// category with that name, the outcome is `Existing`. A failed creation
    /// is logged and reported as skipped.
    pub async fn resolve(&self, state: &mut BatchRunState, label: &str) -> LabelOutcome {
        if let Some(id) = state.lookup(label) {
            debug!(
                subsystem = "categorize",
                component = "reconciler",
                op = "resolve",
                label,
                category_id = %id,
                "Label matched existing category"
            );
            return LabelOutcome::Existing(id);
        }

        let req = CreateCategoryRequest::styled(state.user_id(), label);
        match self.categories.create(req).await {
            Ok(CategoryUpsert { category, inserted }) => {
                state.record(label, category.id);
                if !inserted {
                    debug!(
                        subsystem = "categorize",
                        component = "reconciler",
                        op = "create",
                        label,
                        category_id = %category.id,
                        "Category already existed in storage"
                    );
                    return LabelOutcome::Existing(category.id);
                }
                debug!(
                    subsystem = "categorize",
                    component = "reconciler",
                    op = "create",
                    label,
                    category_id = %category.id,
                    color = %category.color,
                    icon = %category.icon,
                    "Created category"
                );
                LabelOutcome::Created(category.id)
            }
            Err(e) => {
                warn!(
                    subsystem = "categorize",
                    component = "reconciler",
                    op = "create",
                    label,
                    error = %e,
                    "Category creation failed, skipping label"
                );
                LabelOutcome::Skipped {
                    reason: SkipReason::CreateFailed(e.to_string()),
                }
            }
        }
    }
}
