//! # stash-categorize
//!
//! Batch categorization of saved bookmarks.
//!
//! [`BatchCategorizer`] runs the pipeline: classify each item's text,
//! reconcile the suggested labels against the user's categories (creating
//! missing ones with default styling) and assign the item. Per-item and
//! per-label failures are swallowed into [`ItemOutcome`] / [`LabelOutcome`]
//! values and logged; only a failed category load aborts a batch.

pub mod orchestrator;
pub mod outcome;
pub mod reconciler;
pub mod run_state;

pub use orchestrator::{BatchCategorizer, CategorizeError, Stores};
pub use outcome::{AppliedLabel, ItemOutcome, LabelOutcome, SkipReason};
pub use reconciler::CategoryReconciler;
pub use run_state::BatchRunState;

pub use tokio_util::sync::CancellationToken;
