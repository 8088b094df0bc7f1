//! Tagged results of per-item and per-label work.
//!
//! Failures inside a batch never abort it. They are recorded here, logged,
//! and only reduce the summary counts.

use std::fmt;

use uuid::Uuid;

/// Why an item or label was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Item text is empty after trimming; the classifier was not called.
    BlankText,
    /// The classifier call failed.
    Classifier(String),
    /// Category creation failed.
    CreateFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::BlankText => f.write_str("blank text"),
            SkipReason::Classifier(msg) => write!(f, "classifier failed: {}", msg),
            SkipReason::CreateFailed(msg) => write!(f, "category creation failed: {}", msg),
        }
    }
}

/// Result of resolving one suggested label to a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelOutcome {
    /// Matched a category already in the run state.
    Existing(Uuid),
    /// A new category was created during this run.
    Created(Uuid),
    /// Creation failed; the label is dropped for this item.
    Skipped { reason: SkipReason },
}

impl LabelOutcome {
    /// The resolved category, if any.
    pub fn category_id(&self) -> Option<Uuid> {
        match self {
            LabelOutcome::Existing(id) | LabelOutcome::Created(id) => Some(*id),
            LabelOutcome::Skipped { .. } => None,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, LabelOutcome::Created(_))
    }
}

/// Per-label record within an applied item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedLabel {
    pub label: String,
    pub outcome: LabelOutcome,
    /// Whether the assignment write succeeded.
    pub assigned: bool,
}

/// Result of processing one batch item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Nothing was persisted for the item.
    Skipped { reason: SkipReason },
    /// The classifier answered; each suggested label was resolved.
    Applied { labels: Vec<AppliedLabel> },
}

impl ItemOutcome {
    /// Successful assignments made for this item.
    pub fn assigned_count(&self) -> usize {
        match self {
            ItemOutcome::Skipped { .. } => 0,
            ItemOutcome::Applied { labels } => labels.iter().filter(|l| l.assigned).count(),
        }
    }

    /// Categories created while processing this item.
    pub fn created_count(&self) -> usize {
        match self {
            ItemOutcome::Skipped { .. } => 0,
            ItemOutcome::Applied { labels } => {
                labels.iter().filter(|l| l.outcome.is_created()).count()
            }
        }
    }
}
