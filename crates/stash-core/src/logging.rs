//! Structured logging schema and field name constants for stash.
//!
//! All crates use these names for structured `tracing` fields so log
//! aggregation can query by the same keys across subsystems.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Swallowed per-item or per-label failure, batch continues |
//! | INFO  | Batch start/finish, lifecycle events |
//! | DEBUG | Decision points (label resolved, category created) |
//! | TRACE | Per-item iteration |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Subsystem originating the log event.
/// Values: "database", "inference", "categorize", "auth"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "orchestrator", "reconciler", "anthropic", "pool"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "categorize", "resolve", "classify", "assign"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// User UUID owning the batch.
pub const USER_ID: &str = "user_id";

/// Bookmark UUID being categorized.
pub const BOOKMARK_ID: &str = "bookmark_id";

/// Category UUID resolved or created.
pub const CATEGORY_ID: &str = "category_id";

/// Suggested label text.
pub const LABEL: &str = "label";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Number of items in a batch.
pub const ITEM_COUNT: &str = "item_count";

/// Number of successful assignments.
pub const CATEGORIZED: &str = "categorized";

/// Number of categories created during a run.
pub const NEW_CATEGORIES: &str = "new_categories";

/// Byte length of a prompt.
pub const PROMPT_LEN: &str = "prompt_len";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for classification.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Reason an item or label was skipped.
pub const SKIP_REASON: &str = "reason";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
