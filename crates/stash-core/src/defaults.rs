//! Centralized default constants for stash.
//!
//! Crates and the operator binary reference these instead of defining their
//! own magic numbers.

// =============================================================================
// CLASSIFIER
// =============================================================================

/// Default classifier model.
pub const CLASSIFIER_MODEL: &str = "claude-3-haiku-20240307";

/// Default output budget for one classification call.
pub const CLASSIFIER_MAX_TOKENS: u32 = 200;

/// Messages API version header value.
pub const CLASSIFIER_API_VERSION: &str = "2023-06-01";

/// Default Messages API base URL.
pub const CLASSIFIER_BASE_URL: &str = "https://api.anthropic.com/v1";

/// Maximum labels kept from one classifier response.
pub const MAX_SUGGESTED_LABELS: usize = 2;

/// Labels longer than this many characters are discarded as malformed output.
pub const MAX_LABEL_LEN: usize = 50;

// =============================================================================
// CATEGORIZATION
// =============================================================================

/// Default number of uncategorized bookmarks swept per run.
pub const UNCATEGORIZED_BATCH_LIMIT: i64 = 50;

// =============================================================================
// AUTH
// =============================================================================

/// Random bytes per OAuth state token (before base64).
pub const OAUTH_STATE_BYTES: usize = 32;

/// Lifetime of an issued OAuth state token, in seconds.
pub const OAUTH_STATE_TTL_SECS: i64 = 600;
