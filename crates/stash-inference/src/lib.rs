//! # stash-inference
//!
//! Text classifier backend for stash.
//!
//! This crate provides:
//! - The Messages API classifier (`anthropic`), one attempt per call
//! - Categorization prompt construction
//! - Parsing of raw model output into at most two label names
//! - A scripted mock classifier (feature `mock`)
//!
//! # Feature Flags
//!
//! - `mock`: Enable `MockClassifier` for tests in dependent crates

pub mod anthropic;
pub mod parse;
pub mod prompt;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use anthropic::{AnthropicClassifier, ApiErrorCode, ClassifierConfig};
pub use parse::parse_labels;
pub use prompt::build_categorization_prompt;
