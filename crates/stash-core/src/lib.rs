//! # stash-core
//!
//! Core types, traits, and abstractions for the stash bookmark backend.
//!
//! This crate provides the domain models, the persistence and classifier
//! traits the categorization pipeline is written against, and the two pure
//! building blocks of that pipeline: label normalization and default
//! category styling.

pub mod defaults;
pub mod error;
pub mod labels;
pub mod logging;
pub mod models;
pub mod oauth_state;
pub mod styling;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{ClassifierError, Error, Result};
pub use labels::{labels_match, normalize, NormalizedKey};
pub use models::*;
pub use oauth_state::{generate_state_token, InMemoryStateStore};
pub use styling::{style_for, CategoryStyle};
pub use traits::*;
