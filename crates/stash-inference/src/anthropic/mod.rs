//! Messages API classifier backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use stash_inference::anthropic::{AnthropicClassifier, ClassifierConfig};
//! use stash_core::LabelClassifier;
//!
//! #[tokio::main]
//! async fn main() {
//!     let classifier = AnthropicClassifier::new(ClassifierConfig {
//!         api_key: std::env::var("ANTHROPIC_API_KEY").ok(),
//!         ..Default::default()
//!     })
//!     .unwrap();
//!
//!     let known = vec!["Tech".to_string(), "Design".to_string()];
//!     let labels = classifier
//!         .classify("New Figma plugin generates components", &known)
//!         .await
//!         .unwrap();
//!     println!("{:?}", labels);
//! }
//! ```

mod backend;
mod error;
mod types;

pub use backend::{AnthropicClassifier, ClassifierConfig, API_KEY_ENV};
pub use error::ApiErrorCode;
pub use types::*;
