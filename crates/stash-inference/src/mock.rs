//! Mock classifier for deterministic testing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stash_inference::mock::MockClassifier;
//!
//! let classifier = MockClassifier::new()
//!     .with_response("rust ownership explained", "Coding, Tutorial")
//!     .with_failure("rate limited tweet");
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use stash_core::{ClassifierError, LabelClassifier};

use crate::parse::parse_labels;

/// One recorded `classify` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockCall {
    pub text: String,
    pub known_labels: Vec<String>,
}

#[derive(Debug, Clone, Default)]
struct MockConfig {
    responses: HashMap<String, String>,
    failures: HashSet<String>,
    default_response: String,
}

/// Scripted classifier. Raw responses go through the same parser as the
/// real backend, so label capping and trimming behave identically.
#[derive(Clone)]
pub struct MockClassifier {
    config: Arc<MockConfig>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

impl MockClassifier {
    /// Create a mock that answers every text with an empty response.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Raw response returned for texts without a mapping.
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_response = response.into();
        self
    }

    /// Raw response returned for a specific text.
    pub fn with_response(mut self, text: impl Into<String>, response: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config)
            .responses
            .insert(text.into(), response.into());
        self
    }

    /// Fail with a status error for a specific text.
    pub fn with_failure(mut self, text: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).failures.insert(text.into());
        self
    }

    /// Get all logged calls for assertion.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Get number of classify calls.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }
}

impl Default for MockClassifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LabelClassifier for MockClassifier {
    async fn classify(
        &self,
        text: &str,
        known_labels: &[String],
    ) -> Result<Vec<String>, ClassifierError> {
        self.call_log.lock().unwrap().push(MockCall {
            text: text.to_string(),
            known_labels: known_labels.to_vec(),
        });

        if self.config.failures.contains(text) {
            return Err(ClassifierError::Status {
                status: 429,
                body: "simulated failure".to_string(),
            });
        }

        let raw = self
            .config
            .responses
            .get(text)
            .unwrap_or(&self.config.default_response);
        Ok(parse_labels(raw))
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mapped_response_is_parsed() {
        let classifier = MockClassifier::new().with_response("a", "\"Tech, AI, Extra\"");
        let labels = classifier.classify("a", &[]).await.unwrap();
        assert_eq!(labels, vec!["Tech", "AI"]);
    }

    #[tokio::test]
    async fn test_default_response() {
        let classifier = MockClassifier::new().with_default_response("News");
        assert_eq!(classifier.classify("anything", &[]).await.unwrap(), vec!["News"]);
        assert!(MockClassifier::new().classify("x", &[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_and_call_log() {
        let classifier = MockClassifier::new().with_failure("bad");
        let known = vec!["Tech".to_string()];

        assert!(classifier.classify("bad", &known).await.is_err());
        classifier.classify("good", &known).await.unwrap();

        assert_eq!(classifier.call_count(), 2);
        assert_eq!(classifier.calls()[0].known_labels, known);
        assert_eq!(classifier.calls()[1].text, "good");
    }
}
