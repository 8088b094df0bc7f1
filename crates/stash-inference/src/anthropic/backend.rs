//! Messages API classifier implementation.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info, warn};

use stash_core::defaults::{
    CLASSIFIER_API_VERSION, CLASSIFIER_BASE_URL, CLASSIFIER_MAX_TOKENS, CLASSIFIER_MODEL,
};
use stash_core::{ClassifierError, Error, LabelClassifier, Result};

use super::error::ApiErrorCode;
use super::types::*;
use crate::parse::parse_labels;
use crate::prompt::build_categorization_prompt;

/// Environment variable holding the API credential.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Configuration for the Messages API classifier.
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key. A missing key fails each call, not construction.
    pub api_key: Option<String>,
    /// Model identifier.
    pub model: String,
    /// Output budget per call.
    pub max_tokens: u32,
    /// Value of the `anthropic-version` header.
    pub api_version: String,
    /// HTTP request timeout. `None` leaves the call unbounded; the caller's
    /// cancellation token is then the only limit.
    pub timeout_seconds: Option<u64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            base_url: CLASSIFIER_BASE_URL.to_string(),
            api_key: None,
            model: CLASSIFIER_MODEL.to_string(),
            max_tokens: CLASSIFIER_MAX_TOKENS,
            api_version: CLASSIFIER_API_VERSION.to_string(),
            timeout_seconds: None,
        }
    }
}

impl ClassifierConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `ANTHROPIC_API_KEY` | unset |
    /// | `ANTHROPIC_BASE_URL` | `https://api.anthropic.com/v1` |
    /// | `ANTHROPIC_MODEL` | `claude-3-haiku-20240307` |
    /// | `ANTHROPIC_MAX_TOKENS` | `200` |
    /// | `ANTHROPIC_TIMEOUT` | unset (seconds) |
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("ANTHROPIC_BASE_URL")
                .unwrap_or_else(|_| CLASSIFIER_BASE_URL.to_string()),
            api_key: std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty()),
            model: std::env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| CLASSIFIER_MODEL.to_string()),
            max_tokens: std::env::var("ANTHROPIC_MAX_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(CLASSIFIER_MAX_TOKENS),
            api_version: CLASSIFIER_API_VERSION.to_string(),
            timeout_seconds: std::env::var("ANTHROPIC_TIMEOUT")
                .ok()
                .and_then(|s| s.parse().ok()),
        }
    }
}

/// Classifier backed by the Messages API.
pub struct AnthropicClassifier {
    client: Client,
    config: ClassifierConfig,
}

impl AnthropicClassifier {
    /// Create a new classifier with the given configuration.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            subsystem = "inference",
            component = "anthropic",
            base_url = %config.base_url,
            model = %config.model,
            has_api_key = config.api_key.is_some(),
            "Initializing classifier backend"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClassifierConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/messages", self.config.base_url.trim_end_matches('/'))
    }

    /// Send one prompt and return the text of the first content block.
    async fn complete(&self, prompt: String) -> std::result::Result<String, ClassifierError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ClassifierError::MissingCredentials(API_KEY_ENV.to_string()))?;

        let request = MessagesRequest {
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            messages: vec![Message::user(prompt)],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.config.api_version)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ClassifierError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error_type = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|r| r.error.error_type)
                .unwrap_or_default();
            let code = ApiErrorCode::from_response(status.as_u16(), &error_type);
            warn!(
                subsystem = "inference",
                component = "anthropic",
                status = status.as_u16(),
                code = code.as_str(),
                "Classifier returned non-success status"
            );
            return Err(ClassifierError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let result: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::MalformedResponse(e.to_string()))?;

        result
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or(ClassifierError::EmptyResponse)
    }
}

#[async_trait]
impl LabelClassifier for AnthropicClassifier {
    async fn classify(
        &self,
        text: &str,
        known_labels: &[String],
    ) -> std::result::Result<Vec<String>, ClassifierError> {
        let start = Instant::now();
        let prompt = build_categorization_prompt(text, known_labels);

        debug!(
            subsystem = "inference",
            component = "anthropic",
            op = "classify",
            model = %self.config.model,
            prompt_len = prompt.len(),
            known_labels = known_labels.len(),
            "Classifying text"
        );

        let raw = self.complete(prompt).await?;
        let labels = parse_labels(&raw);

        debug!(
            subsystem = "inference",
            component = "anthropic",
            op = "classify",
            duration_ms = start.elapsed().as_millis() as u64,
            labels = ?labels,
            "Classification complete"
        );
        Ok(labels)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
