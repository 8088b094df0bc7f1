//! Error types for stash.

use thiserror::Error;

/// Result type alias using stash's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for stash operations.
///
/// This is the error surfaced by every persistence call. The categorization
/// pipeline swallows it per category creation and per assignment.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bookmark not found
    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(uuid::Uuid),

    /// Category not found
    #[error("Category not found: {0}")]
    CategoryNotFound(uuid::Uuid),

    /// Classifier call failed
    #[error("Classifier error: {0}")]
    Classifier(#[from] ClassifierError),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Failure of a single call to the external text classifier.
///
/// Each variant is a distinct failure mode of the one attempt the client
/// makes. The batch pipeline treats all of them identically (the item is
/// skipped).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifierError {
    /// No API credential configured
    #[error("classifier credentials not set: {0}")]
    MissingCredentials(String),

    /// Transport failure (connect, timeout, TLS)
    #[error("classifier request failed: {0}")]
    Request(String),

    /// Service answered with a non-success status
    #[error("classifier returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded
    #[error("malformed classifier response: {0}")]
    MalformedResponse(String),

    /// Response decoded but carried no content blocks
    #[error("classifier response contained no content")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_error_display_not_found() {
        let err = Error::NotFound("test resource".to_string());
        assert_eq!(err.to_string(), "Not found: test resource");
    }

    #[test]
    fn test_error_display_bookmark_not_found() {
        let id = Uuid::nil();
        let err = Error::BookmarkNotFound(id);
        assert_eq!(err.to_string(), format!("Bookmark not found: {}", id));
    }

    #[test]
    fn test_error_display_category_not_found() {
        let id = Uuid::new_v4();
        let err = Error::CategoryNotFound(id);
        assert!(err.to_string().contains(&id.to_string()));
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing API key".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing API key");
    }

    #[test]
    fn test_from_classifier_error() {
        let err: Error = ClassifierError::EmptyResponse.into();
        match err {
            Error::Classifier(ClassifierError::EmptyResponse) => {}
            other => panic!("Expected Classifier error, got {:?}", other),
        }
    }

    #[test]
    fn test_classifier_status_display() {
        let err = ClassifierError::Status {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "classifier returned status 429: rate limited");
    }

    #[test]
    fn test_classifier_variants_are_distinct() {
        let missing = ClassifierError::MissingCredentials("ANTHROPIC_API_KEY".into());
        let request = ClassifierError::Request("connection refused".into());
        let malformed = ClassifierError::MalformedResponse("expected value".into());
        assert_ne!(missing, request);
        assert_ne!(request, malformed);
        assert_ne!(malformed, ClassifierError::EmptyResponse);
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number").unwrap_err();
        let err: Error = json_err.into();
        assert!(err.to_string().contains("Serialization error:"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
        assert_send::<ClassifierError>();
        assert_sync::<ClassifierError>();
    }
}
