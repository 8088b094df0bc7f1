//! Messages API error classification.

/// Error codes derived from a non-success response.
///
/// Used for log context only; no code triggers a retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Invalid or missing API key.
    AuthenticationError,
    /// Rate limit exceeded.
    RateLimitExceeded,
    /// Service temporarily overloaded.
    Overloaded,
    /// Request rejected as invalid.
    BadRequest,
    /// Server error.
    ServerError,
    /// Unknown error.
    Unknown,
}

impl ApiErrorCode {
    /// Determine error code from HTTP status and error type.
    pub fn from_response(status: u16, error_type: &str) -> Self {
        match (status, error_type) {
            (401, _) | (403, _) | (_, "authentication_error") => Self::AuthenticationError,
            (429, _) | (_, "rate_limit_error") => Self::RateLimitExceeded,
            (529, _) | (_, "overloaded_error") => Self::Overloaded,
            (400, _) | (_, "invalid_request_error") => Self::BadRequest,
            (500..=599, _) => Self::ServerError,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AuthenticationError => "authentication",
            Self::RateLimitExceeded => "rate_limit",
            Self::Overloaded => "overloaded",
            Self::BadRequest => "bad_request",
            Self::ServerError => "server_error",
            Self::Unknown => "unknown",
        }
    }
}
