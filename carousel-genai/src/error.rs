//! Error types for backend communication.

use thiserror::Error;

/// Result type for backend operations.
pub type GenAiResult<T> = Result<T, GenAiError>;

/// Errors that can occur when talking to the generative backends.
#[derive(Debug, Error)]
pub enum GenAiError {
    /// The API base URL provided by configuration is invalid.
    #[error("invalid API base URL: {0}")]
    InvalidUrl(String),

    /// HTTP layer failed (connection, timeout, etc.).
    #[error("backend HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed unexpectedly.
    #[error("failed to parse backend payload: {0}")]
    Json(#[from] serde_json::Error),

    /// The API returned a non-success status.
    #[error("backend error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the response body, if any.
        message: String,
    },

    /// The text model did not produce a usable 5-slide plan.
    #[error("plan validation failed: {0}")]
    PlanShape(String),

    /// The image model returned a response with no inline image data.
    #[error("no image data returned")]
    NoImageData,

    /// The response structure did not match expectations.
    #[error("unexpected backend response: {0}")]
    MalformedResponse(String),
}

impl GenAiError {
    /// Returns true if this error is transient and worth a manual retry.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) => true,
            Self::Api { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }
}
