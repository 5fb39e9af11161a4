//! Error types for output rendering.

use thiserror::Error;

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors that can occur while assembling export artifacts.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A page payload could not be decoded as an image.
    #[error("Failed to decode page image: {0}")]
    ImageDecode(String),

    /// PDF assembly failed.
    #[error("PDF export failed: {0}")]
    Export(String),

    /// The page sequence did not satisfy the document contract.
    #[error("Invalid page sequence: {0}")]
    InvalidPages(String),
}
