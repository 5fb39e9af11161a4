//! Error types for carousel operations.

use thiserror::Error;

/// Result type for carousel operations.
pub type CarouselResult<T> = Result<T, CarouselError>;

/// Errors that can occur in carousel operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    /// The submitted topic was empty after trimming.
    #[error("Topic must not be empty")]
    EmptyTopic,

    /// The text model did not return a usable 5-slide plan.
    ///
    /// Fatal to the whole submission; no partial plan is ever shown.
    #[error("Plan validation failed: {0}")]
    PlanValidation(String),

    /// The caption request failed. Scoped to the caption area only.
    #[error("Caption generation failed: {0}")]
    CaptionGeneration(String),

    /// An image request failed for a single slide. Scoped to that slide.
    #[error("Image generation failed for slide {slide}: {reason}")]
    ImageGeneration {
        /// Zero-based slide index the failure belongs to.
        slide: usize,
        /// Human-readable failure reason.
        reason: String,
    },

    /// The edited prompt was empty after trimming. The editor stays open.
    #[error("Prompt cannot be empty")]
    EditValidation,

    /// Export was requested while its preconditions do not hold.
    #[error("Export unavailable: {0}")]
    ExportPrecondition(String),

    /// A slide index outside `0..SLIDE_COUNT` was used.
    #[error("Slide index {0} out of range")]
    SlideOutOfRange(usize),

    /// An operation required a slide plan but none has been generated yet.
    #[error("No slide plan has been generated")]
    NoPlan,

    /// The operation belonged to a submission that has since been replaced.
    ///
    /// Raised when an epoch check discards work instead of letting it
    /// mutate a session it no longer belongs to.
    #[error("Operation superseded by a newer submission")]
    Superseded,
}
