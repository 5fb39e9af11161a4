//! Events emitted while a session changes.

use serde::Serialize;

/// Pipeline stage for coarse progress display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStage {
    /// The text model is planning the 5 slides.
    Plan,
    /// Caption and slide artwork are generating in parallel.
    Artwork,
    /// All requests have settled; results are being finalized.
    Finalize,
}

impl PipelineStage {
    /// Loading text shown to the user for this stage.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Plan => "Step 1/3: Crafting viral prompts...",
            Self::Artwork => "Step 2/3: Generating stunning visuals...",
            Self::Finalize => "Step 3/3: Finalizing the post...",
        }
    }
}

/// Notification that some part of the session changed.
///
/// Renderers subscribe to these and re-derive views for exactly the slides
/// that changed; nothing in an event is authoritative state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StudioEvent {
    /// A new topic submission started; all previous state was cleared.
    SubmissionStarted {
        /// Epoch of the new submission.
        epoch: u64,
    },
    /// The pipeline moved to a new stage.
    StageChanged {
        /// The stage that just started.
        stage: PipelineStage,
    },
    /// The 5-slide plan is available.
    PlanReady,
    /// An image request for a slide is outstanding.
    SlideLoading {
        /// Slide index.
        slide: usize,
    },
    /// A slide gained a new image version.
    SlideUpdated {
        /// Slide index.
        slide: usize,
        /// Version index that was appended and selected.
        version: usize,
    },
    /// A slide's image request failed.
    SlideFailed {
        /// Slide index.
        slide: usize,
        /// Failure reason.
        reason: String,
    },
    /// The user moved a slide's selection pointer through its history.
    SelectionChanged {
        /// Slide index.
        slide: usize,
        /// Newly selected version index.
        version: usize,
    },
    /// The caption is available.
    CaptionReady,
    /// The caption request failed.
    CaptionFailed {
        /// Failure reason.
        reason: String,
    },
    /// Export eligibility was recomputed after a store mutation.
    ExportEligibility {
        /// Whether all 5 slides now have at least one version.
        eligible: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_messages_are_ordered() {
        assert!(PipelineStage::Plan.message().starts_with("Step 1/3"));
        assert!(PipelineStage::Artwork.message().starts_with("Step 2/3"));
        assert!(PipelineStage::Finalize.message().starts_with("Step 3/3"));
    }
}
