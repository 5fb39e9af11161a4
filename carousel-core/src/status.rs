//! Derived per-slide runtime status.

use serde::{Deserialize, Serialize};

/// Lifecycle status of one slide's artwork.
///
/// Never stored: derived from the version history and the per-slide
/// in-flight flag, so it can be recomputed at any time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum SlideStatus {
    /// The image fan-out has not reached this slide yet.
    Pending,
    /// An image request for this slide is outstanding.
    Loading,
    /// At least one version exists and no request is outstanding.
    Loaded,
    /// The last attempt failed and no successful version exists.
    Failed {
        /// Human-readable failure reason.
        reason: String,
    },
}

impl SlideStatus {
    /// Derive a status from the slide's observable state.
    ///
    /// A slide that has a prior success keeps deriving [`SlideStatus::Loaded`]
    /// even after a later regeneration fails; the error is surfaced
    /// separately as a transient indicator and the last good version stays
    /// on screen.
    #[must_use]
    pub fn derive(has_versions: bool, in_flight: bool, last_error: Option<&str>) -> Self {
        if in_flight {
            Self::Loading
        } else if has_versions {
            Self::Loaded
        } else if let Some(reason) = last_error {
            Self::Failed {
                reason: reason.to_string(),
            }
        } else {
            Self::Pending
        }
    }

    /// Whether this status represents a settled outcome (loaded or failed).
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        matches!(self, Self::Loaded | Self::Failed { .. })
    }
}
