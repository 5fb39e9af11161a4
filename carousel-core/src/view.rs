//! Pure derivation of renderable slide state.

use serde::Serialize;

use crate::{CarouselSession, ImageData, SlideStatus, SLIDE_COUNT};

/// Version-history controls for one slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryControls {
    /// Controls are hidden entirely (not just disabled) unless a slide has
    /// accumulated more than one version.
    pub visible: bool,
    /// "Previous version" is enabled only when older versions exist.
    pub prev_enabled: bool,
    /// "Next version" is enabled only when newer versions exist.
    pub next_enabled: bool,
    /// Counter text, e.g. `2 / 3`.
    pub counter: String,
}

impl HistoryControls {
    const fn hidden() -> Self {
        Self {
            visible: false,
            prev_enabled: false,
            next_enabled: false,
            counter: String::new(),
        }
    }
}

/// What the slide area should display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlideContent {
    /// Spinner placeholder shown before any version exists.
    Placeholder {
        /// Spinner label text.
        label: String,
    },
    /// Error block with a retry action; shown only when no version exists.
    Error {
        /// Failure message.
        message: String,
    },
    /// The currently selected image with its action controls.
    Image {
        /// Payload to display.
        payload: ImageData,
        /// Zero-based selected version index.
        version: usize,
        /// Whether a regeneration spinner overlay covers the image.
        regenerating: bool,
    },
}

/// Complete render instructions for one slide.
///
/// A pure function of the session: re-deriving it any number of times
/// against unchanged state produces identical instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlideView {
    /// Zero-based slide position.
    pub slide: usize,
    /// What to display in the slide area.
    pub content: SlideContent,
    /// Version-history controls.
    pub history: HistoryControls,
    /// Failure of the most recent attempt while a previous good version is
    /// still displayed.
    pub transient_error: Option<String>,
    /// Whether the edit-prompt and regenerate actions are available.
    pub actions_enabled: bool,
}

/// Derive render instructions for one slide.
///
/// Out-of-range indices derive an inert pending placeholder; the renderer
/// never needs to handle an error here.
#[must_use]
pub fn derive_slide_view(session: &CarouselSession, slide: usize) -> SlideView {
    let status = session.slide_status(slide);
    let history = session.history();

    let content = match status {
        SlideStatus::Pending => SlideContent::Placeholder {
            label: "Queued".to_string(),
        },
        SlideStatus::Loading if history.is_empty(slide) => SlideContent::Placeholder {
            label: format!("Generating slide {}...", slide + 1),
        },
        SlideStatus::Loading | SlideStatus::Loaded => match history.current(slide) {
            Some(payload) => SlideContent::Image {
                payload: payload.clone(),
                version: history.selected(slide).unwrap_or(0),
                regenerating: matches!(status, SlideStatus::Loading),
            },
            // Unreachable given the status derivation; keep the renderer total.
            None => SlideContent::Placeholder {
                label: format!("Generating slide {}...", slide + 1),
            },
        },
        SlideStatus::Failed { reason } => SlideContent::Error { message: reason },
    };

    let len = history.len(slide);
    let controls = match history.selected(slide) {
        Some(selected) if len > 1 => HistoryControls {
            visible: true,
            prev_enabled: selected > 0,
            next_enabled: selected < len - 1,
            counter: format!("{} / {}", selected + 1, len),
        },
        _ => HistoryControls::hidden(),
    };

    let actions_enabled = matches!(
        content,
        SlideContent::Image {
            regenerating: false,
            ..
        }
    );

    SlideView {
        slide,
        content,
        history: controls,
        transient_error: session.transient_error(slide).map(ToString::to_string),
        actions_enabled,
    }
}

/// Derive render instructions for all five slides in order.
#[must_use]
pub fn derive_views(session: &CarouselSession) -> Vec<SlideView> {
    (0..SLIDE_COUNT)
        .map(|slide| derive_slide_view(session, slide))
        .collect()
}
