//! Per-slide append-only image version history.

use serde::{Deserialize, Serialize};

use crate::{CarouselError, CarouselResult, ImageData, SLIDE_COUNT};

/// Direction for cycling through a slide's version history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CycleDirection {
    /// Move to the previous (older) version.
    Prev,
    /// Move to the next (newer) version.
    Next,
}

/// History of one slide: generated versions plus the selection pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct SlideHistory {
    versions: Vec<ImageData>,
    selected: usize,
}

/// Append-only image version history for all [`SLIDE_COUNT`] slides.
///
/// Within one generation session a slide's version sequence is only ever
/// appended to; it is never reordered, truncated, or deleted from the
/// middle. The whole store is cleared wholesale when a new topic is
/// submitted. Each slide carries a selection pointer that always refers to
/// a valid version once the slide has at least one, and that jumps to the
/// newest version on every append.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVersionStore {
    slides: Vec<SlideHistory>,
}

impl ImageVersionStore {
    /// Create an empty store covering all slide positions.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slides: vec![SlideHistory::default(); SLIDE_COUNT],
        }
    }

    /// Append a newly generated payload to a slide's history.
    ///
    /// The new version is auto-selected. Returns the version index it was
    /// stored at.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::SlideOutOfRange`] if `slide` is invalid.
    pub fn append(&mut self, slide: usize, payload: ImageData) -> CarouselResult<usize> {
        let history = self
            .slides
            .get_mut(slide)
            .ok_or(CarouselError::SlideOutOfRange(slide))?;
        history.versions.push(payload);
        history.selected = history.versions.len() - 1;
        tracing::debug!(slide, version = history.selected, "image version appended");
        Ok(history.selected)
    }

    /// Point a slide's selection at a specific version.
    ///
    /// Out-of-range slide or version indices are ignored; a stale control
    /// click racing a reset must not corrupt the pointer.
    pub fn select(&mut self, slide: usize, version: usize) {
        if let Some(history) = self.slides.get_mut(slide) {
            if version < history.versions.len() {
                history.selected = version;
            }
        }
    }

    /// Move a slide's selection one step, clamped to the history bounds.
    ///
    /// There is no wraparound: cycling past either end is a no-op.
    pub fn cycle(&mut self, slide: usize, direction: CycleDirection) {
        let Some(history) = self.slides.get_mut(slide) else {
            return;
        };
        match direction {
            CycleDirection::Prev => {
                if history.selected > 0 {
                    history.selected -= 1;
                }
            }
            CycleDirection::Next => {
                if history.selected + 1 < history.versions.len() {
                    history.selected += 1;
                }
            }
        }
    }

    /// The currently selected payload for a slide, if any exists.
    #[must_use]
    pub fn current(&self, slide: usize) -> Option<&ImageData> {
        let history = self.slides.get(slide)?;
        history.versions.get(history.selected)
    }

    /// Number of versions a slide has accumulated.
    #[must_use]
    pub fn len(&self, slide: usize) -> usize {
        self.slides.get(slide).map_or(0, |h| h.versions.len())
    }

    /// Whether a slide has no versions yet.
    #[must_use]
    pub fn is_empty(&self, slide: usize) -> bool {
        self.len(slide) == 0
    }

    /// The selection pointer for a slide, if it has any versions.
    #[must_use]
    pub fn selected(&self, slide: usize) -> Option<usize> {
        let history = self.slides.get(slide)?;
        if history.versions.is_empty() {
            None
        } else {
            Some(history.selected)
        }
    }

    /// Whether every slide position has at least one version.
    #[must_use]
    pub fn all_populated(&self) -> bool {
        self.slides.iter().all(|h| !h.versions.is_empty())
    }

    /// Clear all histories and selections.
    ///
    /// Called only at the start of a brand-new topic submission.
    pub fn reset(&mut self) {
        for history in &mut self.slides {
            history.versions.clear();
            history.selected = 0;
        }
    }
}

impl Default for ImageVersionStore {
    fn default() -> Self {
        Self::new()
    }
}
