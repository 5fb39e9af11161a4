//! Edit-prompt flow state machine.

use serde::{Deserialize, Serialize};

use crate::{CarouselError, CarouselResult};

/// State of the prompt editor.
///
/// At most one slide is under edit at any time. Submitting writes the new
/// prompt back into the plan (via the session) and closes the editor;
/// cancelling closes it without mutating anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum EditFlow {
    /// No editor is open.
    #[default]
    Closed,
    /// The editor is open for one slide.
    Editing {
        /// Slide whose prompt is being edited.
        slide: usize,
        /// Current editable text, seeded from the slide's prompt.
        draft: String,
    },
}

impl EditFlow {
    /// Open the editor for a slide, seeding the draft with its current
    /// prompt. Opening while already editing moves the editor to the new
    /// slide.
    pub fn open(&mut self, slide: usize, current_prompt: impl Into<String>) {
        *self = Self::Editing {
            slide,
            draft: current_prompt.into(),
        };
    }

    /// Close the editor without saving.
    pub fn cancel(&mut self) {
        *self = Self::Closed;
    }

    /// Replace the draft text while editing; ignored when closed.
    pub fn set_draft(&mut self, text: impl Into<String>) {
        if let Self::Editing { draft, .. } = self {
            *draft = text.into();
        }
    }

    /// Submit the edited prompt.
    ///
    /// On success the editor transitions to [`EditFlow::Closed`] and the
    /// trimmed prompt plus its slide index are returned for the caller to
    /// write into the plan and regenerate.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::EditValidation`] if the text is empty after
    /// trimming — the editor stays open so the user can correct it.
    /// Returns [`CarouselError::EditValidation`] if no editor is open.
    pub fn submit(&mut self, text: &str) -> CarouselResult<(usize, String)> {
        let Self::Editing { slide, .. } = *self else {
            return Err(CarouselError::EditValidation);
        };
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(CarouselError::EditValidation);
        }
        *self = Self::Closed;
        Ok((slide, trimmed.to_string()))
    }

    /// Slide currently under edit, if any.
    #[must_use]
    pub const fn editing_slide(&self) -> Option<usize> {
        match self {
            Self::Editing { slide, .. } => Some(*slide),
            Self::Closed => None,
        }
    }

    /// Current draft text, if an editor is open.
    #[must_use]
    pub fn draft(&self) -> Option<&str> {
        match self {
            Self::Editing { draft, .. } => Some(draft),
            Self::Closed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_seeds_draft() {
        let mut flow = EditFlow::default();
        flow.open(2, "a cosy reading nook");
        assert_eq!(flow.editing_slide(), Some(2));
        assert_eq!(flow.draft(), Some("a cosy reading nook"));
    }

    #[test]
    fn test_cancel_discards_draft() {
        let mut flow = EditFlow::default();
        flow.open(1, "original");
        flow.set_draft("changed but abandoned");
        flow.cancel();
        assert_eq!(flow, EditFlow::Closed);
        assert_eq!(flow.draft(), None);
    }

    #[test]
    fn test_submit_trims_and_closes() {
        let mut flow = EditFlow::default();
        flow.open(4, "original");
        let (slide, prompt) = flow.submit("  neon skyline at dusk  ").expect("valid");
        assert_eq!(slide, 4);
        assert_eq!(prompt, "neon skyline at dusk");
        assert_eq!(flow, EditFlow::Closed);
    }

    #[test]
    fn test_submit_empty_keeps_editor_open() {
        let mut flow = EditFlow::default();
        flow.open(0, "original");
        assert_eq!(flow.submit("   "), Err(CarouselError::EditValidation));
        // Still editing the same slide
        assert_eq!(flow.editing_slide(), Some(0));
    }

    #[test]
    fn test_submit_while_closed_is_rejected() {
        let mut flow = EditFlow::default();
        assert_eq!(flow.submit("anything"), Err(CarouselError::EditValidation));
    }

    #[test]
    fn test_reopen_moves_editor() {
        let mut flow = EditFlow::default();
        flow.open(0, "first");
        flow.open(3, "second");
        assert_eq!(flow.editing_slide(), Some(3));
        assert_eq!(flow.draft(), Some("second"));
    }
}
