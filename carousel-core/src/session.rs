//! The per-generation session state object.

use serde::{Deserialize, Serialize};

use crate::{
    CarouselError, CarouselResult, EditFlow, ImageData, ImageVersionStore, SlidePlan, SlideStatus,
    SLIDE_COUNT,
};

/// Identifier for one topic submission.
///
/// Every outstanding backend call is stamped with the epoch current at
/// issue time; completions whose epoch no longer matches the session are
/// discarded instead of mutating a store they no longer belong to. This is
/// the session's substitute for cancellation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GenerationEpoch(u64);

impl GenerationEpoch {
    /// The epoch before any submission has happened.
    #[must_use]
    pub const fn initial() -> Self {
        Self(0)
    }

    /// The epoch of the following submission.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Raw counter value, for logging.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

/// Transient per-slide state that is not part of the version history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct SlideRuntime {
    in_flight: bool,
    last_error: Option<String>,
}

/// Everything one generation session owns: the topic, the plan, the image
/// version history, per-slide transient state, the caption outcome, the
/// edit flow, and the generation epoch.
///
/// One session object exists per studio; `begin_submission` replaces its
/// contents wholesale rather than allocating hidden globals elsewhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarouselSession {
    topic: String,
    plan: Option<SlidePlan>,
    history: ImageVersionStore,
    runtime: Vec<SlideRuntime>,
    caption: Option<String>,
    caption_error: Option<String>,
    edit: EditFlow,
    epoch: GenerationEpoch,
}

impl CarouselSession {
    /// Create an idle session with no submission yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            topic: String::new(),
            plan: None,
            history: ImageVersionStore::new(),
            runtime: vec![SlideRuntime::default(); SLIDE_COUNT],
            caption: None,
            caption_error: None,
            edit: EditFlow::Closed,
            epoch: GenerationEpoch::initial(),
        }
    }

    /// Start a brand-new topic submission.
    ///
    /// Clears the plan, all version histories, per-slide state, the caption,
    /// and any open editor, then advances the epoch. Returns the new epoch
    /// for stamping the submission's backend calls.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::EmptyTopic`] if the topic is empty after
    /// trimming; the session is left untouched in that case.
    pub fn begin_submission(&mut self, topic: &str) -> CarouselResult<GenerationEpoch> {
        let trimmed = topic.trim();
        if trimmed.is_empty() {
            return Err(CarouselError::EmptyTopic);
        }
        self.topic = trimmed.to_string();
        self.plan = None;
        self.history.reset();
        self.runtime = vec![SlideRuntime::default(); SLIDE_COUNT];
        self.caption = None;
        self.caption_error = None;
        self.edit = EditFlow::Closed;
        self.epoch = self.epoch.next();
        tracing::debug!(epoch = self.epoch.value(), topic = %self.topic, "submission started");
        Ok(self.epoch)
    }

    /// The epoch of the current submission.
    #[must_use]
    pub const fn epoch(&self) -> GenerationEpoch {
        self.epoch
    }

    /// Whether a stamped epoch still belongs to the current submission.
    #[must_use]
    pub fn is_current(&self, epoch: GenerationEpoch) -> bool {
        self.epoch == epoch
    }

    /// The trimmed topic of the current submission.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Install the validated plan produced by the text model.
    pub fn install_plan(&mut self, plan: SlidePlan) {
        self.plan = Some(plan);
    }

    /// The current plan, if the plan stage has completed.
    #[must_use]
    pub const fn plan(&self) -> Option<&SlidePlan> {
        self.plan.as_ref()
    }

    /// Read-only view of the image version history.
    #[must_use]
    pub const fn history(&self) -> &ImageVersionStore {
        &self.history
    }

    /// Mutable access to the version history for selection and cycling.
    ///
    /// Appends go through [`CarouselSession::record_image_success`] so the
    /// per-slide transient state stays consistent.
    pub fn history_mut(&mut self) -> &mut ImageVersionStore {
        &mut self.history
    }

    /// Mark an image request as outstanding for a slide.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::SlideOutOfRange`] if `slide` is invalid.
    pub fn mark_loading(&mut self, slide: usize) -> CarouselResult<()> {
        let runtime = self
            .runtime
            .get_mut(slide)
            .ok_or(CarouselError::SlideOutOfRange(slide))?;
        runtime.in_flight = true;
        Ok(())
    }

    /// Record a successful image completion: appends the payload, clears
    /// the slide's transient error, and returns the new version index.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::SlideOutOfRange`] if `slide` is invalid.
    pub fn record_image_success(
        &mut self,
        slide: usize,
        payload: ImageData,
    ) -> CarouselResult<usize> {
        let version = self.history.append(slide, payload)?;
        let runtime = self
            .runtime
            .get_mut(slide)
            .ok_or(CarouselError::SlideOutOfRange(slide))?;
        runtime.in_flight = false;
        runtime.last_error = None;
        Ok(version)
    }

    /// Record a failed image completion.
    ///
    /// Existing versions and the selection pointer are left untouched; the
    /// reason is kept for the error placeholder or transient indicator.
    pub fn record_image_failure(&mut self, slide: usize, reason: impl Into<String>) {
        if let Some(runtime) = self.runtime.get_mut(slide) {
            runtime.in_flight = false;
            runtime.last_error = Some(reason.into());
        }
    }

    /// Record the caption outcome.
    pub fn record_caption(&mut self, outcome: Result<String, String>) {
        match outcome {
            Ok(caption) => {
                self.caption = Some(caption);
                self.caption_error = None;
            }
            Err(reason) => {
                self.caption = None;
                self.caption_error = Some(reason);
            }
        }
    }

    /// The generated caption, if the caption stage succeeded.
    #[must_use]
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// The caption failure reason, if the caption stage failed.
    #[must_use]
    pub fn caption_error(&self) -> Option<&str> {
        self.caption_error.as_deref()
    }

    /// Derive the runtime status of one slide.
    #[must_use]
    pub fn slide_status(&self, slide: usize) -> SlideStatus {
        let runtime = self.runtime.get(slide);
        SlideStatus::derive(
            !self.history.is_empty(slide),
            runtime.is_some_and(|r| r.in_flight),
            runtime.and_then(|r| r.last_error.as_deref()),
        )
    }

    /// Failure reason for a slide that still shows a previous good version.
    ///
    /// `None` unless the slide has at least one version and its most recent
    /// attempt failed.
    #[must_use]
    pub fn transient_error(&self, slide: usize) -> Option<&str> {
        if self.history.is_empty(slide) {
            return None;
        }
        self.runtime.get(slide)?.last_error.as_deref()
    }

    /// Whether any image request is still outstanding.
    #[must_use]
    pub fn any_in_flight(&self) -> bool {
        self.runtime.iter().any(|r| r.in_flight)
    }

    /// Whether every slide has at least one successful version — the export
    /// precondition. Recomputed from the store on every call.
    #[must_use]
    pub fn export_eligible(&self) -> bool {
        self.history.all_populated()
    }

    // -----------------------------------------------------------------------
    // Edit flow
    // -----------------------------------------------------------------------

    /// Open the prompt editor for a slide, seeding it from the plan.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::NoPlan`] before the plan stage has
    /// completed, or [`CarouselError::SlideOutOfRange`] for a bad index.
    pub fn open_editor(&mut self, slide: usize) -> CarouselResult<&str> {
        let prompt = {
            let plan = self.plan.as_ref().ok_or(CarouselError::NoPlan)?;
            let spec = plan.get(slide).ok_or(CarouselError::SlideOutOfRange(slide))?;
            spec.image_prompt.clone()
        };
        self.edit.open(slide, prompt);
        Ok(self.edit.draft().unwrap_or_default())
    }

    /// Close the editor without saving.
    pub fn cancel_editor(&mut self) {
        self.edit.cancel();
    }

    /// Submit the edited prompt: validates it, writes it into the plan as
    /// the authoritative prompt for the slide, and closes the editor.
    /// Returns the slide index that should now be regenerated.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::EditValidation`] for an empty prompt (the
    /// editor stays open) or when no editor is open, and
    /// [`CarouselError::NoPlan`] if the plan has been reset underneath the
    /// editor.
    pub fn submit_editor(&mut self, text: &str) -> CarouselResult<usize> {
        let (slide, prompt) = self.edit.submit(text)?;
        let plan = self.plan.as_mut().ok_or(CarouselError::NoPlan)?;
        plan.set_image_prompt(slide, prompt)?;
        Ok(slide)
    }

    /// Current editor state.
    #[must_use]
    pub const fn edit_state(&self) -> &EditFlow {
        &self.edit
    }
}
