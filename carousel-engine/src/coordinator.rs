//! The generation pipeline.
//!
//! Drives the three stages of a submission — plan, parallel caption+image
//! fan-out, finalize — plus per-slide regeneration. All completions apply
//! under the session lock after an epoch check, so results from a
//! superseded submission are discarded instead of corrupting the current
//! one, and a failure in any single request never touches its siblings.

use std::sync::Arc;

use carousel_core::{
    CarouselError, CarouselResult, CycleDirection, GenerationEpoch, ImageData, SlidePlan,
    StudioSettings, SLIDE_COUNT,
};
use carousel_genai::GenerativeBackend;
use serde::Serialize;

use crate::event::{PipelineStage, StudioEvent};
use crate::handle::SessionHandle;

/// Final outcome of one topic submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReport {
    /// Epoch of the submission this report describes.
    pub epoch: u64,
    /// The generated caption, if the caption request succeeded.
    pub caption: Option<String>,
    /// Caption failure reason, if it failed.
    pub caption_error: Option<String>,
    /// Slides whose image request failed with no successful version.
    pub failed_slides: Vec<usize>,
    /// Whether all 5 slides ended up with at least one version.
    pub export_eligible: bool,
}

/// What applying one image completion did to the session.
enum AttemptOutcome {
    Appended { version: usize, eligible: bool },
    Failed { reason: String, eligible: bool },
    Stale,
}

/// Drives generation against a [`GenerativeBackend`] and applies every
/// completion to the shared session.
pub struct GenerationCoordinator<B> {
    backend: Arc<B>,
    handle: SessionHandle,
    settings: StudioSettings,
}

impl<B: GenerativeBackend + 'static> GenerationCoordinator<B> {
    /// Create a coordinator.
    #[must_use]
    pub fn new(backend: Arc<B>, handle: SessionHandle, settings: StudioSettings) -> Self {
        Self {
            backend,
            handle,
            settings,
        }
    }

    /// The session handle this coordinator mutates.
    #[must_use]
    pub const fn handle(&self) -> &SessionHandle {
        &self.handle
    }

    /// The settings requests are issued with.
    #[must_use]
    pub const fn settings(&self) -> &StudioSettings {
        &self.settings
    }

    /// Run one full topic submission.
    ///
    /// Stage 1 plans the 5 slides; a failure here is fatal and nothing is
    /// shown. Stage 2 issues the caption request and 5 independent image
    /// requests concurrently; each settles on its own and a failure is
    /// scoped to its own slide (or the caption). Stage 3 reports the
    /// settled outcome.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::EmptyTopic`] for a blank topic,
    /// [`CarouselError::PlanValidation`] when the plan stage fails, and
    /// [`CarouselError::Superseded`] if a newer submission replaced this
    /// one while it was running.
    pub async fn submit(&self, topic: &str) -> CarouselResult<SubmissionReport> {
        let epoch = self
            .handle
            .update(|session| session.begin_submission(topic))
            .await?;
        self.handle.emit(StudioEvent::SubmissionStarted {
            epoch: epoch.value(),
        });
        self.emit_stage(PipelineStage::Plan);

        let plan = self
            .backend
            .generate_slide_plan(
                topic.trim(),
                &self.settings.image_prompt_instruction,
                self.settings.temperature,
            )
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "plan stage failed");
                CarouselError::PlanValidation(e.to_string())
            })?;

        let installed = self
            .handle
            .update(|session| {
                if !session.is_current(epoch) {
                    return false;
                }
                session.install_plan(plan.clone());
                for slide in 0..SLIDE_COUNT {
                    let _ = session.mark_loading(slide);
                }
                true
            })
            .await;
        if !installed {
            return Err(CarouselError::Superseded);
        }
        self.handle.emit(StudioEvent::PlanReady);
        self.emit_stage(PipelineStage::Artwork);
        for slide in 0..SLIDE_COUNT {
            self.handle.emit(StudioEvent::SlideLoading { slide });
        }

        let caption_task = self.spawn_caption_task(epoch, plan.clone());
        let image_tasks: Vec<_> = plan
            .slides()
            .iter()
            .enumerate()
            .map(|(slide, spec)| self.spawn_image_task(epoch, slide, spec.image_prompt.clone()))
            .collect();

        // No sibling is cancelled on failure; everything settles on its own.
        futures::future::join_all(image_tasks).await;
        if caption_task.await.is_err() {
            tracing::warn!("caption task aborted unexpectedly");
        }

        self.emit_stage(PipelineStage::Finalize);
        self.handle
            .read(|session| {
                if !session.is_current(epoch) {
                    return Err(CarouselError::Superseded);
                }
                Ok(SubmissionReport {
                    epoch: epoch.value(),
                    caption: session.caption().map(ToString::to_string),
                    caption_error: session.caption_error().map(ToString::to_string),
                    failed_slides: (0..SLIDE_COUNT)
                        .filter(|&slide| {
                            session.history().is_empty(slide)
                        })
                        .collect(),
                    export_eligible: session.export_eligible(),
                })
            })
            .await
    }

    /// Re-issue exactly one image request for a slide, using its current
    /// (possibly edited) prompt.
    ///
    /// Returns `true` if a new version was appended, `false` if the attempt
    /// failed; an earlier successful version is never discarded either way.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::NoPlan`] before a plan exists,
    /// [`CarouselError::SlideOutOfRange`] for a bad index, and
    /// [`CarouselError::Superseded`] if a new topic submission replaced
    /// this session before the result arrived.
    pub async fn regenerate(&self, slide: usize) -> CarouselResult<bool> {
        let (epoch, prompt) = self
            .handle
            .update(|session| -> CarouselResult<(GenerationEpoch, String)> {
                let spec = session
                    .plan()
                    .ok_or(CarouselError::NoPlan)?
                    .get(slide)
                    .ok_or(CarouselError::SlideOutOfRange(slide))?;
                let prompt = spec.image_prompt.clone();
                session.mark_loading(slide)?;
                Ok((session.epoch(), prompt))
            })
            .await?;
        self.handle.emit(StudioEvent::SlideLoading { slide });

        match Self::image_attempt(
            Arc::clone(&self.backend),
            self.handle.clone(),
            epoch,
            slide,
            prompt,
        )
        .await
        {
            AttemptOutcome::Appended { .. } => Ok(true),
            AttemptOutcome::Failed { .. } => Ok(false),
            AttemptOutcome::Stale => Err(CarouselError::Superseded),
        }
    }

    /// Move a slide's version selection and notify renderers.
    pub async fn cycle_version(&self, slide: usize, direction: CycleDirection) {
        let selected = self
            .handle
            .update(|session| {
                session.history_mut().cycle(slide, direction);
                session.history().selected(slide)
            })
            .await;
        if let Some(version) = selected {
            self.handle
                .emit(StudioEvent::SelectionChanged { slide, version });
        }
    }

    // -----------------------------------------------------------------------
    // Edit flow
    // -----------------------------------------------------------------------

    /// Open the prompt editor for a slide; returns the seeded draft.
    ///
    /// # Errors
    ///
    /// See [`carousel_core::CarouselSession::open_editor`].
    pub async fn open_editor(&self, slide: usize) -> CarouselResult<String> {
        self.handle
            .update(|session| session.open_editor(slide).map(ToString::to_string))
            .await
    }

    /// Close the editor without saving.
    pub async fn cancel_editor(&self) {
        self.handle
            .update(carousel_core::CarouselSession::cancel_editor)
            .await;
    }

    /// Submit the edited prompt and regenerate that slide.
    ///
    /// The prompt becomes authoritative for every later regeneration of the
    /// slide, including plain regenerate clicks.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::EditValidation`] for an empty prompt (the
    /// editor stays open), plus everything [`Self::regenerate`] can return.
    pub async fn submit_editor(&self, text: &str) -> CarouselResult<bool> {
        let slide = self
            .handle
            .update(|session| session.submit_editor(text))
            .await?;
        self.regenerate(slide).await
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn emit_stage(&self, stage: PipelineStage) {
        tracing::info!(?stage, "{}", stage.message());
        self.handle.emit(StudioEvent::StageChanged { stage });
    }

    fn spawn_caption_task(
        &self,
        epoch: GenerationEpoch,
        plan: SlidePlan,
    ) -> tokio::task::JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let handle = self.handle.clone();
        let instruction = self.settings.caption_instruction.clone();
        let temperature = self.settings.temperature;
        tokio::spawn(async move {
            let result = backend
                .generate_caption(&plan, &instruction, temperature)
                .await;
            let applied = handle
                .update(|session| {
                    if !session.is_current(epoch) {
                        return None;
                    }
                    let outcome = result.map_err(|e| e.to_string());
                    let failure = outcome.as_ref().err().cloned();
                    session.record_caption(outcome);
                    Some(failure)
                })
                .await;
            match applied {
                Some(None) => handle.emit(StudioEvent::CaptionReady),
                Some(Some(reason)) => {
                    tracing::warn!(reason = %reason, "caption generation failed");
                    handle.emit(StudioEvent::CaptionFailed { reason });
                }
                None => {
                    tracing::debug!(epoch = epoch.value(), "discarding stale caption result");
                }
            }
        })
    }

    fn spawn_image_task(
        &self,
        epoch: GenerationEpoch,
        slide: usize,
        prompt: String,
    ) -> tokio::task::JoinHandle<()> {
        let backend = Arc::clone(&self.backend);
        let handle = self.handle.clone();
        tokio::spawn(async move {
            Self::image_attempt(backend, handle, epoch, slide, prompt).await;
        })
    }

    /// Issue one image request and apply its completion to the session.
    async fn image_attempt(
        backend: Arc<B>,
        handle: SessionHandle,
        epoch: GenerationEpoch,
        slide: usize,
        prompt: String,
    ) -> AttemptOutcome {
        let result = backend.generate_image(&prompt).await;
        let outcome = handle
            .update(|session| {
                if !session.is_current(epoch) {
                    return AttemptOutcome::Stale;
                }
                Self::apply_image_result(session, slide, result.map_err(|e| e.to_string()))
            })
            .await;

        match &outcome {
            AttemptOutcome::Appended { version, eligible } => {
                handle.emit(StudioEvent::SlideUpdated {
                    slide,
                    version: *version,
                });
                handle.emit(StudioEvent::ExportEligibility {
                    eligible: *eligible,
                });
            }
            AttemptOutcome::Failed { reason, eligible } => {
                tracing::warn!(slide, reason = %reason, "image generation failed");
                handle.emit(StudioEvent::SlideFailed {
                    slide,
                    reason: reason.clone(),
                });
                handle.emit(StudioEvent::ExportEligibility {
                    eligible: *eligible,
                });
            }
            AttemptOutcome::Stale => {
                tracing::debug!(
                    slide,
                    epoch = epoch.value(),
                    "discarding image result from superseded submission"
                );
            }
        }
        outcome
    }

    fn apply_image_result(
        session: &mut carousel_core::CarouselSession,
        slide: usize,
        result: Result<ImageData, String>,
    ) -> AttemptOutcome {
        match result {
            Ok(payload) => match session.record_image_success(slide, payload) {
                Ok(version) => AttemptOutcome::Appended {
                    version,
                    eligible: session.export_eligible(),
                },
                Err(e) => {
                    let reason = e.to_string();
                    session.record_image_failure(slide, reason.clone());
                    AttemptOutcome::Failed {
                        reason,
                        eligible: session.export_eligible(),
                    }
                }
            },
            Err(reason) => {
                session.record_image_failure(slide, reason.clone());
                AttemptOutcome::Failed {
                    reason,
                    eligible: session.export_eligible(),
                }
            }
        }
    }
}
