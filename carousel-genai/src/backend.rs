//! The capability interface the pipeline consumes.

use async_trait::async_trait;
use carousel_core::{ImageData, SlidePlan};

use crate::error::GenAiResult;

/// Generative capabilities the carousel pipeline needs.
///
/// The coordinator only ever talks to this trait; production wires in
/// [`crate::GeminiClient`], tests wire in scripted fakes.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Ask the text model for a complete 5-slide plan for `topic`.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::GenAiError::PlanShape`] when the response is not
    /// exactly 5 well-formed slides, or a transport/API error otherwise.
    async fn generate_slide_plan(
        &self,
        topic: &str,
        system_instruction: &str,
        temperature: f32,
    ) -> GenAiResult<SlidePlan>;

    /// Ask the text model for a post caption using the 5 slides as context.
    ///
    /// # Errors
    ///
    /// Fails with a transport/API error, or
    /// [`crate::GenAiError::MalformedResponse`] if no text comes back.
    async fn generate_caption(
        &self,
        plan: &SlidePlan,
        system_instruction: &str,
        temperature: f32,
    ) -> GenAiResult<String>;

    /// Ask the image model for one piece of slide artwork.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::GenAiError::NoImageData`] when the response
    /// carries no inline payload, or a transport/API error otherwise.
    async fn generate_image(&self, prompt: &str) -> GenAiResult<ImageData>;
}
