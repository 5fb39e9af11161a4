//! Slide specifications and the fixed-size carousel plan.

use serde::{Deserialize, Serialize};

use crate::{CarouselError, CarouselResult};

/// Number of slides in every carousel.
///
/// The content framework is a fixed 5-part arc (hook, problem, insight,
/// solution, call to action); plans of any other length are rejected.
pub const SLIDE_COUNT: usize = 5;

/// One slide of the generated plan.
///
/// Field names match the structured-output schema the text model is asked
/// to produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideSpec {
    /// Prompt handed to the image model for this slide's artwork.
    pub image_prompt: String,
    /// Header text rendered onto the slide.
    pub header_text: String,
    /// Subheader text rendered onto the slide.
    pub subheader_text: String,
}

/// A validated plan of exactly [`SLIDE_COUNT`] slides, ordered 0..4.
///
/// `image_prompt` is the authoritative prompt for every future regeneration
/// of a slide and may be overwritten through the edit flow; the text fields
/// are immutable after plan generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SlideSpec>", into = "Vec<SlideSpec>")]
pub struct SlidePlan {
    slides: Vec<SlideSpec>,
}

impl SlidePlan {
    /// Validate a slide list into a plan.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::PlanValidation`] unless exactly
    /// [`SLIDE_COUNT`] slides are supplied.
    pub fn new(slides: Vec<SlideSpec>) -> CarouselResult<Self> {
        if slides.len() != SLIDE_COUNT {
            return Err(CarouselError::PlanValidation(format!(
                "expected {SLIDE_COUNT} slides, got {}",
                slides.len()
            )));
        }
        Ok(Self { slides })
    }

    /// All slides in order.
    #[must_use]
    pub fn slides(&self) -> &[SlideSpec] {
        &self.slides
    }

    /// The slide at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&SlideSpec> {
        self.slides.get(index)
    }

    /// Overwrite the image prompt for one slide.
    ///
    /// This is the only mutation a plan supports; the new prompt becomes
    /// authoritative for all subsequent regenerations of that slide.
    ///
    /// # Errors
    ///
    /// Returns [`CarouselError::SlideOutOfRange`] if `index` is invalid.
    pub fn set_image_prompt(
        &mut self,
        index: usize,
        prompt: impl Into<String>,
    ) -> CarouselResult<()> {
        let slide = self
            .slides
            .get_mut(index)
            .ok_or(CarouselError::SlideOutOfRange(index))?;
        slide.image_prompt = prompt.into();
        Ok(())
    }
}

impl TryFrom<Vec<SlideSpec>> for SlidePlan {
    type Error = CarouselError;

    fn try_from(slides: Vec<SlideSpec>) -> CarouselResult<Self> {
        Self::new(slides)
    }
}

impl From<SlidePlan> for Vec<SlideSpec> {
    fn from(plan: SlidePlan) -> Self {
        plan.slides
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(n: usize) -> SlideSpec {
        SlideSpec {
            image_prompt: format!("prompt {n}"),
            header_text: format!("header {n}"),
            subheader_text: format!("subheader {n}"),
        }
    }

    fn plan() -> SlidePlan {
        SlidePlan::new((0..SLIDE_COUNT).map(spec).collect()).expect("valid plan")
    }

    #[test]
    fn test_exactly_five_slides_required() {
        for count in [0, 1, 4, 6] {
            let result = SlidePlan::new((0..count).map(spec).collect());
            assert!(
                matches!(result, Err(CarouselError::PlanValidation(_))),
                "count {count} should be rejected"
            );
        }
        assert!(SlidePlan::new((0..5).map(spec).collect()).is_ok());
    }

    #[test]
    fn test_prompt_overwrite() {
        let mut plan = plan();
        plan.set_image_prompt(2, "a new direction").expect("in range");
        assert_eq!(plan.get(2).expect("slide 2").image_prompt, "a new direction");
        // Text fields untouched
        assert_eq!(plan.get(2).expect("slide 2").header_text, "header 2");
    }

    #[test]
    fn test_prompt_overwrite_out_of_range() {
        let mut plan = plan();
        assert_eq!(
            plan.set_image_prompt(SLIDE_COUNT, "x"),
            Err(CarouselError::SlideOutOfRange(SLIDE_COUNT))
        );
    }

    #[test]
    fn test_deserialization_enforces_count() {
        let four = serde_json::json!([
            {"image_prompt": "a", "header_text": "b", "subheader_text": "c"},
            {"image_prompt": "a", "header_text": "b", "subheader_text": "c"},
            {"image_prompt": "a", "header_text": "b", "subheader_text": "c"},
            {"image_prompt": "a", "header_text": "b", "subheader_text": "c"}
        ]);
        let result: Result<SlidePlan, _> = serde_json::from_value(four);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialization_requires_all_fields() {
        let missing = serde_json::json!([
            {"image_prompt": "a", "header_text": "b"},
            {"image_prompt": "a", "header_text": "b", "subheader_text": "c"},
            {"image_prompt": "a", "header_text": "b", "subheader_text": "c"},
            {"image_prompt": "a", "header_text": "b", "subheader_text": "c"},
            {"image_prompt": "a", "header_text": "b", "subheader_text": "c"}
        ]);
        let result: Result<SlidePlan, _> = serde_json::from_value(missing);
        assert!(result.is_err());
    }
}
