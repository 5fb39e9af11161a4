//! Export gate: eligibility and page assembly for the PDF.

use crate::{CarouselError, CarouselResult, CarouselSession, ImageData, SlidePlan, SLIDE_COUNT};

/// Fallback filename stem when slide 0's header sanitizes to nothing.
const FALLBACK_FILENAME: &str = "carousel";

/// Whether export is currently legal: every slide has at least one
/// successful version.
#[must_use]
pub fn is_eligible(session: &CarouselSession) -> bool {
    session.export_eligible()
}

/// Assemble the export page sequence: each slide's **currently selected**
/// version (not necessarily the latest), in slide order.
///
/// # Errors
///
/// Returns [`CarouselError::ExportPrecondition`] if the session has no
/// plan or any slide is still missing a successful version. No partial
/// document is ever produced.
pub fn build_pages(session: &CarouselSession) -> CarouselResult<Vec<ImageData>> {
    if session.plan().is_none() {
        return Err(CarouselError::ExportPrecondition(
            "carousel data is incomplete".to_string(),
        ));
    }
    if !session.export_eligible() {
        let missing: Vec<String> = (0..SLIDE_COUNT)
            .filter(|&slide| session.history().is_empty(slide))
            .map(|slide| (slide + 1).to_string())
            .collect();
        return Err(CarouselError::ExportPrecondition(format!(
            "slides {} have no generated image yet",
            missing.join(", ")
        )));
    }

    let pages: Vec<ImageData> = (0..SLIDE_COUNT)
        .filter_map(|slide| session.history().current(slide).cloned())
        .collect();
    // Eligibility guarantees a payload per slide
    debug_assert_eq!(pages.len(), SLIDE_COUNT);
    Ok(pages)
}

/// Derive the export filename stem from slide 0's header text.
///
/// Every character outside `[a-zA-Z0-9]` becomes `_` and the result is
/// lowercased; an empty header falls back to `"carousel"`. The `.pdf`
/// extension is the caller's business.
#[must_use]
pub fn export_filename(plan: &SlidePlan) -> String {
    let header = plan.get(0).map_or("", |spec| spec.header_text.as_str());
    if header.is_empty() {
        return FALLBACK_FILENAME.to_string();
    }
    header
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}
