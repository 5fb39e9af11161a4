//! Terminal presentation of derived state.
//!
//! Pure string formatting over the view models; the binary prints what
//! these functions return and nothing else, so the output is testable
//! without a terminal.

use carousel_core::{SlideContent, SlideView, StudioSettings};

/// One status line for a slide, derived from its view model.
#[must_use]
pub fn slide_status_line(view: &SlideView) -> String {
    let mut line = match &view.content {
        SlideContent::Placeholder { .. } => format!("slide {}: pending", view.slide + 1),
        SlideContent::Error { message } => {
            format!("slide {}: failed - {message}", view.slide + 1)
        }
        SlideContent::Image {
            regenerating: true, ..
        } => format!("slide {}: regenerating...", view.slide + 1),
        SlideContent::Image { .. } => {
            if view.history.visible {
                format!("slide {}: ready (version {})", view.slide + 1, view.history.counter)
            } else {
                format!("slide {}: ready", view.slide + 1)
            }
        }
    };
    if let Some(reason) = &view.transient_error {
        line.push_str(&format!(" [last attempt failed: {reason}]"));
    }
    line
}

/// Multi-line summary of the effective settings for `settings show`.
#[must_use]
pub fn settings_summary(settings: &StudioSettings) -> String {
    format!(
        "temperature: {}\n\nimage prompt instruction:\n{}\n\ncaption instruction:\n{}",
        settings.temperature, settings.image_prompt_instruction, settings.caption_instruction
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use carousel_core::{derive_slide_view, CarouselSession, ImageData, SlidePlan, SlideSpec, SLIDE_COUNT};

    fn session_with_plan() -> CarouselSession {
        let mut session = CarouselSession::new();
        session.begin_submission("topic").expect("topic");
        session.install_plan(
            SlidePlan::new(
                (0..SLIDE_COUNT)
                    .map(|n| SlideSpec {
                        image_prompt: format!("prompt {n}"),
                        header_text: format!("header {n}"),
                        subheader_text: format!("sub {n}"),
                    })
                    .collect(),
            )
            .expect("valid plan"),
        );
        session
    }

    fn payload(tag: u8) -> ImageData {
        ImageData::png(vec![tag; 4])
    }

    #[test]
    fn test_pending_line() {
        let session = session_with_plan();
        let view = derive_slide_view(&session, 0);
        assert_eq!(slide_status_line(&view), "slide 1: pending");
    }

    #[test]
    fn test_ready_line_hides_single_version_counter() {
        let mut session = session_with_plan();
        session.record_image_success(1, payload(1)).expect("append");
        let view = derive_slide_view(&session, 1);
        assert_eq!(slide_status_line(&view), "slide 2: ready");
    }

    #[test]
    fn test_ready_line_shows_version_counter() {
        let mut session = session_with_plan();
        session.record_image_success(2, payload(1)).expect("append");
        session.record_image_success(2, payload(2)).expect("append");
        let view = derive_slide_view(&session, 2);
        assert_eq!(slide_status_line(&view), "slide 3: ready (version 2 / 2)");
    }

    #[test]
    fn test_failed_line_carries_reason() {
        let mut session = session_with_plan();
        session.mark_loading(3).expect("in range");
        session.record_image_failure(3, "quota exceeded");
        let view = derive_slide_view(&session, 3);
        assert_eq!(slide_status_line(&view), "slide 4: failed - quota exceeded");
    }

    #[test]
    fn test_transient_error_is_appended() {
        let mut session = session_with_plan();
        session.record_image_success(4, payload(1)).expect("append");
        session.mark_loading(4).expect("in range");
        session.record_image_failure(4, "backend hiccup");
        let view = derive_slide_view(&session, 4);
        assert_eq!(
            slide_status_line(&view),
            "slide 5: ready [last attempt failed: backend hiccup]"
        );
    }

    #[test]
    fn test_settings_summary_layout() {
        let summary = settings_summary(&StudioSettings {
            image_prompt_instruction: "plan".to_string(),
            caption_instruction: "caption".to_string(),
            temperature: 1.5,
        });
        assert_eq!(
            summary,
            "temperature: 1.5\n\nimage prompt instruction:\nplan\n\ncaption instruction:\ncaption"
        );
    }
}
