//! Caption formatting.
//!
//! The caption model returns lightweight markdown: `**bold**` emphasis and
//! plain line breaks. Rendering handles exactly that subset — escaping
//! first, so model output can never inject markup.

/// Render a caption to HTML: escaped text with `**bold**` spans converted
/// to `<strong>` and newlines to `<br>`.
#[must_use]
pub fn caption_to_html(caption: &str) -> String {
    let escaped = escape_html(caption);
    escaped
        .lines()
        .map(render_bold_line)
        .collect::<Vec<_>>()
        .join("<br>")
}

/// Strip the markdown markers, leaving plain text suitable for the
/// clipboard.
#[must_use]
pub fn caption_to_plain(caption: &str) -> String {
    caption
        .lines()
        .map(strip_bold_markers)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Convert balanced `**...**` pairs within one line to `<strong>` tags.
/// An unpaired trailing `**` stays literal.
fn render_bold_line(line: &str) -> String {
    let parts: Vec<&str> = line.split("**").collect();
    let mut out = String::with_capacity(line.len());
    for (i, part) in parts.iter().enumerate() {
        if i % 2 == 1 {
            if i < parts.len() - 1 {
                out.push_str("<strong>");
                out.push_str(part);
                out.push_str("</strong>");
            } else {
                out.push_str("**");
                out.push_str(part);
            }
        } else {
            out.push_str(part);
        }
    }
    out
}

/// Drop balanced `**` markers from one line, keeping unpaired ones.
fn strip_bold_markers(line: &str) -> String {
    let parts: Vec<&str> = line.split("**").collect();
    let mut out = String::with_capacity(line.len());
    for (i, part) in parts.iter().enumerate() {
        if i % 2 == 1 && i == parts.len() - 1 {
            out.push_str("**");
        }
        out.push_str(part);
    }
    out
}

/// Escape special HTML characters.
fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold_spans() {
        assert_eq!(
            caption_to_html("Stop **scrolling** now"),
            "Stop <strong>scrolling</strong> now"
        );
    }

    #[test]
    fn test_multiple_bold_spans_per_line() {
        assert_eq!(
            caption_to_html("**a** and **b**"),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn test_unpaired_marker_stays_literal() {
        assert_eq!(caption_to_html("oops **dangling"), "oops **dangling");
    }

    #[test]
    fn test_newlines_become_breaks() {
        assert_eq!(caption_to_html("line one\nline two"), "line one<br>line two");
    }

    #[test]
    fn test_markup_is_escaped() {
        assert_eq!(
            caption_to_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_bold_does_not_span_lines() {
        // A pair split across lines is two unpaired markers
        assert_eq!(caption_to_html("**start\nend**"), "**start<br>end**");
    }

    #[test]
    fn test_plain_text_strips_markers() {
        assert_eq!(
            caption_to_plain("Save **this** post\nfor later"),
            "Save this post\nfor later"
        );
    }

    #[test]
    fn test_plain_text_keeps_unpaired_marker() {
        assert_eq!(caption_to_plain("oops **dangling"), "oops **dangling");
    }
}
