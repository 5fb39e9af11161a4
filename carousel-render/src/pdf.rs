//! Carousel PDF assembly.
//!
//! Builds a square document with one page per slide, each page filled by
//! that slide's currently selected image, using printpdf with embedded
//! images.

use carousel_core::ImageData;

use crate::error::{RenderError, RenderResult};

/// Configuration for the exported document.
#[derive(Debug, Clone)]
pub struct PdfConfig {
    /// Square page edge length in pixels.
    pub page_size_px: u32,
    /// DPI used to convert pixels to physical page units.
    pub dpi: f32,
    /// PDF document title.
    pub title: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            page_size_px: 400,
            dpi: 96.0,
            title: "Carousel Export".to_string(),
        }
    }
}

/// Assembles carousel pages into a PDF document.
pub struct PdfExporter {
    config: PdfConfig,
}

impl PdfExporter {
    /// Create an exporter with the given configuration.
    #[must_use]
    pub const fn new(config: PdfConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(PdfConfig::default())
    }

    /// Render the page sequence into PDF bytes.
    ///
    /// Pages appear in the order given, one image per page, each scaled to
    /// fill its square page.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidPages`] for an empty sequence,
    /// [`RenderError::ImageDecode`] if a payload is not a decodable image,
    /// or [`RenderError::Export`] if PDF serialization fails.
    #[allow(clippy::cast_precision_loss)]
    pub fn render(&self, pages: &[ImageData]) -> RenderResult<Vec<u8>> {
        if pages.is_empty() {
            return Err(RenderError::InvalidPages(
                "document must contain at least one page".to_string(),
            ));
        }

        // Convert pixel dimensions to mm: pixels / dpi * 25.4
        let page_mm = self.config.page_size_px as f32 / self.config.dpi * 25.4;

        let (doc, first_page, first_layer) = printpdf::PdfDocument::new(
            &self.config.title,
            printpdf::Mm(page_mm),
            printpdf::Mm(page_mm),
            "Slide 1",
        );

        for (index, page) in pages.iter().enumerate() {
            let (page_idx, layer_idx) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(
                    printpdf::Mm(page_mm),
                    printpdf::Mm(page_mm),
                    format!("Slide {}", index + 1),
                )
            };
            let layer = doc.get_page(page_idx).get_layer(layer_idx);

            // Decode using printpdf's bundled image crate for compatibility
            let dynamic_image = printpdf::image_crate::load_from_memory(&page.bytes)
                .map_err(|e| {
                    RenderError::ImageDecode(format!("page {}: {e}", index + 1))
                })?;

            let scale_x = self.config.page_size_px as f32 / dynamic_image.width() as f32;
            let scale_y = self.config.page_size_px as f32 / dynamic_image.height() as f32;

            let pdf_image = printpdf::Image::from_dynamic_image(&dynamic_image);
            let transform = printpdf::ImageTransform {
                translate_x: Some(printpdf::Mm(0.0)),
                translate_y: Some(printpdf::Mm(0.0)),
                scale_x: Some(scale_x),
                scale_y: Some(scale_y),
                dpi: Some(self.config.dpi),
                ..Default::default()
            };
            pdf_image.add_to_layer(layer, transform);
        }

        tracing::debug!(pages = pages.len(), "carousel PDF assembled");
        doc.save_to_bytes()
            .map_err(|e| RenderError::Export(format!("PDF save failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_payload(edge: u32, shade: u8) -> ImageData {
        let mut raster = image::RgbaImage::new(edge, edge);
        for pixel in raster.pixels_mut() {
            *pixel = image::Rgba([shade, shade, shade, 255]);
        }
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(raster)
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .expect("png encode");
        ImageData::png(bytes)
    }

    /// Count occurrences of a byte pattern in the serialized document.
    fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
        haystack.windows(needle.len()).filter(|w| *w == needle).count()
    }

    #[test]
    fn test_five_page_export_produces_valid_bytes() {
        let pages: Vec<ImageData> = (0..5u8).map(|n| png_payload(16, n * 40)).collect();
        let pdf = PdfExporter::with_defaults().render(&pages).expect("pdf");

        // PDF header: %PDF-
        assert!(pdf.len() > 5);
        assert_eq!(&pdf[0..5], b"%PDF-");
        // The page tree carries one entry per slide
        assert_eq!(count_occurrences(&pdf, b"/Count 5"), 1);
    }

    #[test]
    fn test_single_page_export() {
        let pdf = PdfExporter::with_defaults()
            .render(&[png_payload(8, 128)])
            .expect("pdf");
        assert_eq!(&pdf[0..5], b"%PDF-");
    }

    #[test]
    fn test_empty_page_sequence_is_rejected() {
        let result = PdfExporter::with_defaults().render(&[]);
        assert!(matches!(result, Err(RenderError::InvalidPages(_))));
    }

    #[test]
    fn test_undecodable_payload_is_rejected() {
        let junk = ImageData::png(vec![0, 1, 2, 3]);
        let result = PdfExporter::with_defaults().render(&[junk]);
        assert!(matches!(result, Err(RenderError::ImageDecode(_))));
    }

    #[test]
    fn test_custom_page_size() {
        let exporter = PdfExporter::new(PdfConfig {
            page_size_px: 1080,
            ..PdfConfig::default()
        });
        let pdf = exporter.render(&[png_payload(16, 0)]).expect("pdf");
        assert_eq!(&pdf[0..5], b"%PDF-");
    }
}
