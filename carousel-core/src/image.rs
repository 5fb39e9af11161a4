//! Image payloads produced by the image backend.

use serde::{Deserialize, Serialize};

/// Encoded raster formats the image backend can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// WebP image.
    WebP,
}

impl ImageFormat {
    /// MIME type for this format.
    #[must_use]
    pub const fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::WebP => "image/webp",
        }
    }

    /// Parse a MIME type string into a format, if recognized.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "image/png" => Some(Self::Png),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/webp" => Some(Self::WebP),
            _ => None,
        }
    }
}

/// One encoded image payload as received from the backend.
///
/// The bytes are opaque to the state core; they are only decoded at export
/// time when the PDF is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageData {
    /// Encoding of `bytes`.
    pub format: ImageFormat,
    /// Encoded raster bytes.
    pub bytes: Vec<u8>,
}

impl ImageData {
    /// Create a payload with an explicit format.
    #[must_use]
    pub const fn new(format: ImageFormat, bytes: Vec<u8>) -> Self {
        Self { format, bytes }
    }

    /// Create a PNG payload, the image backend's default output format.
    #[must_use]
    pub const fn png(bytes: Vec<u8>) -> Self {
        Self::new(ImageFormat::Png, bytes)
    }

    /// Byte length of the encoded payload.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_round_trip() {
        for format in [ImageFormat::Png, ImageFormat::Jpeg, ImageFormat::WebP] {
            assert_eq!(ImageFormat::from_mime(format.mime_type()), Some(format));
        }
    }

    #[test]
    fn test_unknown_mime_is_none() {
        assert_eq!(ImageFormat::from_mime("image/tiff"), None);
        assert_eq!(ImageFormat::from_mime(""), None);
    }

    #[test]
    fn test_png_constructor() {
        let data = ImageData::png(vec![1, 2, 3]);
        assert_eq!(data.format, ImageFormat::Png);
        assert_eq!(data.len(), 3);
        assert!(!data.is_empty());
    }
}
