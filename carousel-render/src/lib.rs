//! # Carousel Render
//!
//! Stateless output formatting for Carousel Studio: assembling the square
//! 5-page PDF from the selected image versions, and rendering the caption's
//! markdown subset for display or the clipboard. Nothing here holds state;
//! everything is a pure function of its inputs.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod caption;
pub mod error;
pub mod pdf;

pub use caption::{caption_to_html, caption_to_plain};
pub use error::{RenderError, RenderResult};
pub use pdf::{PdfConfig, PdfExporter};

/// Carousel render version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
