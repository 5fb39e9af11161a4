//! # Carousel GenAI
//!
//! The generative backend boundary for Carousel Studio.
//!
//! The pipeline consumes exactly three capabilities — plan a carousel,
//! caption it, illustrate one slide — expressed as the
//! [`GenerativeBackend`] trait. [`GeminiClient`] implements them against
//! the Generative Language REST API; tests implement them with scripted
//! fakes.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod backend;
pub mod error;
pub mod gemini;

pub use backend::GenerativeBackend;
pub use error::{GenAiError, GenAiResult};
pub use gemini::{GeminiClient, IMAGE_MODEL, TEXT_MODEL};

/// Carousel genai version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
