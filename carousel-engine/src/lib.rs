//! # Carousel Engine
//!
//! The async generation pipeline for Carousel Studio.
//!
//! A [`GenerationCoordinator`] owns the three-stage submission flow
//! (plan, parallel caption+image fan-out, finalize) and per-slide
//! regeneration, applying every completion to a shared
//! [`carousel_core::CarouselSession`] behind a [`SessionHandle`]. Every
//! backend call is stamped with the session's generation epoch; completions
//! from a superseded submission are discarded, which stands in for
//! cancellation. Renderers follow along through the handle's broadcast
//! [`StudioEvent`] stream.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod coordinator;
pub mod event;
pub mod handle;

pub use coordinator::{GenerationCoordinator, SubmissionReport};
pub use event::{PipelineStage, StudioEvent};
pub use handle::SessionHandle;

/// Carousel engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
