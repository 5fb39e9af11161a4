//! # Carousel Core
//!
//! State core for Carousel Studio: a topic becomes a 5-slide plan, every
//! slide accumulates an append-only history of generated image versions,
//! and all renderable state is derived — never stored — so it stays
//! consistent while independent generation calls land in any order.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │               carousel-core                 │
//! ├─────────────────────────────────────────────┤
//! │  SlidePlan        │  ImageVersionStore      │
//! │  - 5 fixed slides │  - append-only versions │
//! │  - prompt edits   │  - selection pointers   │
//! ├─────────────────────────────────────────────┤
//! │  CarouselSession  │  Derivation             │
//! │  - epoch tagging  │  - SlideStatus          │
//! │  - edit flow      │  - SlideView            │
//! │  - caption state  │  - export gate          │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! The async pipeline that feeds this state lives in `carousel-engine`;
//! this crate has no runtime dependency and every derivation is a pure
//! function of the session, replay-safe by construction.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod edit;
pub mod error;
pub mod export;
pub mod history;
pub mod image;
pub mod session;
pub mod settings;
pub mod slide;
pub mod status;
pub mod view;

pub use edit::EditFlow;
pub use error::{CarouselError, CarouselResult};
pub use history::{CycleDirection, ImageVersionStore};
pub use image::{ImageData, ImageFormat};
pub use session::{CarouselSession, GenerationEpoch};
pub use settings::{SettingsStore, StudioSettings, DEFAULT_TEMPERATURE};
pub use slide::{SlidePlan, SlideSpec, SLIDE_COUNT};
pub use status::SlideStatus;
pub use view::{derive_slide_view, derive_views, HistoryControls, SlideContent, SlideView};

/// Carousel core version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
