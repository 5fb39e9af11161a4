//! # Carousel Studio CLI
//!
//! Command-line front end for Carousel Studio: wires the Gemini client,
//! the generation pipeline, the file-backed settings store, and the PDF
//! exporter together. The library half holds everything the binary and
//! the integration tests share; `main.rs` only parses arguments and
//! dispatches.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod display;
pub mod settings_store;

pub use cli::{Cli, Command, GenerateArgs, SetArgs, SettingsCommand};
pub use settings_store::{FileSettingsStore, SettingsStoreError};

/// Carousel app version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
