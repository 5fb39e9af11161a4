//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(name = "carousel-studio")]
#[command(about = "Generate 5-slide social-media carousels from a topic")]
#[command(version)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a carousel for a topic and export it as a PDF
    Generate(GenerateArgs),
    /// Inspect or change the saved generation settings
    Settings {
        /// Settings operation to run.
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

/// Arguments for `carousel-studio generate`.
#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Topic to build the carousel around
    pub topic: String,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Alternative API base URL (proxies, self-hosted gateways)
    #[arg(long, env = "CAROUSEL_API_BASE")]
    pub api_base: Option<String>,

    /// Output PDF path; defaults to a name derived from slide 1's header
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Write the caption to this file instead of printing it
    #[arg(long, value_name = "FILE")]
    pub caption_out: Option<PathBuf>,

    /// Sampling temperature override for this run (0.0 - 2.0)
    #[arg(long, value_name = "T")]
    pub temperature: Option<f32>,

    /// Retry slides whose image generation failed, up to N extra rounds
    #[arg(long, default_value_t = 0, value_name = "N")]
    pub retry_failed: u32,
}

/// Operations on the saved settings.
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Print the effective settings
    Show,
    /// Save new values for one or more settings
    Set(SetArgs),
    /// Remove all saved settings, reverting to the built-in defaults
    Reset,
}

/// Values for `carousel-studio settings set`.
#[derive(Debug, Args)]
pub struct SetArgs {
    /// System instruction for the slide-plan request
    #[arg(long, value_name = "TEXT")]
    pub image_prompt: Option<String>,

    /// System instruction for the caption request
    #[arg(long, value_name = "TEXT")]
    pub caption_prompt: Option<String>,

    /// Sampling temperature (0.0 - 2.0)
    #[arg(long, value_name = "T")]
    pub temperature: Option<f32>,
}

impl SetArgs {
    /// Whether the invocation carries at least one value to save.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.image_prompt.is_none() && self.caption_prompt.is_none() && self.temperature.is_none()
    }
}
