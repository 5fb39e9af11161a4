//! # Carousel Studio
//!
//! CLI for generating 5-slide social-media carousels: a topic in, a plan
//! and caption from the text model, artwork from the image model, and a
//! square 5-page PDF out.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use carousel_app::cli::{Cli, Command, GenerateArgs, SetArgs, SettingsCommand};
use carousel_app::display;
use carousel_app::settings_store::FileSettingsStore;
use carousel_core::{derive_views, export, StudioSettings, SLIDE_COUNT};
use carousel_engine::{GenerationCoordinator, SessionHandle, StudioEvent};
use carousel_genai::GeminiClient;
use carousel_render::{caption_to_plain, PdfExporter};
use clap::Parser;
use tokio::sync::broadcast;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize structured tracing with optional JSON format.
///
/// Set `RUST_LOG` to control log levels (default: warn for dependencies,
/// info for the carousel crates). Set `RUST_LOG_FORMAT=json` for JSON
/// output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("warn,carousel_app=info,carousel_engine=info,carousel_genai=info")
    });

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => generate(args).await,
        Command::Settings { command } => settings(&command),
    }
}

/// Print pipeline progress as events arrive, until the channel closes.
fn spawn_progress_printer(handle: &SessionHandle) -> tokio::task::JoinHandle<()> {
    let mut rx = handle.subscribe();
    tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(StudioEvent::StageChanged { stage }) => println!("{}", stage.message()),
                Ok(StudioEvent::SlideUpdated { slide, version }) => {
                    println!("  slide {} ready (version {})", slide + 1, version + 1);
                }
                Ok(StudioEvent::SlideFailed { slide, reason }) => {
                    println!("  slide {} failed: {reason}", slide + 1);
                }
                Ok(StudioEvent::CaptionReady) => println!("  caption ready"),
                Ok(StudioEvent::CaptionFailed { reason }) => {
                    println!("  caption failed: {reason}");
                }
                Ok(_) => {}
                Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

async fn generate(args: GenerateArgs) -> anyhow::Result<()> {
    let store = FileSettingsStore::open_default().context("opening settings store")?;
    let mut studio_settings = StudioSettings::load(&store);
    if let Some(temperature) = args.temperature {
        studio_settings.temperature = StudioSettings::clamp_temperature(temperature);
    }

    let client = match &args.api_base {
        Some(base) => GeminiClient::with_base_url(base, &args.api_key),
        None => GeminiClient::new(&args.api_key),
    }
    .context("configuring the Gemini client")?;

    let handle = SessionHandle::new();
    let progress = spawn_progress_printer(&handle);
    let coordinator =
        GenerationCoordinator::new(Arc::new(client), handle.clone(), studio_settings);

    let report = coordinator.submit(&args.topic).await?;
    tracing::debug!(epoch = report.epoch, "submission settled");

    let mut rounds_left = args.retry_failed;
    while rounds_left > 0 {
        let failed: Vec<usize> = handle
            .read(|session| {
                (0..SLIDE_COUNT)
                    .filter(|&slide| session.history().is_empty(slide))
                    .collect()
            })
            .await;
        if failed.is_empty() {
            break;
        }
        rounds_left -= 1;
        println!("Retrying {} failed slide(s)...", failed.len());
        for slide in failed {
            if let Err(e) = coordinator.regenerate(slide).await {
                tracing::warn!(slide, error = %e, "retry could not be issued");
            }
        }
    }
    progress.abort();

    let session = handle.snapshot().await;
    println!();
    for view in derive_views(&session) {
        println!("{}", display::slide_status_line(&view));
    }

    if let Some(caption) = session.caption() {
        let plain = caption_to_plain(caption);
        match &args.caption_out {
            Some(path) => {
                std::fs::write(path, &plain)
                    .with_context(|| format!("writing caption to {}", path.display()))?;
                println!("caption written to {}", path.display());
            }
            None => println!("\n{plain}"),
        }
    } else if let Some(reason) = session.caption_error() {
        eprintln!("caption unavailable: {reason}");
    }

    if !export::is_eligible(&session) {
        anyhow::bail!(
            "export skipped: {} slide(s) still have no image; re-run with --retry-failed or a new topic",
            (0..SLIDE_COUNT)
                .filter(|&slide| session.history().is_empty(slide))
                .count()
        );
    }

    let pages = export::build_pages(&session)?;
    let pdf = PdfExporter::with_defaults().render(&pages)?;
    let out = args.out.map_or_else(
        || {
            let stem = session
                .plan()
                .map_or_else(|| "carousel".to_string(), export::export_filename);
            PathBuf::from(format!("{stem}.pdf"))
        },
        |path| path,
    );
    std::fs::write(&out, pdf).with_context(|| format!("writing PDF to {}", out.display()))?;
    println!("\nexported {} pages to {}", pages.len(), out.display());
    Ok(())
}

fn settings(command: &SettingsCommand) -> anyhow::Result<()> {
    let mut store = FileSettingsStore::open_default().context("opening settings store")?;
    match command {
        SettingsCommand::Show => {
            println!("{}", display::settings_summary(&StudioSettings::load(&store)));
        }
        SettingsCommand::Set(args) => {
            save_settings(&mut store, args)?;
            println!("settings saved to {}", store.path().display());
        }
        SettingsCommand::Reset => {
            StudioSettings::reset(&mut store);
            println!("settings reset to defaults");
        }
    }
    Ok(())
}

fn save_settings(store: &mut FileSettingsStore, args: &SetArgs) -> anyhow::Result<()> {
    if args.is_empty() {
        anyhow::bail!(
            "nothing to set; pass --image-prompt, --caption-prompt, or --temperature"
        );
    }
    let mut current = StudioSettings::load(store);
    if let Some(instruction) = &args.image_prompt {
        current.image_prompt_instruction = instruction.clone();
    }
    if let Some(instruction) = &args.caption_prompt {
        current.caption_instruction = instruction.clone();
    }
    if let Some(temperature) = args.temperature {
        current.temperature = StudioSettings::clamp_temperature(temperature);
    }
    current.save(store);
    Ok(())
}
