// SPDX-License-Identifier: MIT OR Apache-2.0
//! `queue-player` - headless playback for Queue documents.
//!
//! Loads a document, resolves every object at a playback position or over a
//! simulated playback run, and prints the resolved property bags as JSON
//! lines for a renderer or a diff tool to consume.

mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use queue_editor_timeline::{
    Direction, Document, PlaybackController, PlaybackPosition, PlaybackSettings,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "queue-player")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Resolve and play back Queue animation documents", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every object at one playback position
    Resolve {
        /// Document file (JSON)
        document: PathBuf,

        /// Timeline step
        #[arg(short, long)]
        step: i64,

        /// Playback direction
        #[arg(short, long, value_enum, default_value = "pause")]
        direction: DirectionArg,

        /// Progress into the step
        #[arg(short, long, default_value = "0")]
        progress: f32,

        /// Playback settings file (RON)
        #[arg(long)]
        settings: Option<PathBuf>,
    },

    /// Simulate playback through the whole document
    Play {
        /// Document file (JSON)
        document: PathBuf,

        /// Frames per second of the simulation
        #[arg(short, long, default_value = "30")]
        fps: f32,

        /// Play from the last step back to the first
        #[arg(short, long)]
        reverse: bool,

        /// Playback settings file (RON)
        #[arg(long)]
        settings: Option<PathBuf>,
    },

    /// List malformed effects
    Validate {
        /// Document file (JSON)
        document: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Forward,
    Backward,
    Pause,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Forward => Direction::Forward,
            DirectionArg::Backward => Direction::Backward,
            DirectionArg::Pause => Direction::Pause,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        tracing::error!("{e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in [
        format!("queue_editor_player={level}"),
        format!("queue_editor_timeline={level}"),
    ] {
        match directive.parse() {
            Ok(directive) => env_filter = env_filter.add_directive(directive),
            Err(e) => eprintln!("Ignoring log directive {directive:?}: {e}"),
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Resolve {
            document,
            step,
            direction,
            progress,
            settings,
        } => {
            let document = load_document(&document)?;
            let settings = load_settings(settings.as_deref())?;
            let position = PlaybackPosition::new(step, direction.into(), progress);
            output::print_frames(&document, &settings.resolver(), position)
        }
        Commands::Play {
            document,
            fps,
            reverse,
            settings,
        } => {
            let document = load_document(&document)?;
            let settings = load_settings(settings.as_deref())?;
            play(&document, &settings, fps, reverse)
        }
        Commands::Validate { document } => validate(&load_document(&document)?),
    }
}

fn load_document(path: &Path) -> Result<Document> {
    let document = Document::load(path)
        .with_context(|| format!("Failed to load document {}", path.display()))?;
    tracing::info!(
        "Loaded {:?}: {} objects, {} steps",
        document.name,
        document.object_count(),
        document.step_count()
    );
    Ok(document)
}

fn load_settings(path: Option<&Path>) -> Result<PlaybackSettings> {
    match path {
        Some(path) => PlaybackSettings::load(path)
            .with_context(|| format!("Failed to load settings {}", path.display())),
        None => Ok(PlaybackSettings::default()),
    }
}

fn play(document: &Document, settings: &PlaybackSettings, fps: f32, reverse: bool) -> Result<()> {
    anyhow::ensure!(fps > 0.0, "fps must be positive, got {fps}");
    anyhow::ensure!(
        settings.speed > 0.0,
        "speed must be positive, got {}",
        settings.speed
    );

    let step_count = document.step_count();
    if step_count == 0 {
        tracing::warn!("Document has no effects; nothing to play");
        return Ok(());
    }

    let mut controller = PlaybackController::from_settings(settings);
    // Looping would never end a headless run.
    controller.looping = false;
    if reverse {
        controller.seek(i64::from(step_count) - 1);
        controller.play_reverse();
    } else {
        controller.play();
    }

    let resolver = settings.resolver();
    let delta = 1.0 / fps;
    let mut frame = 0u64;

    while controller.is_playing() {
        output::print_playback_frame(document, &resolver, frame, controller.position())?;
        controller.update(delta, step_count);
        frame += 1;
    }
    output::print_playback_frame(document, &resolver, frame, controller.position())?;

    tracing::info!("Played {} frames", frame + 1);
    Ok(())
}

fn validate(document: &Document) -> Result<()> {
    let report = document.validate();
    if report.is_empty() {
        tracing::info!("No malformed effects");
        return Ok(());
    }

    let mut count = 0;
    for (object_id, errors) in &report {
        let name = document
            .object(*object_id)
            .map(|object| object.name.as_str())
            .unwrap_or_default();
        for err in errors {
            println!("{} ({}): {}", name, object_id.0, err);
            count += 1;
        }
    }
    anyhow::bail!("{count} malformed effects")
}
