//! YogaCue - command-line entry point
//!
//! Handles:
//! - Configuration loading
//! - Logging initialization
//! - Backend selection (once, at startup)
//! - One analysis run, or feedback for an existing label string

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;

use yogacue_core::config::ConfigManager;
use yogacue_core::feedback::{synthesize_labels, FeedbackReport};
use yogacue_core::keypoints::available_backends;
use yogacue_core::logging::{init_tracing, LogLevel};
use yogacue_core::models::{PoseId, RawUpload};
use yogacue_core::pipeline::Analyzer;

#[derive(Parser, Debug)]
#[command(name = "yogacue")]
#[command(about = "Analyze a yoga pose video and report per-criterion labels")]
#[command(version)]
struct Args {
    /// Settings file (created with defaults if missing)
    #[arg(short, long, default_value = ".config/settings.toml", env = "YOGACUE_CONFIG")]
    config: PathBuf,

    /// Pose to check: slug, alias or route id (e.g. warrior2, chair, 3)
    #[arg(short, long)]
    pose: String,

    /// Recorded attempt to analyze
    #[arg(short, long, required_unless_present = "labels")]
    video: Option<PathBuf>,

    /// Explain an existing label string instead of analyzing a video
    #[arg(long, conflicts_with = "video")]
    labels: Option<String>,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<LogLevel>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config_manager = ConfigManager::new(&args.config);
    if let Err(e) = config_manager.load_or_create() {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
    }
    if let Some(level) = args.log_level {
        config_manager.settings_mut().logging.level = level;
    }

    let _log_guard = init_tracing(
        &config_manager.settings().logging,
        config_manager.logs_folder(),
    );
    tracing::info!("YogaCue starting (core {})", yogacue_core::version());
    tracing::info!("Config: {}", args.config.display());

    if let Err(e) = config_manager.ensure_dirs_exist() {
        tracing::error!("Failed to create directories: {}", e);
    }

    if let Some(labels) = &args.labels {
        let pose = PoseId::parse(&args.pose).ok_or_else(|| anyhow!("Unknown pose '{}'", args.pose))?;
        let report = synthesize_labels(pose, labels)
            .with_context(|| format!("Invalid labels for {}", pose.display_name()))?;
        return print_report(&report);
    }

    let video = args
        .video
        .as_ref()
        .ok_or_else(|| anyhow!("--video is required"))?;
    let bytes =
        fs::read(video).with_context(|| format!("Failed to read video {}", video.display()))?;
    let filename = video
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    tracing::info!(
        "Keypoint backends available: {}",
        available_backends(&config_manager.settings().detector).join(", ")
    );
    let analyzer = Analyzer::from_settings(config_manager.settings());
    let analysis = analyzer
        .analyze(&RawUpload::new(bytes, filename), &args.pose)
        .map_err(|e| {
            let outcome = e.outcome();
            anyhow::Error::new(e).context(format!("Analysis failed ({})", outcome))
        })?;

    if let Some(reason) = &analysis.degraded {
        tracing::warn!("Analyzed the original upload: {}", reason);
    }

    println!("{}", analysis.labels.encode());
    print_report(&analysis.feedback())
}

fn print_report(report: &FeedbackReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize feedback")?;
    println!("{}", json);
    Ok(())
}
