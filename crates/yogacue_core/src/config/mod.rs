//! Configuration management for YogaCue.
//!
//! This module provides:
//! - TOML-based configuration with logical sections
//! - Atomic file writes (write to temp, then rename)
//! - Section-level updates (only changed section is modified)
//! - Validation on load with automatic defaults
//!
//! # Example
//!
//! ```no_run
//! use yogacue_core::config::{ConfigManager, ConfigSection};
//!
//! // Create manager and load (or create default) config
//! let mut config = ConfigManager::new(".config/yogacue.toml");
//! config.load_or_create().unwrap();
//!
//! // Read settings
//! println!("ffmpeg: {}", config.settings().normalizer.ffmpeg_path);
//!
//! // Force the stand-in detector and persist only that section
//! config.settings_mut().detector.enabled = false;
//! config.update_section(ConfigSection::Detector).unwrap();
//! ```

mod manager;
mod settings;

pub use manager::{ConfigError, ConfigManager, ConfigResult};
pub use settings::{
    ClassifierSettings, ConfigSection, DetectorSettings, LoggingSettings, NormalizerSettings,
    PathSettings, Settings,
};
