//! Format normalization.
//!
//! Turns an arbitrary upload into a [`CanonicalVideo`]: fixed frame rate,
//! intra-frame codec, written to a fresh file in the run workspace.
//!
//! Conversion failure never aborts the run. The original upload becomes the
//! canonical video and the result is [`Normalized::Degraded`], so callers can
//! see (and log) that frame-rate determinism is weaker.
//!
//! The normalizer writes into a directory owned by the caller and never
//! deletes anything itself.

mod ffmpeg;
mod filename;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use ffmpeg::FfmpegConverter;
pub use filename::{extension_hint, upload_name, DEFAULT_EXTENSION};

use crate::config::NormalizerSettings;
use crate::logging::MessagePrefix;
use crate::models::{CanonicalVideo, RawUpload, VideoOrigin};

/// Codec name recorded for unconverted uploads.
pub const UNKNOWN_CODEC: &str = "unknown";

/// Why conversion did not produce a canonical file.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// The conversion tool could not be started.
    #[error("{tool} could not be executed: {message}")]
    ToolUnavailable { tool: String, message: String },

    /// The tool ran and reported failure.
    #[error("conversion failed (exit code {exit_code:?}): {message}")]
    Failed {
        exit_code: Option<i32>,
        message: String,
    },

    /// The tool reported success but wrote nothing.
    #[error("conversion produced no output at '{0}'")]
    EmptyOutput(PathBuf),
}

/// Errors that prevent normalization from producing any video.
#[derive(Debug, thiserror::Error)]
pub enum NormalizeError {
    /// The upload could not be stored in the workspace.
    #[error("Failed to store upload at '{path}': {source}")]
    StoreUpload {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// External codec-conversion capability.
pub trait VideoConverter: Send + Sync {
    /// Tool name for logging.
    fn name(&self) -> &str;

    /// Frame rate of converted output.
    fn target_fps(&self) -> f64;

    /// Codec of converted output.
    fn codec(&self) -> &str;

    /// Convert `input` into `output`. `output` must not exist afterwards
    /// unless conversion succeeded.
    fn convert(&self, input: &Path, output: &Path) -> Result<(), ConversionError>;
}

/// Outcome of normalization.
#[derive(Debug)]
pub enum Normalized {
    /// The upload was converted to the canonical format.
    Converted(CanonicalVideo),
    /// Conversion failed; the original upload stands in as canonical video.
    Degraded {
        video: CanonicalVideo,
        reason: ConversionError,
    },
}

impl Normalized {
    /// The canonical video, whichever branch was taken.
    pub fn video(&self) -> &CanonicalVideo {
        match self {
            Normalized::Converted(video) => video,
            Normalized::Degraded { video, .. } => video,
        }
    }

    /// Consume and return the canonical video.
    pub fn into_video(self) -> CanonicalVideo {
        match self {
            Normalized::Converted(video) => video,
            Normalized::Degraded { video, .. } => video,
        }
    }

    /// Whether the fallback branch was taken.
    pub fn is_degraded(&self) -> bool {
        matches!(self, Normalized::Degraded { .. })
    }

    /// Conversion failure, if degraded.
    pub fn degradation(&self) -> Option<&ConversionError> {
        match self {
            Normalized::Converted(_) => None,
            Normalized::Degraded { reason, .. } => Some(reason),
        }
    }
}

/// Format normalizer stage.
pub struct Normalizer {
    converter: Box<dyn VideoConverter>,
    container: String,
    assumed_fps: f64,
}

impl Normalizer {
    /// Create a normalizer using ffmpeg as configured.
    pub fn from_settings(settings: &NormalizerSettings) -> Self {
        let converter = FfmpegConverter::new(settings);
        if !converter.is_available() {
            tracing::warn!(
                "[Normalize] '{}' not runnable, uploads will be analyzed unconverted",
                settings.ffmpeg_path
            );
        }
        Self::with_converter(Box::new(converter), settings)
    }

    /// Create a normalizer with a custom converter.
    pub fn with_converter(converter: Box<dyn VideoConverter>, settings: &NormalizerSettings) -> Self {
        Self {
            converter,
            container: settings.container.clone(),
            assumed_fps: settings.assumed_fps,
        }
    }

    /// Normalize an upload into `work_dir`.
    ///
    /// The upload is stored as `source.<ext>` and converted to
    /// `canonical.<container>`. Only failing to store the upload is an
    /// error; conversion failure yields [`Normalized::Degraded`].
    pub fn normalize(&self, upload: &RawUpload, work_dir: &Path) -> Result<Normalized, NormalizeError> {
        let display_name = upload_name(&upload.declared_filename);
        let source_path = work_dir.join(format!("source.{}", extension_hint(&display_name)));

        tracing::info!(
            "[Normalize] Storing upload '{}' ({} bytes)",
            display_name,
            upload.len()
        );
        fs::write(&source_path, &upload.bytes).map_err(|source| NormalizeError::StoreUpload {
            path: source_path.clone(),
            source,
        })?;

        let output_path = work_dir.join(format!("canonical.{}", self.container));
        tracing::info!(
            "[Normalize] Converting with {} to {} @ {} fps",
            self.converter.name(),
            self.converter.codec(),
            self.converter.target_fps()
        );

        let converted = self
            .converter
            .convert(&source_path, &output_path)
            .and_then(|()| match fs::metadata(&output_path) {
                Ok(meta) if meta.len() > 0 => Ok(()),
                _ => Err(ConversionError::EmptyOutput(output_path.clone())),
            });

        match converted {
            Ok(()) => {
                tracing::info!(
                    "[Normalize] {}",
                    MessagePrefix::Success.format("Conversion successful")
                );
                Ok(Normalized::Converted(CanonicalVideo {
                    path: output_path,
                    fps: self.converter.target_fps(),
                    codec: self.converter.codec().to_string(),
                    origin: VideoOrigin::Converted,
                }))
            }
            Err(reason) => {
                tracing::warn!(
                    "[Normalize] {}",
                    MessagePrefix::Warning.format(&format!(
                        "Conversion degraded, using original upload: {}",
                        reason
                    ))
                );
                // Don't leave a partial file next to the fallback
                let _ = fs::remove_file(&output_path);
                Ok(Normalized::Degraded {
                    video: CanonicalVideo {
                        path: source_path,
                        fps: self.assumed_fps,
                        codec: UNKNOWN_CODEC.to_string(),
                        origin: VideoOrigin::Original,
                    },
                    reason,
                })
            }
        }
    }
}
