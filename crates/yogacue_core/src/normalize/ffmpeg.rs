//! FFmpeg-based video conversion.
//!
//! Re-encodes an upload to a fixed frame rate with an intra-frame codec so
//! every frame can be decoded independently.

use std::path::Path;
use std::process::{Command, Stdio};

use super::{ConversionError, VideoConverter};
use crate::config::NormalizerSettings;
use crate::logging::MessagePrefix;

/// Converter that shells out to `ffmpeg`.
#[derive(Debug, Clone)]
pub struct FfmpegConverter {
    program: String,
    target_fps: u32,
    video_codec: String,
    quality: u32,
}

impl FfmpegConverter {
    /// Create a converter from normalizer settings.
    pub fn new(settings: &NormalizerSettings) -> Self {
        Self {
            program: settings.ffmpeg_path.clone(),
            target_fps: settings.target_fps,
            video_codec: settings.video_codec.clone(),
            quality: settings.quality,
        }
    }

    /// Check if the configured ffmpeg binary can be executed.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    /// Build the conversion command.
    fn build_command(&self, input: &Path, output: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-y")
            .arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-i")
            .arg(input)
            .arg("-an") // Audio is irrelevant to pose analysis
            .arg("-q:v")
            .arg(self.quality.to_string())
            .arg("-vcodec")
            .arg(&self.video_codec)
            .arg("-r")
            .arg(self.target_fps.to_string())
            .arg(output);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        cmd
    }
}

impl VideoConverter for FfmpegConverter {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    fn target_fps(&self) -> f64 {
        self.target_fps as f64
    }

    fn codec(&self) -> &str {
        &self.video_codec
    }

    fn convert(&self, input: &Path, output: &Path) -> Result<(), ConversionError> {
        let mut cmd = self.build_command(input, output);
        tracing::debug!("[Normalize] {}", MessagePrefix::Command.format(&format!("{:?}", cmd)));

        let result = cmd.output().map_err(|e| ConversionError::ToolUnavailable {
            tool: self.program.clone(),
            message: e.to_string(),
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(ConversionError::Failed {
                exit_code: result.status.code(),
                message: stderr
                    .lines()
                    .last()
                    .unwrap_or("unknown error")
                    .to_string(),
            });
        }

        let written = std::fs::metadata(output).map(|m| m.len()).unwrap_or(0);
        if written == 0 {
            return Err(ConversionError::EmptyOutput(output.to_path_buf()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with(program: &str) -> NormalizerSettings {
        NormalizerSettings {
            ffmpeg_path: program.to_string(),
            ..NormalizerSettings::default()
        }
    }

    #[test]
    fn command_targets_fixed_rate_and_codec() {
        let converter = FfmpegConverter::new(&NormalizerSettings::default());
        let cmd = converter.build_command(Path::new("in.webm"), Path::new("out.avi"));
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        let pos = |flag: &str| args.iter().position(|a| a == flag).unwrap();
        assert_eq!(args[pos("-vcodec") + 1], "mjpeg");
        assert_eq!(args[pos("-r") + 1], "30");
        assert_eq!(args[pos("-q:v") + 1], "0");
        assert_eq!(args.last().unwrap(), "out.avi");
    }

    #[test]
    fn missing_binary_is_unavailable() {
        let converter = FfmpegConverter::new(&settings_with("/nonexistent/bin/ffmpeg"));
        assert!(!converter.is_available());

        let err = converter
            .convert(Path::new("in.webm"), Path::new("out.avi"))
            .unwrap_err();
        assert!(matches!(err, ConversionError::ToolUnavailable { .. }));
    }
}
