//! Upload and canonical video descriptors.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Video bytes as received from the caller.
#[derive(Clone)]
pub struct RawUpload {
    /// Uploaded content.
    pub bytes: Vec<u8>,
    /// Filename declared by the client. Only used for an extension hint.
    pub declared_filename: String,
}

impl RawUpload {
    pub fn new(bytes: impl Into<Vec<u8>>, declared_filename: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            declared_filename: declared_filename.into(),
        }
    }

    /// Number of bytes uploaded.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check whether the upload has no content.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for RawUpload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawUpload")
            .field("len", &self.bytes.len())
            .field("declared_filename", &self.declared_filename)
            .finish()
    }
}

/// Where a canonical video came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VideoOrigin {
    /// Re-encoded to the canonical frame rate and codec.
    Converted,
    /// Conversion failed; this is the original upload.
    Original,
}

/// A frame-addressable video ready for keypoint extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalVideo {
    /// Location inside the run workspace.
    pub path: PathBuf,
    /// Frame rate used for frame-to-time mapping.
    pub fps: f64,
    /// Video codec name (`mjpeg` after conversion, `unknown` for originals).
    pub codec: String,
    /// Whether the file was converted.
    pub origin: VideoOrigin,
}

impl CanonicalVideo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Timestamp in seconds for a frame index.
    pub fn frame_time(&self, index: u32) -> f64 {
        if self.fps > 0.0 {
            index as f64 / self.fps
        } else {
            0.0
        }
    }

    /// True when the frame rate is guaranteed by conversion.
    pub fn is_converted(&self) -> bool {
        self.origin == VideoOrigin::Converted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_time_uses_fps() {
        let video = CanonicalVideo {
            path: PathBuf::from("clip.avi"),
            fps: 30.0,
            codec: "mjpeg".to_string(),
            origin: VideoOrigin::Converted,
        };
        assert!((video.frame_time(45) - 1.5).abs() < 1e-9);
        assert!(video.is_converted());
    }

    #[test]
    fn upload_debug_hides_bytes() {
        let upload = RawUpload::new(vec![1u8, 2, 3], "clip.webm");
        let dbg = format!("{:?}", upload);
        assert!(dbg.contains("len: 3"));
        assert!(dbg.contains("clip.webm"));
    }
}
