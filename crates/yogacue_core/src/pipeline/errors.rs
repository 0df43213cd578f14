//! Error types for the analysis pipeline.
//!
//! Stage errors are wrapped as they are; [`PipelineError::outcome`] collapses
//! them into the two outcomes a caller can act on.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use crate::classify::UnknownPoseError;
use crate::keypoints::ExtractionError;
use crate::normalize::NormalizeError;

/// Externally visible failure class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The request itself is wrong (unknown pose, empty upload).
    BadInput,
    /// The video could not be processed.
    ProcessingFailed,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::BadInput => write!(f, "bad input"),
            FailureKind::ProcessingFailed => write!(f, "processing failed"),
        }
    }
}

/// Error that aborts one analysis run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The upload has no content.
    #[error("Upload '{filename}' is empty")]
    EmptyUpload { filename: String },

    /// No criteria are registered for the requested pose.
    #[error(transparent)]
    UnknownPose(#[from] UnknownPoseError),

    /// The upload could not be stored for normalization.
    #[error("Normalization failed: {0}")]
    Normalize(#[from] NormalizeError),

    /// Keypoints could not be extracted from the video.
    #[error("Keypoint extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// The run workspace could not be created.
    #[error("Failed to create run workspace under '{path}': {source}")]
    Workspace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    /// Create an empty upload error.
    pub fn empty_upload(filename: impl Into<String>) -> Self {
        Self::EmptyUpload {
            filename: filename.into(),
        }
    }

    /// Create a workspace error.
    pub fn workspace(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Workspace {
            path: path.into(),
            source,
        }
    }

    /// Failure class reported to the caller.
    pub fn outcome(&self) -> FailureKind {
        match self {
            PipelineError::EmptyUpload { .. } | PipelineError::UnknownPose(_) => {
                FailureKind::BadInput
            }
            PipelineError::Normalize(_)
            | PipelineError::Extraction(_)
            | PipelineError::Workspace { .. } => FailureKind::ProcessingFailed,
        }
    }
}

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caller_input_is_bad_input() {
        assert_eq!(
            PipelineError::empty_upload("clip.webm").outcome(),
            FailureKind::BadInput
        );
        assert_eq!(
            PipelineError::from(UnknownPoseError::new("crow")).outcome(),
            FailureKind::BadInput
        );
    }

    #[test]
    fn video_problems_are_processing_failures() {
        let err = PipelineError::from(ExtractionError::NoFrames(PathBuf::from("clip.avi")));
        assert_eq!(err.outcome(), FailureKind::ProcessingFailed);
        assert!(err.to_string().contains("clip.avi"));

        let err = PipelineError::workspace(
            "/tmp/runs",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.outcome(), FailureKind::ProcessingFailed);
        assert_eq!(err.outcome().to_string(), "processing failed");
    }
}
