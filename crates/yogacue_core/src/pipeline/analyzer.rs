//! Analyzer that chains the stages for one upload.

use std::path::PathBuf;

use serde::Serialize;

use super::errors::{PipelineError, PipelineResult};
use super::workspace::RunWorkspace;
use crate::classify::{classify_pose, lookup, ClassifierPolicy, LabelVector};
use crate::config::Settings;
use crate::feedback::{synthesize, FeedbackReport};
use crate::keypoints::{select_backend, KeypointBackend};
use crate::logging::MessagePrefix;
use crate::models::RawUpload;
use crate::normalize::Normalizer;

/// Result of a completed analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub labels: LabelVector,
    /// Backend that produced the keypoints.
    pub backend: String,
    /// Frames the classifier saw.
    pub frame_count: usize,
    /// Why conversion fell back to the original upload, if it did.
    pub degraded: Option<String>,
}

impl Analysis {
    /// Feedback report for the labels.
    pub fn feedback(&self) -> FeedbackReport {
        synthesize(&self.labels)
    }
}

/// Long-lived pipeline: normalizer, detector backend and classifier policy.
///
/// Built once per process and shared read-only by every run.
pub struct Analyzer {
    temp_root: PathBuf,
    normalizer: Normalizer,
    backend: Box<dyn KeypointBackend>,
    policy: ClassifierPolicy,
}

impl Analyzer {
    /// Build from settings, selecting the keypoint backend by availability.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_backend(settings, select_backend(&settings.detector))
    }

    /// Build from settings with an explicit keypoint backend.
    pub fn with_backend(settings: &Settings, backend: Box<dyn KeypointBackend>) -> Self {
        Self::with_parts(
            PathBuf::from(&settings.paths.temp_root),
            Normalizer::from_settings(&settings.normalizer),
            backend,
            ClassifierPolicy::from(&settings.classifier),
        )
    }

    pub fn with_parts(
        temp_root: PathBuf,
        normalizer: Normalizer,
        backend: Box<dyn KeypointBackend>,
        policy: ClassifierPolicy,
    ) -> Self {
        Self {
            temp_root,
            normalizer,
            backend,
            policy,
        }
    }

    /// Name of the selected keypoint backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Run normalization, extraction and classification for one upload.
    ///
    /// The pose is resolved before any file is written, so an unknown pose
    /// does no extraction work. The run workspace is removed on every exit
    /// path.
    pub fn analyze(&self, upload: &RawUpload, pose_id: &str) -> PipelineResult<Analysis> {
        if upload.is_empty() {
            tracing::warn!("[Pipeline] Rejecting empty upload '{}'", upload.declared_filename);
            return Err(PipelineError::empty_upload(&upload.declared_filename));
        }

        let criteria = lookup(pose_id).map_err(|e| {
            tracing::warn!("[Pipeline] {}", e);
            PipelineError::from(e)
        })?;

        let workspace = RunWorkspace::acquire(&self.temp_root)?;
        let span = tracing::info_span!(
            "analysis",
            run = %workspace.run_id(),
            pose = %criteria.pose
        );
        let _entered = span.enter();

        tracing::info!("[Pipeline] {}", MessagePrefix::Phase.format("Normalize"));
        let normalized = self.normalizer.normalize(upload, workspace.path())?;
        let degraded = normalized.degradation().map(|reason| reason.to_string());

        tracing::info!(
            "[Pipeline] {}",
            MessagePrefix::Phase.format(&format!("Extract ({})", self.backend.name()))
        );
        let frames = self.backend.extract(normalized.into_video())?;

        tracing::info!("[Pipeline] {}", MessagePrefix::Phase.format("Classify"));
        let labels = classify_pose(&frames, criteria, &self.policy);

        workspace.release();
        tracing::info!(
            "[Pipeline] {}",
            MessagePrefix::Success.format(&format!("Labels {}", labels.encode()))
        );

        Ok(Analysis {
            labels,
            backend: self.backend.name().to_string(),
            frame_count: frames.len(),
            degraded,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypoints::{reference_skeleton, ExtractionError};
    use crate::models::{CanonicalVideo, JointCoordinate, PoseFrameSample};
    use crate::pipeline::FailureKind;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::{tempdir, TempDir};

    /// Backend that counts calls and returns the reference skeleton.
    struct CountingBackend {
        calls: Arc<AtomicUsize>,
    }

    impl KeypointBackend for CountingBackend {
        fn name(&self) -> &str {
            "counting"
        }

        fn extract(&self, video: CanonicalVideo) -> Result<Vec<PoseFrameSample>, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok((0..10)
                .map(|i| {
                    PoseFrameSample::from_fn(i, video.frame_time(i), |j| {
                        let (x, y) = reference_skeleton(j);
                        JointCoordinate::new(x, y, 0.9)
                    })
                })
                .collect())
        }
    }

    struct FailingBackend;

    impl KeypointBackend for FailingBackend {
        fn name(&self) -> &str {
            "failing"
        }

        fn extract(&self, video: CanonicalVideo) -> Result<Vec<PoseFrameSample>, ExtractionError> {
            Err(ExtractionError::NoFrames(video.path))
        }
    }

    /// Settings with no external tools available.
    fn offline_settings(root: &Path) -> Settings {
        let mut settings = Settings::default();
        settings.paths.temp_root = root.join("runs").to_string_lossy().into_owned();
        settings.normalizer.ffmpeg_path = "/nonexistent/ffmpeg".to_string();
        settings.detector.openpose_path = "/nonexistent/OpenPoseDemo".to_string();
        settings.detector.standin_frames = 30;
        settings
    }

    fn upload() -> RawUpload {
        RawUpload::new(b"fake webm bytes".to_vec(), "attempt.webm")
    }

    fn run_dirs(root: &TempDir) -> usize {
        std::fs::read_dir(root.path().join("runs"))
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    #[test]
    fn missing_tools_fall_back_and_complete() {
        crate::logging::init_test_tracing();
        let root = tempdir().unwrap();
        let analyzer = Analyzer::from_settings(&offline_settings(root.path()));
        assert_eq!(analyzer.backend_name(), "stand-in");

        let analysis = analyzer.analyze(&upload(), "warrior2").unwrap();
        assert_eq!(analysis.labels.len(), 10);
        assert_eq!(analysis.backend, "stand-in");
        assert_eq!(analysis.frame_count, 30);
        assert!(analysis.degraded.is_some());
        assert_eq!(analysis.labels.encode(), "1,1,1,1,1,1,1,1,1,1");
    }

    #[test]
    fn degraded_conversion_keeps_label_count() {
        let root = tempdir().unwrap();
        let analyzer = Analyzer::from_settings(&offline_settings(root.path()));
        for (pose, expected) in [("chair", 6), ("plank", 5), ("warrior2_back", 6)] {
            let analysis = analyzer.analyze(&upload(), pose).unwrap();
            assert!(analysis.degraded.is_some());
            assert_eq!(analysis.labels.len(), expected);
        }
    }

    #[test]
    fn unknown_pose_does_no_extraction() {
        let root = tempdir().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let analyzer = Analyzer::with_backend(
            &offline_settings(root.path()),
            Box::new(CountingBackend {
                calls: Arc::clone(&calls),
            }),
        );

        let err = analyzer.analyze(&upload(), "headstand").unwrap_err();
        assert!(matches!(err, PipelineError::UnknownPose(_)));
        assert_eq!(err.outcome(), FailureKind::BadInput);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(run_dirs(&root), 0);

        analyzer.analyze(&upload(), "1").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn empty_upload_is_bad_input() {
        let root = tempdir().unwrap();
        let analyzer = Analyzer::from_settings(&offline_settings(root.path()));
        let err = analyzer
            .analyze(&RawUpload::new(Vec::new(), "empty.webm"), "plank")
            .unwrap_err();
        assert!(matches!(err, PipelineError::EmptyUpload { .. }));
        assert_eq!(err.outcome(), FailureKind::BadInput);
    }

    #[test]
    fn extraction_failure_propagates_and_cleans_up() {
        let root = tempdir().unwrap();
        let analyzer =
            Analyzer::with_backend(&offline_settings(root.path()), Box::new(FailingBackend));

        let err = analyzer.analyze(&upload(), "plank").unwrap_err();
        assert!(matches!(err, PipelineError::Extraction(_)));
        assert_eq!(err.outcome(), FailureKind::ProcessingFailed);
        assert_eq!(run_dirs(&root), 0);
    }

    #[test]
    fn workspace_removed_after_success() {
        let root = tempdir().unwrap();
        let analyzer = Analyzer::from_settings(&offline_settings(root.path()));
        analyzer.analyze(&upload(), "plank").unwrap();
        assert_eq!(run_dirs(&root), 0);
    }

    #[test]
    fn same_upload_same_labels() {
        let root = tempdir().unwrap();
        let analyzer = Analyzer::from_settings(&offline_settings(root.path()));
        let a = analyzer.analyze(&upload(), "chair").unwrap();
        let b = analyzer.analyze(&upload(), "chair").unwrap();
        assert_eq!(a.labels, b.labels);
    }

    #[test]
    fn feedback_from_analysis() {
        let root = tempdir().unwrap();
        let analyzer = Analyzer::from_settings(&offline_settings(root.path()));
        let report = analyzer.analyze(&upload(), "warrior2").unwrap().feedback();
        assert_eq!(report.statements.len(), 10);
        assert!(report.is_successful);
    }
}
