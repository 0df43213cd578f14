//! Analysis pipeline.
//!
//! Runs one upload through the stages in order:
//! 1. Normalize - store the upload and convert it (degrades, never fails
//!    on conversion)
//! 2. Extract - per-frame keypoints from the selected backend
//! 3. Classify - label vector for the requested pose
//!
//! Feedback is synthesized separately from the label vector, see
//! [`crate::feedback`].
//!
//! # Usage
//!
//! ```ignore
//! use yogacue_core::pipeline::Analyzer;
//!
//! let analyzer = Analyzer::from_settings(&settings);
//! let analysis = analyzer.analyze(&upload, "warrior2")?;
//! println!("{}", analysis.labels.encode());
//! ```

mod analyzer;
mod errors;
mod workspace;

pub use analyzer::{Analysis, Analyzer};
pub use errors::{FailureKind, PipelineError, PipelineResult};
pub use workspace::RunWorkspace;
