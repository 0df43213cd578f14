//! Data models shared by the pipeline stages.
//!
//! - Joints, joint coordinates and per-frame samples
//! - The closed set of supported poses
//! - Upload and canonical video descriptors

mod joints;
mod poses;
mod video;

pub use joints::{Joint, JointCoordinate, Point, PoseFrameSample};
pub use poses::PoseId;
pub use video::{CanonicalVideo, RawUpload, VideoOrigin};
