//! YogaCue Core - Video-to-label yoga pose analysis
//!
//! This crate contains the whole analysis pipeline with zero web dependencies.
//! It can be used by a web handler or the bundled CLI.
//!
//! Stages, in order:
//! - [`normalize`] - convert an upload into a fixed-rate intra-frame video
//! - [`keypoints`] - extract per-frame joint coordinates (real or stand-in backend)
//! - [`classify`] - evaluate a pose's geometric criteria into a label vector
//! - [`feedback`] - turn a label vector into a success rate and statements
//!
//! [`pipeline::Analyzer`] chains the stages for one upload.

pub mod classify;
pub mod config;
pub mod feedback;
pub mod keypoints;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod pipeline;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_returns_value() {
        assert!(!version().is_empty());
    }
}
