//! Per-run scratch directory.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use super::errors::{PipelineError, PipelineResult};

/// Scratch directory owned by one run.
///
/// Created under the configured temp root and removed when dropped, so
/// every exit path of a run releases it.
#[derive(Debug)]
pub struct RunWorkspace {
    dir: TempDir,
}

impl RunWorkspace {
    /// Create a fresh `run_*` directory under `root`.
    pub fn acquire(root: &Path) -> PipelineResult<Self> {
        fs::create_dir_all(root).map_err(|e| PipelineError::workspace(root, e))?;
        let dir = tempfile::Builder::new()
            .prefix("run_")
            .tempdir_in(root)
            .map_err(|e| PipelineError::workspace(root, e))?;
        tracing::debug!("[Pipeline] Workspace: {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Run identifier (the directory name).
    pub fn run_id(&self) -> String {
        self.dir
            .path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Remove the directory now, logging instead of failing on error.
    pub fn release(self) {
        let path = self.dir.path().to_path_buf();
        if let Err(e) = self.dir.close() {
            tracing::warn!(
                "[Pipeline] Failed to remove workspace {}: {}",
                path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn removed_on_release_and_drop() {
        let root = tempdir().unwrap();

        let ws = RunWorkspace::acquire(root.path()).unwrap();
        let first = ws.path().to_path_buf();
        fs::write(first.join("source.webm"), b"data").unwrap();
        assert!(ws.run_id().starts_with("run_"));
        ws.release();
        assert!(!first.exists());

        let second = {
            let ws = RunWorkspace::acquire(root.path()).unwrap();
            ws.path().to_path_buf()
        };
        assert!(!second.exists());
    }

    #[test]
    fn creates_missing_root() {
        let root = tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        let ws = RunWorkspace::acquire(&nested).unwrap();
        assert!(ws.path().starts_with(&nested));
    }

    #[test]
    fn unusable_root_is_workspace_error() {
        let root = tempdir().unwrap();
        let file = root.path().join("not_a_dir");
        fs::write(&file, b"x").unwrap();
        let err = RunWorkspace::acquire(&file).unwrap_err();
        assert!(matches!(err, PipelineError::Workspace { .. }));
    }
}
