use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::PtvResult;

const PREFIX: &str = "ptv-";
const RENDER_DIR: &str = "render";
const FRAMES_DIR: &str = "frames";

/// Per-run scratch tree: `render/` for rasterized pages, `frames/` for emitted JPEGs.
///
/// Both subdirectories exist as soon as this value does. The whole tree is removed when it
/// drops, whether the run succeeded or not.
#[derive(Debug)]
pub struct WorkDir {
    root: tempfile::TempDir,
}

impl WorkDir {
    /// Create under the system temp directory.
    pub fn new() -> PtvResult<Self> {
        let root = tempfile::Builder::new()
            .prefix(PREFIX)
            .tempdir()
            .context("create working directory")?;
        Self::with_root(root)
    }

    /// Create under `base`, which must already exist.
    pub fn new_in(base: &Path) -> PtvResult<Self> {
        let root = tempfile::Builder::new()
            .prefix(PREFIX)
            .tempdir_in(base)
            .with_context(|| format!("create working directory in '{}'", base.display()))?;
        Self::with_root(root)
    }

    fn with_root(root: tempfile::TempDir) -> PtvResult<Self> {
        for sub in [RENDER_DIR, FRAMES_DIR] {
            let dir = root.path().join(sub);
            std::fs::create_dir(&dir)
                .with_context(|| format!("create '{}'", dir.display()))?;
        }
        tracing::debug!(path = %root.path().display(), "working directory");
        Ok(Self { root })
    }

    /// Root of the scratch tree.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Where PDFs are rasterized.
    pub fn render_dir(&self) -> std::path::PathBuf {
        self.path().join(RENDER_DIR)
    }

    /// Where numbered frames are emitted.
    pub fn frames_dir(&self) -> std::path::PathBuf {
        self.path().join(FRAMES_DIR)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/workdir.rs"]
mod tests;
