use std::path::{Path, PathBuf};
use std::process::Command;

use crate::foundation::error::{PtvError, PtvResult};
use crate::sources::natural::sort_by_file_name;

/// Raster DPI handed to the page renderer. Pages are rescaled to the viewport afterwards.
pub const DEFAULT_RASTER_DPI: u32 = 200;

/// Turns one PDF into an ordered list of page images inside `out_dir`.
pub trait PageRasterizer: Send + Sync {
    /// Rasterize every page of `pdf` into `out_dir` and return the page images in page order.
    fn rasterize(&self, pdf: &Path, out_dir: &Path) -> PtvResult<Vec<PathBuf>>;
}

/// Rasterizes with the system `pdftoppm` binary (poppler-utils).
#[derive(Clone, Debug)]
pub struct Pdftoppm {
    /// Raster resolution.
    pub dpi: u32,
    /// Program to run, `pdftoppm` from `PATH` by default.
    pub program: PathBuf,
}

impl Default for Pdftoppm {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_RASTER_DPI,
            program: PathBuf::from("pdftoppm"),
        }
    }
}

const PAGE_PREFIX: &str = "page";

impl PageRasterizer for Pdftoppm {
    #[tracing::instrument(skip(self), fields(dpi = self.dpi))]
    fn rasterize(&self, pdf: &Path, out_dir: &Path) -> PtvResult<Vec<PathBuf>> {
        let tool = self.program.display().to_string();
        let output = Command::new(&self.program)
            .args(["-jpeg", "-r", &self.dpi.to_string()])
            .arg(pdf)
            .arg(out_dir.join(PAGE_PREFIX))
            .output()
            .map_err(|e| PtvError::collaborator(&tool, "failed to spawn", e.to_string()))?;
        if !output.status.success() {
            return Err(PtvError::collaborator(
                tool,
                output.status.to_string(),
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }
        collect_pages(out_dir)
    }
}

/// `page-*.jpg` files written by the rasterizer, in natural order.
pub fn collect_pages(out_dir: &Path) -> PtvResult<Vec<PathBuf>> {
    let read = std::fs::read_dir(out_dir).map_err(|e| PtvError::input(out_dir, e.to_string()))?;
    let prefix = format!("{PAGE_PREFIX}-");
    let mut pages = Vec::new();
    for entry in read {
        let path = entry
            .map_err(|e| PtvError::input(out_dir, e.to_string()))?
            .path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with(&prefix) && name.ends_with(".jpg") {
            pages.push(path);
        }
    }
    sort_by_file_name(&mut pages);
    Ok(pages)
}

/// Return `true` when `pdftoppm` can be spawned from `PATH`.
///
/// Only spawnability is checked; some poppler builds exit non-zero for `-v`.
pub fn is_pdftoppm_on_path() -> bool {
    Command::new("pdftoppm")
        .arg("-v")
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .status()
        .is_ok()
}

#[cfg(test)]
#[path = "../../tests/unit/sources/pdf.rs"]
mod tests;
