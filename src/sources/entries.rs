use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{PtvError, PtvResult};
use crate::sources::loader::SourceLoader;
use crate::sources::natural::sort_by_file_name;
use crate::sources::pdf::PageRasterizer;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "tif", "tiff", "webp"];

/// A file selected from the inputs, before PDFs and GIFs are expanded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceEntry {
    /// Still image decoded directly.
    Image(PathBuf),
    /// PDF, one item per rasterized page.
    Pdf(PathBuf),
    /// Animated GIF, one item per frame.
    Gif(PathBuf),
}

/// One still that becomes one fitted image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceItem {
    /// A still image file.
    StaticImage(PathBuf),
    /// One rasterized page of a PDF.
    PdfPage {
        /// Source document.
        pdf: PathBuf,
        /// Rendered page image.
        page: PathBuf,
    },
    /// One frame of an animated GIF.
    GifFrame {
        /// Source animation.
        gif: PathBuf,
        /// 0-based frame number.
        index: usize,
    },
}

/// Case-insensitive `.pdf` extension check.
pub fn is_pdf(path: &Path) -> bool {
    has_extension(path, &["pdf"])
}

/// Case-insensitive `.gif` extension check.
pub fn is_gif(path: &Path) -> bool {
    has_extension(path, &["gif"])
}

fn is_image(path: &Path) -> bool {
    has_extension(path, IMAGE_EXTENSIONS)
}

fn has_extension(path: &Path, exts: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| exts.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// Classify every input in command-line order.
///
/// A `.pdf` path is taken as-is; a directory is listed (see [`list_dir`]); anything else is an
/// input error.
pub fn plan_entries(
    inputs: &[PathBuf],
    render_gifs: bool,
    reverse: bool,
) -> PtvResult<Vec<SourceEntry>> {
    let mut entries = Vec::new();
    for input in inputs {
        if is_pdf(input) {
            entries.push(SourceEntry::Pdf(input.clone()));
            continue;
        }
        let meta = std::fs::metadata(input).map_err(|e| PtvError::input(input, e.to_string()))?;
        if !meta.is_dir() {
            return Err(PtvError::input(input, "input is not a PDF or directory"));
        }
        entries.extend(list_dir(input, render_gifs, reverse)?);
    }
    Ok(entries)
}

/// Supported files directly inside `dir`, in natural filename order, reversed once if asked.
///
/// GIFs are dropped with a warning unless `render_gifs` is set.
pub fn list_dir(dir: &Path, render_gifs: bool, reverse: bool) -> PtvResult<Vec<SourceEntry>> {
    let read = std::fs::read_dir(dir).map_err(|e| PtvError::input(dir, e.to_string()))?;
    let mut paths = Vec::new();
    for entry in read {
        let entry = entry.map_err(|e| PtvError::input(dir, e.to_string()))?;
        let path = entry.path();
        if path.is_dir() {
            continue;
        }
        if is_pdf(&path) || is_image(&path) {
            paths.push(path);
        }
    }
    sort_by_file_name(&mut paths);
    if reverse {
        paths.reverse();
    }

    let mut entries = Vec::with_capacity(paths.len());
    for path in paths {
        if is_pdf(&path) {
            entries.push(SourceEntry::Pdf(path));
        } else if is_gif(&path) {
            if render_gifs {
                entries.push(SourceEntry::Gif(path));
            } else {
                tracing::warn!(path = %path.display(), "skipping gif; enable gif rendering to include it");
            }
        } else {
            entries.push(SourceEntry::Image(path));
        }
    }
    Ok(entries)
}

/// Expand PDFs into pages and GIFs into frames.
///
/// Each PDF is rasterized into its own numbered subdirectory of `render_dir`.
pub fn expand_entries(
    entries: &[SourceEntry],
    rasterizer: &dyn PageRasterizer,
    render_dir: &Path,
    loader: &mut SourceLoader,
) -> PtvResult<Vec<SourceItem>> {
    let mut items = Vec::new();
    let mut pdf_count = 0usize;
    for entry in entries {
        match entry {
            SourceEntry::Image(path) => items.push(SourceItem::StaticImage(path.clone())),
            SourceEntry::Pdf(pdf) => {
                pdf_count += 1;
                let out_dir = render_dir.join(format!("pdf-{pdf_count:04}"));
                std::fs::create_dir_all(&out_dir)
                    .with_context(|| format!("create render dir '{}'", out_dir.display()))?;
                let pages = rasterizer.rasterize(pdf, &out_dir)?;
                tracing::debug!(pdf = %pdf.display(), pages = pages.len(), "rasterized");
                items.extend(pages.into_iter().map(|page| SourceItem::PdfPage {
                    pdf: pdf.clone(),
                    page,
                }));
            }
            SourceEntry::Gif(gif) => {
                let count = loader.gif_frame_count(gif)?;
                items.extend((0..count).map(|index| SourceItem::GifFrame {
                    gif: gif.clone(),
                    index,
                }));
            }
        }
    }
    Ok(items)
}

#[cfg(test)]
#[path = "../../tests/unit/sources/entries.rs"]
mod tests;
