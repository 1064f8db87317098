use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context as _;
use image::RgbaImage;
use image::codecs::jpeg::JpegEncoder;

use crate::foundation::core::FrameIndex;
use crate::foundation::error::{PtvError, PtvResult};

/// JPEG quality for every emitted frame.
pub const JPEG_QUALITY: u8 = 90;

/// printf-style pattern matching [`frame_file_name`], for the encoder's numbered input.
pub const FRAME_PATTERN: &str = "frame%06d.jpg";

/// `frame000001.jpg` for index 1. Indices past 999999 simply get wider.
pub fn frame_file_name(index: FrameIndex) -> String {
    format!("frame{:06}.jpg", index.0)
}

/// Sink contract for consuming rendered frames.
///
/// Frames may arrive from several threads and in any order; the index alone fixes their place
/// in the sequence. Indices start at 1 and must end up contiguous.
pub trait FrameSink: Sync {
    /// Accept the frame at `index`. Each index is emitted exactly once.
    fn emit(&self, index: FrameIndex, frame: &RgbaImage) -> PtvResult<()>;
}

/// Writes each frame as `frameNNNNNN.jpg` into a directory.
#[derive(Clone, Debug)]
pub struct JpegSequenceSink {
    dir: PathBuf,
}

impl JpegSequenceSink {
    /// Sink writing into `dir`, which must already exist.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory frames are written to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File the frame at `index` is written to.
    pub fn path_for(&self, index: FrameIndex) -> PathBuf {
        self.dir.join(frame_file_name(index))
    }

    /// Write `frame` and return the file it landed in. The file is flushed before returning.
    pub fn write_frame(&self, index: FrameIndex, frame: &RgbaImage) -> PtvResult<PathBuf> {
        if index < FrameIndex::FIRST {
            return Err(PtvError::config("frame indices start at 1"));
        }
        let path = self.path_for(index);
        let file =
            File::create(&path).with_context(|| format!("create frame '{}'", path.display()))?;
        let mut writer = BufWriter::with_capacity(1 << 20, file);

        let rgb = image::DynamicImage::ImageRgba8(frame.clone()).into_rgb8();
        JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY)
            .encode(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                image::ExtendedColorType::Rgb8,
            )
            .with_context(|| format!("encode frame '{}'", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("flush frame '{}'", path.display()))?;
        Ok(path)
    }
}

impl FrameSink for JpegSequenceSink {
    fn emit(&self, index: FrameIndex, frame: &RgbaImage) -> PtvResult<()> {
        self.write_frame(index, frame).map(|_| ())
    }
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    frames: Mutex<BTreeMap<FrameIndex, RgbaImage>>,
}

impl InMemorySink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Captured frames in index order.
    pub fn into_frames(self) -> Vec<(FrameIndex, RgbaImage)> {
        self.frames
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .into_iter()
            .collect()
    }

    /// Number of frames captured so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// `true` before the first frame arrives.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BTreeMap<FrameIndex, RgbaImage>> {
        self.frames
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FrameSink for InMemorySink {
    fn emit(&self, index: FrameIndex, frame: &RgbaImage) -> PtvResult<()> {
        if self.lock().insert(index, frame.clone()).is_some() {
            return Err(PtvError::Other(anyhow::anyhow!(
                "frame {} emitted twice",
                index.0
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
