use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::{AnimationDecoder as _, RgbaImage};

use crate::foundation::error::{PtvError, PtvResult};
use crate::sources::entries::SourceItem;

/// Decodes source items to RGBA8. Each GIF is decoded once and its frames cached.
#[derive(Debug, Default)]
pub struct SourceLoader {
    // `None` marks a frame already moved out by `load_all`.
    gifs: HashMap<PathBuf, Vec<Option<RgbaImage>>>,
}

impl SourceLoader {
    /// Empty loader with no cached GIFs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of frames in `path`, decoding and caching the GIF on first use.
    pub fn gif_frame_count(&mut self, path: &Path) -> PtvResult<usize> {
        Ok(self.gif_frames(path)?.len())
    }

    /// Decode one item. GIF frames are copied out of the cache, which keeps them.
    pub fn load(&mut self, item: &SourceItem) -> PtvResult<RgbaImage> {
        match item {
            SourceItem::StaticImage(path) | SourceItem::PdfPage { page: path, .. } => {
                decode_image(path)
            }
            SourceItem::GifFrame { gif, index } => self.gif_frame(gif, *index, false),
        }
    }

    /// Decode every item in order. The first failure aborts.
    ///
    /// Each cached GIF frame is moved out on its last use, so no frame is held twice.
    #[tracing::instrument(skip_all, fields(items = items.len()))]
    pub fn load_all(mut self, items: &[SourceItem]) -> PtvResult<Vec<RgbaImage>> {
        let mut remaining: HashMap<(&Path, usize), usize> = HashMap::new();
        for item in items {
            if let SourceItem::GifFrame { gif, index } = item {
                *remaining.entry((gif.as_path(), *index)).or_default() += 1;
            }
        }

        let mut images = Vec::with_capacity(items.len());
        for item in items {
            let img = match item {
                SourceItem::StaticImage(path) | SourceItem::PdfPage { page: path, .. } => {
                    decode_image(path)?
                }
                SourceItem::GifFrame { gif, index } => {
                    let left = remaining.entry((gif.as_path(), *index)).or_default();
                    *left = left.saturating_sub(1);
                    let last = *left == 0;
                    self.gif_frame(gif, *index, last)?
                }
            };
            images.push(img);
        }
        Ok(images)
    }

    fn gif_frame(&mut self, gif: &Path, index: usize, take: bool) -> PtvResult<RgbaImage> {
        let frames = self.gif_frames(gif)?;
        let count = frames.len();
        let slot = frames.get_mut(index).ok_or_else(|| {
            PtvError::input(gif, format!("gif has no frame {index} ({count} frames)"))
        })?;
        let frame = if take { slot.take() } else { slot.clone() };
        frame.ok_or_else(|| PtvError::input(gif, format!("gif frame {index} already consumed")))
    }

    fn gif_frames(&mut self, path: &Path) -> PtvResult<&mut Vec<Option<RgbaImage>>> {
        match self.gifs.entry(path.to_path_buf()) {
            Entry::Occupied(e) => Ok(e.into_mut()),
            Entry::Vacant(e) => {
                let frames = decode_gif_frames(path)?;
                Ok(e.insert(frames.into_iter().map(Some).collect()))
            }
        }
    }
}

/// Decode a still image, sniffing the format from its contents.
pub fn decode_image(path: &Path) -> PtvResult<RgbaImage> {
    let reader = image::ImageReader::open(path)
        .map_err(|e| PtvError::input(path, e.to_string()))?
        .with_guessed_format()
        .map_err(|e| PtvError::input(path, e.to_string()))?;
    let img = reader
        .decode()
        .map_err(|e| PtvError::input(path, format!("decode image: {e}")))?;
    Ok(img.to_rgba8())
}

/// Decode every frame of an animated GIF as a full-canvas RGBA8 image. Delays are ignored.
pub fn decode_gif_frames(path: &Path) -> PtvResult<Vec<RgbaImage>> {
    let file = File::open(path).map_err(|e| PtvError::input(path, e.to_string()))?;
    let decoder = image::codecs::gif::GifDecoder::new(BufReader::new(file))
        .map_err(|e| PtvError::input(path, format!("decode gif: {e}")))?;
    let frames = decoder
        .into_frames()
        .collect_frames()
        .map_err(|e| PtvError::input(path, format!("decode gif frames: {e}")))?;
    Ok(frames.into_iter().map(|f| f.into_buffer()).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/sources/loader.rs"]
mod tests;
