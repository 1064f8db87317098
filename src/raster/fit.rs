use image::RgbaImage;

use crate::foundation::core::{Style, Viewport};
use crate::raster::resample::resize;

/// Resize `img` for `style` without touching the viewport.
///
/// - `Frames`: fit within the viewport, aspect preserved.
/// - `Up`/`Down`: width matches the viewport.
/// - `Left`/`Right`: height matches the viewport.
pub fn fit_to_viewport(img: &RgbaImage, viewport: Viewport, style: Style) -> RgbaImage {
    match style {
        Style::Frames => fit_within(img, viewport),
        Style::Up | Style::Down => fit_width(img, viewport.width),
        Style::Left | Style::Right => fit_height(img, viewport.height),
    }
}

/// Largest aspect-preserving size that fits inside `viewport`.
pub fn fit_within(img: &RgbaImage, viewport: Viewport) -> RgbaImage {
    let (iw, ih) = img.dimensions();
    if iw == 0 || ih == 0 {
        return img.clone();
    }
    let scale = (f64::from(viewport.width) / f64::from(iw))
        .min(f64::from(viewport.height) / f64::from(ih));
    resize(img, scaled(iw, scale), scaled(ih, scale))
}

/// Scale to exactly `width`, height following the aspect ratio.
pub fn fit_width(img: &RgbaImage, width: u32) -> RgbaImage {
    let (iw, ih) = img.dimensions();
    if iw == 0 || ih == 0 || width == 0 {
        return img.clone();
    }
    let scale = f64::from(width) / f64::from(iw);
    resize(img, width, scaled(ih, scale))
}

/// Scale to exactly `height`, width following the aspect ratio.
pub fn fit_height(img: &RgbaImage, height: u32) -> RgbaImage {
    let (iw, ih) = img.dimensions();
    if iw == 0 || ih == 0 || height == 0 {
        return img.clone();
    }
    let scale = f64::from(height) / f64::from(ih);
    resize(img, scaled(iw, scale), height)
}

fn scaled(extent: u32, scale: f64) -> u32 {
    ((f64::from(extent) * scale).round() as u32).max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/fit.rs"]
mod tests;
