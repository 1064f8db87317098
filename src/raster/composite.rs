use image::{Rgba, RgbaImage};

use crate::foundation::core::{Axis, Viewport};
use crate::foundation::error::{PtvError, PtvResult};
use crate::foundation::math::mul_div255_u16;

/// Opaque black, the background of every canvas and letterbox.
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Straight-alpha "source over destination" for one pixel.
pub fn over(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let sa = u16::from(src[3]);
    if sa == 255 {
        return src;
    }
    if sa == 0 {
        return dst;
    }

    let dst_weight = mul_div255_u16(u16::from(dst[3]), 255 - sa);
    let out_a = u32::from(sa + dst_weight);
    let mut out = [0u8; 4];
    for i in 0..3 {
        let num = u32::from(src[i]) * u32::from(sa) + u32::from(dst[i]) * u32::from(dst_weight);
        out[i] = ((num + out_a / 2) / out_a).min(255) as u8;
    }
    out[3] = out_a.min(255) as u8;
    Rgba(out)
}

/// Composite `src` over `dst` with its top-left corner at (`x`, `y`), clipped to `dst`.
pub fn blit_over(dst: &mut RgbaImage, src: &RgbaImage, x: i64, y: i64) {
    let (dw, dh) = (i64::from(dst.width()), i64::from(dst.height()));
    let (sw, sh) = (i64::from(src.width()), i64::from(src.height()));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    for dy in y0..y1 {
        for dx in x0..x1 {
            let s = *src.get_pixel((dx - x) as u32, (dy - y) as u32);
            let d = dst.get_pixel_mut(dx as u32, dy as u32);
            *d = over(*d, s);
        }
    }
}

/// Center a fitted image on a black viewport-sized frame.
///
/// Each axis is only recentred when the gap is at least 2 pixels; a 1px gap stays flush at the
/// top/left edge. Odd gaps put the extra pixel after the image.
pub fn letterbox(img: &RgbaImage, viewport: Viewport) -> RgbaImage {
    let mut frame = RgbaImage::from_pixel(viewport.width, viewport.height, BLACK);
    let x = centered_offset(viewport.width, img.width());
    let y = centered_offset(viewport.height, img.height());
    blit_over(&mut frame, img, i64::from(x), i64::from(y));
    frame
}

fn centered_offset(outer: u32, inner: u32) -> u32 {
    let gap = outer.saturating_sub(inner);
    if gap >= 2 { gap / 2 } else { 0 }
}

/// Stitch fitted images into one strip along `axis`.
///
/// The strip starts with a viewport-sized black margin so the first frame is fully off-screen,
/// then every image follows back to back, flush at 0 on the cross axis. The cross extent is the
/// viewport's.
pub fn stitch(images: &[RgbaImage], viewport: Viewport, axis: Axis) -> PtvResult<RgbaImage> {
    let lead = u64::from(viewport.extent(axis));
    let total = images
        .iter()
        .fold(lead, |acc, img| acc + u64::from(extent_of(img, axis)));
    let total = u32::try_from(total)
        .map_err(|_| PtvError::config(format!("stitched canvas extent {total} is too large")))?;

    let (w, h) = match axis {
        Axis::Vertical => (viewport.width, total),
        Axis::Horizontal => (total, viewport.height),
    };
    let mut canvas = RgbaImage::from_pixel(w, h, BLACK);

    let mut pos = i64::from(viewport.extent(axis));
    for img in images {
        match axis {
            Axis::Vertical => blit_over(&mut canvas, img, 0, pos),
            Axis::Horizontal => blit_over(&mut canvas, img, pos, 0),
        }
        pos += i64::from(extent_of(img, axis));
    }
    Ok(canvas)
}

/// Copy the viewport-sized window starting at `offset` along `axis`. No blending.
///
/// Anything past the canvas edge stays black.
pub fn window(canvas: &RgbaImage, viewport: Viewport, axis: Axis, offset: u32) -> RgbaImage {
    let (x, y) = match axis {
        Axis::Vertical => (0, offset),
        Axis::Horizontal => (offset, 0),
    };
    let mut frame = RgbaImage::from_pixel(viewport.width, viewport.height, BLACK);
    let w = viewport.width.min(canvas.width().saturating_sub(x)) as usize;
    let h = viewport.height.min(canvas.height().saturating_sub(y));

    let src_stride = canvas.width() as usize * 4;
    let dst_stride = viewport.width as usize * 4;
    let src = canvas.as_raw();
    let dst: &mut [u8] = &mut frame;
    for row in 0..h {
        let s = (y + row) as usize * src_stride + x as usize * 4;
        let d = row as usize * dst_stride;
        dst[d..d + w * 4].copy_from_slice(&src[s..s + w * 4]);
    }
    frame
}

/// Extent of `img` along `axis`.
pub fn extent_of(img: &RgbaImage, axis: Axis) -> u32 {
    match axis {
        Axis::Vertical => img.height(),
        Axis::Horizontal => img.width(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
