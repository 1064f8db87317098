use image::{Rgba, RgbaImage};

/// Bilinear resize to `target_w` x `target_h`.
///
/// Destination coordinates map back to the source with
/// `src = dst * (src_extent - 1) / max(1, dst_extent - 1)` per axis, which pins the first and
/// last pixels of each row and column exactly. A zero target dimension is a no-op and returns a
/// copy of the input.
pub fn resize(src: &RgbaImage, target_w: u32, target_h: u32) -> RgbaImage {
    if target_w == 0 || target_h == 0 {
        return src.clone();
    }
    let (sw, sh) = src.dimensions();
    if (sw, sh) == (target_w, target_h) {
        return src.clone();
    }
    if sw == 0 || sh == 0 {
        return RgbaImage::new(target_w, target_h);
    }

    let x_taps: Vec<Tap> = (0..target_w).map(|x| Tap::new(x, sw, target_w)).collect();
    let mut dst = RgbaImage::new(target_w, target_h);
    for y in 0..target_h {
        let ty = Tap::new(y, sh, target_h);
        for (x, tx) in x_taps.iter().enumerate() {
            let c00 = src.get_pixel(tx.lo, ty.lo);
            let c10 = src.get_pixel(tx.hi, ty.lo);
            let c01 = src.get_pixel(tx.lo, ty.hi);
            let c11 = src.get_pixel(tx.hi, ty.hi);

            let mut out = [0u8; 4];
            for (c, o) in out.iter_mut().enumerate() {
                let v = bilerp(
                    f64::from(c00[c]),
                    f64::from(c10[c]),
                    f64::from(c01[c]),
                    f64::from(c11[c]),
                    tx.frac,
                    ty.frac,
                );
                *o = (v + 0.5) as u8;
            }
            dst.put_pixel(x as u32, y, Rgba(out));
        }
    }
    dst
}

// Source sample pair and blend weight for one destination coordinate.
#[derive(Clone, Copy, Debug)]
struct Tap {
    lo: u32,
    hi: u32,
    frac: f64,
}

impl Tap {
    fn new(dst: u32, src_extent: u32, dst_extent: u32) -> Self {
        let denom = f64::from(dst_extent.saturating_sub(1).max(1));
        let pos = f64::from(dst) * f64::from(src_extent - 1) / denom;
        let lo = (pos.floor() as u32).min(src_extent - 1);
        let hi = (lo + 1).min(src_extent - 1);
        Self {
            lo,
            hi,
            frac: pos - f64::from(lo),
        }
    }
}

fn bilerp(c00: f64, c10: f64, c01: f64, c11: f64, wx: f64, wy: f64) -> f64 {
    let top = c00 + (c10 - c00) * wx;
    let bot = c01 + (c11 - c01) * wx;
    top + (bot - top) * wy
}

#[cfg(test)]
#[path = "../../tests/unit/raster/resample.rs"]
mod tests;
