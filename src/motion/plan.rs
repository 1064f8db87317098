use crate::foundation::core::{Axis, Style};
use crate::foundation::error::{PtvError, PtvResult};

/// How long a scroll animation lasts.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Timing {
    /// Output frame rate.
    pub fps: f64,
    /// Scroll seconds contributed by each source item.
    pub seconds_per_item: f64,
    /// Total duration override; takes priority over `seconds_per_item` when set.
    pub duration: Option<f64>,
}

impl Timing {
    /// Number of frames for `item_count` items, rounded and floored at 1.
    pub fn frame_count(&self, item_count: usize) -> u64 {
        let frames = match self.duration {
            Some(d) if d > 0.0 => self.fps * d,
            _ => self.fps * self.seconds_per_item * item_count as f64,
        };
        frames.round().max(1.0) as u64
    }
}

/// Constant-speed pan across a stitched canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct MotionPlan {
    /// Scrollable extent: canvas extent minus viewport extent, floored at 0.
    pub distance: u32,
    /// Frames in the animation, at least 1.
    pub frame_count: u64,
    /// Floored at 1.0 so the plan always advances, even when `distance` is 0.
    pub pixels_per_frame: f64,
    reversed: bool,
}

impl MotionPlan {
    /// Plan a scroll over `canvas_extent` seen through `viewport_extent`. `reversed` starts at
    /// the far end.
    pub fn new(
        canvas_extent: u32,
        viewport_extent: u32,
        timing: &Timing,
        item_count: usize,
        reversed: bool,
    ) -> Self {
        let distance = canvas_extent.saturating_sub(viewport_extent);
        let frame_count = timing.frame_count(item_count);
        let mut pixels_per_frame = f64::from(distance) / frame_count as f64;
        if pixels_per_frame <= 0.0 {
            pixels_per_frame = 1.0;
        }
        Self {
            distance,
            frame_count,
            pixels_per_frame,
            reversed,
        }
    }

    /// Plan a scroll for `style` over a canvas of `canvas_extent` along its axis.
    pub fn for_style(
        style: Style,
        canvas_extent: u32,
        viewport_extent: u32,
        timing: &Timing,
        item_count: usize,
    ) -> PtvResult<(Axis, Self)> {
        let axis = style
            .axis()
            .ok_or_else(|| PtvError::config(format!("style {style} does not scroll")))?;
        Ok((
            axis,
            Self::new(
                canvas_extent,
                viewport_extent,
                timing,
                item_count,
                style.is_reversed(),
            ),
        ))
    }

    /// Scroll-axis offset of the `i`-th frame (0-based), clamped to `[0, distance]`.
    pub fn offset(&self, i: u64) -> u32 {
        let step = (i as f64 * self.pixels_per_frame).floor();
        let dist = f64::from(self.distance);
        let raw = if self.reversed { dist - step } else { step };
        raw.clamp(0.0, dist) as u32
    }

    /// Offsets of every frame, in order.
    pub fn offsets(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.frame_count).map(|i| self.offset(i))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/motion/plan.rs"]
mod tests;
