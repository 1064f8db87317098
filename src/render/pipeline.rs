use image::RgbaImage;
use rayon::prelude::*;

use crate::config::resolve::ResolvedParams;
use crate::encode::sink::FrameSink;
use crate::foundation::core::{Axis, FrameIndex, Style, Viewport};
use crate::foundation::error::{PtvError, PtvResult};
use crate::motion::plan::MotionPlan;
use crate::raster::composite::{extent_of, letterbox, stitch, window};
use crate::raster::fit::fit_to_viewport;

/// Frame-level parallelism settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderThreading {
    /// Render frames on a dedicated rayon pool.
    pub parallel: bool,
    /// Worker thread override. `None` uses rayon defaults.
    pub threads: Option<usize>,
}

/// What [`render_frames`] produced.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct RenderStats {
    /// Frames emitted to the sink.
    pub frames_total: u64,
    /// Stitched canvas size, scroll styles only.
    pub canvas: Option<(u32, u32)>,
    /// Scroll speed, scroll styles only.
    pub pixels_per_frame: Option<f64>,
}

/// Resize every decoded image for the run's style. Order is preserved.
pub fn fit_images(
    images: &[RgbaImage],
    params: &ResolvedParams,
    threading: &RenderThreading,
) -> PtvResult<Vec<RgbaImage>> {
    let fit = |img: &RgbaImage| fit_to_viewport(img, params.viewport, params.style);
    if !threading.parallel {
        return Ok(images.iter().map(fit).collect());
    }
    let pool = build_thread_pool(threading.threads)?;
    Ok(pool.install(|| images.par_iter().map(fit).collect()))
}

/// Render every output frame from fitted images into `sink`.
///
/// Returns once every frame has been emitted. Any failure aborts the whole render.
#[tracing::instrument(skip_all, fields(style = %params.style, viewport = %params.viewport))]
pub fn render_frames(
    fitted: &[RgbaImage],
    params: &ResolvedParams,
    sink: &dyn FrameSink,
    threading: &RenderThreading,
) -> PtvResult<RenderStats> {
    if fitted.is_empty() {
        return Err(PtvError::EmptyInput);
    }

    let job = FrameJob::build(fitted, params)?;
    let total = job.len();
    let emit = |i: u64| sink.emit(FrameIndex::from_zero_based(i), &job.render(i));

    if threading.parallel {
        let pool = build_thread_pool(threading.threads)?;
        pool.install(|| (0..total).into_par_iter().try_for_each(emit))?;
    } else {
        (0..total).try_for_each(emit)?;
    }

    let stats = job.stats();
    tracing::info!(frames = stats.frames_total, "frames written");
    Ok(stats)
}

// What each output frame is cut from.
enum FrameJob<'a> {
    Letterbox {
        images: &'a [RgbaImage],
        viewport: Viewport,
    },
    Scroll {
        canvas: RgbaImage,
        viewport: Viewport,
        axis: Axis,
        plan: MotionPlan,
    },
}

impl<'a> FrameJob<'a> {
    fn build(fitted: &'a [RgbaImage], params: &ResolvedParams) -> PtvResult<Self> {
        let viewport = params.viewport;
        if params.style == Style::Frames {
            return Ok(Self::Letterbox {
                images: fitted,
                viewport,
            });
        }

        let axis = params
            .style
            .axis()
            .ok_or_else(|| PtvError::config(format!("style {} does not scroll", params.style)))?;
        let canvas = stitch(fitted, viewport, axis)?;
        let (_, plan) = MotionPlan::for_style(
            params.style,
            extent_of(&canvas, axis),
            viewport.extent(axis),
            &params.timing,
            fitted.len(),
        )?;
        tracing::info!(
            pixels_per_frame = plan.pixels_per_frame,
            distance = plan.distance,
            frames = plan.frame_count,
            "scroll plan"
        );
        Ok(Self::Scroll {
            canvas,
            viewport,
            axis,
            plan,
        })
    }

    fn len(&self) -> u64 {
        match self {
            Self::Letterbox { images, .. } => images.len() as u64,
            Self::Scroll { plan, .. } => plan.frame_count,
        }
    }

    fn render(&self, i: u64) -> RgbaImage {
        match self {
            Self::Letterbox { images, viewport } => letterbox(&images[i as usize], *viewport),
            Self::Scroll {
                canvas,
                viewport,
                axis,
                plan,
            } => window(canvas, *viewport, *axis, plan.offset(i)),
        }
    }

    fn stats(&self) -> RenderStats {
        match self {
            Self::Letterbox { .. } => RenderStats {
                frames_total: self.len(),
                canvas: None,
                pixels_per_frame: None,
            },
            Self::Scroll { canvas, plan, .. } => RenderStats {
                frames_total: self.len(),
                canvas: Some(canvas.dimensions()),
                pixels_per_frame: Some(plan.pixels_per_frame),
            },
        }
    }
}

fn build_thread_pool(threads: Option<usize>) -> PtvResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PtvError::config(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PtvError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
