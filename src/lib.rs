//! Turn PDFs and image folders into MP4 videos.
//!
//! Sources are fitted to a fixed, even-sized viewport and either shown one per frame
//! (`FRAMES`) or stitched into a strip the viewport pans across at constant speed
//! (`UP`/`DOWN`/`LEFT`/`RIGHT`). Frames go to a numbered JPEG sequence that `ffmpeg` encodes.
//!
//! Page rasterization and encoding are external programs reached through
//! [`PageRasterizer`] and [`VideoEncoder`], so either can be replaced.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// Run configuration and derived parameters.
pub mod config;
/// Frame sinks and video encoding.
pub mod encode;
mod foundation;
/// Scroll scheduling.
pub mod motion;
/// Pixel operations: resampling, fitting, compositing.
pub mod raster;
/// Fit-and-render stage driving a [`FrameSink`].
pub mod render;
/// Run orchestration and scratch space.
pub mod session;
/// Source discovery, ordering, expansion and decoding.
pub mod sources;

pub use config::resolve::ResolvedParams;
pub use config::settings::{RenderConfig, default_output_path, parse_resolution};
pub use encode::ffmpeg::{FfmpegEncoder, VideoEncoder, is_ffmpeg_on_path};
pub use encode::sink::{FrameSink, InMemorySink, JpegSequenceSink};
pub use foundation::core::{Axis, FrameIndex, Style, Viewport};
pub use foundation::error::{PtvError, PtvResult};
pub use motion::plan::{MotionPlan, Timing};
pub use render::pipeline::{RenderStats, RenderThreading, fit_images, render_frames};
pub use session::run::{Collaborators, RunSummary, run, run_in};
pub use session::workdir::WorkDir;
pub use sources::entries::{SourceEntry, SourceItem};
pub use sources::natural::natural_cmp;
pub use sources::pdf::{PageRasterizer, Pdftoppm, is_pdftoppm_on_path};
