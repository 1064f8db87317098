use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::config::resolve::ResolvedParams;
use crate::config::settings::RenderConfig;
use crate::encode::ffmpeg::VideoEncoder;
use crate::encode::sink::JpegSequenceSink;
use crate::foundation::core::{Style, Viewport};
use crate::foundation::error::{PtvError, PtvResult};
use crate::render::pipeline::{fit_images, render_frames};
use crate::session::workdir::WorkDir;
use crate::sources::entries::{expand_entries, plan_entries};
use crate::sources::loader::SourceLoader;
use crate::sources::pdf::PageRasterizer;

/// External programs a run shells out to.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    /// Turns PDFs into page images.
    pub rasterizer: &'a dyn PageRasterizer,
    /// Turns the frame sequence into the output video.
    pub encoder: &'a dyn VideoEncoder,
}

/// What a finished run produced.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RunSummary {
    /// Video file written.
    pub output: PathBuf,
    /// Resolved frame size.
    pub viewport: Viewport,
    /// Animation family used.
    pub style: Style,
    /// Frames encoded.
    pub frames: u64,
    /// Wall time from source planning to the end of encoding.
    pub elapsed: Duration,
}

/// Turn `inputs` into one video, with scratch files under the system temp directory.
pub fn run(
    inputs: &[PathBuf],
    config: &RenderConfig,
    collaborators: Collaborators<'_>,
) -> PtvResult<RunSummary> {
    let output = prepare(inputs, config)?;
    execute(inputs, config, collaborators, output, WorkDir::new()?)
}

/// Same as [`run`], with scratch files under `scratch_root`.
pub fn run_in(
    inputs: &[PathBuf],
    config: &RenderConfig,
    collaborators: Collaborators<'_>,
    scratch_root: &Path,
) -> PtvResult<RunSummary> {
    let output = prepare(inputs, config)?;
    execute(
        inputs,
        config,
        collaborators,
        output,
        WorkDir::new_in(scratch_root)?,
    )
}

// Everything that can be rejected before touching the filesystem.
fn prepare(inputs: &[PathBuf], config: &RenderConfig) -> PtvResult<PathBuf> {
    config.validate()?;
    if inputs.is_empty() {
        return Err(PtvError::config("at least one input is required"));
    }
    config.output_path(inputs)
}

#[tracing::instrument(skip_all, fields(inputs = inputs.len(), work = %work.path().display()))]
fn execute(
    inputs: &[PathBuf],
    config: &RenderConfig,
    collaborators: Collaborators<'_>,
    output: PathBuf,
    work: WorkDir,
) -> PtvResult<RunSummary> {
    let started = Instant::now();

    let entries = plan_entries(inputs, config.render_gifs, config.reverse)?;
    let images = {
        let mut loader = SourceLoader::new();
        let items = expand_entries(
            &entries,
            collaborators.rasterizer,
            &work.render_dir(),
            &mut loader,
        )?;
        tracing::info!(entries = entries.len(), items = items.len(), "sources");
        loader.load_all(&items)?
    };
    let first = images.first().ok_or(PtvError::EmptyInput)?;

    let params = ResolvedParams::resolve(config, first.dimensions(), output)?;
    params.log_summary();

    let fitted = fit_images(&images, &params, &config.threading)?;
    drop(images);

    let sink = JpegSequenceSink::new(work.frames_dir());
    let stats = render_frames(&fitted, &params, &sink, &config.threading)?;
    drop(fitted);

    collaborators
        .encoder
        .encode(sink.dir(), params.timing.fps, &params.output)?;

    let elapsed = started.elapsed();
    tracing::info!(
        output = %params.output.display(),
        frames = stats.frames_total,
        elapsed_secs = elapsed.as_secs_f64(),
        "done"
    );
    Ok(RunSummary {
        output: params.output,
        viewport: params.viewport,
        style: params.style,
        frames: stats.frames_total,
        elapsed,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/session/run.rs"]
mod tests;
