use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::encode::sink::FRAME_PATTERN;
use crate::foundation::error::{PtvError, PtvResult};

/// Turns a finished numbered frame sequence into a video file.
pub trait VideoEncoder: Send + Sync {
    /// Encode `frames_dir/frame%06d.jpg` at `fps` into `out_path`.
    fn encode(&self, frames_dir: &Path, fps: f64, out_path: &Path) -> PtvResult<()>;
}

/// Encodes with the system `ffmpeg` binary: H.264, yuv420p, faststart MP4.
///
/// An existing file at the output path is overwritten.
#[derive(Clone, Debug)]
pub struct FfmpegEncoder {
    /// Program to run, `ffmpeg` from `PATH` by default.
    pub program: PathBuf,
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
        }
    }
}

impl FfmpegEncoder {
    /// Full argument list for one encode, without the program name.
    pub fn args(&self, frames_dir: &Path, fps: f64, out_path: &Path) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-framerate".to_string(),
            fps.to_string(),
            "-i".to_string(),
            frames_dir.join(FRAME_PATTERN).to_string_lossy().into_owned(),
        ];
        // h264 + yuv420p for broad compatibility, moov atom up front for streaming.
        args.extend(
            [
                "-an",
                "-c:v",
                "libx264",
                "-pix_fmt",
                "yuv420p",
                "-movflags",
                "+faststart",
            ]
            .map(String::from),
        );
        args.push(out_path.to_string_lossy().into_owned());
        args
    }
}

impl VideoEncoder for FfmpegEncoder {
    #[tracing::instrument(skip(self))]
    fn encode(&self, frames_dir: &Path, fps: f64, out_path: &Path) -> PtvResult<()> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(PtvError::config("encode fps must be positive"));
        }
        ensure_parent_dir(out_path)?;

        let tool = self.program.display().to_string();
        let output = Command::new(&self.program)
            .args(self.args(frames_dir, fps, out_path))
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                PtvError::collaborator(
                    &tool,
                    "failed to spawn",
                    format!("is it installed and on PATH? {e}"),
                )
            })?;

        if !output.status.success() {
            return Err(PtvError::collaborator(
                tool,
                output.status.to_string(),
                String::from_utf8_lossy(&output.stderr).trim(),
            ));
        }
        Ok(())
    }
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> PtvResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        use anyhow::Context as _;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Return `true` when `ffmpeg` can be invoked from `PATH`.
pub fn is_ffmpeg_on_path() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

#[cfg(test)]
#[path = "../../tests/unit/encode/ffmpeg.rs"]
mod tests;
