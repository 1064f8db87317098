use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::core::Style;
use crate::foundation::error::{PtvError, PtvResult};
use crate::render::pipeline::RenderThreading;

/// Immutable run configuration, passed by reference into each stage.
///
/// A width or height of 0 means "take it from the first source image".
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Output frame rate.
    pub fps: f64,
    /// Seconds each source item contributes to a scroll animation.
    pub seconds_per_item: f64,
    /// Total scroll duration in seconds; 0 leaves it unset.
    pub duration: f64,
    /// Animation family.
    pub style: Style,
    /// Expand GIFs found in directories into their frames instead of skipping them.
    pub render_gifs: bool,
    /// Reverse each directory's listing.
    pub reverse: bool,
    /// Output video path. Derived from the first input when unset.
    pub output: Option<PathBuf>,
    /// Frame rendering parallelism.
    pub threading: RenderThreading,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            fps: 1.0,
            seconds_per_item: 1.0,
            duration: 0.0,
            style: Style::Frames,
            render_gifs: false,
            reverse: false,
            output: None,
            threading: RenderThreading::default(),
        }
    }
}

impl RenderConfig {
    /// Parse a JSON config. Missing keys take their defaults; unknown keys are rejected.
    pub fn from_json_str(s: &str) -> PtvResult<Self> {
        serde_json::from_str(s).map_err(|e| PtvError::config(format!("parse config JSON: {e}")))
    }

    /// Read and parse a JSON config file.
    pub fn from_json_path(path: &Path) -> PtvResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Reject values no stage can work with. Runs before any input is touched.
    pub fn validate(&self) -> PtvResult<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return Err(PtvError::config(format!(
                "fps must be a positive number, got {}",
                self.fps
            )));
        }
        if !self.seconds_per_item.is_finite() || self.seconds_per_item < 0.0 {
            return Err(PtvError::config(format!(
                "seconds per item must be >= 0, got {}",
                self.seconds_per_item
            )));
        }
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(PtvError::config(format!(
                "duration must be >= 0, got {}",
                self.duration
            )));
        }
        if self.threading.threads == Some(0) {
            return Err(PtvError::config("threads must be >= 1 when set"));
        }
        Ok(())
    }

    /// Explicit output path, or one derived from the first input.
    pub fn output_path(&self, inputs: &[PathBuf]) -> PtvResult<PathBuf> {
        if let Some(out) = &self.output {
            return Ok(out.clone());
        }
        let first = inputs
            .first()
            .ok_or_else(|| PtvError::config("at least one input is required"))?;
        Ok(default_output_path(first))
    }
}

/// `deck.pdf` -> `deck.mp4`; `slides/` -> `slides.mp4`.
pub fn default_output_path(first_input: &Path) -> PathBuf {
    if crate::sources::entries::is_pdf(first_input) {
        return first_input.with_extension("mp4");
    }
    let raw = first_input.to_string_lossy();
    let trimmed = raw.trim_end_matches(['/', std::path::MAIN_SEPARATOR]);
    let trimmed = if trimmed.is_empty() { raw.as_ref() } else { trimmed };
    PathBuf::from(format!("{trimmed}.mp4"))
}

/// Parse `WxH`, e.g. `1920x1080`, `0x720`, `1280x0`.
pub fn parse_resolution(s: &str) -> PtvResult<(u32, u32)> {
    let (w, h) = s
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| PtvError::config(format!("bad resolution '{s}'; expected WxH")))?;
    let dim = |part: &str, name: &str| {
        part.trim()
            .parse::<u32>()
            .map_err(|e| PtvError::config(format!("bad {name} in '{s}': {e}")))
    };
    Ok((dim(w, "width")?, dim(h, "height")?))
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
