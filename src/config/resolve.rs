use std::path::PathBuf;

use crate::config::settings::RenderConfig;
use crate::foundation::core::{Style, Viewport};
use crate::foundation::error::PtvResult;
use crate::motion::plan::Timing;

/// Values derived once from a [`RenderConfig`] and the first decoded image.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ResolvedParams {
    /// Even output frame size.
    pub viewport: Viewport,
    /// Animation family.
    pub style: Style,
    /// Effective timing; `duration` is `None` for `Frames`.
    pub timing: Timing,
    /// Video file to write.
    pub output: PathBuf,
}

impl ResolvedParams {
    /// Resolve `cfg` against the first source image's `(width, height)`.
    ///
    /// The duration override only applies to scroll styles and is dropped for `Frames`.
    pub fn resolve(
        cfg: &RenderConfig,
        first_image: (u32, u32),
        output: PathBuf,
    ) -> PtvResult<Self> {
        let viewport = Viewport::resolve((cfg.width, cfg.height), first_image)?;

        let duration = if cfg.duration > 0.0 {
            if cfg.style == Style::Frames {
                tracing::warn!("duration ignored for FRAMES style");
                None
            } else {
                Some(cfg.duration)
            }
        } else {
            None
        };

        Ok(Self {
            viewport,
            style: cfg.style,
            timing: Timing {
                fps: cfg.fps,
                seconds_per_item: cfg.seconds_per_item,
                duration,
            },
            output,
        })
    }

    /// Log the run parameters at INFO.
    pub fn log_summary(&self) {
        tracing::info!(output = %self.output.display(), "output");
        tracing::info!(resolution = %self.viewport, fps = self.timing.fps, "video");
        if self.style != Style::Frames {
            match self.timing.duration {
                Some(d) => tracing::info!(duration_secs = d, "scroll timing"),
                None => tracing::info!(
                    seconds_per_item = self.timing.seconds_per_item,
                    "scroll timing"
                ),
            }
        }
        tracing::info!(style = %self.style, "animation");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/resolve.rs"]
mod tests;
