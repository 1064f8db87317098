use std::fmt;
use std::str::FromStr;

use crate::foundation::error::{PtvError, PtvResult};
use crate::foundation::math::round_up_even;

/// 1-based output frame number, as embedded in emitted file names.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// First frame of every sequence.
    pub const FIRST: FrameIndex = FrameIndex(1);

    /// Frame index for the `i`-th (0-based) rendered frame.
    pub fn from_zero_based(i: u64) -> Self {
        Self(i + 1)
    }
}

/// Output frame size. Always even and positive once constructed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Validated viewport. Zero or odd dimensions are a config error.
    pub fn new(width: u32, height: u32) -> PtvResult<Self> {
        if width == 0 || height == 0 {
            return Err(PtvError::config(format!(
                "viewport must be non-zero, got {width}x{height}"
            )));
        }
        if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
            return Err(PtvError::config(format!(
                "viewport must have even dimensions, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Resolve a configured size against the first source image.
    ///
    /// A configured dimension of 0 takes the image's corresponding dimension; both results are
    /// then rounded up to even.
    pub fn resolve(configured: (u32, u32), first_image: (u32, u32)) -> PtvResult<Self> {
        let width = if configured.0 == 0 {
            first_image.0
        } else {
            configured.0
        };
        let height = if configured.1 == 0 {
            first_image.1
        } else {
            configured.1
        };
        let even = |v: u32| {
            round_up_even(v).ok_or_else(|| PtvError::config(format!("dimension {v} too large")))
        };
        Self::new(even(width)?, even(height)?)
    }

    /// Height for [`Axis::Vertical`], width for [`Axis::Horizontal`].
    pub fn extent(self, axis: Axis) -> u32 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Animation family, fixed for the whole run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Style {
    /// One letterboxed frame per source image.
    #[default]
    Frames,
    /// Content moves up: the viewport pans from the top of a vertical strip to the bottom.
    Up,
    /// Reverse of [`Style::Up`].
    Down,
    /// Content moves left: the viewport pans from the left of a horizontal strip to the right.
    Left,
    /// Reverse of [`Style::Left`].
    Right,
}

impl Style {
    /// Scroll axis, or `None` for [`Style::Frames`].
    pub fn axis(self) -> Option<Axis> {
        match self {
            Style::Frames => None,
            Style::Up | Style::Down => Some(Axis::Vertical),
            Style::Left | Style::Right => Some(Axis::Horizontal),
        }
    }

    /// `Down`/`Right` start at the far end of the canvas and move back toward 0.
    pub fn is_reversed(self) -> bool {
        matches!(self, Style::Down | Style::Right)
    }

    /// Canonical uppercase name, as accepted by the CLI and config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Style::Frames => "FRAMES",
            Style::Up => "UP",
            Style::Down => "DOWN",
            Style::Left => "LEFT",
            Style::Right => "RIGHT",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = PtvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FRAMES" | "FRAME" => Ok(Style::Frames),
            "UP" | "U" => Ok(Style::Up),
            "DOWN" | "D" => Ok(Style::Down),
            "LEFT" | "L" => Ok(Style::Left),
            "RIGHT" | "R" => Ok(Style::Right),
            _ => Err(PtvError::config(format!(
                "invalid style '{s}' (expected FRAMES|UP|DOWN|LEFT|RIGHT)"
            ))),
        }
    }
}

/// Axis along which a scroll canvas is stitched and panned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Top to bottom (`Up`/`Down`).
    Vertical,
    /// Left to right (`Left`/`Right`).
    Horizontal,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
