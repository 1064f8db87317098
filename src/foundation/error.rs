use std::path::{Path, PathBuf};

/// Convenience result type used across ptv.
pub type PtvResult<T> = Result<T, PtvError>;

/// Top-level error taxonomy. Every variant aborts the run.
#[derive(thiserror::Error, Debug)]
pub enum PtvError {
    /// Malformed or out-of-range configuration, reported before any work starts.
    #[error("configuration error: {0}")]
    Config(String),

    /// An input path that could not be read, decoded, or classified.
    #[error("input error: '{}': {message}", path.display())]
    Input {
        /// Offending path.
        path: PathBuf,
        /// What went wrong with it.
        message: String,
    },

    /// Traversal finished without producing a single image.
    #[error("no images loaded")]
    EmptyInput,

    /// An external tool failed to start or exited unsuccessfully.
    #[error("{tool} failed ({status}): {stderr}")]
    Collaborator {
        /// Program name, e.g. `ffmpeg`.
        tool: String,
        /// Exit status or spawn failure description.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PtvError {
    /// Build a [`PtvError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`PtvError::Input`] value naming `path`.
    pub fn input(path: impl AsRef<Path>, msg: impl Into<String>) -> Self {
        Self::Input {
            path: path.as_ref().to_path_buf(),
            message: msg.into(),
        }
    }

    /// Build a [`PtvError::Collaborator`] value.
    pub fn collaborator(
        tool: impl Into<String>,
        status: impl Into<String>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::Collaborator {
            tool: tool.into(),
            status: status.into(),
            stderr: stderr.into(),
        }
    }

    /// Whether this error belongs to the configuration class.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
