//! Frame sinks and the video encoder collaborator.
//!
//! Frames are written as a numbered image sequence; the encoder consumes that sequence once
//! every frame is on disk.

/// `ffmpeg`-based encoder (MP4 output via system `ffmpeg`).
pub mod ffmpeg;
/// Frame sink trait and built-in sinks.
pub mod sink;
