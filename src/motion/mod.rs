/// Scroll scheduling: distance, frame count, per-frame offsets.
pub mod plan;
