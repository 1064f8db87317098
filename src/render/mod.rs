/// Fit, composite, schedule and emit frames.
pub mod pipeline;
