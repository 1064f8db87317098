/// Canvas stitching and letterboxing.
pub mod composite;
/// Viewport fitting policies.
pub mod fit;
/// Bilinear resampling.
pub mod resample;
