/// Derived run parameters computed once from the config and the first image.
pub mod resolve;
/// User-facing configuration value.
pub mod settings;
