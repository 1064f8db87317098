/// End-to-end run orchestration.
pub mod run;
/// Scratch directory owned by one run.
pub mod workdir;
