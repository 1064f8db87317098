/// Input classification, directory listing and expansion into items.
pub mod entries;
/// Decoding source items to RGBA8.
pub mod loader;
/// Natural filename ordering.
pub mod natural;
/// PDF page rasterization collaborator.
pub mod pdf;
