//! Filters

mod boxf; // box is reserved keyword
mod triangle;

// Re-export.
pub use boxf::*;
pub use triangle::*;
