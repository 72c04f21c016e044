//! Shapes

#[macro_use]
extern crate log;

mod sphere;
mod triangle;

// Re-export
pub use sphere::*;
pub use triangle::*;
