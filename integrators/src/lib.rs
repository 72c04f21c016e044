//! Integrators

#[macro_use]
extern crate log;

mod direct_lighting;
mod path;

#[cfg(test)]
mod test_scenes;

// Re-export.
pub use direct_lighting::*;
pub use path::*;
