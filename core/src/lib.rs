//! Core

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

// Geometry comes first so its test macros are visible in later modules.
#[macro_use]
pub mod geometry;

// Re-export.
pub mod app;
pub mod camera;
pub mod film;
pub mod filter;
pub mod image_io;
pub mod integrator;
pub mod interaction;
pub mod material;
pub mod pbrt;
pub mod rng;
pub mod sampler;
pub mod sampling;
pub mod scene;
pub mod shape;
pub mod spectrum;
