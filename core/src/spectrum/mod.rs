//! Spectrum

mod common;
mod rgb_spectrum;

// Re-export
pub use common::*;
pub use rgb_spectrum::*;

/// Radiance, reflectance and path throughput are all carried as RGB.
pub type Spectrum = RGBSpectrum;
