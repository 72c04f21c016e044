//! Integrator

mod common;
mod sampler_integrator;

use crate::geometry::*;
use crate::sampler::*;
use crate::scene::Scene;
use crate::spectrum::*;

// Re-export.
pub use common::*;
pub use sampler_integrator::*;

/// Integrator interface.
pub trait Integrator: Send + Sync {
    /// Returns one noisy estimate of the incident radiance at the origin of a
    /// given ray. The sampler must already be positioned at the start of a
    /// sample.
    ///
    /// * `ray`     - The camera ray.
    /// * `scene`   - The scene.
    /// * `sampler` - The sampler.
    fn li(&self, ray: &Ray, scene: &Scene, sampler: &mut dyn Sampler) -> Spectrum;

    /// Returns the maximum number of bounces traced for a path.
    fn max_depth(&self) -> usize;
}
