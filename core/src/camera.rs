//! Camera

use crate::geometry::*;

/// Holds all the sample values needed to generate a camera ray.
#[derive(Copy, Clone, Debug, Default)]
pub struct CameraSample {
    /// Point on the film in raster coordinates.
    pub p_film: Point2f,

    /// Point on the lens in `[0, 1)^2`.
    pub p_lens: Point2f,
}

impl CameraSample {
    /// Create a new `CameraSample`.
    ///
    /// * `p_film` - Point on the film in raster coordinates.
    /// * `p_lens` - Point on the lens.
    pub fn new(p_film: Point2f, p_lens: Point2f) -> Self {
        Self { p_film, p_lens }
    }
}

/// Camera interface.
pub trait Camera: Send + Sync {
    /// Returns a ray with a unit direction corresponding to a given sample.
    ///
    /// * `sample` - The sample.
    fn generate_ray(&self, sample: &CameraSample) -> Ray;

    /// Returns the image resolution in pixels.
    fn resolution(&self) -> Point2i;
}
