//! Filter

use crate::geometry::*;

/// Reconstruction filter interface. A filter distributes the film samples of
/// a pixel; every sample is credited to the pixel it was generated for with
/// equal weight.
pub trait Filter: Send + Sync {
    /// Maps a uniform sample in `[0, 1)^2` to an offset from the pixel's
    /// lower corner. The pixel center is at `(0.5, 0.5)`.
    ///
    /// * `u` - The 2D uniform random values.
    fn warp(&self, u: &Point2f) -> Point2f;
}
