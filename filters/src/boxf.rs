//! Box Filter

use lux_core::filter::*;
use lux_core::geometry::*;

/// Implements the box filter, which spreads samples uniformly over the pixel.
#[derive(Copy, Clone, Debug, Default)]
pub struct BoxFilter {}

impl BoxFilter {
    /// Returns a new instance of `BoxFilter`.
    pub fn new() -> Self {
        Self {}
    }
}

impl Filter for BoxFilter {
    /// Returns the sample unchanged.
    ///
    /// * `u` - The 2D uniform random values.
    fn warp(&self, u: &Point2f) -> Point2f {
        *u
    }
}
