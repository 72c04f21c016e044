//! Triangle Filter

use lux_core::filter::*;
use lux_core::geometry::*;
use lux_core::pbrt::*;

/// Implements the triangle filter in which the density of samples falls off
/// linearly from the pixel center to the pixel edges.
#[derive(Copy, Clone, Debug, Default)]
pub struct TriangleFilter {}

impl TriangleFilter {
    /// Returns a new instance of `TriangleFilter`.
    pub fn new() -> Self {
        Self {}
    }
}

impl Filter for TriangleFilter {
    /// Warps each coordinate by the inverse of the tent distribution's CDF.
    ///
    /// * `u` - The 2D uniform random values.
    fn warp(&self, u: &Point2f) -> Point2f {
        Point2f::new(0.5 * (1.0 + sample_tent(u.x)), 0.5 * (1.0 + sample_tent(u.y)))
    }
}

/// Maps a uniform value in `[0, 1)` to the tent distribution on `[-1, 1]`.
///
/// * `u` - The uniform random value.
fn sample_tent(u: Float) -> Float {
    let u = u as f64;
    let t = if u < 0.5 {
        (2.0 * u).sqrt() - 1.0
    } else {
        1.0 - (2.0 - 2.0 * u).sqrt()
    };
    t as Float
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    #[test]
    fn median_maps_to_pixel_center() {
        let p = TriangleFilter::new().warp(&Point2f::new(0.5, 0.5));
        assert!(approx_eq!(f32, p.x, 0.5, epsilon = 0.00001));
        assert!(approx_eq!(f32, p.y, 0.5, epsilon = 0.00001));
        assert_eq!(sample_tent(0.0), -1.0);
    }

    proptest! {
        #[test]
        fn samples_stay_in_pixel(x in 0.0..1.0f32, y in 0.0..1.0f32) {
            let p = TriangleFilter::new().warp(&Point2f::new(x, y));
            prop_assert!((0.0..=1.0).contains(&p.x));
            prop_assert!((0.0..=1.0).contains(&p.y));
        }

        #[test]
        fn warp_is_monotonic(a in 0.0..1.0f32, b in 0.0..1.0f32) {
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            prop_assert!(sample_tent(lo) <= sample_tent(hi));
        }
    }
}
