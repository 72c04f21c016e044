//! Rays

use super::{Float, Point3f, Vector3f};
use crate::pbrt::INFINITY;
use std::fmt;

/// A semi-infinite line `o + t * d` for `t` in `(0, t_max)`.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
    /// Origin.
    pub o: Point3f,

    /// Direction.
    pub d: Vector3f,

    /// Maximum extent of the ray.
    pub t_max: Float,
}

impl Ray {
    /// Returns a new ray.
    ///
    /// * `o`      - Origin.
    /// * `d`      - Direction.
    /// * `t_max`  - Maximum extent of the ray.
    pub fn new(o: Point3f, d: Vector3f, t_max: Float) -> Self {
        Self { o, d, t_max }
    }

    /// Returns the point at a given parameter along the ray.
    ///
    /// * `t` - The parameter.
    pub fn at(&self, t: Float) -> Point3f {
        self.o + self.d * t
    }

    /// Returns the same ray with a different maximum extent.
    ///
    /// * `t_max` - Maximum extent of the ray.
    pub fn with_t_max(&self, t_max: Float) -> Self {
        Self { t_max, ..*self }
    }

    /// Returns true if origin or direction contain NaNs or the extent is NaN.
    pub fn has_nans(&self) -> bool {
        self.o.x.is_nan()
            || self.o.y.is_nan()
            || self.o.z.is_nan()
            || self.d.has_nans()
            || self.t_max.is_nan()
    }
}

impl Default for Ray {
    /// Returns a ray at origin pointing down the z-axis with infinite extent.
    fn default() -> Self {
        Self {
            o: Point3f::default(),
            d: Vector3f::new(0.0, 0.0, 1.0),
            t_max: INFINITY,
        }
    }
}

impl fmt::Display for Ray {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[o={}, d={}, t_max={}]", self.o, self.d, self.t_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    #[test]
    fn at_walks_along_direction() {
        let r = Ray::new(Point3f::new(1.0, 2.0, 3.0), Vector3f::new(0.0, 0.0, 2.0), INFINITY);
        let p = r.at(1.5);
        assert!(approx_eq!(f32, p.x, 1.0, ulps = 1));
        assert!(approx_eq!(f32, p.y, 2.0, ulps = 1));
        assert!(approx_eq!(f32, p.z, 6.0, ulps = 1));
        assert_eq!(r.with_t_max(4.0).t_max, 4.0);
        assert!(!r.has_nans());
    }
}
