//! Material

use crate::geometry::*;
use crate::pbrt::*;
use crate::sampling::*;
use crate::spectrum::*;
use std::sync::Arc;

/// Scattering classification of a material.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MaterialKind {
    /// Reflects light equally in all directions.
    Diffuse,

    /// Reflects light in a single direction (Dirac delta).
    Specular,
}

impl MaterialKind {
    /// Returns true for distributions described by a Dirac delta.
    pub fn is_specular(&self) -> bool {
        *self == MaterialKind::Specular
    }
}

/// Orthonormal frame at a shading point. Local coordinates have the normal
/// along +z.
#[derive(Copy, Clone, Debug, Default)]
pub struct ShadingFrame {
    /// Tangent, local +x.
    pub s: Vector3f,

    /// Bitangent, local +y.
    pub t: Vector3f,

    /// Normal, local +z.
    pub n: Vector3f,
}

impl ShadingFrame {
    /// Create a new `ShadingFrame`.
    ///
    /// * `s` - Unit tangent.
    /// * `t` - Unit bitangent.
    /// * `n` - Unit normal.
    pub fn new(s: &Vector3f, t: &Vector3f, n: &Normal3f) -> Self {
        Self {
            s: *s,
            t: *t,
            n: Vector3f::from(*n),
        }
    }

    /// Convert a world space direction to local shading coordinates.
    ///
    /// * `v` - The direction.
    pub fn world_to_local(&self, v: &Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.s), v.dot(&self.t), v.dot(&self.n))
    }

    /// Convert a local shading direction to world space.
    ///
    /// * `v` - The direction.
    pub fn local_to_world(&self, v: &Vector3f) -> Vector3f {
        self.s * v.x + self.t * v.y + self.n * v.z
    }
}

/// Returns cos(θ) of a direction in the shading coordinate system.
///
/// * `w` - The direction vector.
#[inline]
pub fn cos_theta(w: &Vector3f) -> Float {
    w.z
}

/// Returns |cos(θ)| of a direction in the shading coordinate system.
///
/// * `w` - The direction vector.
#[inline]
pub fn abs_cos_theta(w: &Vector3f) -> Float {
    abs(w.z)
}

/// Returns true if two local directions are in the same hemisphere.
///
/// * `w`  - First direction vector.
/// * `wp` - Second direction vector.
#[inline]
pub fn same_hemisphere(w: &Vector3f, wp: &Vector3f) -> bool {
    w.z * wp.z > 0.0
}

/// Result of sampling a material.
#[derive(Copy, Clone, Debug, Default)]
pub struct BxDFSample {
    /// Sampled incident direction in world space.
    pub wi: Vector3f,

    /// Value of the distribution function for the pair of directions.
    pub f: Spectrum,

    /// Probability density of `wi`. Zero marks a failed sample.
    pub pdf: Float,
}

impl BxDFSample {
    /// Create a new `BxDFSample`.
    ///
    /// * `wi`  - Sampled incident direction in world space.
    /// * `f`   - Value of the distribution function.
    /// * `pdf` - Probability density of `wi`.
    pub fn new(wi: Vector3f, f: Spectrum, pdf: Float) -> Self {
        Self { wi, f, pdf }
    }
}

/// Material interface. Directions are given and returned in world space;
/// `frame` is the shading frame at the point being shaded. Materials carry
/// no per-hit state, so a single instance is shared by every thread.
pub trait Material: Send + Sync {
    /// Returns the scattering classification.
    fn kind(&self) -> MaterialKind;

    /// Returns the value of the distribution function for a pair of
    /// directions. Specular materials return black.
    ///
    /// * `frame` - Shading frame.
    /// * `wo`    - Outgoing direction.
    /// * `wi`    - Incident direction.
    fn f(&self, frame: &ShadingFrame, wo: &Vector3f, wi: &Vector3f) -> Spectrum;

    /// Samples an incident direction for a given outgoing direction. The
    /// default draws from a cosine-weighted hemisphere on the side of `wo`.
    ///
    /// * `frame` - Shading frame.
    /// * `wo`    - Outgoing direction.
    /// * `u`     - The 2D uniform random values.
    fn sample_f(&self, frame: &ShadingFrame, wo: &Vector3f, u: &Point2f) -> BxDFSample {
        let wo_local = frame.world_to_local(wo);
        let mut wi_local = cosine_sample_hemisphere(u);
        if wo_local.z < 0.0 {
            wi_local.z *= -1.0;
        }

        let pdf = if same_hemisphere(&wo_local, &wi_local) {
            abs_cos_theta(&wi_local) * INV_PI
        } else {
            0.0
        };
        let wi = frame.local_to_world(&wi_local);
        BxDFSample::new(wi, self.f(frame, wo, &wi), pdf)
    }

    /// Returns the probability density `sample_f()` would assign to `wi`.
    ///
    /// * `frame` - Shading frame.
    /// * `wo`    - Outgoing direction.
    /// * `wi`    - Incident direction.
    fn pdf(&self, frame: &ShadingFrame, wo: &Vector3f, wi: &Vector3f) -> Float {
        let wo_local = frame.world_to_local(wo);
        let wi_local = frame.world_to_local(wi);
        if same_hemisphere(&wo_local, &wi_local) {
            abs_cos_theta(&wi_local) * INV_PI
        } else {
            0.0
        }
    }
}

/// Atomic reference counted `Material`.
pub type ArcMaterial = Arc<dyn Material>;

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    struct Grey;

    impl Material for Grey {
        fn kind(&self) -> MaterialKind {
            MaterialKind::Diffuse
        }

        fn f(&self, _frame: &ShadingFrame, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
            Spectrum::new(0.5 * INV_PI)
        }
    }

    fn tilted_frame() -> ShadingFrame {
        let n = Vector3f::new(1.0, 1.0, 0.0).normalize();
        let (s, t) = coordinate_system(&n);
        ShadingFrame::new(&s, &t, &Normal3f::from(n))
    }

    prop_point2!(unit_square, f32, 0.0..1.0f32, 0.0..1.0f32);

    #[test]
    fn frame_round_trips() {
        let frame = tilted_frame();
        let v = Vector3f::new(0.3, -0.2, 0.9);
        let w = frame.local_to_world(&frame.world_to_local(&v));
        assert!(approx_eq!(f32, w.x, v.x, epsilon = 0.0001));
        assert!(approx_eq!(f32, w.y, v.y, epsilon = 0.0001));
        assert!(approx_eq!(f32, w.z, v.z, epsilon = 0.0001));
    }

    proptest! {
        #[test]
        fn default_sample_matches_default_pdf(u in unit_square()) {
            let frame = tilted_frame();
            let wo = Vector3f::new(0.2, 0.9, 0.1).normalize();
            let sample = Grey.sample_f(&frame, &wo, &u);
            prop_assert!(sample.wi.dot(&frame.n) * wo.dot(&frame.n) >= 0.0);
            prop_assert!(approx_eq!(
                f32,
                sample.pdf,
                Grey.pdf(&frame, &wo, &sample.wi),
                epsilon = 0.0001
            ));
        }

        #[test]
        fn default_sample_follows_wo_below_surface(u in unit_square()) {
            let frame = tilted_frame();
            let wo = -Vector3f::new(0.2, 0.9, 0.1).normalize();
            let sample = Grey.sample_f(&frame, &wo, &u);
            prop_assert!(frame.world_to_local(&sample.wi).z <= 0.0);
        }
    }
}
