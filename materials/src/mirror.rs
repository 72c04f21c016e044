//! Mirror Material

use lux_core::geometry::*;
use lux_core::material::*;
use lux_core::pbrt::*;
use lux_core::spectrum::*;

/// Implements a simple mirror, modeled with perfect specular reflection.
#[derive(Clone, Debug)]
pub struct MirrorMaterial {
    /// Reflectivity of the mirror.
    pub kr: Spectrum,
}

impl MirrorMaterial {
    /// Create a new `MirrorMaterial`.
    ///
    /// * `kr` - Reflectivity of the mirror.
    pub fn new(kr: Spectrum) -> Self {
        Self { kr }
    }
}

impl Material for MirrorMaterial {
    /// Returns the scattering classification.
    fn kind(&self) -> MaterialKind {
        MaterialKind::Specular
    }

    /// No scattering is returned for arbitrary pairs of directions; only
    /// `sample_f()` finds the reflected direction.
    fn f(&self, _frame: &ShadingFrame, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        Spectrum::zero()
    }

    /// Returns the mirror direction of `wo` about the normal.
    ///
    /// * `frame` - Shading frame.
    /// * `wo`    - Outgoing direction.
    /// * `_u`    - The 2D uniform random values (unused).
    fn sample_f(&self, frame: &ShadingFrame, wo: &Vector3f, _u: &Point2f) -> BxDFSample {
        let wo_local = frame.world_to_local(wo);
        let wi_local = Vector3f::new(-wo_local.x, -wo_local.y, wo_local.z);

        let cos = abs_cos_theta(&wi_local);
        if cos == 0.0 {
            return BxDFSample::default();
        }

        BxDFSample::new(frame.local_to_world(&wi_local), self.kr / cos, 1.0)
    }

    /// Returns 0 since a delta distribution is never hit by chance.
    fn pdf(&self, _frame: &ShadingFrame, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }
}
