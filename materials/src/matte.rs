//! Matte Material

use lux_core::geometry::*;
use lux_core::material::*;
use lux_core::pbrt::*;
use lux_core::spectrum::*;

/// Implements purely diffuse (Lambertian) surfaces.
#[derive(Clone, Debug)]
pub struct MatteMaterial {
    /// Spectral diffuse reflection.
    pub kd: Spectrum,
}

impl MatteMaterial {
    /// Create a new `MatteMaterial`.
    ///
    /// * `kd` - Spectral diffuse reflection.
    pub fn new(kd: Spectrum) -> Self {
        if kd.max_component_value() > 1.0 {
            warn!("Matte reflectance {kd} exceeds 1 and will add energy");
        }
        Self { kd }
    }
}

impl Material for MatteMaterial {
    /// Returns the scattering classification.
    fn kind(&self) -> MaterialKind {
        MaterialKind::Diffuse
    }

    /// Returns the value of the distribution function for a pair of
    /// directions.
    ///
    /// * `_frame` - Shading frame.
    /// * `_wo`    - Outgoing direction.
    /// * `_wi`    - Incident direction.
    fn f(&self, _frame: &ShadingFrame, _wo: &Vector3f, _wi: &Vector3f) -> Spectrum {
        self.kd * INV_PI
    }
}
