//! Surface Interaction

use crate::geometry::*;
use crate::material::*;
use crate::pbrt::*;
use std::fmt;

/// Local differential geometry at a ray-surface hit.
#[derive(Clone)]
pub struct SurfaceInteraction {
    /// Point of interaction.
    pub p: Point3f,

    /// Unit geometric surface normal. Points outward for closed shapes and
    /// along the front face for one-sided shapes.
    pub n: Normal3f,

    /// Unit tangent. Together with `t` and `n` it forms the orthonormal
    /// shading frame.
    pub s: Vector3f,

    /// Unit bitangent.
    pub t: Vector3f,

    /// Unit direction back towards the ray origin.
    pub wo: Vector3f,

    /// Index of the hit shape in the scene. Shapes fill in 0; the scene
    /// replaces it.
    pub shape_id: usize,

    /// Material of the hit shape.
    pub material: ArcMaterial,
}

impl SurfaceInteraction {
    /// Create a new `SurfaceInteraction` with a tangent frame built around
    /// the normal.
    ///
    /// * `p`        - Point of interaction.
    /// * `n`        - Unit surface normal.
    /// * `wo`       - Unit direction back towards the ray origin.
    /// * `material` - Material of the hit shape.
    pub fn new(p: Point3f, n: Normal3f, wo: Vector3f, material: ArcMaterial) -> Self {
        let (s, t) = coordinate_system(&Vector3f::from(n));
        Self {
            p,
            n,
            s,
            t,
            wo,
            shape_id: 0,
            material,
        }
    }

    /// Returns the shading frame at the hit point.
    pub fn shading_frame(&self) -> ShadingFrame {
        ShadingFrame::new(&self.s, &self.t, &self.n)
    }

    /// Returns the origin offset off the surface to the side `w` points to so
    /// that spawned rays do not hit the surface they leave.
    ///
    /// * `w` - Direction of the spawned ray.
    fn offset_origin(&self, w: &Vector3f) -> Point3f {
        let offset = Vector3f::from(self.n) * RAY_EPSILON;
        if w.dot(&self.n) < 0.0 {
            self.p - offset
        } else {
            self.p + offset
        }
    }

    /// Returns a ray leaving the surface in a given direction.
    ///
    /// * `d` - Unit direction.
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray {
        Ray::new(self.offset_origin(d), *d, INFINITY)
    }

    /// Returns a shadow ray towards a given point that stops `SHADOW_EPSILON`
    /// short of it.
    ///
    /// * `p` - The target point.
    pub fn spawn_ray_to(&self, p: &Point3f) -> Ray {
        let o = self.offset_origin(&(*p - self.p));
        let d = *p - o;
        let dist = d.length();
        Ray::new(o, d / dist, dist - SHADOW_EPSILON)
    }
}

impl fmt::Debug for SurfaceInteraction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("SurfaceInteraction")
            .field("p", &self.p)
            .field("n", &self.n)
            .field("wo", &self.wo)
            .field("shape_id", &self.shape_id)
            .finish()
    }
}
