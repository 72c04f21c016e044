//! Shapes and area lights

use crate::geometry::*;
use crate::interaction::*;
use crate::material::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::Arc;

/// Result of sampling incident radiance from an emissive shape.
#[derive(Copy, Clone, Debug, Default)]
pub struct LightSample {
    /// Unit direction from the reference point towards the light.
    pub wi: Vector3f,

    /// Sampled point on the light.
    pub p_light: Point3f,

    /// Probability density of `wi` with respect to solid angle at the
    /// reference point. Zero marks a failed sample.
    pub pdf: Float,

    /// Radiance arriving at the reference point from `p_light`, ignoring
    /// occlusion.
    pub value: Spectrum,
}

/// Data common to all shapes.
#[derive(Clone)]
pub struct ShapeData {
    /// The object to world transfomation.
    pub object_to_world: Transform,

    /// The world to object transfomation.
    pub world_to_object: Transform,

    /// Material of the surface.
    pub material: ArcMaterial,

    /// Radiance emitted from the front side of the surface. Black for
    /// shapes that are not lights.
    pub l_emit: Spectrum,
}

impl ShapeData {
    /// Create a new instance of `ShapeData`.
    ///
    /// * `object_to_world` - The object to world transfomation.
    /// * `material`        - Material of the surface.
    /// * `l_emit`          - Emitted radiance.
    pub fn new(object_to_world: Transform, material: ArcMaterial, l_emit: Spectrum) -> Self {
        Self {
            object_to_world,
            world_to_object: object_to_world.inverse(),
            material,
            l_emit,
        }
    }
}

/// Shape interface. Every shape can act as an area light: shapes with
/// non-black `l_emit` are the scene's light sources.
pub trait Shape: Send + Sync {
    /// Returns the underlying shape data.
    fn get_data(&self) -> &ShapeData;

    /// Returns the surface area of the shape in world space.
    fn area(&self) -> Float;

    /// Returns the nearest hit in `(0, r.t_max)` as the ray parameter and the
    /// geometric information at the hit.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &Ray) -> Option<(Float, SurfaceInteraction)>;

    /// Returns true if the ray hits the shape in `(0, r.t_max)`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool {
        self.intersect(r).is_some()
    }

    /// Samples a point on the shape uniformly by area. Returns the point and
    /// its unit normal.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Point3f, Normal3f);

    /// Returns true if the shape emits light.
    fn is_emissive(&self) -> bool {
        !self.get_data().l_emit.is_black()
    }

    /// Returns the radiance emitted from a point on the surface in direction
    /// `w`. Only the side the normal points to emits.
    ///
    /// * `it` - Point on the surface.
    /// * `w`  - Outgoing direction.
    fn le(&self, it: &SurfaceInteraction, w: &Vector3f) -> Spectrum {
        if it.n.dot(w) > 0.0 {
            self.get_data().l_emit
        } else {
            Spectrum::zero()
        }
    }

    /// Samples a direction from a reference point towards the shape. The
    /// default samples the surface uniformly by area and converts the
    /// density to solid angle.
    ///
    /// * `it` - Reference point.
    /// * `u`  - Sample value to use.
    fn sample_li(&self, it: &SurfaceInteraction, u: &Point2f) -> LightSample {
        let (p_light, n_light) = self.sample_area(u);
        let d = p_light - it.p;
        let dist_squared = d.length_squared();
        if dist_squared == 0.0 {
            return LightSample::default();
        }

        let wi = d / dist_squared.sqrt();
        let cos_light = n_light.dot(&-wi);
        if cos_light <= 0.0 {
            // Back side of a one-sided emitter.
            return LightSample::default();
        }

        LightSample {
            wi,
            p_light,
            pdf: dist_squared / (cos_light * self.area()),
            value: self.get_data().l_emit,
        }
    }

    /// Returns the solid angle density with which `sample_li()` would pick
    /// `wi` from the reference point.
    ///
    /// * `it` - Reference point.
    /// * `wi` - Unit direction towards the shape.
    fn pdf_li(&self, it: &SurfaceInteraction, wi: &Vector3f) -> Float {
        let ray = it.spawn_ray(wi);
        match self.intersect(&ray) {
            Some((_t, light_it)) => {
                let cos_light = light_it.n.dot(&-*wi);
                if cos_light <= 0.0 {
                    0.0
                } else {
                    it.p.distance_squared(&light_it.p) / (cos_light * self.area())
                }
            }
            None => 0.0,
        }
    }
}

/// Atomic reference counted `Shape`.
pub type ArcShape = Arc<dyn Shape>;
