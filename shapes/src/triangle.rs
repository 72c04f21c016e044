//! Triangles

use lux_core::geometry::*;
use lux_core::interaction::*;
use lux_core::material::*;
use lux_core::pbrt::*;
use lux_core::sampling::*;
use lux_core::shape::*;
use lux_core::spectrum::*;
use std::sync::Arc;

/// A one-sided triangle. Only rays approaching the side the normal points to
/// hit it and, when emissive, only that side emits.
#[derive(Clone)]
pub struct Triangle {
    /// Common shape data.
    pub data: ShapeData,

    /// Vertices in world space.
    pub v: [Point3f; 3],

    /// Unit geometric normal in world space, `(v1 - v0) x (v2 - v1)`.
    pub n: Normal3f,
}

impl Triangle {
    /// Create a new triangle. The front face is the side from which the
    /// vertices appear in counter-clockwise order.
    ///
    /// * `object_to_world` - The object to world transfomation.
    /// * `vertices`        - Vertices in object space.
    /// * `material`        - Material of the surface.
    /// * `l_emit`          - Emitted radiance; black for non-emitters.
    pub fn new(
        object_to_world: Transform,
        vertices: [Point3f; 3],
        material: ArcMaterial,
        l_emit: Spectrum,
    ) -> Self {
        let v = vertices.map(|p| object_to_world.transform_point(&p));
        let n = Normal3f::from((v[1] - v[0]).cross(&(v[2] - v[1])).normalize());
        Self {
            data: ShapeData::new(object_to_world, material, l_emit),
            v,
            n,
        }
    }
}

impl Shape for Triangle {
    /// Returns the underlying shape data.
    fn get_data(&self) -> &ShapeData {
        &self.data
    }

    /// Returns the surface area of the shape.
    fn area(&self) -> Float {
        0.5 * (self.v[1] - self.v[0]).cross(&(self.v[2] - self.v[0])).length()
    }

    /// Returns geometric details if a ray intersects the front face of the
    /// triangle. If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &Ray) -> Option<(Float, SurfaceInteraction)> {
        // Rays parallel to the plane or arriving from the back miss.
        if r.d.dot(&self.n) >= 0.0 {
            return None;
        }

        let [v0, v1, v2] = self.v;
        let e1 = v1 - v0;
        let e2 = v2 - v0;

        let pvec = r.d.cross(&e2);
        let det = e1.dot(&pvec);
        if det == 0.0 {
            return None;
        }
        let inv_det = 1.0 / det;

        // Compute barycentric coordinates, checking for out-of-range.
        let tvec = r.o - v0;
        let b1 = tvec.dot(&pvec) * inv_det;
        if !(0.0..=1.0).contains(&b1) {
            return None;
        }

        let qvec = tvec.cross(&e1);
        let b2 = r.d.dot(&qvec) * inv_det;
        if b2 < 0.0 || b1 + b2 > 1.0 {
            return None;
        }

        let t = e2.dot(&qvec) * inv_det;
        if t <= 0.0 || t > r.t_max {
            return None;
        }

        let si = SurfaceInteraction::new(
            r.at(t),
            self.n,
            -r.d.normalize(),
            Arc::clone(&self.data.material),
        );
        Some((t, si))
    }

    /// Sample a point uniformly on the surface.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Point3f, Normal3f) {
        let b = uniform_sample_triangle(u);
        let [v0, v1, v2] = self.v;
        let p = v2 + (v0 - v2) * b.x + (v1 - v2) * b.y;
        (p, self.n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use materials::MatteMaterial;
    use proptest::prelude::*;

    /// Unit right triangle in the z = 0 plane facing +z.
    fn facing_up(l_emit: Float) -> Triangle {
        Triangle::new(
            Transform::default(),
            [
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 1.0, 0.0),
            ],
            Arc::new(MatteMaterial::new(Spectrum::new(0.5))),
            Spectrum::new(l_emit),
        )
    }

    fn reference_point(p: Point3f) -> SurfaceInteraction {
        SurfaceInteraction::new(
            p,
            Normal3f::new(0.0, 0.0, -1.0),
            Vector3f::new(0.0, 0.0, -1.0),
            Arc::new(MatteMaterial::new(Spectrum::new(0.5))),
        )
    }

    // Keeps sampled points away from the edges.
    prop_compose! {
        fn interior_sample()(x in 0.05..0.95f32, y in 0.05..0.95f32) -> Point2f {
            Point2f::new(x, y)
        }
    }

    #[test]
    fn normal_follows_vertex_order() {
        let tri = facing_up(0.0);
        assert_eq!(tri.n, Normal3f::new(0.0, 0.0, 1.0));
        assert!(approx_eq!(f32, tri.area(), 0.5, epsilon = 0.00001));
    }

    #[test]
    fn front_face_hit() {
        let tri = facing_up(0.0);
        let ray = Ray::new(Point3f::new(0.25, 0.25, 2.0), Vector3f::new(0.0, 0.0, -1.0), INFINITY);
        let (t, si) = tri.intersect(&ray).expect("ray should hit the front face");
        assert!(approx_eq!(f32, t, 2.0, epsilon = 0.0001));
        assert!(approx_eq!(f32, si.p.x, 0.25, epsilon = 0.0001));
        assert_eq!(si.n, tri.n);
        assert!(tri.intersect_p(&ray));
    }

    #[test]
    fn back_face_and_outside_miss() {
        let tri = facing_up(0.0);
        let from_below =
            Ray::new(Point3f::new(0.25, 0.25, -2.0), Vector3f::new(0.0, 0.0, 1.0), INFINITY);
        assert!(tri.intersect(&from_below).is_none());

        let outside = Ray::new(Point3f::new(0.8, 0.8, 2.0), Vector3f::new(0.0, 0.0, -1.0), INFINITY);
        assert!(tri.intersect(&outside).is_none());

        let short = Ray::new(Point3f::new(0.25, 0.25, 2.0), Vector3f::new(0.0, 0.0, -1.0), 1.0);
        assert!(!tri.intersect_p(&short));
    }

    #[test]
    fn transform_places_vertices_in_world() {
        let tri = Triangle::new(
            translate(&Vector3f::new(0.0, 4.0, 0.0)) * rotate_x(180.0),
            [
                Point3f::new(0.0, 0.0, 0.0),
                Point3f::new(1.0, 0.0, 0.0),
                Point3f::new(0.0, 0.0, 1.0),
            ],
            Arc::new(MatteMaterial::new(Spectrum::new(0.5))),
            Spectrum::zero(),
        );
        assert!(approx_eq!(f32, tri.v[0].y, 4.0, epsilon = 0.0001));
        assert!(approx_eq!(f32, tri.v[2].z, -1.0, epsilon = 0.0001));
    }

    #[test]
    fn back_of_emitter_is_dark() {
        let tri = facing_up(5.0);
        let it = reference_point(Point3f::new(0.25, 0.25, -1.0));
        let sample = tri.sample_li(&it, &Point2f::new(0.3, 0.6));
        assert_eq!(sample.pdf, 0.0);
    }

    proptest! {
        #[test]
        fn light_samples_match_pdf(u in interior_sample()) {
            let tri = facing_up(5.0);
            let it = SurfaceInteraction::new(
                Point3f::new(0.2, 0.2, 1.0),
                Normal3f::new(0.0, 0.0, -1.0),
                Vector3f::new(0.0, 0.0, -1.0),
                Arc::new(MatteMaterial::new(Spectrum::new(0.5))),
            );
            let sample = tri.sample_li(&it, &u);
            prop_assert!(sample.pdf > 0.0);
            prop_assert!(approx_eq!(f32, sample.p_light.z, 0.0, epsilon = 0.00001));
            prop_assert!(sample.p_light.x >= -0.00001 && sample.p_light.y >= -0.00001);
            prop_assert!(sample.p_light.x + sample.p_light.y <= 1.00001);
            prop_assert_eq!(sample.value, Spectrum::new(5.0));

            let pdf = tri.pdf_li(&it, &sample.wi);
            prop_assert!(approx_eq!(f32, pdf, sample.pdf, epsilon = 0.001 * sample.pdf));
        }
    }
}
