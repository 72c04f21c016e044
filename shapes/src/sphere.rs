//! Spheres

use lux_core::geometry::*;
use lux_core::interaction::*;
use lux_core::material::*;
use lux_core::pbrt::*;
use lux_core::sampling::*;
use lux_core::shape::*;
use lux_core::spectrum::*;
use std::sync::Arc;

/// A sphere centered at the object space origin. The object to world
/// transformation must not scale.
#[derive(Clone)]
pub struct Sphere {
    /// Common shape data.
    pub data: ShapeData,

    /// Radius of sphere.
    pub radius: Float,
}

impl Sphere {
    /// Create a new sphere at origin [0, 0, 0].
    ///
    /// * `object_to_world` - The object to world transfomation.
    /// * `radius`          - Radius of sphere.
    /// * `material`        - Material of the surface.
    /// * `l_emit`          - Emitted radiance; black for non-emitters.
    pub fn new(
        object_to_world: Transform,
        radius: Float,
        material: ArcMaterial,
        l_emit: Spectrum,
    ) -> Self {
        assert!(radius > 0.0, "sphere radius must be positive");
        Self {
            data: ShapeData::new(object_to_world, material, l_emit),
            radius,
        }
    }

    /// Returns the center of the sphere in world space.
    pub fn center(&self) -> Point3f {
        self.data.object_to_world.transform_point(&Point3f::zero())
    }

    /// Returns the ray parameter and object space position of the nearest hit.
    ///
    /// * `r` - The ray in world space.
    fn hit(&self, r: &Ray) -> Option<(Float, Point3f)> {
        // Transform ray to object space.
        let ray = self.data.world_to_object.transform_ray(r);

        // Compute quadratic sphere coefficients.
        let o = Vector3f::from(ray.o);
        let a = ray.d.length_squared();
        let b = 2.0 * ray.d.dot(&o);
        let c = o.length_squared() - self.radius * self.radius;

        // Solve quadratic equation for t values.
        let (t0, t1) = solve_quadratic(a, b, c)?;

        // Check quadric shape t0 and t1 for nearest intersection.
        if t0 > ray.t_max || t1 <= 0.0 {
            return None;
        }

        let mut t_shape_hit = t0;
        if t_shape_hit <= 0.0 {
            t_shape_hit = t1;
            if t_shape_hit > ray.t_max {
                return None;
            }
        }

        Some((t_shape_hit, ray.at(t_shape_hit)))
    }

    /// Returns the cosine of the half angle of the cone the sphere subtends
    /// from a point at squared distance `dist_squared` from its center, or
    /// `None` if the point is inside the sphere.
    ///
    /// * `dist_squared` - Squared distance to the center.
    fn cos_theta_max(&self, dist_squared: Float) -> Option<Float> {
        let r2 = self.radius * self.radius;
        if dist_squared - RAY_EPSILON <= r2 {
            None
        } else {
            Some(max(0.0, 1.0 - r2 / dist_squared).sqrt())
        }
    }
}

impl Shape for Sphere {
    /// Returns the underlying shape data.
    fn get_data(&self) -> &ShapeData {
        &self.data
    }

    /// Returns the surface area of the shape.
    fn area(&self) -> Float {
        4.0 * PI * self.radius * self.radius
    }

    /// Returns geometric details if a ray intersects the shape intersection.
    /// If there is no intersection, `None` is returned.
    ///
    /// * `r` - The ray.
    fn intersect(&self, r: &Ray) -> Option<(Float, SurfaceInteraction)> {
        let (t_hit, p_obj) = self.hit(r)?;

        // Transform the hit point and normal to world space.
        let o2w = &self.data.object_to_world;
        let p = o2w.transform_point(&p_obj);
        let n = o2w
            .transform_normal(&Normal3f::new(p_obj.x, p_obj.y, p_obj.z))
            .normalize();

        let si = SurfaceInteraction::new(p, n, -r.d.normalize(), Arc::clone(&self.data.material));
        Some((t_hit, si))
    }

    /// Returns `true` if a ray-shape intersection succeeds; otherwise `false`.
    ///
    /// * `r` - The ray.
    fn intersect_p(&self, r: &Ray) -> bool {
        self.hit(r).is_some()
    }

    /// Sample a point uniformly on the surface.
    ///
    /// * `u` - Sample value to use.
    fn sample_area(&self, u: &Point2f) -> (Point3f, Normal3f) {
        let p_obj = Point3f::zero() + uniform_sample_sphere(u) * self.radius;
        let o2w = &self.data.object_to_world;
        let n = o2w
            .transform_normal(&Normal3f::new(p_obj.x, p_obj.y, p_obj.z))
            .normalize();
        (o2w.transform_point(&p_obj), n)
    }

    /// Samples the cone of directions the sphere subtends from the reference
    /// point. Returns a zero sample if the point is inside the sphere.
    ///
    /// * `it` - Reference point.
    /// * `u`  - Sample value to use.
    fn sample_li(&self, it: &SurfaceInteraction, u: &Point2f) -> LightSample {
        let p_center = self.center();
        let dist_squared = it.p.distance_squared(&p_center);
        let cos_theta_max = match self.cos_theta_max(dist_squared) {
            Some(cos_theta_max) => cos_theta_max,
            None => return LightSample::default(),
        };

        // Compute coordinate system for sphere sampling.
        let dc = dist_squared.sqrt();
        let wc = (p_center - it.p) / dc;
        let (wc_x, wc_y) = coordinate_system(&wc);

        // Compute θ and φ values for sample in cone.
        let cos_theta = (1.0 - u.x) + u.x * cos_theta_max;
        let sin_theta = max(0.0, 1.0 - cos_theta * cos_theta).sqrt();
        let phi = u.y * TWO_PI;

        // Compute angle α from center of sphere to sampled point on surface.
        let r2 = self.radius * self.radius;
        let ds = dc * cos_theta - max(0.0, r2 - dc * dc * sin_theta * sin_theta).sqrt();
        let cos_alpha = clamp((dc * dc + r2 - ds * ds) / (2.0 * dc * self.radius), -1.0, 1.0);
        let sin_alpha = max(0.0, 1.0 - cos_alpha * cos_alpha).sqrt();

        // Compute surface normal and sampled point on sphere.
        let n_light =
            spherical_direction_in_coord_frame(sin_alpha, cos_alpha, phi, &-wc_x, &-wc_y, &-wc);
        let p_light = p_center + n_light * self.radius;

        let wi = (p_light - it.p).normalize();
        let value = if n_light.dot(&-wi) > 0.0 {
            self.data.l_emit
        } else {
            Spectrum::zero()
        };

        LightSample {
            wi,
            p_light,
            pdf: uniform_cone_pdf(cos_theta_max),
            value,
        }
    }

    /// Returns the density of the cone sampling in `sample_li()`; zero if the
    /// reference point is inside the sphere.
    ///
    /// * `it`  - Reference point.
    /// * `_wi` - Unit direction towards the sphere.
    fn pdf_li(&self, it: &SurfaceInteraction, _wi: &Vector3f) -> Float {
        let dist_squared = it.p.distance_squared(&self.center());
        match self.cos_theta_max(dist_squared) {
            Some(cos_theta_max) => uniform_cone_pdf(cos_theta_max),
            None => {
                trace!("Reference point {} is inside the sphere", it.p);
                0.0
            }
        }
    }
}

/// Solve the quadratic equation a * x ^ 2  + b * x + c = 0. Returns the
/// roots in increasing order.
///
/// * `a` - Coefficient of x ^ 2 term.
/// * `b` - Coefficient of x term.
/// * `c` - Coefficient of constant term.
fn solve_quadratic(a: Float, b: Float, c: Float) -> Option<(Float, Float)> {
    // Find quadratic discriminant
    let a = a as f64;
    let b = b as f64;
    let c = c as f64;

    let discrim = b * b - 4.0 * a * c;
    if discrim < 0.0 {
        None
    } else {
        let root_discrim = discrim.sqrt();

        // Compute quadratic `t` values.
        let q = if b < 0.0 {
            -0.5 * (b - root_discrim)
        } else {
            -0.5 * (b + root_discrim)
        };
        let mut t0 = (q / a) as Float;
        let mut t1 = (c / q) as Float;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        Some((t0, t1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use materials::MatteMaterial;
    use proptest::prelude::*;

    fn sphere_at(center: Vector3f, radius: Float, l_emit: Float) -> Sphere {
        Sphere::new(
            translate(&center),
            radius,
            Arc::new(MatteMaterial::new(Spectrum::new(0.5))),
            Spectrum::new(l_emit),
        )
    }

    fn reference_point(p: Point3f) -> SurfaceInteraction {
        SurfaceInteraction::new(
            p,
            Normal3f::new(0.0, 1.0, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            Arc::new(MatteMaterial::new(Spectrum::new(0.5))),
        )
    }

    #[test]
    fn ray_hits_front_of_sphere() {
        let sphere = sphere_at(Vector3f::new(0.0, 0.0, 5.0), 1.0, 0.0);
        let ray = Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0), INFINITY);

        let (t, si) = sphere.intersect(&ray).expect("ray should hit the sphere");
        assert!(approx_eq!(f32, t, 4.0, epsilon = 0.0001));
        assert!(approx_eq!(f32, si.p.z, 4.0, epsilon = 0.0001));
        assert!(approx_eq!(f32, si.n.z, -1.0, epsilon = 0.0001));
        assert!(approx_eq!(f32, si.wo.z, -1.0, epsilon = 0.0001));
        assert!(sphere.intersect_p(&ray));
    }

    #[test]
    fn t_max_limits_hits() {
        let sphere = sphere_at(Vector3f::new(0.0, 0.0, 5.0), 1.0, 0.0);
        let ray = Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0), 3.5);
        assert!(sphere.intersect(&ray).is_none());
        assert!(!sphere.intersect_p(&ray));
    }

    #[test]
    fn ray_from_inside_hits_far_side() {
        let sphere = sphere_at(Vector3f::new(0.0, 0.0, 0.0), 2.0, 0.0);
        let ray = Ray::new(Point3f::zero(), Vector3f::new(1.0, 0.0, 0.0), INFINITY);
        let (t, si) = sphere.intersect(&ray).expect("ray should hit the sphere");
        assert!(approx_eq!(f32, t, 2.0, epsilon = 0.0001));
        assert!(approx_eq!(f32, si.n.x, 1.0, epsilon = 0.0001));
    }

    #[test]
    fn missing_ray_returns_none() {
        let sphere = sphere_at(Vector3f::new(0.0, 0.0, 5.0), 1.0, 0.0);
        let ray = Ray::new(Point3f::zero(), Vector3f::new(0.0, 1.0, 0.0), INFINITY);
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn sampling_from_inside_returns_zero() {
        let sphere = sphere_at(Vector3f::new(0.0, 0.0, 0.0), 1.0, 10.0);
        let it = reference_point(Point3f::new(0.2, 0.0, 0.0));
        let sample = sphere.sample_li(&it, &Point2f::new(0.5, 0.5));
        assert_eq!(sample.pdf, 0.0);
        assert!(sample.value.is_black());
        assert_eq!(sphere.pdf_li(&it, &Vector3f::new(1.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn area_is_four_pi_r_squared() {
        let sphere = sphere_at(Vector3f::new(0.0, 0.0, 0.0), 2.0, 0.0);
        assert!(approx_eq!(f32, sphere.area(), 16.0 * PI, epsilon = 0.0001));
    }

    prop_compose! {
        fn unit_square()(x in 0.0..1.0f32, y in 0.0..1.0f32) -> Point2f {
            Point2f::new(x, y)
        }
    }

    // Keeps samples away from the silhouette where rays graze the sphere.
    prop_compose! {
        fn inner_cone()(x in 0.0..0.9f32, y in 0.0..1.0f32) -> Point2f {
            Point2f::new(x, y)
        }
    }

    proptest! {
        #[test]
        fn cone_samples_land_on_visible_cap(u in inner_cone()) {
            let sphere = sphere_at(Vector3f::new(0.0, 4.0, 0.0), 0.5, 10.0);
            let it = reference_point(Point3f::zero());
            let sample = sphere.sample_li(&it, &u);

            prop_assert!(sample.pdf > 0.0);
            prop_assert!(approx_eq!(
                f32,
                sample.p_light.distance(&sphere.center()),
                0.5,
                epsilon = 0.001
            ));
            prop_assert!(approx_eq!(
                f32,
                sample.pdf,
                sphere.pdf_li(&it, &sample.wi),
                epsilon = 0.0001
            ));
            prop_assert_eq!(sample.value, Spectrum::new(10.0));

            // The sampled point is the first thing a ray towards it hits.
            let (t, _si) = sphere.intersect(&it.spawn_ray(&sample.wi)).expect("should hit");
            prop_assert!(approx_eq!(
                f32,
                t,
                it.p.distance(&sample.p_light),
                epsilon = 0.01
            ));
        }

        #[test]
        fn area_samples_are_on_surface(u in unit_square()) {
            let sphere = sphere_at(Vector3f::new(1.0, 2.0, 3.0), 0.7, 0.0);
            let (p, n) = sphere.sample_area(&u);
            prop_assert!(approx_eq!(f32, p.distance(&sphere.center()), 0.7, epsilon = 0.001));
            prop_assert!(approx_eq!(f32, n.length(), 1.0, epsilon = 0.001));
        }
    }
}
