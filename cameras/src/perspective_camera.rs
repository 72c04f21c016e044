//! Perspective Camera

use lux_core::camera::*;
use lux_core::geometry::*;
use lux_core::pbrt::*;
use lux_core::sampling::*;

/// Perspective camera with an optional thin lens. Camera space has +x to the
/// right, +y up and looks down +z; the image plane sits at z = 1.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    /// The camera to world transformation.
    pub camera_to_world: Transform,

    /// The image resolution in pixels.
    pub resolution: Point2i,

    /// Bounds of the image plane at z = 1 in camera space.
    pub screen_window: Bounds2f,

    /// Radius of camera lens. 0 gives a pinhole camera.
    pub lens_radius: Float,

    /// Distance to the plane of focus.
    pub focal_distance: Float,
}

impl PerspectiveCamera {
    /// Create a new perspective camera.
    ///
    /// * `camera_to_world` - The camera to world transformation.
    /// * `resolution`      - The image resolution in pixels.
    /// * `fov`             - The field-of-view angle in degrees along the
    ///                       shorter image axis.
    /// * `lens_radius`     - Radius of camera lens.
    /// * `focal_distance`  - Focal distance.
    pub fn new(
        camera_to_world: Transform,
        resolution: Point2i,
        fov: Float,
        lens_radius: Float,
        focal_distance: Float,
    ) -> Self {
        assert!(resolution.x > 0 && resolution.y > 0, "invalid resolution {resolution}");
        assert!(fov > 0.0 && fov < 180.0, "invalid field of view {fov}");

        let aspect_ratio = resolution.x as Float / resolution.y as Float;
        let tan_half_fov = (fov / 2.0).to_radians().tan();
        let (sx, sy) = if aspect_ratio > 1.0 {
            (aspect_ratio * tan_half_fov, tan_half_fov)
        } else {
            (tan_half_fov, tan_half_fov / aspect_ratio)
        };
        let screen_window = Bounds2f::new(Point2f::new(-sx, -sy), Point2f::new(sx, sy));

        debug!("Perspective camera screen window {:?}", screen_window);

        Self {
            camera_to_world,
            resolution,
            screen_window,
            lens_radius,
            focal_distance,
        }
    }

    /// Create a pinhole camera.
    ///
    /// * `camera_to_world` - The camera to world transformation.
    /// * `resolution`      - The image resolution in pixels.
    /// * `fov`             - The field-of-view angle in degrees.
    pub fn pinhole(camera_to_world: Transform, resolution: Point2i, fov: Float) -> Self {
        Self::new(camera_to_world, resolution, fov, 0.0, 1e6)
    }

    /// Returns the point on the image plane at z = 1 in camera space for a
    /// raster position. Raster y grows downwards.
    ///
    /// * `p_film` - Point on the film in raster coordinates.
    fn raster_to_camera(&self, p_film: &Point2f) -> Point3f {
        let sw = &self.screen_window;
        let u = p_film.x / self.resolution.x as Float;
        let v = p_film.y / self.resolution.y as Float;
        Point3f::new(
            lerp(u, sw.p_min.x, sw.p_max.x),
            lerp(v, sw.p_max.y, sw.p_min.y),
            1.0,
        )
    }
}

impl Camera for PerspectiveCamera {
    /// Returns a ray corresponding to a given sample.
    ///
    /// * `sample` - The sample.
    fn generate_ray(&self, sample: &CameraSample) -> Ray {
        // Compute raster and camera sample positions.
        let p_camera = self.raster_to_camera(&sample.p_film);

        let mut ray = Ray::new(
            Point3f::zero(),
            Vector3f::from(p_camera).normalize(),
            INFINITY,
        );

        // Modify ray for depth of field.
        if self.lens_radius > 0.0 {
            // Sample point on lens.
            let p_lens = concentric_sample_disk(&sample.p_lens) * self.lens_radius;

            // Compute point on plane of focus.
            let ft = self.focal_distance / ray.d.z;
            let p_focus = ray.at(ft);

            // Update ray for effect of lens.
            ray.o = Point3f::new(p_lens.x, p_lens.y, 0.0);
            ray.d = (p_focus - ray.o).normalize();
        }

        let r = self.camera_to_world.transform_ray(&ray);
        Ray::new(r.o, r.d.normalize(), INFINITY)
    }

    /// Returns the image resolution in pixels.
    fn resolution(&self) -> Point2i {
        self.resolution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    fn camera(lens_radius: Float) -> PerspectiveCamera {
        let camera_to_world = look_at(
            &Point3f::new(0.0, 0.0, -5.0),
            &Point3f::new(0.0, 0.0, 0.0),
            &Vector3f::new(0.0, 1.0, 0.0),
        );
        PerspectiveCamera::new(camera_to_world, Point2i::new(200, 100), 90.0, lens_radius, 5.0)
    }

    #[test]
    fn center_ray_looks_forward() {
        let cam = camera(0.0);
        let ray = cam.generate_ray(&CameraSample::new(
            Point2f::new(100.0, 50.0),
            Point2f::new(0.5, 0.5),
        ));
        assert!(approx_eq!(f32, ray.o.z, -5.0, epsilon = 0.0001));
        assert!(approx_eq!(f32, ray.d.z, 1.0, epsilon = 0.0001));
        assert_eq!(cam.resolution(), Point2i::new(200, 100));
    }

    #[test]
    fn raster_origin_is_top_left() {
        let cam = camera(0.0);
        let ray = cam.generate_ray(&CameraSample::new(Point2f::zero(), Point2f::zero()));
        assert!(ray.d.x < 0.0);
        assert!(ray.d.y > 0.0);

        // Wide image: the vertical field of view is 90 degrees.
        let top = cam.generate_ray(&CameraSample::new(Point2f::new(100.0, 0.0), Point2f::zero()));
        assert!(approx_eq!(f32, top.d.y, top.d.z, epsilon = 0.0001));
    }

    prop_compose! {
        fn unit_square()(x in 0.0..1.0f32, y in 0.0..1.0f32) -> Point2f {
            Point2f::new(x, y)
        }
    }

    proptest! {
        #[test]
        fn thin_lens_rays_meet_on_focal_plane(u in unit_square()) {
            let pinhole = camera(0.0);
            let lens = camera(0.5);
            let p_film = Point2f::new(40.0, 70.0);

            let a = pinhole.generate_ray(&CameraSample::new(p_film, u));
            let b = lens.generate_ray(&CameraSample::new(p_film, u));
            prop_assert!(approx_eq!(f32, b.d.length(), 1.0, epsilon = 0.0001));

            // Both rays pass through the same point on the plane z = 0.
            let pa = a.at(-a.o.z / a.d.z);
            let pb = b.at(-b.o.z / b.d.z);
            prop_assert!(approx_eq!(f32, pa.x, pb.x, epsilon = 0.001));
            prop_assert!(approx_eq!(f32, pa.y, pb.y, epsilon = 0.001));
        }
    }
}
