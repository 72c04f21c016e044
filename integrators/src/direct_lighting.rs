//! Direct Lighting Integrator

use lux_core::geometry::*;
use lux_core::integrator::*;
use lux_core::sampler::*;
use lux_core::scene::*;
use lux_core::shape::*;
use lux_core::spectrum::*;

/// Implements the direct lighting integrator. Only light arriving directly
/// from emitters after a single reflection is accounted for.
#[derive(Default)]
pub struct DirectLightingIntegrator {}

impl DirectLightingIntegrator {
    /// Create a new `DirectLightingIntegrator`.
    pub fn new() -> Self {
        info!("Creating direct lighting integrator");
        Self {}
    }

    /// Returns the number of pre-generated sample dimensions the integrator
    /// sampler should carry.
    pub fn sample_dimensions() -> usize {
        2
    }
}

impl Integrator for DirectLightingIntegrator {
    /// Returns emitted radiance at the first hit plus a single light sample.
    ///
    /// * `ray`     - The camera ray.
    /// * `scene`   - The scene.
    /// * `sampler` - The sampler.
    fn li(&self, ray: &Ray, scene: &Scene, sampler: &mut dyn Sampler) -> Spectrum {
        match scene.intersect(ray) {
            Some(isect) => {
                let le = scene.shapes[isect.shape_id].le(&isect, &-ray.d);
                le + uniform_sample_one_light(&isect, scene, sampler)
            }
            None => Spectrum::zero(),
        }
    }

    /// Returns the maximum number of bounces traced for a path.
    fn max_depth(&self) -> usize {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_scenes::*;
    use float_cmp::*;
    use lux_core::pbrt::*;
    use samplers::{RandomSampler, StratifiedSampler};

    fn straight_down(x: Float, z: Float) -> Ray {
        Ray::new(
            Point3f::new(x, 1.0, z),
            Vector3f::new(0.0, -1.0, 0.0),
            INFINITY,
        )
    }

    #[test]
    fn no_lights_gives_black() {
        let scene = unlit_floor();
        let mut sampler = RandomSampler::new(1, Some(0));
        sampler.start_pixel(&Point2i::new(0, 0));

        let l = DirectLightingIntegrator::new().li(&straight_down(0.0, 0.01), &scene, &mut sampler);
        assert!(l.is_black());
    }

    #[test]
    fn no_lights_consumes_no_samples() {
        let scene = unlit_floor();
        let mut used = RandomSampler::new(1, Some(2));
        let mut fresh = RandomSampler::new(1, Some(2));
        used.start_pixel(&Point2i::new(0, 0));
        fresh.start_pixel(&Point2i::new(0, 0));

        DirectLightingIntegrator::new().li(&straight_down(0.0, 0.01), &scene, &mut used);
        assert_eq!(used.get_1d(), fresh.get_1d());
    }

    #[test]
    fn miss_gives_black() {
        let scene = lit_floor();
        let mut sampler = RandomSampler::new(1, Some(0));
        sampler.start_pixel(&Point2i::new(0, 0));

        let ray = Ray::new(
            Point3f::new(0.0, 1.0, 0.0),
            Vector3f::new(1.0, 0.0, 0.0),
            INFINITY,
        );
        assert!(DirectLightingIntegrator::new().li(&ray, &scene, &mut sampler).is_black());
    }

    #[test]
    fn diffuse_point_below_spherical_light() {
        // Reflected radiance from a Lambertian point directly below a sphere
        // light is albedo * L * sin^2(theta_max).
        let scene = lit_floor();
        let integrator = DirectLightingIntegrator::new();
        let sin2_theta_max = 0.5 * 0.5 / (2.0 * 2.0);
        let expected = ALBEDO * LIGHT_RADIANCE * sin2_theta_max;

        let spp = 4096;
        let mut sampler = StratifiedSampler::new(64, 64, true, 2, Some(1));
        sampler.start_pixel(&Point2i::new(0, 0));

        let mut total = 0.0;
        loop {
            total += integrator.li(&straight_down(0.0, 0.01), &scene, &mut sampler)[0];
            if !sampler.start_next_sample() {
                break;
            }
        }

        let average = total / spp as Float;
        assert!(
            approx_eq!(f32, average, expected, epsilon = 0.02),
            "average {average}, expected {expected}"
        );
    }

    #[test]
    fn floor_is_lit_but_not_emissive() {
        let scene = lit_floor();
        let mut sampler = RandomSampler::new(256, Some(4));
        sampler.start_pixel(&Point2i::new(0, 0));

        let mut total = Spectrum::zero();
        loop {
            let l = DirectLightingIntegrator::new().li(&straight_down(0.5, 0.3), &scene, &mut sampler);
            assert!(l.y() < LIGHT_RADIANCE);
            total += l;
            if !sampler.start_next_sample() {
                break;
            }
        }
        assert!(!total.is_black());
    }
}
