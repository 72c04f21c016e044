//! Path Integrator

use lux_core::geometry::*;
use lux_core::integrator::*;
use lux_core::material::*;
use lux_core::pbrt::*;
use lux_core::sampler::*;
use lux_core::scene::*;
use lux_core::shape::*;
use lux_core::spectrum::*;

/// Minimum termination probability for Russian roulette.
const MIN_TERMINATION_PROBABILITY: Float = 0.05;

/// Number of bounces traced before Russian roulette kicks in.
const ROULETTE_START_DEPTH: usize = 3;

/// Implements unidirectional path tracing with next event estimation.
pub struct PathIntegrator {
    /// Maximum number of bounces.
    max_depth: usize,
}

impl PathIntegrator {
    /// Create a new `PathIntegrator`.
    ///
    /// * `max_depth` - Maximum number of bounces.
    pub fn new(max_depth: usize) -> Self {
        info!("Creating path integrator with max depth {max_depth}");
        Self { max_depth }
    }

    /// Returns the number of pre-generated sample dimensions the integrator
    /// sampler should carry for paths of at most `max_depth` bounces. Every
    /// bounce consumes at most three 2D samples and two 1D samples.
    ///
    /// * `max_depth` - Maximum number of bounces.
    pub fn sample_dimensions(max_depth: usize) -> usize {
        3 * max_depth
    }
}

impl Integrator for PathIntegrator {
    /// Returns one noisy estimate of the incident radiance at the origin of a
    /// given ray.
    ///
    /// * `r`       - The camera ray.
    /// * `scene`   - The scene.
    /// * `sampler` - The sampler.
    fn li(&self, r: &Ray, scene: &Scene, sampler: &mut dyn Sampler) -> Spectrum {
        let mut l = Spectrum::zero();
        let mut beta = Spectrum::one();
        let mut ray = *r;
        let mut specular_bounce = false;

        for bounces in 0..self.max_depth {
            let isect = match scene.intersect(&ray) {
                Some(si) => si,
                None => {
                    trace!("Path escaped after {bounces} bounces");
                    break;
                }
            };

            // Emission is only picked up directly on the first hit and after
            // specular bounces; otherwise next event estimation accounts for it.
            if bounces == 0 || specular_bounce {
                let shape = &scene.shapes[isect.shape_id];
                l += beta * shape.le(&isect, &-ray.d);
            }

            l += beta * uniform_sample_one_light(&isect, scene, sampler);

            // Sample BSDF to get new path direction.
            let frame = isect.shading_frame();
            let BxDFSample { wi, f, pdf } =
                isect.material.sample_f(&frame, &isect.wo, &sampler.get_2d());
            if f.is_black() || pdf == 0.0 {
                break;
            }

            beta *= f * wi.abs_dot(&isect.n) / pdf;
            specular_bounce = isect.material.kind().is_specular();
            ray = isect.spawn_ray(&wi);

            debug!("Bounce {bounces}: beta = {beta}, L = {l}");

            if bounces > ROULETTE_START_DEPTH {
                match russian_roulette(beta, sampler.get_1d()) {
                    Some(b) => beta = b,
                    None => break,
                }
            }
        }

        l
    }

    /// Returns the maximum number of bounces traced for a path.
    fn max_depth(&self) -> usize {
        self.max_depth
    }
}

/// Possibly terminate a path. Returns `None` if the path is terminated,
/// otherwise the throughput re-weighted by the survival probability.
///
/// * `beta` - Current path throughput.
/// * `u`    - Uniform sample in [0, 1).
pub fn russian_roulette(beta: Spectrum, u: Float) -> Option<Spectrum> {
    let q = max(MIN_TERMINATION_PROBABILITY, 1.0 - beta.y());
    if u < q {
        None
    } else {
        Some(beta / (1.0 - q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_scenes::*;
    use crate::DirectLightingIntegrator;
    use float_cmp::*;
    use lux_core::rng::*;
    use lux_core::sampling::*;
    use proptest::prelude::*;
    use samplers::RandomSampler;

    #[test]
    fn roulette_is_unbiased() {
        let mut rng = RNG::new(7);
        let beta = Spectrum::new(0.3);
        let n = 100_000;

        let total: Float = (0..n)
            .map(|_| russian_roulette(beta, rng.uniform_float()).map_or(0.0, |b| b.y()))
            .sum();

        assert!(approx_eq!(f32, total / n as Float, beta.y(), epsilon = 0.01));
    }

    #[test]
    fn roulette_always_allows_termination() {
        let beta = Spectrum::new(2.0);
        assert!(russian_roulette(beta, 0.01).is_none());

        let survivor = russian_roulette(beta, 0.5).unwrap();
        assert!(approx_eq!(f32, survivor[0], 2.0 / 0.95, epsilon = 0.0001));
    }

    #[test]
    fn roulette_terminates_black_paths() {
        assert!(russian_roulette(Spectrum::zero(), 0.9999).is_none());
    }

    #[test]
    fn sample_dimensions_scale_with_depth() {
        assert_eq!(PathIntegrator::sample_dimensions(1), 3);
        assert_eq!(PathIntegrator::sample_dimensions(5), 15);
    }

    #[test]
    fn scene_without_lights_is_black() {
        let scene = unlit_floor();
        let integrator = PathIntegrator::new(5);
        let mut sampler = RandomSampler::new(16, Some(0));
        sampler.start_pixel(&Point2i::new(0, 0));

        let ray = Ray::new(
            Point3f::new(0.1, 1.0, 0.0),
            Vector3f::new(0.0, -1.0, 0.0),
            INFINITY,
        );
        loop {
            assert!(integrator.li(&ray, &scene, &mut sampler).is_black());
            if !sampler.start_next_sample() {
                break;
            }
        }
    }

    #[test]
    fn escaping_ray_is_black() {
        let scene = lit_floor();
        let integrator = PathIntegrator::new(5);
        let mut sampler = RandomSampler::new(1, Some(0));
        sampler.start_pixel(&Point2i::new(0, 0));

        let ray = Ray::new(
            Point3f::new(0.0, 1.0, 0.0),
            Vector3f::new(0.0, 0.0, 1.0),
            INFINITY,
        );
        assert!(integrator.li(&ray, &scene, &mut sampler).is_black());
    }

    #[test]
    fn camera_ray_hitting_light_sees_emission() {
        let scene = lit_floor();
        let integrator = PathIntegrator::new(1);
        let mut sampler = RandomSampler::new(1, Some(0));
        sampler.start_pixel(&Point2i::new(0, 0));

        // Straight up into the light sphere from below.
        let ray = Ray::new(
            Point3f::new(0.0, 0.5, 0.0),
            Vector3f::new(0.0, 1.0, 0.0),
            INFINITY,
        );
        let l = integrator.li(&ray, &scene, &mut sampler);
        assert!(l[0] >= LIGHT_RADIANCE);
    }

    #[test]
    fn closed_box_does_not_amplify_energy() {
        let scene = closed_box();
        let integrator = PathIntegrator::new(5);
        let spp = 4000;
        let mut sampler = RandomSampler::new(spp, Some(3));
        let mut rng = RNG::new(11);
        sampler.start_pixel(&Point2i::new(0, 0));

        let origin = Point3f::new(0.0, -0.5, 0.0);
        let mut total = 0.0;
        loop {
            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
            let ray = Ray::new(origin, uniform_sample_sphere(&u), INFINITY);
            let l = integrator.li(&ray, &scene, &mut sampler);
            assert!(!l.has_nans() && !l.has_infs());
            total += l.y();
            if !sampler.start_next_sample() {
                break;
            }
        }

        let average = total / spp as Float;
        assert!(average > 0.0);
        assert!(average < BOX_LIGHT_RADIANCE);
    }

    #[test]
    fn single_bounce_matches_direct_lighting() {
        let scene = lit_floor();
        let path = PathIntegrator::new(1);
        let direct = DirectLightingIntegrator::new();

        let ray = Ray::new(
            Point3f::new(0.3, 1.0, -0.2),
            Vector3f::new(0.0, -1.0, 0.1).normalize(),
            INFINITY,
        );
        for seed in 0..64 {
            let mut s1 = RandomSampler::new(1, Some(seed));
            let mut s2 = RandomSampler::new(1, Some(seed));
            s1.start_pixel(&Point2i::new(0, 0));
            s2.start_pixel(&Point2i::new(0, 0));

            assert_eq!(path.li(&ray, &scene, &mut s1), direct.li(&ray, &scene, &mut s2));
        }
    }

    #[test]
    fn single_bounce_is_emission_plus_one_light_sample() {
        let scene = lit_floor();
        let path = PathIntegrator::new(1);
        let mut s1 = RandomSampler::new(1, Some(9));
        let mut s2 = RandomSampler::new(1, Some(9));
        s1.start_pixel(&Point2i::new(0, 0));
        s2.start_pixel(&Point2i::new(0, 0));

        let ray = Ray::new(
            Point3f::new(0.1, 1.0, 0.0),
            Vector3f::new(0.0, -1.0, 0.0),
            INFINITY,
        );
        let si = scene.intersect(&ray).unwrap();
        let expected = scene.shapes[si.shape_id].le(&si, &-ray.d)
            + uniform_sample_one_light(&si, &scene, &mut s2);

        assert_eq!(path.li(&ray, &scene, &mut s1), expected);
    }

    proptest! {
        #[test]
        fn radiance_is_finite_and_non_negative(seed in 0u64..1000u64) {
            let scene = closed_box();
            let integrator = PathIntegrator::new(8);
            let mut sampler = RandomSampler::new(1, Some(seed));
            let mut rng = RNG::new(seed);
            sampler.start_pixel(&Point2i::new(0, 0));

            let u = Point2f::new(rng.uniform_float(), rng.uniform_float());
            let ray = Ray::new(Point3f::new(0.2, 0.0, 0.1), uniform_sample_sphere(&u), INFINITY);
            let l = integrator.li(&ray, &scene, &mut sampler);
            prop_assert!(!l.has_nans() && !l.has_infs());
            prop_assert!(l[0] >= 0.0 && l[1] >= 0.0 && l[2] >= 0.0);
        }
    }
}
