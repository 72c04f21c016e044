//! Common

use crate::geometry::*;
use crate::interaction::*;
use crate::material::*;
use crate::pbrt::*;
use crate::sampler::*;
use crate::sampling::*;
use crate::scene::*;
use crate::shape::*;
use crate::spectrum::*;

/// Uniformly sample from one random light in the scene for direct lighting and
/// multiply result by number of lights to compensate. Consumes one 1D sample
/// for the light choice, then a 2D light sample and a 2D scattering sample.
/// A scene without lights returns black without consuming any samples.
///
/// * `it`      - The intersection information.
/// * `scene`   - The scene.
/// * `sampler` - The sampler.
pub fn uniform_sample_one_light(
    it: &SurfaceInteraction,
    scene: &Scene,
    sampler: &mut dyn Sampler,
) -> Spectrum {
    // Randomly choose a single light to sample, `light`.
    let n_lights = scene.lights.len();
    if n_lights == 0 {
        return Spectrum::zero();
    }

    let light_num = min(sampler.get_1d() * n_lights as Float, n_lights as Float - 1.0) as usize;
    let (light_id, light) = scene.light(light_num);

    let u_light = sampler.get_2d();
    let u_scattering = sampler.get_2d();
    let frame = it.shading_frame();
    let estimate = estimate_direct(it, &frame, &u_scattering, light_id, light, &u_light, scene);

    estimate * n_lights as Float
}

/// Compute a direct lighting estimate for a light source sample by applying
/// multiple importance sampling.
///
/// * `it`           - The intersection information.
/// * `frame`        - Shading frame at the intersection.
/// * `u_scattering` - Scattering sample.
/// * `light_id`     - Index of the light's shape in the scene.
/// * `light`        - The light.
/// * `u_light`      - Light sample.
/// * `scene`        - The scene.
pub fn estimate_direct(
    it: &SurfaceInteraction,
    frame: &ShadingFrame,
    u_scattering: &Point2f,
    light_id: usize,
    light: &ArcShape,
    u_light: &Point2f,
    scene: &Scene,
) -> Spectrum {
    let material = &it.material;
    let wo = it.wo;
    let n = it.n;

    let mut ld = Spectrum::zero();

    // Sample light source with multiple importance sampling.
    let LightSample {
        wi,
        p_light,
        pdf: light_pdf,
        value: li,
    } = light.sample_li(it, u_light);

    // Both directions have to be on the same side of the surface.
    let reflect = wi.dot(&n) * wo.dot(&n) > 0.0;
    if light_pdf > 0.0 && !li.is_black() && reflect {
        // Evaluate BSDF for light sampling strategy.
        let f = material.f(frame, &wo, &wi) * wi.abs_dot(&n);
        let scattering_pdf = material.pdf(frame, &wo, &wi);

        if !f.is_black() && !scene.intersect_p(&it.spawn_ray_to(&p_light)) {
            let weight = power_heuristic(1, light_pdf, 1, scattering_pdf);
            ld += f * li * weight / light_pdf;
        }
    }

    // Sample BSDF with multiple importance sampling.
    let BxDFSample {
        wi,
        f,
        pdf: scattering_pdf,
    } = material.sample_f(frame, &wo, u_scattering);
    let f = f * wi.abs_dot(&n);

    if !f.is_black() && scattering_pdf > 0.0 {
        let mut weight = 1.0;
        if !material.kind().is_specular() {
            let light_pdf = light.pdf_li(it, &wi);
            if light_pdf == 0.0 {
                return ld;
            }
            weight = power_heuristic(1, scattering_pdf, 1, light_pdf);
        }

        // Add light contribution only if the sampled direction reaches the
        // same light.
        if let Some(light_it) = scene.intersect(&it.spawn_ray(&wi)) {
            if light_it.shape_id == light_id {
                let li = light.le(&light_it, &-wi);
                if !li.is_black() {
                    ld += f * li * weight / scattering_pdf;
                }
            }
        }
    }

    ld
}
