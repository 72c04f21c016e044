#[macro_use]
extern crate log;

mod cornell;

use filters::{BoxFilter, TriangleFilter};
use integrators::{DirectLightingIntegrator, PathIntegrator};
use lux_core::app::*;
use lux_core::camera::*;
use lux_core::film::*;
use lux_core::filter::*;
use lux_core::geometry::*;
use lux_core::integrator::*;
use lux_core::pbrt::*;
use lux_core::sampler::*;
use samplers::{RandomSampler, StratifiedSampler};
use std::time::Instant;

/// Sample dimensions used for film and lens positions.
const CAMERA_SAMPLE_DIMENSIONS: usize = 2;

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    // In case of error report it and exit with failure.
    if let Err(e) = render_cornell_box(&OPTIONS) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn render_cornell_box(options: &Options) -> Result<(), String> {
    options.validate()?;

    let resolution = Point2i::new(options.resolution as Int, options.resolution as Int);
    let scene = cornell::scene();
    let camera = cornell::camera(resolution);

    let (integrator, n_sampled_dimensions): (Box<dyn Integrator>, usize) = match options.integrator {
        IntegratorType::Path => (
            Box::new(PathIntegrator::new(options.max_depth)),
            PathIntegrator::sample_dimensions(options.max_depth),
        ),
        IntegratorType::Direct => (
            Box::new(DirectLightingIntegrator::new()),
            DirectLightingIntegrator::sample_dimensions(),
        ),
    };

    let camera_sampler = create_sampler(options, CAMERA_SAMPLE_DIMENSIONS);
    let sampler = create_sampler(options, n_sampled_dimensions);

    let filter: Box<dyn Filter> = match options.filter {
        FilterType::Box => Box::new(BoxFilter::new()),
        FilterType::Triangle => Box::new(TriangleFilter::new()),
    };

    // Only high dynamic range output keeps radiance above 1.
    let max_sample_value = if options.image_file.to_lowercase().ends_with(".exr") {
        None
    } else {
        Some(1.0)
    };
    let film = Film::new(camera.resolution(), max_sample_value);

    let settings = RenderSettings {
        n_threads: options.threads(),
        tile_size: options.tile_size,
        quiet: options.quiet,
        seed: options.seed,
    };

    let start = Instant::now();
    render(
        integrator.as_ref(),
        &scene,
        &camera,
        camera_sampler.as_ref(),
        sampler.as_ref(),
        filter.as_ref(),
        &film,
        &settings,
    )?;
    info!("Rendering finished in {:.2?}", start.elapsed());

    film.write_image(&options.image_file)?;
    info!("Wrote {}", options.image_file);

    Ok(())
}

/// Returns the sampler selected on the command line.
///
/// * `options`              - The application options.
/// * `n_sampled_dimensions` - Number of pre-generated sample dimensions.
fn create_sampler(options: &Options, n_sampled_dimensions: usize) -> Box<dyn Sampler> {
    let (x_samples, y_samples) = options.pixel_samples();
    match options.sampler {
        SamplerType::Stratified => Box::new(StratifiedSampler::new(
            x_samples,
            y_samples,
            !options.no_jitter,
            n_sampled_dimensions,
            None,
        )),
        SamplerType::Random => Box::new(RandomSampler::new(x_samples * y_samples, None)),
    }
}
