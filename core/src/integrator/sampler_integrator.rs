//! Sampler Integrator

use super::*;
use crate::camera::*;
use crate::film::*;
use crate::filter::*;
use crate::pbrt::*;
use indicatif::{ProgressBar, ProgressStyle};

/// Parameters of the tiled render loop.
#[derive(Copy, Clone, Debug)]
pub struct RenderSettings {
    /// Number of worker threads.
    pub n_threads: usize,

    /// Size in pixels of the square tiles handed to worker threads.
    pub tile_size: usize,

    /// Hide the progress bar.
    pub quiet: bool,

    /// Base sequence for the samplers cloned for each tile.
    pub seed: u64,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            n_threads: 1,
            tile_size: 16,
            quiet: true,
            seed: 0,
        }
    }
}

/// Render the scene into the film. The image is split into square tiles that
/// worker threads pull from a channel; each tile renders with its own clones
/// of the samplers seeded by the tile index (offset by `settings.seed`) so the
/// output does not depend on the number of threads.
///
/// * `integrator`     - Computes the radiance along camera rays.
/// * `scene`          - The scene.
/// * `camera`         - The camera.
/// * `camera_sampler` - Sampler for film and lens positions.
/// * `sampler`        - Sampler handed to the integrator.
/// * `filter`         - Distributes film samples within each pixel.
/// * `film`           - Receives the rendered tiles.
/// * `settings`       - Render loop parameters.
///
/// Returns an error if a worker thread panicked; the film is then incomplete.
#[allow(clippy::too_many_arguments)]
pub fn render(
    integrator: &dyn Integrator,
    scene: &Scene,
    camera: &dyn Camera,
    camera_sampler: &dyn Sampler,
    sampler: &dyn Sampler,
    filter: &dyn Filter,
    film: &Film,
    settings: &RenderSettings,
) -> Result<(), String> {
    assert_eq!(
        camera_sampler.samples_per_pixel(),
        sampler.samples_per_pixel(),
        "camera and integrator samplers must agree on samples per pixel"
    );

    // Compute number of tiles, `n_tiles`, to use for parallel rendering.
    let sample_bounds = film.pixel_bounds();
    let sample_extent = sample_bounds.diagonal();
    let tile_size = max(settings.tile_size, 1) as Int;
    let n_tiles = Point2::new(
        ((sample_extent.x + tile_size - 1) / tile_size) as usize,
        ((sample_extent.y + tile_size - 1) / tile_size) as usize,
    );
    let tile_count = n_tiles.x * n_tiles.y;
    let n_threads = max(settings.n_threads, 1);

    info!(
        "Rendering {}x{} tiles with {} threads, max depth {}",
        n_tiles.x,
        n_tiles.y,
        n_threads,
        integrator.max_depth()
    );

    let progress = create_progress_reporter(tile_count as u64, settings.quiet);
    progress.set_message("Rendering scene");

    let result = crossbeam::scope(|scope| {
        let (tx, rx) = crossbeam_channel::bounded(n_threads);

        // Spawn worker threads.
        for _ in 0..n_threads {
            let rxc = rx.clone();
            let progress = &progress;
            scope.spawn(move |_| {
                for tile_idx in rxc.iter() {
                    let tile_bounds = tile_bounds(tile_idx, n_tiles, &sample_bounds, tile_size);
                    // Even sequences drive the camera, odd ones the integrator.
                    let seed = settings.seed.wrapping_add(tile_idx as u64).wrapping_mul(2);
                    let mut tile_camera_sampler = camera_sampler.clone_sampler(seed);
                    let mut tile_sampler = sampler.clone_sampler(seed + 1);

                    // Render section of image corresponding to `tile`.
                    let film_tile = render_tile(
                        integrator,
                        scene,
                        camera,
                        &mut tile_camera_sampler,
                        &mut tile_sampler,
                        filter,
                        film.get_film_tile(&tile_bounds),
                    );

                    // Merge image tile into `Film`.
                    film.merge_film_tile(&film_tile);
                    progress.inc(1);
                }
            });
        }
        drop(rx); // Drop extra rx since we've cloned one for each worker.

        // Send work.
        for tile_idx in 0..tile_count {
            if tx.send(tile_idx).is_err() {
                error!("Render workers exited before tile {tile_idx} was queued");
                break;
            }
        }
    });

    if result.is_err() {
        progress.abandon_with_message("Render failed");
        return Err("A render worker thread panicked".to_string());
    }

    progress.finish_with_message("Render complete");
    Ok(())
}

/// Returns the pixel bounds of a tile clipped to the sample bounds.
///
/// * `tile_idx`      - Unique tile index.
/// * `n_tiles`       - Number of tiles in (x, y) direction.
/// * `sample_bounds` - Sample bounds.
/// * `tile_size`     - Tile size in pixels.
fn tile_bounds(
    tile_idx: usize,
    n_tiles: Point2<usize>,
    sample_bounds: &Bounds2i,
    tile_size: Int,
) -> Bounds2i {
    let tile_x = (tile_idx % n_tiles.x) as Int;
    let tile_y = (tile_idx / n_tiles.x) as Int;

    let x0 = sample_bounds.p_min.x + tile_x * tile_size;
    let x1 = min(x0 + tile_size, sample_bounds.p_max.x);
    let y0 = sample_bounds.p_min.y + tile_y * tile_size;
    let y1 = min(y0 + tile_size, sample_bounds.p_max.y);
    Bounds2i::new(Point2i::new(x0, y0), Point2i::new(x1, y1))
}

/// Render an image tile.
///
/// * `integrator`     - Computes the radiance along camera rays.
/// * `scene`          - The scene.
/// * `camera`         - The camera.
/// * `camera_sampler` - Sampler for film and lens positions.
/// * `sampler`        - Sampler handed to the integrator.
/// * `filter`         - Distributes film samples within each pixel.
/// * `film_tile`      - The tile to render into.
fn render_tile(
    integrator: &dyn Integrator,
    scene: &Scene,
    camera: &dyn Camera,
    camera_sampler: &mut dyn Sampler,
    sampler: &mut dyn Sampler,
    filter: &dyn Filter,
    mut film_tile: FilmTile,
) -> FilmTile {
    let tile_bounds = film_tile.pixel_bounds;
    info!("Starting image tile {tile_bounds:?}");

    // Loop over pixels in tile to render them.
    for pixel in tile_bounds {
        camera_sampler.start_pixel(&pixel);
        sampler.start_pixel(&pixel);

        loop {
            // Initialize `CameraSample` for current sample.
            let camera_sample = camera_sampler.get_camera_sample(&pixel, filter);

            // Generate camera ray for current sample.
            let ray = camera.generate_ray(&camera_sample);

            // Evaluate radiance along camera ray.
            let l = checked_radiance(
                integrator.li(&ray, scene, sampler),
                &pixel,
                sampler.get_data().current_pixel_sample_index,
            );

            debug!("Pixel: {pixel}, Camera sample: {:?} -> ray: {ray} -> L = {l}", camera_sample);

            // Add camera ray's contribution to image.
            film_tile.add_sample(&pixel, l);

            sampler.start_next_sample();
            if !camera_sampler.start_next_sample() {
                break;
            }
        }
    }

    info!("Finished image tile {tile_bounds:?}");

    film_tile
}

/// Returns the radiance, or black with an error logged if the value is not a
/// valid radiance.
///
/// * `l`             - Radiance returned by the integrator.
/// * `pixel`         - Pixel being rendered.
/// * `sample_number` - Sample number within the pixel.
fn checked_radiance(l: Spectrum, pixel: &Point2i, sample_number: usize) -> Spectrum {
    if l.has_nans() {
        error!(
            "Not-a-number radiance value returned for pixel ({}, {}), sample {}. Setting to black.",
            pixel.x, pixel.y, sample_number
        );
        Spectrum::zero()
    } else if l.y() < -1e-5 {
        error!(
            "Negative luminance value, {}, returned for pixel ({}, {}), sample {}. Setting to black.",
            l.y(),
            pixel.x,
            pixel.y,
            sample_number
        );
        Spectrum::zero()
    } else if l.has_infs() || l.y().is_infinite() {
        error!(
            "Infinite luminance value returned for pixel ({}, {}), sample {}. Setting to black.",
            pixel.x, pixel.y, sample_number
        );
        Spectrum::zero()
    } else {
        l
    }
}

/// Returns a progress bar for `len` tiles; hidden when `quiet` is set.
///
/// * `len`   - Number of steps.
/// * `quiet` - Hide the progress bar.
fn create_progress_reporter(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(len);
    progress.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    progress
}

#[cfg(test)]
mod tests {
    use super::*;

    struct PanickingIntegrator {}

    impl Integrator for PanickingIntegrator {
        fn li(&self, _ray: &Ray, _scene: &Scene, _sampler: &mut dyn Sampler) -> Spectrum {
            panic!("radiance evaluation failed");
        }

        fn max_depth(&self) -> usize {
            1
        }
    }

    struct ConstantIntegrator {}

    impl Integrator for ConstantIntegrator {
        fn li(&self, _ray: &Ray, _scene: &Scene, _sampler: &mut dyn Sampler) -> Spectrum {
            Spectrum::new(0.25)
        }

        fn max_depth(&self) -> usize {
            1
        }
    }

    struct FixedCamera {}

    impl Camera for FixedCamera {
        fn generate_ray(&self, _sample: &CameraSample) -> Ray {
            Ray::new(Point3f::zero(), Vector3f::new(0.0, 0.0, 1.0), INFINITY)
        }

        fn resolution(&self) -> Point2i {
            Point2i::new(4, 4)
        }
    }

    struct CenterFilter {}

    impl Filter for CenterFilter {
        fn warp(&self, _u: &Point2f) -> Point2f {
            Point2f::new(0.5, 0.5)
        }
    }

    fn render_4x4(integrator: &dyn Integrator, n_threads: usize) -> (Result<(), String>, Film) {
        let film = Film::new(Point2i::new(4, 4), None);
        let sampler = PixelSampler::new(2, 2, Some(0));
        let settings = RenderSettings {
            n_threads,
            tile_size: 2,
            ..Default::default()
        };
        let result = render(
            integrator,
            &Scene::new(vec![]),
            &FixedCamera {},
            &sampler,
            &sampler,
            &CenterFilter {},
            &film,
            &settings,
        );
        (result, film)
    }

    #[test]
    fn worker_panic_is_reported() {
        let (result, _film) = render_4x4(&PanickingIntegrator {}, 2);
        assert!(result.is_err());
    }

    #[test]
    fn every_pixel_is_rendered() {
        let (result, film) = render_4x4(&ConstantIntegrator {}, 3);
        assert!(result.is_ok());
        let pixels = film.pixel_values();
        assert_eq!(pixels.len(), 16);
        assert!(pixels.iter().all(|p| *p == Spectrum::new(0.25)));
    }

    #[test]
    fn tiles_cover_image_without_overlap() {
        let bounds = Bounds2i::new(Point2i::new(0, 0), Point2i::new(37, 20));
        let n_tiles = Point2::new(3_usize, 2_usize);

        let mut covered = vec![0; 37 * 20];
        for tile_idx in 0..6 {
            for p in tile_bounds(tile_idx, n_tiles, &bounds, 16) {
                covered[(p.y * 37 + p.x) as usize] += 1;
            }
        }
        assert!(covered.iter().all(|&c| c == 1));

        let last = tile_bounds(5, n_tiles, &bounds, 16);
        assert_eq!(last.p_min, Point2i::new(32, 16));
        assert_eq!(last.p_max, Point2i::new(37, 20));
    }

    #[test]
    fn invalid_radiance_becomes_black() {
        let p = Point2i::new(1, 2);
        assert!(checked_radiance(Spectrum::new(Float::NAN), &p, 0).is_black());
        assert!(checked_radiance(Spectrum::new(-1.0), &p, 0).is_black());
        assert!(checked_radiance(Spectrum::new(INFINITY), &p, 0).is_black());
        assert_eq!(checked_radiance(Spectrum::new(0.5), &p, 0), Spectrum::new(0.5));
    }
}
