//! Stratified Sampler.

use lux_core::geometry::*;
use lux_core::pbrt::*;
use lux_core::sampler::*;
use lux_core::sampling::*;

/// Implements a stratified sampler that subdivides pixel areas into
/// non-overlapping rectangular regions, called strata, and generates a single
/// sample inside each region.
#[derive(Clone)]
pub struct StratifiedSampler {
    /// Use a pixel sampler.
    sampler: PixelSampler,

    /// Number of samples in horizontal direction.
    x_pixel_samples: usize,

    /// Number of samples in vertical direction.
    y_pixel_samples: usize,

    /// Indicates whether or not to jitter each sample's center point.
    /// Unjittered samples sit at the stratum centers.
    jitter_samples: bool,
}

impl StratifiedSampler {
    /// Create a new `StratifiedSampler`.
    ///
    /// * `x_pixel_samples`      - Number of samples in horizontal direction.
    /// * `y_pixel_samples`      - Number of samples in vertical direction.
    /// * `jitter_samples`       - Indicates whether or not to jitter each
    ///                            sample's center point.
    /// * `n_sampled_dimensions` - Number of dimensions for sampling.
    /// * `seed`                 - Optional seed for the random number generator.
    pub fn new(
        x_pixel_samples: usize,
        y_pixel_samples: usize,
        jitter_samples: bool,
        n_sampled_dimensions: usize,
        seed: Option<u64>,
    ) -> Self {
        debug!(
            "Creating {x_pixel_samples}x{y_pixel_samples} stratified sampler with \
             {n_sampled_dimensions} dimensions, jitter {jitter_samples}"
        );

        let samples_per_pixel = x_pixel_samples * y_pixel_samples;
        Self {
            sampler: PixelSampler::new(samples_per_pixel, n_sampled_dimensions, seed),
            x_pixel_samples,
            y_pixel_samples,
            jitter_samples,
        }
    }
}

impl Sampler for StratifiedSampler {
    /// Returns a shared reference underlying `SamplerData`.
    fn get_data(&self) -> &SamplerData {
        &self.sampler.data
    }

    /// Returns a mutable reference to underlying `SamplerData`.
    fn get_data_mut(&mut self) -> &mut SamplerData {
        &mut self.sampler.data
    }

    /// Generates a new instance of an initial `Sampler` for use by a rendering
    /// thread.
    ///
    /// * `seed` - The seed for the random number generator.
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler> {
        Box::new(Self::new(
            self.x_pixel_samples,
            self.y_pixel_samples,
            self.jitter_samples,
            self.sampler.n_sampled_dimensions(),
            Some(seed),
        ))
    }

    /// This should be called when the rendering algorithm is ready to start
    /// working on a given pixel. Regenerates every sample table.
    ///
    /// * `p` - The pixel.
    fn start_pixel(&mut self, p: &Point2i) {
        let samples_per_pixel = self.sampler.data.samples_per_pixel;

        // Generate single stratified samples for the pixel.
        for i in 0..self.sampler.samples_1d.len() {
            let mut samples = stratified_sample_1d(
                &mut self.sampler.rng,
                samples_per_pixel,
                self.jitter_samples,
            );
            self.sampler.rng.shuffle(&mut samples, samples_per_pixel, 1);
            self.sampler.samples_1d[i].copy_from_slice(&samples);
        }

        for i in 0..self.sampler.samples_2d.len() {
            let mut samples = stratified_sample_2d(
                &mut self.sampler.rng,
                self.x_pixel_samples,
                self.y_pixel_samples,
                self.jitter_samples,
            );
            self.sampler.rng.shuffle(&mut samples, samples_per_pixel, 1);
            self.sampler.samples_2d[i].copy_from_slice(&samples);
        }

        self.sampler.start_pixel(p);
    }

    /// Returns the sample value for the next dimension of the current sample
    /// vector.
    fn get_1d(&mut self) -> Float {
        self.sampler.get_1d()
    }

    /// Returns the sample value for the next two dimensions of the current
    /// sample vector.
    fn get_2d(&mut self) -> Point2f {
        self.sampler.get_2d()
    }

    /// Reset the current sample dimension counter. Returns `true` if
    /// `current_pixel_sample_index` < `samples_per_pixel`; otherwise `false`.
    fn start_next_sample(&mut self) -> bool {
        self.sampler.start_next_sample()
    }

    /// Set the index of the sample in the current pixel to generate next.
    /// Returns `true` if `current_pixel_sample_index` < `samples_per_pixel`;
    /// otherwise `false`.
    ///
    /// * `sample_num` - The sample number.
    fn set_sample_number(&mut self, sample_num: usize) -> bool {
        self.sampler.set_sample_number(sample_num)
    }
}
