//! Common

use super::*;

/// Stores the sampler data and implements common functionality for all samplers.
#[derive(Clone, Debug, Default)]
pub struct SamplerData {
    /// Number of samples generated for each pixel.
    pub samples_per_pixel: usize,

    /// Coordinates of current pixel being generated.
    pub current_pixel: Point2i,

    /// Sample number of the pixel currently being generated.
    pub current_pixel_sample_index: usize,
}

impl SamplerData {
    /// Create a new `SamplerData` instance.
    ///
    /// * `samples_per_pixel` - Number of samples to generate for each pixel.
    pub fn new(samples_per_pixel: usize) -> Self {
        assert!(samples_per_pixel > 0, "samples per pixel must be positive");
        Self {
            samples_per_pixel,
            current_pixel: Point2i::default(),
            current_pixel_sample_index: 0,
        }
    }

    /// This should be called when the rendering algorithm is ready to start
    /// working on a given pixel.
    ///
    /// * `p` - The pixel.
    pub fn start_pixel(&mut self, p: &Point2i) {
        self.current_pixel = *p;
        self.current_pixel_sample_index = 0;
    }

    /// Advance to the next sample of the current pixel. Returns `true` if
    /// `current_pixel_sample_index` < `samples_per_pixel`; otherwise `false`.
    pub fn start_next_sample(&mut self) -> bool {
        self.current_pixel_sample_index += 1;
        self.current_pixel_sample_index < self.samples_per_pixel
    }

    /// Set the index of the sample in the current pixel to generate next.
    /// Returns `true` if `current_pixel_sample_index` < `samples_per_pixel`;
    /// otherwise `false`.
    ///
    /// * `sample_num` - The sample number.
    pub fn set_sample_number(&mut self, sample_num: usize) -> bool {
        self.current_pixel_sample_index = sample_num;
        self.current_pixel_sample_index < self.samples_per_pixel
    }

    /// Panics if every sample of the current pixel has been consumed.
    #[inline]
    pub fn check_sample_budget(&self) {
        assert!(
            self.current_pixel_sample_index < self.samples_per_pixel,
            "sample {} requested for pixel {} which only has {} samples",
            self.current_pixel_sample_index,
            self.current_pixel,
            self.samples_per_pixel
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_next_sample_reports_exhaustion() {
        let mut data = SamplerData::new(3);
        data.start_pixel(&Point2i::new(4, 5));
        assert!(data.start_next_sample());
        assert!(data.start_next_sample());
        assert!(!data.start_next_sample());

        data.start_pixel(&Point2i::new(5, 5));
        assert_eq!(data.current_pixel_sample_index, 0);
        assert!(data.set_sample_number(2));
        assert!(!data.set_sample_number(3));
    }

    #[test]
    #[should_panic]
    fn exhausted_budget_panics() {
        let mut data = SamplerData::new(1);
        data.start_pixel(&Point2i::zero());
        data.start_next_sample();
        data.check_sample_budget();
    }
}
