//! Sampler

mod common;
mod pixel_sampler;

use crate::camera::*;
use crate::filter::*;
use crate::geometry::*;
use crate::pbrt::*;

// Re-export
pub use common::*;
pub use pixel_sampler::*;

/// Sampler interface. A sampler hands out the coordinates of one sample
/// vector at a time; each call to `get_1d()` or `get_2d()` consumes the next
/// dimension(s) of the current vector.
pub trait Sampler: Send + Sync {
    /// Returns a shared reference underlying `SamplerData`.
    fn get_data(&self) -> &SamplerData;

    /// Returns a mutable reference to underlying `SamplerData`.
    fn get_data_mut(&mut self) -> &mut SamplerData;

    /// Generates a new instance of an initial `Sampler` for use by a rendering
    /// thread. Two clones made with the same seed produce identical streams.
    ///
    /// * `seed` - The seed for the random number generator.
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler>;

    /// This should be called when the rendering algorithm is ready to start
    /// working on a given pixel.
    ///
    /// * `p` - The pixel.
    fn start_pixel(&mut self, p: &Point2i) {
        self.get_data_mut().start_pixel(p);
    }

    /// Returns the sample value for the next dimension of the current sample
    /// vector.
    fn get_1d(&mut self) -> Float;

    /// Returns the sample value for the next two dimensions of the current
    /// sample vector.
    fn get_2d(&mut self) -> Point2f;

    /// Returns an initialized `CameraSample` for a given pixel. Consumes two
    /// 2-D dimensions: the film position (warped by `filter`) and the lens
    /// position.
    ///
    /// * `p_raster` - The pixel.
    /// * `filter`   - Reconstruction filter used to place the film sample.
    fn get_camera_sample(&mut self, p_raster: &Point2i, filter: &dyn Filter) -> CameraSample {
        let offset = filter.warp(&self.get_2d());
        let p_film = Point2f::from(*p_raster) + offset;
        let p_lens = self.get_2d();

        CameraSample::new(p_film, p_lens)
    }

    /// Advance to the next sample vector of the current pixel. Returns `true`
    /// if `current_pixel_sample_index` < `samples_per_pixel`; otherwise
    /// `false`.
    fn start_next_sample(&mut self) -> bool {
        self.get_data_mut().start_next_sample()
    }

    /// Set the index of the sample in the current pixel to generate next.
    /// Returns `true` if `current_pixel_sample_index` < `samples_per_pixel`;
    /// otherwise `false`.
    ///
    /// * `sample_num` - The sample number.
    fn set_sample_number(&mut self, sample_num: usize) -> bool {
        self.get_data_mut().set_sample_number(sample_num)
    }

    /// Returns the number of samples generated for each pixel.
    fn samples_per_pixel(&self) -> usize {
        self.get_data().samples_per_pixel
    }
}

// Implement `Sampler` so `Box<dyn Sampler>` can be passed around where
// `&mut dyn Sampler` is expected; `clone_sampler()` has to return heap
// allocated trait objects.
impl<S: Sampler + ?Sized> Sampler for Box<S> {
    #[inline]
    fn get_data(&self) -> &SamplerData {
        (**self).get_data()
    }

    #[inline]
    fn get_data_mut(&mut self) -> &mut SamplerData {
        (**self).get_data_mut()
    }

    #[inline]
    fn clone_sampler(&self, seed: u64) -> Box<dyn Sampler> {
        (**self).clone_sampler(seed)
    }

    #[inline]
    fn start_pixel(&mut self, p: &Point2i) {
        (**self).start_pixel(p);
    }

    #[inline]
    fn get_1d(&mut self) -> Float {
        (**self).get_1d()
    }

    #[inline]
    fn get_2d(&mut self) -> Point2f {
        (**self).get_2d()
    }

    #[inline]
    fn get_camera_sample(&mut self, p_raster: &Point2i, filter: &dyn Filter) -> CameraSample {
        (**self).get_camera_sample(p_raster, filter)
    }

    #[inline]
    fn start_next_sample(&mut self) -> bool {
        (**self).start_next_sample()
    }

    #[inline]
    fn set_sample_number(&mut self, sample_num: usize) -> bool {
        (**self).set_sample_number(sample_num)
    }
}
