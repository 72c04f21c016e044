//! Film tile

use super::Pixel;
use crate::geometry::*;
use crate::pbrt::*;
use crate::spectrum::*;

/// Stores contributions for the pixels in a region of the image.
pub struct FilmTile {
    /// Bounds of the pixels in the final image.
    pub pixel_bounds: Bounds2i,

    /// Contributions of all pixels in the tile.
    pixels: Vec<Pixel>,

    /// Maximum sample value.
    max_sample_value: Float,
}

impl FilmTile {
    /// Create a new `FilmTile` instance.
    ///
    /// * `pixel_bounds`     - Bounds of the pixels in the final image.
    /// * `max_sample_value` - Samples are clamped to `[0, max_sample_value]`.
    pub fn new(pixel_bounds: Bounds2i, max_sample_value: Float) -> Self {
        Self {
            pixel_bounds,
            pixels: vec![Pixel::default(); max(0, pixel_bounds.area()) as usize],
            max_sample_value,
        }
    }

    /// Add the radiance carried by a camera ray to the pixel it was
    /// generated for.
    ///
    /// * `p` - The pixel in image coordinates.
    /// * `l` - Radiance value `L`.
    pub fn add_sample(&mut self, p: &Point2i, l: Spectrum) {
        let max_sample_value = self.max_sample_value;
        let pixel = self.get_pixel_mut(p);
        pixel.contrib_sum += l.clamp(0.0, max_sample_value);
        pixel.n_samples += 1.0;
    }

    /// Returns the offset of a pixel into `pixels`.
    ///
    /// * `p` - The pixel in image coordinates.
    fn offset(&self, p: &Point2i) -> usize {
        assert!(
            self.pixel_bounds.contains_exclusive(p),
            "pixel {p} is outside film tile"
        );
        let width = self.pixel_bounds.p_max.x - self.pixel_bounds.p_min.x;
        ((p.y - self.pixel_bounds.p_min.y) * width + (p.x - self.pixel_bounds.p_min.x)) as usize
    }

    /// Returns a reference to a pixel.
    ///
    /// * `p` - The pixel in image coordinates.
    pub fn get_pixel(&self, p: &Point2i) -> &Pixel {
        &self.pixels[self.offset(p)]
    }

    /// Returns a mutable reference to a pixel.
    ///
    /// * `p` - The pixel in image coordinates.
    pub fn get_pixel_mut(&mut self, p: &Point2i) -> &mut Pixel {
        let offset = self.offset(p);
        &mut self.pixels[offset]
    }
}
