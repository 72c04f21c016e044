//! Film

mod film_tile;

use crate::geometry::*;
use crate::image_io::*;
use crate::pbrt::*;
use crate::spectrum::*;
use std::sync::Mutex;

// Re-export
pub use film_tile::*;

/// Accumulated contributions of a pixel.
#[derive(Copy, Clone, Debug, Default)]
pub struct Pixel {
    /// Sum of the radiance samples.
    pub contrib_sum: Spectrum,

    /// Number of samples added.
    pub n_samples: Float,
}

impl Pixel {
    /// Returns the mean radiance of the pixel; black if it has no samples.
    pub fn mean(&self) -> Spectrum {
        if self.n_samples > 0.0 {
            self.contrib_sum / self.n_samples
        } else {
            Spectrum::zero()
        }
    }
}

/// Film models the sensing device in the camera. Worker threads render into
/// their own `FilmTile` and merge it here when done.
pub struct Film {
    /// The image resolution in pixels.
    pub full_resolution: Point2i,

    /// Samples are clamped to `[0, max_sample_value]` before being added.
    pub max_sample_value: Float,

    /// The pixels.
    pixels: Mutex<Vec<Pixel>>,
}

impl Film {
    /// Create a new `Film` instance.
    ///
    /// * `resolution`       - The image resolution in pixels.
    /// * `max_sample_value` - Optional maximum sample value. Defaults to
    ///                        `INFINITY`.
    pub fn new(resolution: Point2i, max_sample_value: Option<Float>) -> Self {
        assert!(resolution.x > 0 && resolution.y > 0, "invalid film resolution {resolution}");
        let n_pixels = (resolution.x * resolution.y) as usize;
        Self {
            full_resolution: resolution,
            max_sample_value: max_sample_value.unwrap_or(INFINITY),
            pixels: Mutex::new(vec![Pixel::default(); n_pixels]),
        }
    }

    /// Returns the bounds of all pixels in the image.
    pub fn pixel_bounds(&self) -> Bounds2i {
        Bounds2i::new(Point2i::zero(), self.full_resolution)
    }

    /// Returns a `FilmTile` that stores contributions for the pixels in a
    /// region of the image.
    ///
    /// * `tile_bounds` - Bounds of the tile. Clipped against the image.
    pub fn get_film_tile(&self, tile_bounds: &Bounds2i) -> FilmTile {
        FilmTile::new(tile_bounds.intersect(&self.pixel_bounds()), self.max_sample_value)
    }

    /// Merge the pixels of a finished `FilmTile` into the image.
    ///
    /// * `tile` - The tile.
    pub fn merge_film_tile(&self, tile: &FilmTile) {
        debug!("Merging film tile {:?}", tile.pixel_bounds);

        let width = self.full_resolution.x;
        let mut pixels = self.pixels.lock().unwrap_or_else(|e| e.into_inner());
        for p in tile.pixel_bounds {
            let tile_pixel = tile.get_pixel(&p);
            let pixel = &mut pixels[(p.y * width + p.x) as usize];
            pixel.contrib_sum += tile_pixel.contrib_sum;
            pixel.n_samples += tile_pixel.n_samples;
        }
    }

    /// Returns the mean radiance of every pixel in scanline order.
    pub fn pixel_values(&self) -> Vec<Spectrum> {
        let pixels = self.pixels.lock().unwrap_or_else(|e| e.into_inner());
        pixels.iter().map(Pixel::mean).collect()
    }

    /// Write the image to a file. The file format is chosen by the file
    /// extension.
    ///
    /// * `path` - Output file path.
    pub fn write_image(&self, path: &str) -> Result<(), String> {
        let rgb: Vec<Float> = self
            .pixel_values()
            .iter()
            .flat_map(|l| l.to_rgb())
            .collect();

        info!("Writing image {path}");
        write_image(path, &rgb, &self.full_resolution)
    }
}
