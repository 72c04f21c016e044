//! Image I/O

use crate::geometry::*;
use crate::pbrt::*;
use exr::prelude::*;
use image::codecs::pnm::{PnmEncoder, PnmSubtype, SampleEncoding};
use image::{ColorType, ImageBuffer, ImageFormat, Rgb};
use regex::Regex;
use std::fs::File;
use std::io::BufWriter;
use std::result::Result;
use std::sync::OnceLock;

/// Write the output image to given path.
///
/// * `path`       - Output file path.
/// * `rgb`        - Floating point RGB pixel data in scanline order.
/// * `resolution` - The image resolution.
pub fn write_image(path: &str, rgb: &[Float], resolution: &Point2i) -> Result<(), String> {
    let res_x = resolution.x as u32;
    let res_y = resolution.y as u32;
    if rgb.len() != 3 * (res_x * res_y) as usize {
        return Err(format!(
            "Expected {} RGB values for a {res_x}x{res_y} image but got {}",
            3 * res_x * res_y,
            rgb.len()
        ));
    }

    match get_extension_from_filename(path) {
        Some(".exr") => write_exr(path, rgb, res_x, res_y),
        Some(".tga") => write_8_bit(path, rgb, res_x, res_y, ImageFormat::Tga),
        Some(".png") => write_8_bit(path, rgb, res_x, res_y, ImageFormat::Png),
        Some(".ppm") => write_ppm(path, rgb, res_x, res_y),
        Some(extension) => Err(format!("Extension {extension} is not supported")),
        None => Err(format!("Can't determine file type from suffix of filename {path}")),
    }
}

/// Returns regular expression for extracting the file extension. This will
/// match the last occurrence of a period followed by no periods or slashes.
fn regex_file_ext() -> &'static Regex {
    static DATA: OnceLock<Regex> = OnceLock::new();
    DATA.get_or_init(|| Regex::new(r"(\.[^./\\]+)$").expect("file extension pattern is valid"))
}

/// Retrieve the extension from a file path.
///
/// * `path` - The file path.
fn get_extension_from_filename(path: &str) -> Option<&str> {
    regex_file_ext()
        .captures(path)
        .map(|c| c.get(1).map_or("", |m| m.as_str()))
}

/// Writes the image in OpenEXR format.
///
/// * `path`        - Output file path.
/// * `rgb`         - Floating point RGB pixel data.
/// * `res_x`       - X resolution.
/// * `res_y`       - Y resolution.
fn write_exr(path: &str, rgb: &[Float], res_x: u32, res_y: u32) -> Result<(), String> {
    info!("Writing image {path} with resolution {res_x}x{res_y}");

    let size = Vec2(res_x as usize, res_y as usize);

    let layer = Layer::new(
        size,
        LayerAttributes::named("render"),
        Encoding::SMALL_LOSSLESS,
        SpecificChannels::rgb(|pos: Vec2<usize>| {
            let offset = 3 * (pos.1 * (res_x as usize) + pos.0);
            (rgb[offset], rgb[offset + 1], rgb[offset + 2])
        }),
    );

    let attributes = ImageAttributes::new(IntegerBounds::from_dimensions(size));
    match Image::empty(attributes).with_layer(layer).write().to_file(path) {
        Ok(()) => Ok(()),
        Err(err) => Err(format!("Error saving output image {path}: {err}")),
    }
}

/// Returns the gamma corrected 8-bit image buffer for the pixel data.
///
/// * `rgb`   - Floating point RGB pixel data.
/// * `res_x` - X resolution.
/// * `res_y` - Y resolution.
fn to_8_bit(rgb: &[Float], res_x: u32, res_y: u32) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    ImageBuffer::from_fn(res_x, res_y, |x, y| {
        let offset = 3 * (y * res_x + x) as usize;
        Rgb(apply_gamma(&[rgb[offset], rgb[offset + 1], rgb[offset + 2]]))
    })
}

/// Writes the image in an 8-bit image format.
///
/// * `path`         - Output file path.
/// * `rgb`          - Floating point RGB pixel data.
/// * `res_x`        - X resolution.
/// * `res_y`        - Y resolution.
/// * `image_format` - Image format.
fn write_8_bit(
    path: &str,
    rgb: &[Float],
    res_x: u32,
    res_y: u32,
    image_format: ImageFormat,
) -> Result<(), String> {
    info!("Writing image {path} with resolution {res_x}x{res_y}");

    let imgbuf = to_8_bit(rgb, res_x, res_y);
    match imgbuf.save_with_format(path, image_format) {
        Ok(()) => Ok(()),
        Err(err) => Err(format!("Error saving output image {path}: {err}.")),
    }
}

/// Writes the image as a plain text (P3) portable pixmap.
///
/// * `path`  - Output file path.
/// * `rgb`   - Floating point RGB pixel data.
/// * `res_x` - X resolution.
/// * `res_y` - Y resolution.
fn write_ppm(path: &str, rgb: &[Float], res_x: u32, res_y: u32) -> Result<(), String> {
    info!("Writing image {path} with resolution {res_x}x{res_y}");

    let imgbuf = to_8_bit(rgb, res_x, res_y);
    let file = File::create(path).map_err(|e| format!("Error creating output image {path}: {e}"))?;
    PnmEncoder::new(BufWriter::new(file))
        .with_subtype(PnmSubtype::Pixmap(SampleEncoding::Ascii))
        .encode(imgbuf.as_raw().as_slice(), res_x, res_y, ColorType::Rgb8)
        .map_err(|e| format!("Error saving output image {path}: {e}"))
}

/// Apply gamma correction to a RGB floating point pixel and return the clamped 8-bit values.
///
/// * `rgb` - RGB floating point pixel value.
#[inline]
fn apply_gamma(rgb: &[Float; 3]) -> [u8; 3] {
    [clamp_byte(rgb[0]), clamp_byte(rgb[1]), clamp_byte(rgb[2])]
}

/// Clamp floating point value to 8-bit range [0, 255].
///
/// * `v` - Value to clamp.
#[inline]
fn clamp_byte(v: Float) -> u8 {
    clamp(255.0 * gamma_correct(v) + 0.5, 0.0, 255.0) as u8
}
