//! Page preprocessing before the image is handed to the OCR engine.
//!
//! Photographs of book pages tend to be low-contrast and slightly blurry; the
//! pipeline here converts to grayscale, boosts contrast and sharpness by a fixed
//! factor and can binarize the result.

use std::path::Path;

use anyhow::{Context, Result};
use image::{imageops, GrayImage, Luma};
use imageproc::{
    contrast::{threshold_mut, ThresholdType},
    map::{map_colors, map_colors2},
};

pub const CONTRAST_FACTOR: f32 = 2.0;
pub const SHARPNESS_FACTOR: f32 = 2.0;
/// Pixels strictly brighter than this become white when binarizing.
pub const THRESHOLD: u8 = 128;

/// 3x3 smoothing kernel, normalised by its sum.
const SMOOTH_KERNEL: [f32; 9] = [1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 1.0];

/// Open the image at `path` and run the full preprocessing pipeline on it.
pub fn load_page(path: &Path, binarize_page: bool) -> Result<GrayImage> {
    let image = image::ImageReader::open(path)
        .with_context(|| format!("Could not open image `{}`", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Could not read image `{}`", path.display()))?
        .decode()
        .with_context(|| format!("Could not decode image `{}`", path.display()))?;

    let image = image.to_luma8();
    let image = enhance_contrast(&image, CONTRAST_FACTOR);
    let mut image = enhance_sharpness(&image, SHARPNESS_FACTOR);

    if binarize_page {
        binarize(&mut image, THRESHOLD);
    }

    Ok(image)
}

/// Push every pixel away from the mean gray level of the image by `factor`.
///
/// A factor of `1.0` leaves the image unchanged, `0.0` yields a flat gray image.
pub fn enhance_contrast(image: &GrayImage, factor: f32) -> GrayImage {
    let pixel_count = u64::from(image.width()) * u64::from(image.height());
    if pixel_count == 0 {
        return image.clone();
    }

    let sum: u64 = image.pixels().map(|p| u64::from(p.0[0])).sum();
    let mean = (sum as f64 / pixel_count as f64 + 0.5).floor() as f32;

    map_colors(image, |Luma([p])| Luma([blend(mean, f32::from(p), factor)]))
}

/// Push every pixel away from a smoothed copy of the image by `factor`.
///
/// Border pixels have no full neighbourhood and are left as they are.
pub fn enhance_sharpness(image: &GrayImage, factor: f32) -> GrayImage {
    let smooth = smooth(image);

    map_colors2(image, &smooth, |Luma([p]), Luma([s])| {
        Luma([blend(f32::from(s), f32::from(p), factor)])
    })
}

/// Turn the image into pure black and white, in place.
pub fn binarize(image: &mut GrayImage, threshold: u8) {
    threshold_mut(image, threshold, ThresholdType::Binary);
}

fn smooth(image: &GrayImage) -> GrayImage {
    let (width, height) = image.dimensions();
    if width < 3 || height < 3 {
        return image.clone();
    }

    let mut out = imageops::filter3x3(image, &SMOOTH_KERNEL);

    // filter3x3 leaves the outermost ring black
    for (x, y, pixel) in image.enumerate_pixels() {
        if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
            out.put_pixel(x, y, *pixel);
        }
    }

    out
}

/// `base + factor * (value - base)`, rounded and clamped to a valid pixel.
fn blend(base: f32, value: f32, factor: f32) -> u8 {
    (base + factor * (value - base)).round().clamp(0.0, 255.0) as u8
}
