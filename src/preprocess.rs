//! Channel binarization ahead of contour extraction.

use image::GrayImage;
use imageproc::filter::gaussian_blur_f32;

use crate::error::{DetectError, Result};

/// Lower bound of the default contrast stretch.
pub const CONTRAST_LOW: u8 = 49;
/// Upper bound of the default contrast stretch.
pub const CONTRAST_HIGH: u8 = 205;

/// Gaussian sigma matching a `block_size` x `block_size` kernel.
///
/// This is the conventional derivation used when a kernel size is given
/// without an explicit sigma: `0.3 * ((block_size - 1) / 2 - 1) + 0.8`.
pub fn sigma_for_block(block_size: u32) -> f32 {
    0.3 * ((block_size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Binarizes `channel` against its Gaussian-weighted local mean, inverted.
///
/// A pixel becomes `0` when it is brighter than `mean - offset` and `255`
/// otherwise, so uniform regions stay background and the darker side of
/// every edge is marked.
///
/// # Errors
///
/// Returns [`DetectError::InvalidParameter`] if `block_size` is even or
/// smaller than 3.
pub fn adaptive_threshold_inv(channel: &GrayImage, block_size: u32, offset: i32) -> Result<GrayImage> {
    if block_size < 3 || block_size % 2 == 0 {
        return Err(DetectError::invalid_parameter("block_size", block_size));
    }

    let mean = gaussian_blur_f32(channel, sigma_for_block(block_size));

    let mut binary = GrayImage::new(channel.width(), channel.height());
    for ((src, local), out) in channel
        .pixels()
        .zip(mean.pixels())
        .zip(binary.pixels_mut())
    {
        let threshold = i32::from(local[0]) - offset;
        out[0] = if i32::from(src[0]) > threshold { 0 } else { 255 };
    }

    Ok(binary)
}

/// Builds a lookup table that stretches `[low, high]` onto the full byte range.
///
/// Values below `low` map to 0, values above `high` map to 255, and values in
/// between scale linearly with truncation.
pub fn contrast_stretch_lut(low: u8, high: u8) -> [u8; 256] {
    let mut table = [0u8; 256];
    if high <= low {
        for (value, entry) in table.iter_mut().enumerate() {
            *entry = if value > usize::from(low) { 255 } else { 0 };
        }
        return table;
    }

    let gain = 255.0 / (f64::from(high) - f64::from(low));
    for (value, entry) in table.iter_mut().enumerate() {
        let v = value as f64;
        *entry = if v < f64::from(low) {
            0
        } else if v > f64::from(high) {
            255
        } else {
            ((v - f64::from(low)) * gain) as u8
        };
    }
    table
}

/// Remaps every pixel of `channel` through `table` in place.
pub fn apply_lut(channel: &mut GrayImage, table: &[u8; 256]) {
    for pixel in channel.pixels_mut() {
        pixel[0] = table[usize::from(pixel[0])];
    }
}
