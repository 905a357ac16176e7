use image::{GenericImageView, Rgb, RgbImage, SubImage};
use imageproc::drawing::draw_line_segment_mut;

use crate::error::{DetectError, Result};
use crate::rect::Candidate;

/// Draws each candidate outline onto a copy of `image`.
///
/// Outlines are `stroke_width` pixels thick, centred on the candidate edges.
/// The source image is left untouched.
pub fn annotate(image: &RgbImage, candidates: &[Candidate], color: Rgb<u8>, stroke_width: u32) -> RgbImage {
    let mut canvas = image.clone();
    let stroke_width = stroke_width.max(1) as i32;
    let lo = -(stroke_width - 1) / 2;
    let hi = lo + stroke_width;

    for candidate in candidates {
        let bbox = candidate.bounding_box();
        for inset in lo..hi {
            let (x0, y0) = ((bbox.min_x + inset) as f32, (bbox.min_y + inset) as f32);
            let (x1, y1) = ((bbox.max_x - inset) as f32, (bbox.max_y - inset) as f32);
            let outline = [(x0, y0), (x1, y0), (x1, y1), (x0, y1)];
            for (i, &start) in outline.iter().enumerate() {
                let end = outline[(i + 1) % outline.len()];
                draw_line_segment_mut(&mut canvas, start, end, color);
            }
        }
    }

    canvas
}

/// Returns a view of `image` spanning the candidate from its top-left to its bottom-right corner.
///
/// The view is `(max_x - min_x) x (max_y - min_y)` pixels and shares storage
/// with `image`.
///
/// # Errors
///
/// Returns [`DetectError::ProcessingFailure`] if the region does not fit inside `image`.
pub fn crop<'a>(image: &'a RgbImage, candidate: &Candidate) -> Result<SubImage<&'a RgbImage>> {
    let bbox = candidate.bounding_box();
    let (width, height) = image.dimensions();

    let fits = bbox.min_x >= 0
        && bbox.min_y >= 0
        && (bbox.max_x as u32) <= width
        && (bbox.max_y as u32) <= height;
    if !fits {
        return Err(DetectError::processing(format!(
            "crop of ({}, {})-({}, {}) from {width}x{height} image",
            bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y
        )));
    }

    Ok(image.view(
        bbox.min_x as u32,
        bbox.min_y as u32,
        bbox.width() as u32,
        bbox.height() as u32,
    ))
}

/// Crops every candidate, preserving order.
pub fn crop_all<'a>(image: &'a RgbImage, candidates: &[Candidate]) -> Result<Vec<SubImage<&'a RgbImage>>> {
    candidates.iter().map(|c| crop(image, c)).collect()
}
