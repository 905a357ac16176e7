use image::{DynamicImage, GrayImage, Rgb, RgbImage, SubImage};
use imageproc::point::Point;
use log::debug;

use crate::colors::split_channels;
use crate::contours::{AdmissionLimits, admit_all, find_outer_contours};
use crate::error::{DetectError, Result};
use crate::merge::merge_candidates;
use crate::params::DetectorParams;
use crate::preprocess::{CONTRAST_HIGH, CONTRAST_LOW, adaptive_threshold_inv, apply_lut, contrast_stretch_lut};
use crate::rect::Candidate;
use crate::render::{annotate, crop_all};

/// Output of one detection call.
///
/// `crops` borrow the source image, so it must outlive them; `annotated` is an
/// independent copy.
pub struct Detection<'a> {
    /// Source image with every note outlined.
    pub annotated: RgbImage,
    /// Merged notes in scan order.
    pub candidates: Vec<Candidate>,
    /// One view per entry of `candidates`, in the same order.
    pub crops: Vec<SubImage<&'a RgbImage>>,
}

impl Detection<'_> {
    /// Whether no note was found.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Finds sticky notes in `image` with the default parameters.
///
/// See [`detect_and_annotate_with`].
pub fn detect_and_annotate(image: &RgbImage) -> Result<Detection<'_>> {
    detect_and_annotate_with(image, &DetectorParams::default())
}

/// Finds sticky notes in `image`, outlines them on a copy and crops each one.
///
/// The green plane and both chrominance planes are thresholded separately and
/// their outer contours pooled. Contours whose bounding boxes are near-square
/// and sized between a fifth of the short image side and the full frame become
/// candidates, and candidates nested within one another are merged.
///
/// Finding nothing is not an error: the result then has no candidates, no
/// crops and an unmodified annotated copy.
///
/// # Errors
///
/// * [`DetectError::InvalidImage`] for an image with zero width or height.
/// * [`DetectError::InvalidParameter`] if `params` fails validation.
/// * [`DetectError::ProcessingFailure`] if an image operation cannot complete.
pub fn detect_and_annotate_with<'a>(image: &'a RgbImage, params: &DetectorParams) -> Result<Detection<'a>> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(DetectError::invalid_image(format!(
            "empty image ({width}x{height})"
        )));
    }
    params.validate()?;

    let contours = collect_contours(image, params)?;

    let limits = AdmissionLimits::for_image(
        width,
        height,
        params.min_side_divisor,
        params.edge_margin,
        params.max_aspect_ratio,
    );
    let candidates = admit_all(&contours, &limits);
    let candidates = merge_candidates(&candidates, params.merge_tolerance);

    let annotated = annotate(
        image,
        &candidates,
        Rgb(params.stroke_color),
        params.stroke_width,
    );
    let crops = crop_all(image, &candidates)?;
    debug!("detected {} notes in {width}x{height} image", candidates.len());

    Ok(Detection {
        annotated,
        candidates,
        crops,
    })
}

/// Thresholds every channel plane and concatenates their outer contours.
///
/// Contours are not deduplicated here; overlapping geometry from different
/// planes is resolved by the merge step.
pub(crate) fn collect_contours(image: &RgbImage, params: &DetectorParams) -> Result<Vec<Vec<Point<i32>>>> {
    let lut = params
        .enhance_contrast
        .then(|| contrast_stretch_lut(CONTRAST_LOW, CONTRAST_HIGH));

    let mut contours = Vec::new();
    for (name, mut plane) in split_channels(image)?.into_array() {
        if let Some(table) = &lut {
            apply_lut(&mut plane, table);
        }
        let found = channel_contours(&plane, params)?;
        debug!("{name} channel: {} outer contours", found.len());
        contours.extend(found);
    }
    Ok(contours)
}

fn channel_contours(plane: &GrayImage, params: &DetectorParams) -> Result<Vec<Vec<Point<i32>>>> {
    let binary = adaptive_threshold_inv(plane, params.block_size, params.threshold_offset)?;
    Ok(find_outer_contours(&binary))
}

/// Converts a decoded image into the 3-channel form the detector expects.
///
/// Colour images are converted to 8-bit RGB, dropping any alpha channel.
///
/// # Errors
///
/// Returns [`DetectError::InvalidImage`] for greyscale images (one or two
/// channels) and for images with zero width or height.
pub fn rgb_from_dynamic(image: &DynamicImage) -> Result<RgbImage> {
    let color = image.color();
    if !color.has_color() {
        return Err(DetectError::invalid_image(format!(
            "unsupported channel count {} ({color:?})",
            color.channel_count()
        )));
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(DetectError::invalid_image(format!(
            "empty image ({}x{})",
            image.width(),
            image.height()
        )));
    }
    Ok(image.to_rgb8())
}
