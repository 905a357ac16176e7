use serde::{Deserialize, Serialize};

use crate::error::{DetectError, Result};

/// Tuning knobs for the note detector.
///
/// The defaults reproduce the reference behaviour; every field may be omitted
/// when deserializing and falls back to its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParams {
    /// Side of the square neighbourhood used for the local Gaussian mean. Odd, at least 3.
    pub block_size: u32,
    /// Constant subtracted from the local mean before comparing.
    pub threshold_offset: i32,
    /// A box side must exceed `min(width, height) / min_side_divisor`.
    pub min_side_divisor: u32,
    /// Boxes reaching within this many pixels of the full image extent are treated as the frame.
    pub edge_margin: i32,
    /// Largest accepted ratio of the longer box side to the shorter one.
    pub max_aspect_ratio: f64,
    /// Relative expansion of a representative box when testing containment.
    pub merge_tolerance: f64,
    /// Outline thickness in pixels.
    pub stroke_width: u32,
    /// Outline colour as RGB.
    pub stroke_color: [u8; 3],
    /// Stretch the contrast of each channel before thresholding.
    pub enhance_contrast: bool,
}

impl Default for DetectorParams {
    fn default() -> Self {
        Self {
            block_size: 51,
            threshold_offset: 1,
            min_side_divisor: 5,
            edge_margin: 2,
            max_aspect_ratio: 1.1,
            merge_tolerance: 0.2,
            stroke_width: 3,
            stroke_color: [255, 0, 0],
            enhance_contrast: false,
        }
    }
}

impl DetectorParams {
    /// Checks every field against its accepted range.
    pub fn validate(&self) -> Result<()> {
        if self.block_size < 3 || self.block_size % 2 == 0 {
            return Err(DetectError::invalid_parameter(
                "block_size",
                self.block_size,
            ));
        }
        if self.min_side_divisor == 0 {
            return Err(DetectError::invalid_parameter(
                "min_side_divisor",
                self.min_side_divisor,
            ));
        }
        if self.edge_margin < 0 {
            return Err(DetectError::invalid_parameter(
                "edge_margin",
                self.edge_margin,
            ));
        }
        if !self.max_aspect_ratio.is_finite() || self.max_aspect_ratio < 1.0 {
            return Err(DetectError::invalid_parameter(
                "max_aspect_ratio",
                self.max_aspect_ratio,
            ));
        }
        if !(0.0..1.0).contains(&self.merge_tolerance) {
            return Err(DetectError::invalid_parameter(
                "merge_tolerance",
                self.merge_tolerance,
            ));
        }
        if self.stroke_width == 0 {
            return Err(DetectError::invalid_parameter(
                "stroke_width",
                self.stroke_width,
            ));
        }
        Ok(())
    }
}
