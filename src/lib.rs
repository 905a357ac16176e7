//! Sticky-note detection for photographs, built on [imageproc].
//!
//! [`detect_and_annotate`] thresholds the green plane and both chrominance
//! planes of an image, keeps near-square contours of plausible size, merges
//! detections of the same note across planes, and returns an outlined copy of
//! the image together with one cropped view per note.
//!
//! The building blocks are exposed in modules named after the [imageproc]
//! areas they extend.

mod colors;
pub mod contours;
mod detector;
pub mod error;
pub mod merge;
pub mod params;
pub mod preprocess;
pub mod rect;
pub mod render;

pub use detector::{Detection, detect_and_annotate, detect_and_annotate_with, rgb_from_dynamic};
pub use error::{DetectError, Result};
pub use params::DetectorParams;
pub use rect::{BoundingBox, Candidate};
