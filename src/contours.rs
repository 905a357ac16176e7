use image::GrayImage;
use imageproc::{
    contours::{BorderType, Contour, find_contours},
    point::Point,
};
use log::{debug, trace};

use crate::rect::{Candidate, bounding_box};

/// Geometric admission thresholds for raw contours, derived from the image size.
///
/// A contour's bounding box is admitted when both sides lie strictly between
/// `min_side` and the frame limits and its aspect ratio does not exceed
/// `max_aspect_ratio`. The frame limits keep out boxes that span (almost) the
/// whole image, which are the photo border rather than a note.
///
/// Build one with [`AdmissionLimits::for_image`] and reuse it for every
/// contour of that image.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AdmissionLimits {
    /// A box side must be strictly longer than this.
    pub min_side: i32,
    /// A box width must be strictly shorter than this.
    pub max_width: i32,
    /// A box height must be strictly shorter than this.
    pub max_height: i32,
    /// Largest accepted longer-side / shorter-side ratio.
    pub max_aspect_ratio: f64,
}

impl AdmissionLimits {
    /// Limits for a `width` x `height` image.
    ///
    /// `min_side` is `min(width, height) / min_side_divisor` rounded down and
    /// the upper bounds keep `edge_margin` pixels clear of the full extent.
    pub fn for_image(
        width: u32,
        height: u32,
        min_side_divisor: u32,
        edge_margin: i32,
        max_aspect_ratio: f64,
    ) -> Self {
        let min_side = (width.min(height) / min_side_divisor.max(1)) as i32;
        Self {
            min_side,
            max_width: width as i32 - edge_margin,
            max_height: height as i32 - edge_margin,
            max_aspect_ratio,
        }
    }
}

/// Extracts the outermost boundaries of the foreground (non-zero) regions of `binary`.
///
/// Holes and regions nested inside holes are dropped. Each chain is reduced to
/// the end points of its straight runs.
pub fn find_outer_contours(binary: &GrayImage) -> Vec<Vec<Point<i32>>> {
    let contours: Vec<Contour<i32>> = find_contours(binary);

    contours
        .into_iter()
        .filter(|c| c.border_type == BorderType::Outer && c.parent.is_none())
        .map(|c| compress_chain(c.points))
        .collect()
}

/// Collapses runs of points moving in the same unit direction to their end points.
///
/// Chains of fewer than three points are returned unchanged.
pub fn compress_chain(points: Vec<Point<i32>>) -> Vec<Point<i32>> {
    if points.len() < 3 {
        return points;
    }

    let step = |a: Point<i32>, b: Point<i32>| ((b.x - a.x).signum(), (b.y - a.y).signum());

    let mut compressed = Vec::with_capacity(points.len());
    compressed.push(points[0]);
    for window in points.windows(3) {
        if step(window[0], window[1]) != step(window[1], window[2]) {
            compressed.push(window[1]);
        }
    }
    if let Some(&last) = points.last() {
        compressed.push(last);
    }
    compressed
}

/// Converts a raw contour into a [`Candidate`] if its bounding box looks like a note.
///
/// Rejects chains of fewer than two points, boxes whose width or height is not
/// strictly between `min_side` and the frame limit, and boxes whose aspect
/// ratio exceeds `max_aspect_ratio`.
///
/// # Arguments
///
/// * `contour` - A raw point chain from [`find_outer_contours`].
/// * `limits` - Thresholds for the image the chain came from.
///
/// # Returns
///
/// The note candidate built from the chain's bounding box, or `None` if the
/// chain is rejected. The function is pure.
///
/// # Examples
///
/// ```
/// use imageproc::point::Point;
/// use sticky_notes::contours::{admit, AdmissionLimits};
///
/// let limits = AdmissionLimits::for_image(1000, 1000, 5, 2, 1.1);
/// let square = [Point::new(100, 100), Point::new(400, 100), Point::new(400, 400), Point::new(100, 400)];
/// let stripe = [Point::new(100, 100), Point::new(400, 100), Point::new(400, 150), Point::new(100, 150)];
///
/// assert!(admit(&square, &limits).is_some());
/// assert!(admit(&stripe, &limits).is_none());
/// ```
pub fn admit(contour: &[Point<i32>], limits: &AdmissionLimits) -> Option<Candidate> {
    let bbox = bounding_box(contour)?;
    let (width, height) = (bbox.width(), bbox.height());

    if width <= limits.min_side
        || width >= limits.max_width
        || height <= limits.min_side
        || height >= limits.max_height
    {
        trace!("rejecting {width}x{height} box: size outside limits");
        return None;
    }

    let aspect_ratio = bbox.aspect_ratio();
    if aspect_ratio > limits.max_aspect_ratio {
        trace!("rejecting {width}x{height} box: aspect ratio {aspect_ratio:.3}");
        return None;
    }

    Some(Candidate::from_box(bbox))
}

/// Runs [`admit`] over every contour, keeping survivors in input order.
pub fn admit_all(contours: &[Vec<Point<i32>>], limits: &AdmissionLimits) -> Vec<Candidate> {
    let candidates: Vec<Candidate> = contours
        .iter()
        .filter_map(|contour| admit(contour, limits))
        .collect();
    debug!(
        "{} of {} contours admitted as candidates",
        candidates.len(),
        contours.len()
    );
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    fn square(min: i32, max: i32) -> Vec<Point<i32>> {
        vec![
            Point::new(min, min),
            Point::new(max, min),
            Point::new(max, max),
            Point::new(min, max),
        ]
    }

    fn limits_1000() -> AdmissionLimits {
        AdmissionLimits::for_image(1000, 1000, 5, 2, 1.1)
    }

    #[test]
    fn limits_follow_image_size() {
        let limits = AdmissionLimits::for_image(640, 480, 5, 2, 1.1);
        assert_eq!(limits.min_side, 96);
        assert_eq!(limits.max_width, 638);
        assert_eq!(limits.max_height, 478);

        // 999 / 5 rounds down.
        assert_eq!(AdmissionLimits::for_image(999, 1200, 5, 2, 1.1).min_side, 199);
    }

    #[test]
    fn admits_near_square_boxes() {
        let candidate = admit(&square(100, 400), &limits_1000()).unwrap();
        assert_eq!(candidate.corners(), &[
            Point::new(100, 100),
            Point::new(400, 100),
            Point::new(400, 400),
            Point::new(100, 400),
        ]);

        // 300 x 330 is exactly 1.1.
        let tall = [Point::new(0, 0), Point::new(300, 330)];
        assert!(admit(&tall, &limits_1000()).is_some());
        let taller = [Point::new(0, 0), Point::new(300, 331)];
        assert!(admit(&taller, &limits_1000()).is_none());
    }

    #[test]
    fn rejects_small_and_frame_sized_boxes() {
        let limits = limits_1000();
        // Side equal to min_side is too small.
        assert!(admit(&square(0, 200), &limits).is_none());
        assert!(admit(&square(0, 201), &limits).is_some());
        // Within the edge margin of the full frame.
        assert!(admit(&square(0, 998), &limits).is_none());
        assert!(admit(&square(1, 998), &limits).is_some());
    }

    #[test]
    fn degenerate_contours_never_become_candidates() {
        let limits = limits_1000();
        assert!(admit(&[], &limits).is_none());
        assert!(admit(&[Point::new(500, 500)], &limits).is_none());
        assert!(admit_all(&[vec![], vec![Point::new(1, 1)]], &limits).is_empty());
    }

    #[test]
    fn admitted_boxes_satisfy_all_limits() {
        let limits = limits_1000();
        let mut contours = Vec::new();
        for min in (0..500).step_by(37) {
            for side in (150..1000).step_by(41) {
                contours.push(vec![Point::new(min, min), Point::new(min + side, min + side * 21 / 20)]);
                contours.push(vec![Point::new(min, min), Point::new(min + side / 2, min + side)]);
            }
        }

        let candidates = admit_all(&contours, &limits);
        assert!(!candidates.is_empty());
        for candidate in candidates {
            let bbox = candidate.bounding_box();
            assert!(bbox.width() > limits.min_side && bbox.width() < limits.max_width);
            assert!(bbox.height() > limits.min_side && bbox.height() < limits.max_height);
            assert!(bbox.aspect_ratio() <= 1.1);
        }
    }

    #[test]
    fn compress_chain_keeps_corners_only() {
        let mut chain = Vec::new();
        for x in 0..5 {
            chain.push(Point::new(x, 0));
        }
        for y in 1..5 {
            chain.push(Point::new(4, y));
        }
        let compressed = compress_chain(chain);
        assert_eq!(compressed, vec![Point::new(0, 0), Point::new(4, 0), Point::new(4, 4)]);

        let short = vec![Point::new(1, 1), Point::new(2, 2)];
        assert_eq!(compress_chain(short.clone()), short);
    }

    #[test]
    fn finds_only_outermost_boundaries() {
        // A filled ring with a filled island inside its hole.
        let image = GrayImage::from_fn(40, 40, |x, y| {
            let ring = (5..35).contains(&x) && (5..35).contains(&y)
                && !((10..30).contains(&x) && (10..30).contains(&y));
            let island = (15..25).contains(&x) && (15..25).contains(&y);
            if ring || island { Luma([255]) } else { Luma([0]) }
        });

        let contours = find_outer_contours(&image);
        assert_eq!(contours.len(), 1);
        let bbox = bounding_box(&contours[0]).unwrap();
        assert_eq!((bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y), (5, 5, 34, 34));
        assert!(contours[0].len() <= 8);
    }

    #[test]
    fn empty_mask_has_no_contours() {
        assert!(find_outer_contours(&GrayImage::new(16, 16)).is_empty());
    }
}
