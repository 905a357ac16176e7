//! Collapsing duplicate detections that come from different channels.

use log::debug;

use crate::rect::{BoundingBox, Candidate};

/// Grows `bbox` by `tolerance` relative to its own coordinates.
///
/// The minimum corner is scaled by `1 - tolerance` and the maximum corner by
/// `1 + tolerance`, each truncated toward zero. Truncation (not rounding) is
/// part of the merge contract: it decides the outcome of boundary cases.
pub fn expand(bbox: &BoundingBox, tolerance: f64) -> BoundingBox {
    let shrink = 1.0 - tolerance;
    let grow = 1.0 + tolerance;
    BoundingBox {
        min_x: (f64::from(bbox.min_x) * shrink) as i32,
        min_y: (f64::from(bbox.min_y) * shrink) as i32,
        max_x: (f64::from(bbox.max_x) * grow) as i32,
        max_y: (f64::from(bbox.max_y) * grow) as i32,
    }
}

/// Merges candidates that lie (nearly) inside one another.
///
/// Candidates are visited in input order. Each one not yet absorbed becomes a
/// representative and is compared against every candidate in the list:
///
/// * a candidate inside the representative's expanded box is absorbed;
/// * a candidate strictly enclosing the expanded box replaces the
///   representative and is absorbed;
/// * anything else is left alone.
///
/// The representative's final box is emitted once per group. Which box
/// survives depends on scan order rather than on size, so the same input
/// order always yields the same output.
///
/// # Arguments
///
/// * `candidates` - Survivors of admission from every channel, in scan order.
/// * `tolerance` - Relative expansion passed to [`expand`]; `0.2` by default.
///
/// # Returns
///
/// One candidate per group, ordered by the first candidate that opened the group.
///
/// # Examples
///
/// ```
/// use imageproc::point::Point;
/// use sticky_notes::merge::merge_candidates;
/// use sticky_notes::rect::{BoundingBox, Candidate};
///
/// let a = Candidate::from_box(BoundingBox::from_corners(Point::new(100, 100), Point::new(400, 400)));
/// let b = Candidate::from_box(BoundingBox::from_corners(Point::new(110, 110), Point::new(390, 390)));
///
/// assert_eq!(merge_candidates(&[a, b], 0.2), vec![a]);
/// ```
pub fn merge_candidates(candidates: &[Candidate], tolerance: f64) -> Vec<Candidate> {
    let mut processed = vec![false; candidates.len()];
    let mut merged = Vec::new();

    for (m_idx, candidate) in candidates.iter().enumerate() {
        if processed[m_idx] {
            continue;
        }
        processed[m_idx] = true;

        let mut representative = *candidate;
        for (t_idx, target) in candidates.iter().enumerate() {
            let expanded = expand(&representative.bounding_box(), tolerance);
            let target_box = target.bounding_box();

            if expanded.encloses(&target_box) {
                processed[t_idx] = true;
            } else if expanded.strictly_inside(&target_box) {
                representative = *target;
                processed[t_idx] = true;
            }
        }

        merged.push(representative);
    }

    debug!(
        "merged {} candidates into {}",
        candidates.len(),
        merged.len()
    );
    merged
}
