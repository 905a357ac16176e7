use imageproc::point::Point;
use num_traits::{Num, ToPrimitive};

/// Axis-aligned extent of a point set, in inclusive pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub min_x: i32,
    pub min_y: i32,
    pub max_x: i32,
    pub max_y: i32,
}

impl BoundingBox {
    /// Builds a box from two opposite corners, reordering them if needed.
    pub fn from_corners(a: Point<i32>, b: Point<i32>) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// `max_x - min_x`.
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    /// `max_y - min_y`.
    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    /// Longer side over shorter side. Infinite when the shorter side is zero.
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = (f64::from(self.width()), f64::from(self.height()));
        let (longer, shorter) = if h > w { (h, w) } else { (w, h) };
        longer / shorter
    }

    /// Whether `other` lies inside `self`, borders included.
    pub fn encloses(&self, other: &BoundingBox) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && self.max_x >= other.max_x
            && self.max_y >= other.max_y
    }

    /// Whether `self` lies inside `other` with no shared border.
    pub fn strictly_inside(&self, other: &BoundingBox) -> bool {
        self.min_x > other.min_x
            && self.min_y > other.min_y
            && self.max_x < other.max_x
            && self.max_y < other.max_y
    }
}

/// Computes the axis-aligned bounding box of a contour's points.
///
/// Generic over the coordinate type so that chains from
/// `imageproc::contours::find_contours::<T>` can be used directly. `T` only
/// needs `PartialOrd`, which lets floating-point chains through as well.
///
/// # Arguments
///
/// * `points` - The contour chain, in any order.
///
/// # Returns
///
/// `Some(BoundingBox)` with `min_x <= max_x` and `min_y <= max_y`, or `None`
/// when the chain has fewer than two points (no usable geometry) or when an
/// extreme coordinate is not representable as an `i32` (out of range or NaN).
///
/// # Examples
///
/// ```
/// use imageproc::point::Point;
/// use sticky_notes::rect::bounding_box;
///
/// let chain = [Point::new(50, 10), Point::new(90, 50), Point::new(50, 90), Point::new(10, 50)];
/// let bbox = bounding_box(&chain).unwrap();
///
/// assert_eq!((bbox.min_x, bbox.min_y, bbox.max_x, bbox.max_y), (10, 10, 90, 90));
/// assert!(bounding_box(&chain[..1]).is_none());
/// ```
pub fn bounding_box<T>(points: &[Point<T>]) -> Option<BoundingBox>
where
    T: Copy + PartialOrd + Num + ToPrimitive,
{
    if points.len() < 2 {
        return None;
    }

    let p0 = points[0];
    let mut min_x = p0.x;
    let mut max_x = p0.x;
    let mut min_y = p0.y;
    let mut max_y = p0.y;

    // `T` is only `PartialOrd`, so no `min`/`max` helpers.
    for p in &points[1..] {
        if p.x < min_x {
            min_x = p.x;
        }
        if p.x > max_x {
            max_x = p.x;
        }
        if p.y < min_y {
            min_y = p.y;
        }
        if p.y > max_y {
            max_y = p.y;
        }
    }

    Some(BoundingBox {
        min_x: min_x.to_i32()?,
        min_y: min_y.to_i32()?,
        max_x: max_x.to_i32()?,
        max_y: max_y.to_i32()?,
    })
}

/// A detected note outline: four corners, clockwise from the top-left.
///
/// Corners always derive from one [`BoundingBox`] and cannot be changed
/// after construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    corners: [Point<i32>; 4],
}

impl Candidate {
    /// Builds the four corners of `bbox`, clockwise from `(min_x, min_y)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use imageproc::point::Point;
    /// use sticky_notes::rect::{BoundingBox, Candidate};
    ///
    /// let bbox = BoundingBox::from_corners(Point::new(400, 100), Point::new(100, 400));
    /// let candidate = Candidate::from_box(bbox);
    ///
    /// assert_eq!(candidate.top_left(), Point::new(100, 100));
    /// assert_eq!(candidate.corners()[1], Point::new(400, 100));
    /// assert_eq!(candidate.bounding_box(), bbox);
    /// ```
    pub fn from_box(bbox: BoundingBox) -> Self {
        Self {
            corners: [
                Point::new(bbox.min_x, bbox.min_y),
                Point::new(bbox.max_x, bbox.min_y),
                Point::new(bbox.max_x, bbox.max_y),
                Point::new(bbox.min_x, bbox.max_y),
            ],
        }
    }

    /// Top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> &[Point<i32>; 4] {
        &self.corners
    }

    /// The `(min_x, min_y)` corner; also the crop origin.
    pub fn top_left(&self) -> Point<i32> {
        self.corners[0]
    }

    /// The `(max_x, max_y)` corner; the crop ends here, exclusive.
    pub fn bottom_right(&self) -> Point<i32> {
        self.corners[2]
    }

    /// The box the corners were built from.
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_corners(self.top_left(), self.bottom_right())
    }
}

impl From<BoundingBox> for Candidate {
    fn from(bbox: BoundingBox) -> Self {
        Self::from_box(bbox)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_box_for_rotated_rect() {
        // A diamond shape, which is a rotated square.
        let vertices = [
            Point { x: 50, y: 10 },
            Point { x: 90, y: 50 },
            Point { x: 50, y: 90 },
            Point { x: 10, y: 50 },
        ];
        let expected = BoundingBox {
            min_x: 10,
            min_y: 10,
            max_x: 90,
            max_y: 90,
        };
        assert_eq!(bounding_box(&vertices), Some(expected));
    }

    #[test]
    fn bounding_box_ignores_point_order() {
        let vertices = [
            Point { x: 20, y: 30 },
            Point { x: 120, y: 30 },
            Point { x: 120, y: 80 },
            Point { x: 20, y: 80 },
        ];
        let shuffled_vertices = [vertices[2], vertices[0], vertices[3], vertices[1]];
        let bbox = bounding_box(&vertices).unwrap();
        assert_eq!(bounding_box(&shuffled_vertices), Some(bbox));
        assert_eq!((bbox.width(), bbox.height()), (100, 50));
    }

    #[test]
    fn degenerate_chains_have_no_box() {
        let empty: [Point<i32>; 0] = [];
        assert_eq!(bounding_box(&empty), None);
        assert_eq!(bounding_box(&[Point::new(4, 4)]), None);
        // Two points already span a (possibly flat) box.
        let flat = bounding_box(&[Point::new(4, 4), Point::new(9, 4)]).unwrap();
        assert_eq!((flat.width(), flat.height()), (5, 0));
        assert!(flat.aspect_ratio().is_infinite());
    }

    #[test]
    fn candidate_corners_run_clockwise_from_top_left() {
        let candidate = Candidate::from_box(BoundingBox {
            min_x: 1,
            min_y: 2,
            max_x: 10,
            max_y: 20,
        });
        assert_eq!(
            candidate.corners(),
            &[
                Point::new(1, 2),
                Point::new(10, 2),
                Point::new(10, 20),
                Point::new(1, 20)
            ]
        );
        assert_eq!(candidate.bounding_box().width(), 9);
    }

    #[test]
    fn containment_predicates() {
        let outer = BoundingBox::from_corners(Point::new(100, 100), Point::new(400, 400));
        let inner = BoundingBox::from_corners(Point::new(110, 110), Point::new(390, 390));
        assert!(outer.encloses(&inner));
        assert!(outer.encloses(&outer));
        assert!(inner.strictly_inside(&outer));
        assert!(!outer.strictly_inside(&outer));
        assert_eq!(outer.aspect_ratio(), 1.0);
    }

    #[test]
    fn unrepresentable_coordinates_have_no_box() {
        let wide = [Point::new(5.0, 5.0), Point::new(3e9, 9.0)];
        assert_eq!(bounding_box(&wide), None);

        let nan_first = [Point::new(f64::NAN, 1.0), Point::new(2.0, 3.0)];
        assert_eq!(bounding_box(&nan_first), None);

        let large = [Point::new(5i64, 5), Point::new(i64::from(i32::MAX) + 1, 9)];
        assert_eq!(bounding_box(&large), None);

        let fits = [Point::new(5i64, 5), Point::new(i64::from(i32::MAX), 9)];
        let bbox = bounding_box(&fits).unwrap();
        assert!(bbox.min_x <= bbox.max_x && bbox.min_y <= bbox.max_y);
        assert_eq!(bbox.max_x, i32::MAX);
    }

    #[test]
    fn float_chains_truncate_to_pixels() {
        let chain = [Point::new(10.7, 20.2), Point::new(30.9, 40.5)];
        assert_eq!(
            bounding_box(&chain),
            Some(BoundingBox {
                min_x: 10,
                min_y: 20,
                max_x: 30,
                max_y: 40,
            })
        );
    }
}
