//! 2-D Axis Aligned Bounding Boxes.

use super::{max, min, Float, Int, Point2, Point2i};
use itertools::{iproduct, Product};
use num_traits::Num;
use std::ops::Range;

/// 2-D Axis Aligned Bounding Box. `p_max` is exclusive for integer bounds
/// so that iteration visits `area()` points.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds2<T> {
    /// Minimum bounds.
    pub p_min: Point2<T>,

    /// Maximum bounds.
    pub p_max: Point2<T>,
}

/// 2-D bounding box containing `Float` points.
pub type Bounds2f = Bounds2<Float>;

/// 2-D bounding box containing `Int` points.
pub type Bounds2i = Bounds2<Int>;

impl<T: Num + PartialOrd + Copy> Bounds2<T> {
    /// Creates a new 2-D bounding box from 2 points. The minimum and maximum
    /// bounds are used for each coordinate axis.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point2<T>, p2: Point2<T>) -> Self {
        Self {
            p_min: Point2::new(min(p1.x, p2.x), min(p1.y, p2.y)),
            p_max: Point2::new(max(p1.x, p2.x), max(p1.y, p2.y)),
        }
    }

    /// Returns the vector along the box diagonal from the minimum point to
    /// the maximum point.
    pub fn diagonal(&self) -> Point2<T> {
        self.p_max - self.p_min
    }

    /// Returns the area of the box.
    pub fn area(&self) -> T {
        let d = self.diagonal();
        d.x * d.y
    }

    /// Returns the overlap between two bounding boxes. The result is empty
    /// (zero area) if they do not overlap.
    ///
    /// * `other` - The other bounding box.
    pub fn intersect(&self, other: &Self) -> Self {
        let p_min = Point2::new(max(self.p_min.x, other.p_min.x), max(self.p_min.y, other.p_min.y));
        let p_max = Point2::new(min(self.p_max.x, other.p_max.x), min(self.p_max.y, other.p_max.y));
        Self {
            p_min,
            p_max: Point2::new(max(p_min.x, p_max.x), max(p_min.y, p_max.y)),
        }
    }

    /// Returns true if a point is inside the bounds, treating the upper
    /// bound as exclusive.
    ///
    /// * `p` - The point.
    pub fn contains_exclusive(&self, p: &Point2<T>) -> bool {
        p.x >= self.p_min.x && p.x < self.p_max.x && p.y >= self.p_min.y && p.y < self.p_max.y
    }
}

/// Iterates the points of `Bounds2i` in scanline order.
pub struct Bounds2iIterator {
    p: Product<Range<Int>, Range<Int>>,
}

impl IntoIterator for Bounds2i {
    type Item = Point2i;
    type IntoIter = Bounds2iIterator;

    /// Create an iterator for `Bounds2i`.
    fn into_iter(self) -> Self::IntoIter {
        Bounds2iIterator {
            p: iproduct!(self.p_min.y..self.p_max.y, self.p_min.x..self.p_max.x),
        }
    }
}

impl Iterator for Bounds2iIterator {
    type Item = Point2i;

    /// Get the next point.
    fn next(&mut self) -> Option<Self::Item> {
        self.p.next().map(|(y, x)| Point2i::new(x, y))
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
