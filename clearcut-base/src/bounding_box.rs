use crate::cgmath64::*;
use serde::{Deserialize, Serialize};

/// axis-aligned bounding box in 3-space
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct BoundingBox {
    min: Point3,
    max: Point3,
}

impl Default for BoundingBox {
    #[inline(always)]
    fn default() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }
}

impl BoundingBox {
    /// Creates an empty bounding box.
    #[inline(always)]
    pub fn new() -> Self { Self::default() }

    /// Creates the box spanned by two corner points.
    #[inline(always)]
    pub fn from_corners(p: Point3, q: Point3) -> Self {
        let mut bdb = Self::new();
        bdb.push(p);
        bdb.push(q);
        bdb
    }

    /// Adds a point to the box.
    #[inline(always)]
    pub fn push(&mut self, pt: Point3) {
        for i in 0..3 {
            self.min[i] = f64::min(self.min[i], pt[i]);
            self.max[i] = f64::max(self.max[i], pt[i]);
        }
    }

    /// Returns whether the box contains no point.
    #[inline(always)]
    pub fn is_empty(&self) -> bool { (0..3).any(|i| self.min[i] > self.max[i]) }

    /// Returns the minimum corner. Each coordinate is `f64::INFINITY` if the box is empty.
    #[inline(always)]
    pub const fn min(&self) -> Point3 { self.min }

    /// Returns the maximum corner. Each coordinate is `f64::NEG_INFINITY` if the box is empty.
    #[inline(always)]
    pub const fn max(&self) -> Point3 { self.max }

    /// Returns the diagonal vector. Zero if the box is empty.
    #[inline(always)]
    pub fn diagonal(&self) -> Vector3 {
        match self.is_empty() {
            true => Vector3::zero(),
            false => self.max - self.min,
        }
    }

    /// Returns the center of the box.
    #[inline(always)]
    pub fn center(&self) -> Point3 { self.min.midpoint(self.max) }

    /// Inflates the box by `delta` in every axis direction.
    #[inline(always)]
    pub fn enlarge(&mut self, delta: f64) {
        if !self.is_empty() {
            let v = Vector3::new(delta, delta, delta);
            self.min -= v;
            self.max += v;
        }
    }

    /// Returns whether the two boxes have no common point.
    #[inline(always)]
    pub fn is_disjoint(&self, other: &Self) -> bool {
        (0..3).any(|i| self.max[i] < other.min[i] || other.max[i] < self.min[i])
    }

    /// Returns the minimum distance between the two boxes, zero if they intersect.
    pub fn distance(&self, other: &Self) -> f64 {
        let gap = |i: usize| {
            f64::max(self.min[i] - other.max[i], other.min[i] - self.max[i]).max(0.0)
        };
        (0..3).map(gap).map(|g| g * g).sum::<f64>().sqrt()
    }

    /// Takes the union of the two boxes.
    #[inline(always)]
    pub fn union(&self, other: &Self) -> Self {
        let mut bdb = *self;
        if !other.is_empty() {
            bdb.push(other.min);
            bdb.push(other.max);
        }
        bdb
    }
}

impl std::iter::FromIterator<Point3> for BoundingBox {
    fn from_iter<I: IntoIterator<Item = Point3>>(iter: I) -> Self {
        let mut bdb = Self::new();
        iter.into_iter().for_each(|pt| bdb.push(pt));
        bdb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_box() {
        let bdb = BoundingBox::new();
        assert!(bdb.is_empty());
        assert_eq!(bdb.diagonal(), Vector3::zero());
    }

    #[test]
    fn push_and_query() {
        let bdb: BoundingBox = [
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-1.0, 0.0, 5.0),
        ]
        .into_iter()
        .collect();
        assert_eq!(bdb.min(), Point3::new(-1.0, 0.0, 3.0));
        assert_eq!(bdb.max(), Point3::new(1.0, 2.0, 5.0));
        assert_eq!(bdb.center(), Point3::new(0.0, 1.0, 4.0));
    }

    #[test]
    fn disjointness_and_distance() {
        let a = BoundingBox::from_corners(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let mut b =
            BoundingBox::from_corners(Point3::new(2.0, 0.0, 0.0), Point3::new(3.0, 1.0, 1.0));
        assert!(a.is_disjoint(&b));
        crate::assert_near!(a.distance(&b), 1.0);
        b.enlarge(0.6);
        assert!(!a.is_disjoint(&b));
        crate::assert_near!(a.distance(&b), 0.0);
    }
}
