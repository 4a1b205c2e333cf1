use crate::bounding_box::BoundingBox;
use crate::cgmath64::*;
use serde::{Deserialize, Serialize};

/// oriented bounding box: a center, three orthonormal axes, and half-extents
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct Obb {
    center: Point3,
    axes: Matrix3,
    half: Vector3,
}

impl Obb {
    /// Creates the box from its center, orthonormal axes and half-extents.
    #[inline(always)]
    pub fn new(center: Point3, axes: Matrix3, half: Vector3) -> Self {
        Self { center, axes, half }
    }

    /// Returns the center of the box.
    #[inline(always)]
    pub const fn center(&self) -> Point3 { self.center }

    /// Returns the half-extents along the box axes.
    #[inline(always)]
    pub const fn half_extents(&self) -> Vector3 { self.half }

    /// Fits an oriented box to a point cloud by the covariance eigenbasis.
    /// Degenerate clouds (fewer than two distinct points, or a rank-deficient
    /// covariance) fall back to the world axes.
    pub fn fit<I: IntoIterator<Item = Point3> + Clone>(points: I) -> Self {
        let (mut sum, mut count) = (Vector3::zero(), 0usize);
        for pt in points.clone() {
            sum += pt.to_vec();
            count += 1;
        }
        if count == 0 {
            return Self::new(Point3::origin(), Matrix3::identity(), Vector3::zero());
        }
        let mean = sum / count as f64;
        let mut cov = Matrix3::zero();
        for pt in points.clone() {
            let d = pt.to_vec() - mean;
            for i in 0..3 {
                for j in 0..3 {
                    cov[i][j] += d[i] * d[j];
                }
            }
        }
        cov /= count as f64;
        let axes = jacobi_eigenbasis(cov)
            .unwrap_or_else(|| [Vector3::unit_x(), Vector3::unit_y(), Vector3::unit_z()]);
        // project the cloud onto the axes to get tight extents
        let mut bdb = BoundingBox::new();
        for pt in points {
            let d = pt.to_vec();
            bdb.push(Point3::new(
                axes[0].dot(d),
                axes[1].dot(d),
                axes[2].dot(d),
            ));
        }
        let local_center = bdb.center();
        let center = Point3::from_vec(
            axes[0] * local_center[0] + axes[1] * local_center[1] + axes[2] * local_center[2],
        );
        Self::new(center, Matrix3::from_cols(axes[0], axes[1], axes[2]), bdb.diagonal() / 2.0)
    }

    /// Inflates every half-extent by `delta`.
    #[inline(always)]
    pub fn enlarge(&mut self, delta: f64) {
        self.half += Vector3::new(delta, delta, delta);
    }

    /// Returns the enlarged copy of the box.
    #[inline(always)]
    pub fn enlarged(&self, delta: f64) -> Self {
        let mut obb = *self;
        obb.enlarge(delta);
        obb
    }

    /// Separating-axis test: returns `true` if the two boxes have no common
    /// point. The fifteen candidate axes are the six face normals and the
    /// nine cross products of edge directions.
    pub fn is_disjoint(&self, other: &Self) -> bool {
        let t = other.center - self.center;
        let axes = |obb: &Self, i: usize| obb.axes[i];
        let mut candidates = Vec::with_capacity(15);
        for i in 0..3 {
            candidates.push(axes(self, i));
            candidates.push(axes(other, i));
        }
        for i in 0..3 {
            for j in 0..3 {
                let cross = axes(self, i).cross(axes(other, j));
                if !cross.magnitude2().so_small2() {
                    candidates.push(cross);
                }
            }
        }
        candidates.into_iter().any(|axis| {
            let ra: f64 = (0..3)
                .map(|i| (axes(self, i) * self.half[i]).dot(axis).abs())
                .sum();
            let rb: f64 = (0..3)
                .map(|i| (axes(other, i) * other.half[i]).dot(axis).abs())
                .sum();
            t.dot(axis).abs() > ra + rb
        })
    }
}

use crate::tolerance::NearZero;

/// Cyclic Jacobi iteration on a symmetric matrix; returns the orthonormal
/// eigenvector rows, or `None` if the sweep fails to converge.
fn jacobi_eigenbasis(mut a: Matrix3) -> Option<[Vector3; 3]> {
    let mut v = Matrix3::identity();
    for _ in 0..32 {
        let off = a[0][1] * a[0][1] + a[0][2] * a[0][2] + a[1][2] * a[1][2];
        if off < 1.0e-18 {
            // the eigenvectors are the accumulated columns
            return Some([v[0], v[1], v[2]]);
        }
        for (p, q) in [(0usize, 1usize), (0, 2), (1, 2)] {
            if a[p][q].abs() < 1.0e-12 {
                continue;
            }
            let theta = (a[q][q] - a[p][p]) / (2.0 * a[p][q]);
            let t = theta.signum() / (theta.abs() + (theta * theta + 1.0).sqrt());
            let c = 1.0 / (t * t + 1.0).sqrt();
            let s = t * c;
            let mut rot = Matrix3::identity();
            rot[p][p] = c;
            rot[q][q] = c;
            rot[p][q] = s;
            rot[q][p] = -s;
            a = rot.transpose() * a * rot;
            v = v * rot;
        }
    }
    None
}
