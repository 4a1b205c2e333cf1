//! The shipped kernel for rectilinear solids.
//!
//! Shapes whose member solids are axis-aligned cuboids are converted to
//! interval boxes; the boolean operations are interval arithmetic plus slab
//! decomposition, and the results are rebuilt as cuboid B-reps. Anything
//! non-rectilinear is rejected with `KernelError::Unsupported`, which the
//! engine surfaces as a per-pair failure.

use crate::base::*;
use crate::primitive::cuboid;
use crate::queries;
use crate::topology::Shape;
use crate::traits::{Kernel, KernelError, OpReport, OpResult, ProgressScope, Validity};
use std::time::Instant;

/// interval box, the working representation of one rectilinear solid
#[derive(Clone, Copy, Debug)]
struct AaBox {
    min: Point3,
    max: Point3,
}

impl AaBox {
    fn volume(&self) -> f64 { (0..3).map(|i| self.max[i] - self.min[i]).product() }

    /// per-axis overlap extent; negative values are gaps
    fn overlap(&self, other: &AaBox, axis: usize) -> f64 {
        f64::min(self.max[axis], other.max[axis]) - f64::max(self.min[axis], other.min[axis])
    }

    /// the common box, `None` when some overlap extent is not above `margin`
    fn intersection(&self, other: &AaBox, margin: f64) -> Option<AaBox> {
        match (0..3).all(|i| self.overlap(other, i) > margin) {
            true => Some(AaBox {
                min: Point3::new(
                    f64::max(self.min[0], other.min[0]),
                    f64::max(self.min[1], other.min[1]),
                    f64::max(self.min[2], other.min[2]),
                ),
                max: Point3::new(
                    f64::min(self.max[0], other.max[0]),
                    f64::min(self.max[1], other.max[1]),
                    f64::min(self.max[2], other.max[2]),
                ),
            }),
            false => None,
        }
    }

    /// slab decomposition of `self` minus `other`
    fn subtract(&self, other: &AaBox) -> Vec<AaBox> {
        let clip = match self.intersection(other, TOLERANCE) {
            Some(clip) => clip,
            None => return vec![*self],
        };
        let mut pieces = Vec::new();
        let mut push = |min: Point3, max: Point3| {
            let piece = AaBox { min, max };
            if (0..3).all(|i| piece.max[i] - piece.min[i] > TOLERANCE) {
                pieces.push(piece);
            }
        };
        let (smin, smax) = (self.min, self.max);
        // side slabs along x
        push(smin, Point3::new(clip.min[0], smax[1], smax[2]));
        push(Point3::new(clip.max[0], smin[1], smin[2]), smax);
        // remaining slabs along y, limited to the clip x-range
        push(
            Point3::new(clip.min[0], smin[1], smin[2]),
            Point3::new(clip.max[0], clip.min[1], smax[2]),
        );
        push(
            Point3::new(clip.min[0], clip.max[1], smin[2]),
            Point3::new(clip.max[0], smax[1], smax[2]),
        );
        // remaining slabs along z, limited to the clip x- and y-ranges
        push(
            Point3::new(clip.min[0], clip.min[1], smin[2]),
            Point3::new(clip.max[0], clip.max[1], clip.min[2]),
        );
        push(
            Point3::new(clip.min[0], clip.min[1], clip.max[2]),
            Point3::new(clip.max[0], clip.max[1], smax[2]),
        );
        pieces
    }

    fn distance(&self, other: &AaBox) -> f64 {
        (0..3)
            .map(|i| f64::max(0.0, -self.overlap(other, i)))
            .map(|gap| gap * gap)
            .sum::<f64>()
            .sqrt()
    }
}

/// pave-fill result of a rectilinear pair
#[derive(Debug)]
pub struct RectPave {
    a: Vec<AaBox>,
    b: Vec<AaBox>,
    fuzzy: f64,
}

/// section result: the pair's contact state within the fuzzy band
#[derive(Debug)]
pub struct RectSection {
    contact: bool,
}

fn solid_to_box(solid: &crate::topology::Solid) -> Result<AaBox, KernelError> {
    let points: Vec<Point3> = solid.vertex_iter().map(|vertex| vertex.point()).collect();
    let bdb: BoundingBox = points.iter().copied().collect();
    let (min, max) = (bdb.min(), bdb.max());
    if (0..3).any(|i| max[i] - min[i] <= TOLERANCE) {
        return Err(KernelError::Unsupported("degenerate solid extent".into()));
    }
    let on_corner = |pt: &Point3| {
        (0..3).all(|i| pt[i].within(&min[i], TOLERANCE) || pt[i].within(&max[i], TOLERANCE))
    };
    if points.len() != 8 || !points.iter().all(on_corner) {
        log::debug!("rejecting solid with {} vertices as non-rectilinear", points.len());
        return Err(KernelError::Unsupported(
            "solid is not an axis-aligned cuboid".into(),
        ));
    }
    Ok(AaBox { min, max })
}

fn shape_to_boxes(shape: &Shape, scope: &ProgressScope) -> Result<Vec<AaBox>, KernelError> {
    shape
        .solid_iter()
        .map(|solid| {
            scope.check()?;
            solid_to_box(solid)
        })
        .collect()
}

fn boxes_to_shape(boxes: &[AaBox]) -> Shape {
    let solids = boxes
        .iter()
        .map(|piece| cuboid(piece.min, piece.max))
        .collect::<Vec<_>>();
    Shape::from(solids)
}

fn subtract_all(minuend: &[AaBox], subtrahend: &[AaBox]) -> Vec<AaBox> {
    let mut pieces = minuend.to_vec();
    for cutter in subtrahend {
        pieces = pieces
            .iter()
            .flat_map(|piece| piece.subtract(cutter))
            .collect();
    }
    pieces
}

/// The kernel over rectilinear solids. Stateless; all configuration is per
/// call, and no background threads are ever spawned.
#[derive(Clone, Copy, Debug, Default)]
pub struct RectKernel;

impl RectKernel {
    /// Creates the kernel.
    pub const fn new() -> Self { RectKernel }
}

impl Kernel for RectKernel {
    type Shape = Shape;
    type Pave = RectPave;
    type Section = RectSection;

    fn pave_fill(
        &self,
        a: &Shape,
        b: &Shape,
        fuzzy: f64,
        scope: &ProgressScope,
    ) -> OpResult<RectPave> {
        let start = Instant::now();
        let pave = RectPave {
            a: shape_to_boxes(a, scope)?,
            b: shape_to_boxes(b, scope)?,
            fuzzy,
        };
        scope.check()?;
        Ok((pave, OpReport::finish(fuzzy, start)))
    }

    fn common(&self, pave: &RectPave) -> OpResult<Shape> {
        let start = Instant::now();
        let fuzzy = pave.fuzzy;
        let pieces: Vec<AaBox> = pave
            .a
            .iter()
            .flat_map(|a| {
                pave.b
                    .iter()
                    .filter_map(move |b| a.intersection(b, fuzzy))
            })
            .collect();
        Ok((boxes_to_shape(&pieces), OpReport::finish(pave.fuzzy, start)))
    }

    fn cut(&self, pave: &RectPave) -> OpResult<Shape> {
        let start = Instant::now();
        let pieces = subtract_all(&pave.a, &pave.b);
        Ok((boxes_to_shape(&pieces), OpReport::finish(pave.fuzzy, start)))
    }

    fn cut21(&self, pave: &RectPave) -> OpResult<Shape> {
        let start = Instant::now();
        let pieces = subtract_all(&pave.b, &pave.a);
        Ok((boxes_to_shape(&pieces), OpReport::finish(pave.fuzzy, start)))
    }

    fn section(&self, pave: &RectPave) -> OpResult<RectSection> {
        let start = Instant::now();
        let slack = pave.fuzzy + TOLERANCE;
        let contact = pave.a.iter().any(|a| {
            pave.b
                .iter()
                .any(|b| (0..3).all(|i| a.overlap(b, i) >= -slack))
        });
        Ok((RectSection { contact }, OpReport::finish(pave.fuzzy, start)))
    }

    fn section_has_vertices(&self, section: &RectSection) -> bool { section.contact }

    fn fuse(&self, a: &Shape, b: &Shape, fuzzy: f64, scope: &ProgressScope) -> OpResult<Shape> {
        let start = Instant::now();
        let kept = shape_to_boxes(a, scope)?;
        let added = subtract_all(&shape_to_boxes(b, scope)?, &kept);
        let mut pieces = kept;
        pieces.extend(added);
        Ok((boxes_to_shape(&pieces), OpReport::finish(fuzzy, start)))
    }

    fn has_solids(&self, shape: &Shape) -> bool { shape.solid_count() > 0 }

    fn volume(&self, shape: &Shape) -> Result<f64, KernelError> {
        Ok(queries::shape_volume(shape))
    }

    fn min_distance(&self, a: &Shape, b: &Shape) -> Result<f64, KernelError> {
        let scope = ProgressScope::unbounded();
        let (a, b) = (shape_to_boxes(a, &scope)?, shape_to_boxes(b, &scope)?);
        a.iter()
            .flat_map(|a| b.iter().map(move |b| a.distance(b)))
            .min_by(f64::total_cmp)
            .ok_or(KernelError::DistanceFailed)
    }

    fn oriented_bbox(&self, shape: &Shape) -> Result<Obb, KernelError> {
        let points = queries::shape_points(shape);
        match points.is_empty() {
            true => Err(KernelError::Unsupported("empty shape has no bounds".into())),
            false => Ok(Obb::fit(points.iter().copied())),
        }
    }

    fn check(&self, shape: &Shape) -> Validity { queries::check_shape(shape) }
}

#[cfg(test)]
mod tests;
