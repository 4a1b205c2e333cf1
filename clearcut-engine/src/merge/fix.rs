//! Stage M4: the same-parameter fix.
//!
//! Verifies that the 3-D curve of every edge and its 2-D representation on
//! every face it bounds agree numerically within tolerance, re-projecting
//! once where they do not. Disagreement after re-projection is fatal for
//! the merge stage.

use super::rebuild::{pcurve_for, PcurveSeg, PcurveTable};
use super::{MergeCurve, MergeSurface};
use clearcut_base::cgmath64::*;
use clearcut_base::geom_traits::{ParametricCurve, ParametricSurface};
use clearcut_base::tolerance::TOLERANCE;
use clearcut_topology::Shape;
use crate::errors::EngineError;
use rustc_hash::FxHashSet as HashSet;

const SAMPLES: [f64; 3] = [0.0, 0.5, 1.0];

fn agree<C: MergeCurve, S: MergeSurface>(
    curve: &C,
    surface: &S,
    seg: &PcurveSeg,
    tolerance: f64,
) -> bool {
    let (t0, t1) = curve.parameter_range();
    SAMPLES.into_iter().all(|s| {
        let spatial = curve.subs(t0 + (t1 - t0) * s);
        let uv = seg.a + (seg.b - seg.a) * s;
        spatial.distance(surface.subs(uv[0], uv[1])) <= tolerance + TOLERANCE
    })
}

/// Runs the same-parameter fix over the rebuilt assembly. Returns the
/// number of (face, edge) representations verified.
pub(super) fn same_parameter<C: MergeCurve, S: MergeSurface>(
    shapes: &[Shape<Point3, C, S>],
    pcurves: &mut PcurveTable<C, S>,
    tolerance: f64,
) -> Result<usize, EngineError> {
    let mut verified = 0usize;
    let mut seen_faces = HashSet::default();
    for shape in shapes {
        for face in shape.face_iter() {
            if !seen_faces.insert(face.id()) {
                continue;
            }
            let surface = face.surface();
            for wire in face.absolute_boundaries() {
                for edge in wire.edge_iter() {
                    let key = (face.id(), edge.id());
                    let Some(seg) = pcurves.get(&key).copied() else {
                        continue;
                    };
                    let curve = edge.curve();
                    if agree(&curve, &surface, &seg, tolerance) {
                        verified += 1;
                        continue;
                    }
                    // re-project once before giving up
                    let reprojected = pcurve_for(&surface, &curve);
                    match reprojected {
                        Some(seg) if agree(&curve, &surface, &seg, tolerance) => {
                            pcurves.insert(key, seg);
                            verified += 1;
                        }
                        _ => {
                            return Err(EngineError::SameParameter(format!(
                                "edge curve and its 2-D representation diverge \
                                 beyond {tolerance}",
                            )));
                        }
                    }
                }
            }
        }
    }
    Ok(verified)
}
