//! Merging: detecting geometrically coincident vertices, edges and faces
//! across the whole assembly and rebuilding the topology so coincident
//! sub-shapes become one shared entity.
//!
//! The stage runs single-threaded through four steps: vertex clustering
//! (M1), edge and face grouping (M2), topology rebuild (M3) and the
//! same-parameter fix (M4). Finding nothing to merge is success; a rebuild
//! that leaves a shell invalid is a warning; only the parameter fix is
//! fatal.

use crate::config::MergeConfig;
use crate::errors::EngineError;
use clearcut_base::cgmath64::{Point3, Vector3};
use clearcut_base::geom_traits::{
    Invertible, ParametricCurve, ParametricSurface, SearchNearestParameter,
};
use clearcut_topology::Shape;
use log::info;

mod cluster;
mod fix;
mod groups;
pub mod origin;
mod rebuild;

pub use origin::{Origin, SubShapeKey};

/// Curve capabilities the merger needs of the edge geometry.
pub trait MergeCurve:
    ParametricCurve<Point = Point3, Vector = Vector3>
    + Invertible
    + SearchNearestParameter<Point = Point3, Parameter = f64>
{
}
impl<C> MergeCurve for C where
    C: ParametricCurve<Point = Point3, Vector = Vector3>
        + Invertible
        + SearchNearestParameter<Point = Point3, Parameter = f64>
{
}

/// Surface capabilities the merger needs of the face geometry.
pub trait MergeSurface:
    ParametricSurface<Point = Point3, Vector = Vector3>
    + Invertible
    + SearchNearestParameter<Point = Point3, Parameter = (f64, f64)>
{
}
impl<S> MergeSurface for S where
    S: ParametricSurface<Point = Point3, Vector = Vector3>
        + Invertible
        + SearchNearestParameter<Point = Point3, Parameter = (f64, f64)>
{
}

/// Totals of one merge pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// vertex clusters bound
    pub vertex_clusters: usize,
    /// edge groups bound
    pub edge_groups: usize,
    /// face groups bound
    pub face_groups: usize,
    /// shells left structurally irregular by the rebuild
    pub rebuild_warnings: usize,
    /// (face, edge) parameter representations verified by the fix
    pub representations_verified: usize,
}

/// Merges coincident sub-shapes across the assembly, in place.
///
/// The slice keeps its length and order; slots whose transitive closure
/// contains a bound sub-shape are replaced by rebuilt shapes, all others
/// are left as the same entities.
pub fn merge_shapes<C: MergeCurve, S: MergeSurface>(
    shapes: &mut [Shape<Point3, C, S>],
    config: &MergeConfig,
) -> Result<MergeOutcome, EngineError> {
    config.validate()?;
    let mut outcome = MergeOutcome::default();
    let mut origin = Origin::new();

    outcome.vertex_clusters = cluster::cluster_vertices(shapes, config.tolerance, &mut origin);
    outcome.edge_groups = groups::group_edges(shapes, config.tolerance, &mut origin);
    let face_groups = groups::group_faces(shapes, config.tolerance, &origin);
    outcome.face_groups = face_groups.groups.len();

    if origin.is_empty() && face_groups.groups.is_empty() {
        info!("merge: nothing coincident, assembly returned unchanged");
        return Ok(outcome);
    }

    let mut rebuilder = rebuild::Rebuilder::new(&mut origin, &face_groups);
    let rebuilt: Vec<_> = shapes.iter().map(|shape| rebuilder.shape_for(shape)).collect();
    outcome.rebuild_warnings = rebuilder.warnings;
    let mut pcurves = rebuilder.pcurves;
    for (slot, shape) in shapes.iter_mut().zip(rebuilt) {
        *slot = shape;
    }

    outcome.representations_verified =
        fix::same_parameter(shapes, &mut pcurves, config.tolerance)?;

    info!(
        "merge done: {} vertex clusters, {} edge groups, {} face groups, \
         {} rebuild warning(s)",
        outcome.vertex_clusters,
        outcome.edge_groups,
        outcome.face_groups,
        outcome.rebuild_warnings,
    );
    Ok(outcome)
}
