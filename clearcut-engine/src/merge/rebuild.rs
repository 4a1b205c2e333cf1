//! Stage M3: topology rebuild.
//!
//! Containers are rebuilt bottom-up in the fixed type order (vertex, edge,
//! wire, face, shell, solid, compound). Bound sub-shapes are replaced by
//! their representatives, rebuilt-but-unshared sub-shapes are reconstructed
//! once and cached by id, and untouched sub-shapes are carried through as
//! the same entity. A rebuild that leaves a shell structurally invalid is
//! reported as a warning, never an error.

use super::groups::FaceGroups;
use super::origin::Origin;
use super::{MergeCurve, MergeSurface};
use clearcut_base::cgmath64::*;
use clearcut_base::geom_traits::{ParametricCurve, ParametricSurface, SearchNearestParameter};
use clearcut_topology::{Edge, EdgeID, Face, FaceID, Shape, Shell, ShellCondition, Solid, Wire};
use log::warn;
use rustc_hash::FxHashMap as HashMap;

/// straight segment in a surface's parameter space, the merger's 2-D curve
/// representation of one edge on one face
#[derive(Clone, Copy, Debug)]
pub(super) struct PcurveSeg {
    /// parameter image of the curve's front
    pub a: Vector2,
    /// parameter image of the curve's back
    pub b: Vector2,
}

/// (face, edge) → 2-D representation, consumed by the same-parameter fix
pub(super) type PcurveTable<C, S> = HashMap<(FaceID<S>, EdgeID<C>), PcurveSeg>;

/// Projects a curve's ends into a surface's parameter space. For a periodic
/// surface the back parameter is translated by whole periods so the segment
/// does not wrap across the seam.
pub(super) fn pcurve_for<C: MergeCurve, S: MergeSurface>(
    surface: &S,
    curve: &C,
) -> Option<PcurveSeg> {
    let (u0, v0) = surface.search_nearest_parameter(curve.front(), None, 16)?;
    let (mut u1, mut v1) = surface.search_nearest_parameter(curve.back(), None, 16)?;
    if let Some(period) = surface.u_period() {
        u1 -= ((u1 - u0) / period).round() * period;
    }
    if let Some(period) = surface.v_period() {
        v1 -= ((v1 - v0) / period).round() * period;
    }
    Some(PcurveSeg {
        a: Vector2::new(u0, v0),
        b: Vector2::new(u1, v1),
    })
}

/// the face's outward direction at the middle of its parameter range
fn effective_normal<C, S: MergeSurface>(face: &Face<Point3, C, S>) -> Vector3 {
    let surface = face.oriented_surface();
    let ((u0, u1), (v0, v1)) = surface.parameter_range();
    surface.normal((u0 + u1) / 2.0, (v0 + v1) / 2.0)
}

pub(super) struct Rebuilder<'a, C, S> {
    origin: &'a mut Origin<C, S>,
    groups: &'a FaceGroups<C, S>,
    rebuilt_edges: HashMap<EdgeID<C>, Edge<Point3, C>>,
    rebuilt_faces: HashMap<FaceID<S>, Face<Point3, C, S>>,
    pub(super) pcurves: PcurveTable<C, S>,
    pub(super) warnings: usize,
}

impl<'a, C: MergeCurve, S: MergeSurface> Rebuilder<'a, C, S> {
    pub(super) fn new(origin: &'a mut Origin<C, S>, groups: &'a FaceGroups<C, S>) -> Self {
        Self {
            origin,
            groups,
            rebuilt_edges: HashMap::default(),
            rebuilt_faces: HashMap::default(),
            pcurves: HashMap::default(),
            warnings: 0,
        }
    }

    /// The replacement of one edge, in the same effective direction as the
    /// member.
    fn edge_for(&mut self, edge: &Edge<Point3, C>) -> Edge<Point3, C> {
        if let Some(representative) = self.origin.edge(edge) {
            // representatives are stored forward; orient by the member's
            // oriented front vertex
            let want_front = self.origin.vertex_or_self(edge.front());
            return match representative.absolute_front() == want_front {
                true => representative.clone(),
                false => representative.inverse(),
            };
        }
        let touched = self.origin.vertex(edge.absolute_front()).is_some()
            || self.origin.vertex(edge.absolute_back()).is_some();
        if !touched {
            return edge.clone();
        }
        let rebuilt = match self.rebuilt_edges.get(&edge.id()) {
            Some(rebuilt) => rebuilt.clone(),
            None => {
                let front = self.origin.vertex_or_self(edge.absolute_front()).clone();
                let back = self.origin.vertex_or_self(edge.absolute_back()).clone();
                match Edge::try_new(&front, &back, edge.curve()) {
                    Ok(rebuilt) => {
                        self.rebuilt_edges.insert(edge.id(), rebuilt.clone());
                        rebuilt
                    }
                    // both ends collapsed into one representative: the edge
                    // is degenerate and is copied in place
                    Err(_) => return edge.clone(),
                }
            }
        };
        match edge.orientation() {
            true => rebuilt,
            false => rebuilt.inverse(),
        }
    }

    fn wire_for(&mut self, wire: &Wire<Point3, C>) -> Wire<Point3, C> {
        wire.edge_iter().map(|edge| self.edge_for(edge)).collect()
    }

    fn record_pcurves(&mut self, face: &Face<Point3, C, S>) {
        let surface = face.surface();
        for wire in face.absolute_boundaries() {
            for edge in wire.edge_iter() {
                if let Some(seg) = pcurve_for(&surface, &edge.curve()) {
                    self.pcurves.insert((face.id(), edge.id()), seg);
                }
            }
        }
    }

    /// Builds the shared representative of one face group from its first
    /// member's rebuilt boundaries.
    fn build_group_representative(&mut self, group: usize) -> Face<Point3, C, S> {
        let groups: &FaceGroups<C, S> = self.groups;
        let members = &groups.groups[group];
        let leader = members[0].clone();
        let wires: Vec<_> = leader
            .absolute_boundaries()
            .iter()
            .map(|wire| self.wire_for(wire))
            .collect();
        let representative = match Face::try_new(wires.clone(), leader.surface()) {
            Ok(face) => face,
            Err(error) => {
                warn!("face group representative is irregular ({error}), kept unchecked");
                self.warnings += 1;
                Face::new_unchecked(wires, leader.surface())
            }
        };
        self.record_pcurves(&representative);
        self.origin.bind_faces(
            members.iter().map(|member| member.id()),
            representative.clone(),
        );
        representative
    }

    /// The replacement of one face, carrying the member's effective
    /// orientation.
    fn face_for(&mut self, face: &Face<Point3, C, S>) -> Face<Point3, C, S> {
        if let Some(&group) = self.groups.membership.get(&face.id()) {
            let representative = match self.origin.face(face) {
                Some(representative) => representative.clone(),
                None => self.build_group_representative(group),
            };
            let aligned = effective_normal(face).dot(effective_normal(&representative)) > 0.0;
            return match aligned {
                true => representative,
                false => representative.inverse(),
            };
        }
        let wires: Vec<_> = face
            .absolute_boundaries()
            .iter()
            .map(|wire| self.wire_for(wire))
            .collect();
        let untouched = face
            .absolute_boundaries()
            .iter()
            .zip(&wires)
            .all(|(old, new)| {
                old.edge_iter()
                    .zip(new.edge_iter())
                    .all(|(a, b)| a.is_same(b))
            });
        if untouched {
            return face.clone();
        }
        let rebuilt = match self.rebuilt_faces.get(&face.id()) {
            Some(rebuilt) => rebuilt.clone(),
            None => {
                let rebuilt = match Face::try_new(wires.clone(), face.surface()) {
                    Ok(rebuilt) => rebuilt,
                    Err(error) => {
                        warn!("rebuilt face is irregular ({error}), kept unchecked");
                        self.warnings += 1;
                        Face::new_unchecked(wires, face.surface())
                    }
                };
                self.record_pcurves(&rebuilt);
                self.rebuilt_faces.insert(face.id(), rebuilt.clone());
                rebuilt
            }
        };
        match face.orientation() {
            true => rebuilt,
            false => rebuilt.inverse(),
        }
    }

    fn solid_for(&mut self, solid: &Solid<Point3, C, S>) -> Solid<Point3, C, S> {
        let shells: Vec<Shell<Point3, C, S>> = solid
            .boundaries()
            .iter()
            .map(|shell| shell.face_iter().map(|face| self.face_for(face)).collect())
            .collect();
        for shell in &shells {
            if shell.shell_condition() != ShellCondition::Closed {
                warn!("rebuilt shell is not closed; output written regardless");
                self.warnings += 1;
            }
        }
        Solid::new_unchecked(shells)
    }

    /// Rebuilds one top-level shape.
    pub(super) fn shape_for(&mut self, shape: &Shape<Point3, C, S>) -> Shape<Point3, C, S> {
        match shape {
            Shape::Solid(solid) => Shape::Solid(self.solid_for(solid)),
            Shape::Compound(solids) => Shape::Compound(
                solids.iter().map(|solid| self.solid_for(solid)).collect(),
            ),
        }
    }
}
