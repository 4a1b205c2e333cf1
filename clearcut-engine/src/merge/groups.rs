//! Stage M2: edge and face grouping.
//!
//! Sub-shapes are first bucketed by a combinatorial key (the multiset of
//! their child identities mapped through the cluster mapping), and every
//! bucket is then refined by pairwise geometric coincidence checks at a
//! representative point.

use super::origin::Origin;
use super::{MergeCurve, MergeSurface};
use clearcut_base::cgmath64::*;
use clearcut_base::geom_traits::{
    ParametricCurve, ParametricSurface, SearchNearestParameter,
};
use clearcut_base::tolerance::TOLERANCE;
use clearcut_topology::{Edge, Face, Shape};
use itertools::Itertools;
use log::warn;
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use std::hash::Hash;

/// Assigns dense ordinals to hashable keys, so multisets of them can be
/// sorted into canonical bucket keys.
struct Numbering<K> {
    ordinals: HashMap<K, usize>,
}

impl<K: Hash + Eq> Numbering<K> {
    fn new() -> Self {
        Self {
            ordinals: HashMap::default(),
        }
    }

    fn ordinal(&mut self, key: K) -> usize {
        let next = self.ordinals.len();
        *self.ordinals.entry(key).or_insert(next)
    }
}

/// union-find over one bucket
struct Refinement {
    parent: Vec<usize>,
}

impl Refinement {
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    fn find(&mut self, i: usize) -> usize {
        match self.parent[i] == i {
            true => i,
            false => {
                let root = self.find(self.parent[i]);
                self.parent[i] = root;
                root
            }
        }
    }

    fn unite(&mut self, i: usize, j: usize) {
        let (ri, rj) = (self.find(i), self.find(j));
        self.parent[ri] = rj;
    }

    fn groups(mut self) -> Vec<Vec<usize>> {
        let mut by_root: HashMap<usize, Vec<usize>> = HashMap::default();
        for i in 0..self.parent.len() {
            let root = self.find(i);
            by_root.entry(root).or_default().push(i);
        }
        by_root.into_values().collect()
    }
}

fn unique_edges<C, S>(shapes: &[Shape<Point3, C, S>]) -> Vec<Edge<Point3, C>> {
    let mut seen = HashSet::default();
    let mut edges = Vec::new();
    for shape in shapes {
        for edge in shape.edge_iter() {
            if seen.insert(edge.id()) {
                edges.push(edge.clone());
            }
        }
    }
    edges
}

fn unique_faces<C, S>(shapes: &[Shape<Point3, C, S>]) -> Vec<Face<Point3, C, S>> {
    let mut seen = HashSet::default();
    let mut faces = Vec::new();
    for shape in shapes {
        for face in shape.face_iter() {
            if seen.insert(face.id()) {
                faces.push(face.clone());
            }
        }
    }
    faces
}

/// the midpoint of a curve's parameter range
fn curve_midpoint<C: MergeCurve>(curve: &C) -> Point3 {
    let (t0, t1) = curve.parameter_range();
    curve.subs((t0 + t1) / 2.0)
}

/// Two edges coincide when a representative point of one projects onto the
/// other within the tolerance.
fn edges_coincide<C: MergeCurve>(a: &C, b: &C, tolerance: f64) -> bool {
    let probe = curve_midpoint(a);
    match b.search_nearest_parameter(probe, None, 16) {
        Some(t) => probe.distance(b.subs(t)) <= tolerance + TOLERANCE,
        None => false,
    }
}

/// Groups coincident edges and binds every multi-member group. Returns the
/// number of groups bound.
pub(super) fn group_edges<C: MergeCurve, S>(
    shapes: &[Shape<Point3, C, S>],
    tolerance: f64,
    origin: &mut Origin<C, S>,
) -> usize {
    let edges = unique_edges(shapes);
    let mut numbering = Numbering::new();
    let mut buckets: HashMap<(usize, usize), Vec<Edge<Point3, C>>> = HashMap::default();
    for edge in edges {
        let front = numbering.ordinal(origin.vertex_key(edge.absolute_front()));
        let back = numbering.ordinal(origin.vertex_key(edge.absolute_back()));
        let key = (usize::min(front, back), usize::max(front, back));
        buckets.entry(key).or_default().push(edge);
    }

    for bucket in buckets.into_values().filter(|bucket| bucket.len() > 1) {
        let mut refinement = Refinement::new(bucket.len());
        for (i, j) in (0..bucket.len()).tuple_combinations() {
            if edges_coincide(&bucket[i].curve(), &bucket[j].curve(), tolerance) {
                refinement.unite(i, j);
            }
        }
        for group in refinement.groups().into_iter().filter(|g| g.len() > 1) {
            let leader = &bucket[group[0]];
            let front = origin.vertex_or_self(leader.absolute_front()).clone();
            let back = origin.vertex_or_self(leader.absolute_back()).clone();
            match Edge::try_new(&front, &back, leader.curve()) {
                Ok(representative) => {
                    origin.bind_edges(
                        group.iter().map(|&i| bucket[i].id()),
                        representative,
                    );
                }
                Err(error) => {
                    warn!("edge group collapsed to a degenerate edge, left unshared: {error}");
                }
            }
        }
    }
    origin.edge_group_count()
}

/// a representative interior point of a face: the mean of its boundary
/// vertices, which lies on the surface for the planar patches the merger
/// sees
fn face_probe<C, S>(face: &Face<Point3, C, S>) -> Point3 {
    let (mut sum, mut count) = (Vector3::zero(), 0usize);
    for wire in face.absolute_boundaries() {
        for vertex in wire.vertex_iter() {
            sum += vertex.point().to_vec();
            count += 1;
        }
    }
    Point3::from_vec(sum / count.max(1) as f64)
}

fn faces_coincide<C, S: MergeSurface>(
    a: &Face<Point3, C, S>,
    b: &Face<Point3, C, S>,
    tolerance: f64,
) -> bool {
    let probe = face_probe(a);
    let surface = b.surface();
    match surface.search_nearest_parameter(probe, None, 16) {
        Some((u, v)) => probe.distance(surface.subs(u, v)) <= tolerance + TOLERANCE,
        None => false,
    }
}

/// The face groups found by M2; representatives are built during the
/// topology rebuild, once the rebuilt wires exist.
pub(super) struct FaceGroups<C, S> {
    /// multi-member coincidence groups
    pub groups: Vec<Vec<Face<Point3, C, S>>>,
    /// face id → index into `groups`
    pub membership: HashMap<clearcut_topology::FaceID<S>, usize>,
}

impl<C, S> Default for FaceGroups<C, S> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            membership: HashMap::default(),
        }
    }
}

/// Groups coincident faces. The combinatorial key is the multiset of
/// boundary-edge identities through the cluster mapping, with degenerate
/// edges ignored.
pub(super) fn group_faces<C: MergeCurve, S: MergeSurface>(
    shapes: &[Shape<Point3, C, S>],
    tolerance: f64,
    origin: &Origin<C, S>,
) -> FaceGroups<C, S> {
    let faces = unique_faces(shapes);
    let mut numbering = Numbering::new();
    let mut buckets: HashMap<Vec<usize>, Vec<Face<Point3, C, S>>> = HashMap::default();
    for face in faces {
        let mut key = Vec::new();
        for wire in face.absolute_boundaries() {
            for edge in wire.edge_iter() {
                let degenerate = origin.vertex_key(edge.absolute_front())
                    == origin.vertex_key(edge.absolute_back());
                if degenerate {
                    continue;
                }
                key.push(numbering.ordinal(origin.edge_key(edge)));
            }
        }
        key.sort_unstable();
        buckets.entry(key).or_default().push(face);
    }

    let mut face_groups = FaceGroups::default();
    for bucket in buckets.into_values().filter(|bucket| bucket.len() > 1) {
        let mut refinement = Refinement::new(bucket.len());
        for (i, j) in (0..bucket.len()).tuple_combinations() {
            if faces_coincide(&bucket[i], &bucket[j], tolerance) {
                refinement.unite(i, j);
            }
        }
        for group in refinement.groups().into_iter().filter(|g| g.len() > 1) {
            let index = face_groups.groups.len();
            let members: Vec<_> = group.iter().map(|&i| bucket[i].clone()).collect();
            for member in &members {
                face_groups.membership.insert(member.id(), index);
            }
            face_groups.groups.push(members);
        }
    }
    face_groups
}
