//! The member-to-representative mapping of the merge stage.
//!
//! Representatives live in forward-only arenas; cluster membership maps a
//! sub-shape id to its representative and nothing points back. Sub-shapes
//! that belong to no cluster are absent from the mapping.

use clearcut_base::cgmath64::Point3;
use clearcut_topology::{Edge, EdgeID, Face, FaceID, Vertex, VertexID};
use rustc_hash::FxHashMap as HashMap;
use std::hash::Hash;

/// Identity of a vertex after clustering: its representative's arena index,
/// or its own id when unclustered.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SubShapeKey<I: Hash + Eq> {
    /// arena index of the representative
    Rep(usize),
    /// the sub-shape's own id
    Own(I),
}

/// Member → representative mapping over all three sub-shape arenas.
pub struct Origin<C, S> {
    vertex_reps: Vec<Vertex<Point3>>,
    vertex_members: HashMap<VertexID<Point3>, usize>,
    edge_reps: Vec<Edge<Point3, C>>,
    edge_members: HashMap<EdgeID<C>, usize>,
    face_reps: Vec<Face<Point3, C, S>>,
    face_members: HashMap<FaceID<S>, usize>,
}

impl<C, S> Default for Origin<C, S> {
    fn default() -> Self {
        Self {
            vertex_reps: Vec::new(),
            vertex_members: HashMap::default(),
            edge_reps: Vec::new(),
            edge_members: HashMap::default(),
            face_reps: Vec::new(),
            face_members: HashMap::default(),
        }
    }
}

impl<C, S> std::fmt::Debug for Origin<C, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Origin")
            .field("vertex_clusters", &self.vertex_reps.len())
            .field("edge_groups", &self.edge_reps.len())
            .field("face_groups", &self.face_reps.len())
            .finish()
    }
}

impl<C, S> Origin<C, S> {
    /// Creates the empty mapping.
    pub fn new() -> Self { Self::default() }

    /// Binds every member to a freshly adopted representative vertex.
    pub fn bind_vertices(
        &mut self,
        members: impl IntoIterator<Item = VertexID<Point3>>,
        representative: Vertex<Point3>,
    ) {
        let index = self.vertex_reps.len();
        self.vertex_reps.push(representative);
        for member in members {
            self.vertex_members.insert(member, index);
        }
    }

    /// The representative of a vertex, `None` when unclustered.
    pub fn vertex(&self, member: &Vertex<Point3>) -> Option<&Vertex<Point3>> {
        self.vertex_members
            .get(&member.id())
            .map(|&index| &self.vertex_reps[index])
    }

    /// The representative of a vertex, or the vertex itself when
    /// unclustered.
    pub fn vertex_or_self<'a>(&'a self, member: &'a Vertex<Point3>) -> &'a Vertex<Point3> {
        self.vertex(member).unwrap_or(member)
    }

    /// The clustering identity of a vertex.
    pub fn vertex_key(&self, member: &Vertex<Point3>) -> SubShapeKey<VertexID<Point3>> {
        match self.vertex_members.get(&member.id()) {
            Some(&index) => SubShapeKey::Rep(index),
            None => SubShapeKey::Own(member.id()),
        }
    }

    /// The number of vertex clusters.
    pub fn vertex_cluster_count(&self) -> usize { self.vertex_reps.len() }

    /// Binds every member to a freshly adopted representative edge.
    pub fn bind_edges(
        &mut self,
        members: impl IntoIterator<Item = EdgeID<C>>,
        representative: Edge<Point3, C>,
    ) {
        let index = self.edge_reps.len();
        self.edge_reps.push(representative);
        for member in members {
            self.edge_members.insert(member, index);
        }
    }

    /// The representative of an edge, `None` when ungrouped.
    pub fn edge(&self, member: &Edge<Point3, C>) -> Option<&Edge<Point3, C>> {
        self.edge_members
            .get(&member.id())
            .map(|&index| &self.edge_reps[index])
    }

    /// The grouping identity of an edge.
    pub fn edge_key(&self, member: &Edge<Point3, C>) -> SubShapeKey<EdgeID<C>> {
        match self.edge_members.get(&member.id()) {
            Some(&index) => SubShapeKey::Rep(index),
            None => SubShapeKey::Own(member.id()),
        }
    }

    /// The number of edge groups.
    pub fn edge_group_count(&self) -> usize { self.edge_reps.len() }

    /// Binds every member to a freshly adopted representative face.
    pub fn bind_faces(
        &mut self,
        members: impl IntoIterator<Item = FaceID<S>>,
        representative: Face<Point3, C, S>,
    ) {
        let index = self.face_reps.len();
        self.face_reps.push(representative);
        for member in members {
            self.face_members.insert(member, index);
        }
    }

    /// The representative of a face, `None` when ungrouped.
    pub fn face(&self, member: &Face<Point3, C, S>) -> Option<&Face<Point3, C, S>> {
        self.face_members
            .get(&member.id())
            .map(|&index| &self.face_reps[index])
    }

    /// The number of face groups.
    pub fn face_group_count(&self) -> usize { self.face_reps.len() }

    /// Returns whether nothing was clustered at all.
    pub fn is_empty(&self) -> bool {
        self.vertex_reps.is_empty() && self.edge_reps.is_empty() && self.face_reps.is_empty()
    }
}
