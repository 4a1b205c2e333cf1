use crate::*;

impl<P, C, S> Shape<P, C, S> {
    /// Returns an iterator over the member solids: one for `Solid`, all
    /// members for `Compound`.
    pub fn solid_iter(&self) -> impl Iterator<Item = &Solid<P, C, S>> {
        let slice = match self {
            Shape::Solid(solid) => std::slice::from_ref(solid),
            Shape::Compound(solids) => solids.as_slice(),
        };
        slice.iter()
    }

    /// Returns the number of member solids.
    #[inline(always)]
    pub fn solid_count(&self) -> usize {
        match self {
            Shape::Solid(_) => 1,
            Shape::Compound(solids) => solids.len(),
        }
    }

    /// Returns an iterator over the faces of all member solids.
    #[inline(always)]
    pub fn face_iter(&self) -> impl Iterator<Item = &Face<P, C, S>> {
        self.solid_iter().flat_map(Solid::face_iter)
    }

    /// Returns an iterator over the boundary edges of all member solids.
    /// An edge shared by two faces is visited once for each face.
    #[inline(always)]
    pub fn edge_iter(&self) -> impl Iterator<Item = &Edge<P, C>> {
        self.solid_iter().flat_map(Solid::edge_iter)
    }

    /// Returns an iterator enumerating every vertex entity of the shape once.
    /// Vertices shared across member solids are enumerated once.
    pub fn vertex_iter(&self) -> impl Iterator<Item = &Vertex<P>> {
        use rustc_hash::FxHashSet as HashSet;
        let mut seen = HashSet::default();
        self.edge_iter()
            .flat_map(|edge| [edge.absolute_front(), edge.absolute_back()])
            .filter(move |vertex| seen.insert(vertex.id()))
    }
}

impl<P, C, S> From<Solid<P, C, S>> for Shape<P, C, S> {
    #[inline(always)]
    fn from(solid: Solid<P, C, S>) -> Self { Shape::Solid(solid) }
}

impl<P, C, S> From<Vec<Solid<P, C, S>>> for Shape<P, C, S> {
    /// A singleton vector collapses to `Shape::Solid`.
    #[inline(always)]
    fn from(mut solids: Vec<Solid<P, C, S>>) -> Self {
        match solids.len() {
            1 => Shape::Solid(solids.pop().unwrap()),
            _ => Shape::Compound(solids),
        }
    }
}
