use crate::errors::Error;
use crate::*;

impl<P, C, S> Face<P, C, S> {
    /// Generates the face bounded by `boundaries` over `surface`.
    /// # Failures
    /// Every boundary must be non-empty, closed and simple, and no two
    /// boundaries may share a vertex.
    pub fn try_new(boundaries: Vec<Wire<P, C>>, surface: S) -> Result<Face<P, C, S>> {
        for wire in &boundaries {
            if wire.is_empty() {
                return Err(Error::EmptyWire);
            } else if !wire.is_closed() {
                return Err(Error::NotClosedWire);
            } else if !wire.is_simple() {
                return Err(Error::NotSimpleWire);
            }
        }
        if !Wire::disjoint_wires(&boundaries) {
            return Err(Error::NotDisjointWires);
        }
        Ok(Face::new_unchecked(boundaries, surface))
    }

    /// Generates the face bounded by `boundaries` over `surface`.
    /// # Panics
    /// Panics under the conditions `try_new` rejects.
    #[inline(always)]
    pub fn new(boundaries: Vec<Wire<P, C>>, surface: S) -> Face<P, C, S> {
        Face::try_new(boundaries, surface).remove_try()
    }

    /// Generates the face without the boundary regularity checks.
    #[inline(always)]
    pub fn new_unchecked(boundaries: Vec<Wire<P, C>>, surface: S) -> Face<P, C, S> {
        Face {
            boundaries,
            orientation: true,
            surface: Arc::new(Mutex::new(surface)),
        }
    }

    /// Returns the boundaries, oriented the way the face is.
    pub fn boundaries(&self) -> Vec<Wire<P, C>> {
        match self.orientation {
            true => self.boundaries.clone(),
            false => self.boundaries.iter().map(Wire::inverse).collect(),
        }
    }

    /// Returns the boundaries of the underlying, non-oriented face.
    #[inline(always)]
    pub const fn absolute_boundaries(&self) -> &Vec<Wire<P, C>> { &self.boundaries }

    /// Returns an iterator over the edges of all boundaries of the
    /// underlying face.
    #[inline(always)]
    pub fn absolute_edge_iter(&self) -> impl Iterator<Item = &Edge<P, C>> {
        self.boundaries.iter().flat_map(Wire::edge_iter)
    }

    /// Returns the orientation of the face against its stored surface.
    #[inline(always)]
    pub const fn orientation(&self) -> bool { self.orientation }

    /// Returns a copy of the stored surface.
    #[inline(always)]
    pub fn surface(&self) -> S
    where S: Clone {
        self.surface.lock().unwrap().clone()
    }

    /// Overwrites the stored surface. The id of the face does not change.
    #[inline(always)]
    pub fn set_surface(&self, surface: S) { *self.surface.lock().unwrap() = surface; }

    /// Returns a copy of the surface respecting the orientation of `self`.
    #[inline(always)]
    pub fn oriented_surface(&self) -> S
    where S: clearcut_base::geom_traits::Invertible {
        match self.orientation {
            true => self.surface(),
            false => self.surface().inverse(),
        }
    }

    /// Inverts the orientation of the face.
    #[inline(always)]
    pub fn invert(&mut self) -> &mut Self {
        self.orientation = !self.orientation;
        self
    }

    /// Returns the inversely oriented face. The result shares the id of `self`.
    #[inline(always)]
    pub fn inverse(&self) -> Face<P, C, S> {
        let mut face = self.clone();
        face.invert();
        face
    }

    /// Returns whether two faces are the same entity, ignoring orientation.
    #[inline(always)]
    pub fn is_same(&self, other: &Self) -> bool {
        std::ptr::eq(Arc::as_ptr(&self.surface), Arc::as_ptr(&other.surface))
    }

    /// Returns the id of the face, shared by both orientations.
    #[inline(always)]
    pub fn id(&self) -> FaceID<S> { SubShapeId::of(&self.surface) }
}

impl<P, C, S> Clone for Face<P, C, S> {
    #[inline(always)]
    fn clone(&self) -> Face<P, C, S> {
        Face {
            boundaries: self.boundaries.clone(),
            orientation: self.orientation,
            surface: Arc::clone(&self.surface),
        }
    }
}

impl<P, C, S> PartialEq for Face<P, C, S> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other) && self.orientation == other.orientation
    }
}

impl<P, C, S> Eq for Face<P, C, S> {}

impl<P, C, S> Hash for Face<P, C, S> {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.surface), state);
        self.orientation.hash(state);
    }
}
