use crate::errors::Error;
use crate::*;

impl<P, C> Edge<P, C> {
    /// Generates the edge from `front` to `back`.
    /// # Failures
    /// Returns `Error::SameVertex` if `front` and `back` are the same entity.
    /// ```
    /// use clearcut_topology::{errors::Error, *};
    /// let v = Vertex::news([(), ()]);
    /// assert!(Edge::try_new(&v[0], &v[1], ()).is_ok());
    /// assert_eq!(Edge::try_new(&v[0], &v[0], ()).unwrap_err(), Error::SameVertex);
    /// ```
    #[inline(always)]
    pub fn try_new(front: &Vertex<P>, back: &Vertex<P>, curve: C) -> Result<Edge<P, C>> {
        match front == back {
            true => Err(Error::SameVertex),
            false => Ok(Edge::new_unchecked(front, back, curve)),
        }
    }

    /// Generates the edge from `front` to `back`.
    /// # Panics
    /// Panics if `front` and `back` are the same entity.
    #[inline(always)]
    pub fn new(front: &Vertex<P>, back: &Vertex<P>, curve: C) -> Edge<P, C> {
        Edge::try_new(front, back, curve).remove_try()
    }

    /// Generates the edge from `front` to `back` without the distinctness check.
    #[inline(always)]
    pub fn new_unchecked(front: &Vertex<P>, back: &Vertex<P>, curve: C) -> Edge<P, C> {
        Edge {
            vertices: (front.clone(), back.clone()),
            orientation: true,
            curve: Arc::new(Mutex::new(curve)),
        }
    }

    /// Returns the orientation of the edge against its stored curve.
    #[inline(always)]
    pub fn orientation(&self) -> bool { self.orientation }

    /// Inverts the direction of the edge.
    #[inline(always)]
    pub fn invert(&mut self) -> &mut Self {
        self.orientation = !self.orientation;
        self
    }

    /// Creates the inversely oriented edge. The result shares the id of `self`.
    /// ```
    /// use clearcut_topology::*;
    /// let v = Vertex::news([(), ()]);
    /// let edge = Edge::new(&v[0], &v[1], ());
    /// let inv = edge.inverse();
    /// assert_eq!(edge.id(), inv.id());
    /// assert_eq!(edge.front(), inv.back());
    /// ```
    #[inline(always)]
    pub fn inverse(&self) -> Edge<P, C> {
        let mut res = self.clone();
        res.invert();
        res
    }

    /// Returns the front vertex.
    #[inline(always)]
    pub fn front(&self) -> &Vertex<P> {
        match self.orientation {
            true => &self.vertices.0,
            false => &self.vertices.1,
        }
    }

    /// Returns the back vertex.
    #[inline(always)]
    pub fn back(&self) -> &Vertex<P> {
        match self.orientation {
            true => &self.vertices.1,
            false => &self.vertices.0,
        }
    }

    /// Returns the vertices at both ends.
    #[inline(always)]
    pub fn ends(&self) -> (&Vertex<P>, &Vertex<P>) {
        match self.orientation {
            true => (&self.vertices.0, &self.vertices.1),
            false => (&self.vertices.1, &self.vertices.0),
        }
    }

    /// Returns the front vertex of the underlying, non-oriented edge.
    #[inline(always)]
    pub fn absolute_front(&self) -> &Vertex<P> { &self.vertices.0 }

    /// Returns the back vertex of the underlying, non-oriented edge.
    #[inline(always)]
    pub fn absolute_back(&self) -> &Vertex<P> { &self.vertices.1 }

    /// Returns whether two edges are the same entity, ignoring orientation.
    #[inline(always)]
    pub fn is_same(&self, other: &Edge<P, C>) -> bool {
        std::ptr::eq(Arc::as_ptr(&self.curve), Arc::as_ptr(&other.curve))
    }

    /// Returns a copy of the stored curve, parametrised front-to-back of the
    /// underlying edge.
    #[inline(always)]
    pub fn curve(&self) -> C
    where C: Clone {
        self.curve.lock().unwrap().clone()
    }

    /// Overwrites the stored curve. The id of the edge does not change.
    #[inline(always)]
    pub fn set_curve(&self, curve: C) { *self.curve.lock().unwrap() = curve; }

    /// Returns a copy of the curve respecting the orientation of `self`.
    #[inline(always)]
    pub fn oriented_curve(&self) -> C
    where C: clearcut_base::geom_traits::Invertible {
        match self.orientation {
            true => self.curve(),
            false => self.curve().inverse(),
        }
    }

    /// Returns the id of the edge, shared by both orientations.
    #[inline(always)]
    pub fn id(&self) -> EdgeID<C> { SubShapeId::of(&self.curve) }

    /// Duplicates the edge with mapped geometry, keeping the orientation.
    /// The given vertices replace the absolute ends; the result is a new entity.
    #[inline(always)]
    pub fn mapped_with_ends<Q, D>(
        &self,
        front: &Vertex<Q>,
        back: &Vertex<Q>,
        mut curve_mapping: impl FnMut(&C) -> D,
    ) -> Result<Edge<Q, D>> {
        let mut edge = Edge::try_new(front, back, curve_mapping(&self.curve.lock().unwrap()))?;
        edge.orientation = self.orientation;
        Ok(edge)
    }
}

impl<P, C> Clone for Edge<P, C> {
    #[inline(always)]
    fn clone(&self) -> Edge<P, C> {
        Edge {
            vertices: self.vertices.clone(),
            orientation: self.orientation,
            curve: Arc::clone(&self.curve),
        }
    }
}

impl<P, C> PartialEq for Edge<P, C> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other) && self.orientation == other.orientation
    }
}

impl<P, C> Eq for Edge<P, C> {}

impl<P, C> Hash for Edge<P, C> {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::ptr::hash(Arc::as_ptr(&self.curve), state);
        self.orientation.hash(state);
    }
}
