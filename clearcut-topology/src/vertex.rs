use crate::*;

impl<P> Vertex<P> {
    /// Creates a new vertex. Each call creates a distinct entity.
    /// # Examples
    /// ```
    /// use clearcut_topology::Vertex;
    /// let v0 = Vertex::new(());
    /// let v1 = Vertex::new(());
    /// assert_ne!(v0, v1);
    /// assert_eq!(v0, v0.clone());
    /// ```
    #[inline(always)]
    pub fn new(point: P) -> Vertex<P> {
        Vertex {
            point: Arc::new(Mutex::new(point)),
        }
    }

    /// Creates distinct vertices for every given point.
    #[inline(always)]
    pub fn news(points: impl IntoIterator<Item = P>) -> Vec<Vertex<P>> {
        points.into_iter().map(Vertex::new).collect()
    }

    /// Returns a copy of the point.
    #[inline(always)]
    pub fn point(&self) -> P
    where P: Clone {
        self.point.lock().unwrap().clone()
    }

    /// Overwrites the point. The id of the vertex does not change.
    #[inline(always)]
    pub fn set_point(&self, point: P) { *self.point.lock().unwrap() = point; }

    /// Returns the id of the vertex.
    #[inline(always)]
    pub fn id(&self) -> VertexID<P> { SubShapeId::of(&self.point) }

    /// Duplicates the vertex with a mapped point. The result is a new entity.
    #[inline(always)]
    pub fn mapped<Q>(&self, mut point_mapping: impl FnMut(&P) -> Q) -> Vertex<Q> {
        Vertex::new(point_mapping(&self.point.lock().unwrap()))
    }
}

impl<P> Clone for Vertex<P> {
    #[inline(always)]
    fn clone(&self) -> Vertex<P> {
        Vertex {
            point: Arc::clone(&self.point),
        }
    }
}

impl<P> PartialEq for Vertex<P> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(Arc::as_ptr(&self.point), Arc::as_ptr(&other.point))
    }
}

impl<P> Eq for Vertex<P> {}

impl<P> Hash for Vertex<P> {
    #[inline(always)]
    fn hash<H: Hasher>(&self, state: &mut H) { std::ptr::hash(Arc::as_ptr(&self.point), state); }
}
