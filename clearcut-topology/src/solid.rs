use crate::errors::Error;
use crate::shell::ShellCondition;
use crate::*;

impl<P, C, S> Solid<P, C, S> {
    /// Generates the solid bounded by `boundaries`.
    /// # Failures
    /// Every boundary shell must be non-empty, closed and connected.
    pub fn try_new(boundaries: Vec<Shell<P, C, S>>) -> Result<Solid<P, C, S>> {
        if boundaries.is_empty() || boundaries.iter().any(|shell| shell.is_empty()) {
            return Err(Error::EmptyShell);
        }
        for shell in &boundaries {
            if shell.shell_condition() != ShellCondition::Closed {
                return Err(Error::NotClosedShell);
            } else if !shell.is_connected() {
                return Err(Error::NotConnectedShell);
            }
        }
        Ok(Solid::new_unchecked(boundaries))
    }

    /// Generates the solid bounded by `boundaries`.
    /// # Panics
    /// Panics under the conditions `try_new` rejects.
    #[inline(always)]
    pub fn new(boundaries: Vec<Shell<P, C, S>>) -> Solid<P, C, S> {
        Solid::try_new(boundaries).remove_try()
    }

    /// Generates the solid without the closedness and connectedness checks.
    #[inline(always)]
    pub const fn new_unchecked(boundaries: Vec<Shell<P, C, S>>) -> Solid<P, C, S> {
        Solid { boundaries }
    }

    /// Returns the boundary shells.
    #[inline(always)]
    pub const fn boundaries(&self) -> &Vec<Shell<P, C, S>> { &self.boundaries }

    /// Returns the boundary shells, consuming the solid.
    #[inline(always)]
    pub fn into_boundaries(self) -> Vec<Shell<P, C, S>> { self.boundaries }

    /// Returns an iterator over the faces of all boundary shells.
    #[inline(always)]
    pub fn face_iter(&self) -> impl Iterator<Item = &Face<P, C, S>> {
        self.boundaries.iter().flat_map(Shell::face_iter)
    }

    /// Returns an iterator over the boundary edges of all faces.
    /// An edge shared by two faces is visited once for each face.
    #[inline(always)]
    pub fn edge_iter(&self) -> impl Iterator<Item = &Edge<P, C>> {
        self.boundaries.iter().flat_map(Shell::edge_iter)
    }

    /// Returns an iterator enumerating every vertex entity of the solid once.
    pub fn vertex_iter(&self) -> impl Iterator<Item = &Vertex<P>> {
        use rustc_hash::FxHashSet as HashSet;
        let mut seen = HashSet::default();
        self.edge_iter()
            .flat_map(|edge| [edge.absolute_front(), edge.absolute_back()])
            .filter(move |vertex| seen.insert(vertex.id()))
    }
}
