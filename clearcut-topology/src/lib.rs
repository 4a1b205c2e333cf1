//! Boundary-representation topology for assembly preprocessing.
//!
//! The topological elements `Vertex`, `Edge` and `Face` carry their geometry
//! behind shared cells; two elements are the *same* entity exactly when they
//! hold the same cell, and the pointer of the cell is the element's `id`.
//! Merging coincident sub-shapes therefore amounts to rebuilding containers
//! so that coincident elements hold one shared cell.
//!
//! ```
//! use clearcut_topology::*;
//! let v = Vertex::news([(), (), ()]);
//! let edges = [
//!     Edge::new(&v[0], &v[1], ()),
//!     Edge::new(&v[1], &v[2], ()),
//!     Edge::new(&v[2], &v[0], ()),
//! ];
//! let wire: Wire<_, _> = edges.iter().collect();
//! assert!(wire.is_closed());
//! let face = Face::new(vec![wire], ());
//! // the cloned face is the same entity, a reconstructed one is not
//! assert_eq!(face.clone().id(), face.id());
//! ```

#![cfg_attr(not(debug_assertions), deny(warnings))]
#![deny(clippy::all, rust_2018_idioms)]
#![warn(
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

use std::collections::VecDeque;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex};

/// Vertex, the minimum topological unit.
///
/// `Vertex::new()` creates a distinct vertex each time; vertices are
/// identified by their `id`, not by their point.
#[derive(Debug)]
pub struct Vertex<P> {
    point: Arc<Mutex<P>>,
}

/// Edge, an oriented curve bounded by two vertices.
///
/// The constructors create a distinct edge each time, even for the same end
/// vertices. The inverse of an edge shares the id of the original.
#[derive(Debug)]
pub struct Edge<P, C> {
    vertices: (Vertex<P>, Vertex<P>),
    orientation: bool,
    curve: Arc<Mutex<C>>,
}

/// Wire, a path or cycle of edges.
///
/// The entity is a `VecDeque<Edge>`; most methods are inherited through
/// `Deref` and `DerefMut`.
#[derive(Debug)]
pub struct Wire<P, C> {
    edge_list: VecDeque<Edge<P, C>>,
}

/// Face, an oriented surface patch attached to simple closed boundary wires.
#[derive(Debug)]
pub struct Face<P, C, S> {
    boundaries: Vec<Wire<P, C>>,
    orientation: bool,
    surface: Arc<Mutex<S>>,
}

/// Shell, a collection of faces.
///
/// The entity is a `Vec<Face>`; most methods are inherited through `Deref`
/// and `DerefMut`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Shell<P, C, S> {
    face_list: Vec<Face<P, C, S>>,
}

/// Solid, bounded by closed shells.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Solid<P, C, S> {
    boundaries: Vec<Shell<P, C, S>>,
}

/// A top-level shape of an assembly: one solid, or a compound of solids.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Shape<P, C, S> {
    /// a single solid
    Solid(Solid<P, C, S>),
    /// a compound of solids, possibly sharing sub-shapes
    Compound(Vec<Solid<P, C, S>>),
}

/// `Result` with crate's errors.
pub type Result<T> = std::result::Result<T, errors::Error>;

/// The id of a vertex; stable while any handle to the vertex lives, even
/// when the point is overwritten.
pub type VertexID<P> = SubShapeId<P>;

/// The id of an edge, shared by the two orientations of the edge.
pub type EdgeID<C> = SubShapeId<C>;

/// The id of a face, shared by the two orientations of the face.
pub type FaceID<S> = SubShapeId<S>;

trait RemoveTry<T> {
    fn remove_try(self) -> T;
}

impl<T> RemoveTry<T> for Result<T> {
    #[inline(always)]
    fn remove_try(self) -> T { self.unwrap_or_else(|e| panic!("{}", e)) }
}

/// compressed, serializable mirrors of the topological structs
pub mod compress;
#[doc(hidden)]
pub mod edge;
/// classifies the errors that can occur in this crate
pub mod errors;
/// sub-shape identity
pub mod id;
#[doc(hidden)]
pub mod face;
/// classifies shell conditions
pub mod shell;
#[doc(hidden)]
pub mod shape;
#[doc(hidden)]
pub mod solid;
#[doc(hidden)]
pub mod vertex;
/// edge and vertex iterators over wires
pub mod wire;

pub use compress::{CompressedAssembly, CompressedShape, CompressedSolid};
pub use id::SubShapeId;
pub use shell::ShellCondition;
