//! Serialized data exchange format
//!
//! The live topological structs carry shared cells and are not suitable for
//! direct serialization. The `Compressed*` mirrors store every sub-shape once
//! in assembly-wide tables and reference it by index, so sub-shapes shared
//! between faces, solids, or compound members serialize once and round-trip
//! shared. Boundary regularity is re-checked on expansion.

use crate::errors::Error;
use crate::*;
use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

/// The container kind of the top level of an assembly.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum AssemblyKind {
    /// heterogeneous aggregate, members need not share topology
    Compound,
    /// solid-only aggregate whose members share faces
    CompSolid,
}

/// Serialized edge: absolute end vertices and the stored curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompressedEdge<C> {
    /// indices of the absolute front and back vertices
    pub vertices: (usize, usize),
    /// curve geometry of the edge
    pub curve: C,
}

/// Reference to an edge of the edge table, with the orientation it is used in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedEdgeIndex {
    /// index into the edge table
    pub index: usize,
    /// orientation of the referenced edge
    pub orientation: bool,
}

/// Serialized face: absolute boundaries and the stored surface.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompressedFace<S> {
    /// boundaries of the face
    pub boundaries: Vec<Vec<CompressedEdgeIndex>>,
    /// orientation of the face
    pub orientation: bool,
    /// surface geometry of the face
    pub surface: S,
}

/// Reference to a face of the face table, with the orientation it is used in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressedFaceIndex {
    /// index into the face table
    pub index: usize,
    /// orientation of the referenced face
    pub orientation: bool,
}

/// Serialized solid: boundary shells as lists of face references.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompressedSolid {
    /// the boundary shells
    pub shells: Vec<Vec<CompressedFaceIndex>>,
}

/// Serialized top-level shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CompressedShape {
    /// a single solid
    Solid(CompressedSolid),
    /// a compound of solids
    Compound(Vec<CompressedSolid>),
}

/// Serialized assembly: sub-shape tables plus one entry per document slot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompressedAssembly<P, C, S> {
    /// the top-level container kind
    pub kind: AssemblyKind,
    /// all vertex points
    pub vertices: Vec<P>,
    /// all edges
    pub edges: Vec<CompressedEdge<C>>,
    /// all faces
    pub faces: Vec<CompressedFace<S>>,
    /// the top-level shapes in document order
    pub shapes: Vec<CompressedShape>,
}

struct CompressDirector<P, C, S> {
    vertices: Vec<P>,
    edges: Vec<CompressedEdge<C>>,
    faces: Vec<CompressedFace<S>>,
    vmap: HashMap<VertexID<P>, usize>,
    emap: HashMap<EdgeID<C>, usize>,
    fmap: HashMap<FaceID<S>, usize>,
}

impl<P: Clone, C: Clone, S: Clone> CompressDirector<P, C, S> {
    fn new() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            faces: Vec::new(),
            vmap: HashMap::default(),
            emap: HashMap::default(),
            fmap: HashMap::default(),
        }
    }

    fn vertex_index(&mut self, vertex: &Vertex<P>) -> usize {
        match self.vmap.get(&vertex.id()) {
            Some(&index) => index,
            None => {
                let index = self.vertices.len();
                self.vertices.push(vertex.point());
                self.vmap.insert(vertex.id(), index);
                index
            }
        }
    }

    fn edge_index(&mut self, edge: &Edge<P, C>) -> usize {
        match self.emap.get(&edge.id()) {
            Some(&index) => index,
            None => {
                let vertices = (
                    self.vertex_index(edge.absolute_front()),
                    self.vertex_index(edge.absolute_back()),
                );
                let index = self.edges.len();
                self.edges.push(CompressedEdge {
                    vertices,
                    curve: edge.curve(),
                });
                self.emap.insert(edge.id(), index);
                index
            }
        }
    }

    fn face_index(&mut self, face: &Face<P, C, S>) -> usize {
        if let Some(&index) = self.fmap.get(&face.id()) {
            return index;
        }
        let boundaries = face
            .absolute_boundaries()
            .iter()
            .map(|wire| {
                wire.edge_iter()
                    .map(|edge| CompressedEdgeIndex {
                        index: self.edge_index(edge),
                        orientation: edge.orientation(),
                    })
                    .collect()
            })
            .collect();
        let index = self.faces.len();
        self.faces.push(CompressedFace {
            boundaries,
            orientation: face.orientation(),
            surface: face.surface(),
        });
        self.fmap.insert(face.id(), index);
        index
    }

    fn compress_solid(&mut self, solid: &Solid<P, C, S>) -> CompressedSolid {
        let shells = solid
            .boundaries()
            .iter()
            .map(|shell| {
                shell
                    .face_iter()
                    .map(|face| CompressedFaceIndex {
                        index: self.face_index(face),
                        orientation: face.orientation(),
                    })
                    .collect()
            })
            .collect();
        CompressedSolid { shells }
    }
}

/// Compresses the top-level shapes of an assembly into one serializable
/// container. Sub-shapes shared between shapes are stored once.
pub fn compress<P: Clone, C: Clone, S: Clone>(
    kind: AssemblyKind,
    shapes: &[Shape<P, C, S>],
) -> CompressedAssembly<P, C, S> {
    let mut director = CompressDirector::new();
    let shapes = shapes
        .iter()
        .map(|shape| match shape {
            Shape::Solid(solid) => CompressedShape::Solid(director.compress_solid(solid)),
            Shape::Compound(solids) => CompressedShape::Compound(
                solids
                    .iter()
                    .map(|solid| director.compress_solid(solid))
                    .collect(),
            ),
        })
        .collect();
    CompressedAssembly {
        kind,
        vertices: director.vertices,
        edges: director.edges,
        faces: director.faces,
        shapes,
    }
}

struct ExpandDirector<P, C, S> {
    faces: Vec<Face<P, C, S>>,
}

impl<P: Clone, C: Clone, S: Clone> ExpandDirector<P, C, S> {
    fn new(assembly: &CompressedAssembly<P, C, S>) -> Result<Self> {
        let vertices: Vec<_> = assembly
            .vertices
            .iter()
            .cloned()
            .map(Vertex::new)
            .collect();
        let edges = assembly
            .edges
            .iter()
            .map(|edge| {
                let front = vertices.get(edge.vertices.0).ok_or(Error::IndexOutOfRange)?;
                let back = vertices.get(edge.vertices.1).ok_or(Error::IndexOutOfRange)?;
                Edge::try_new(front, back, edge.curve.clone())
            })
            .collect::<Result<Vec<_>>>()?;
        let faces = assembly
            .faces
            .iter()
            .map(|face| {
                let wires = face
                    .boundaries
                    .iter()
                    .map(|wire| {
                        wire.iter()
                            .map(|cei| {
                                let edge = edges.get(cei.index).ok_or(Error::IndexOutOfRange)?;
                                Ok(match cei.orientation {
                                    true => edge.clone(),
                                    false => edge.inverse(),
                                })
                            })
                            .collect::<Result<Wire<_, _>>>()
                    })
                    .collect::<Result<Vec<_>>>()?;
                let mut expanded = Face::try_new(wires, face.surface.clone())?;
                if !face.orientation {
                    expanded.invert();
                }
                Ok(expanded)
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { faces })
    }

    fn expand_solid(&self, solid: &CompressedSolid) -> Result<Solid<P, C, S>> {
        let shells = solid
            .shells
            .iter()
            .map(|shell| {
                shell
                    .iter()
                    .map(|cfi| {
                        let face = self.faces.get(cfi.index).ok_or(Error::IndexOutOfRange)?;
                        Ok(match cfi.orientation == face.orientation() {
                            true => face.clone(),
                            false => face.inverse(),
                        })
                    })
                    .collect::<Result<Shell<_, _, _>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        Solid::try_new(shells)
    }
}

/// Expands a compressed assembly back into live shapes. Sub-shapes stored
/// once expand to entities shared by everything that references them.
pub fn expand<P: Clone, C: Clone, S: Clone>(
    assembly: &CompressedAssembly<P, C, S>,
) -> Result<Vec<Shape<P, C, S>>> {
    let director = ExpandDirector::new(assembly)?;
    assembly
        .shapes
        .iter()
        .map(|shape| {
            Ok(match shape {
                CompressedShape::Solid(solid) => Shape::Solid(director.expand_solid(solid)?),
                CompressedShape::Compound(solids) => Shape::Compound(
                    solids
                        .iter()
                        .map(|solid| director.expand_solid(solid))
                        .collect::<Result<Vec<_>>>()?,
                ),
            })
        })
        .collect()
}
