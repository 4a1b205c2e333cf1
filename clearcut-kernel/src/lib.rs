//! Concrete geometry, the CAD-kernel binding surface, and the shipped
//! rectilinear kernel.
//!
//! The binding surface ([`Kernel`]) is the contract the cleanup engine
//! requires of a CAD kernel: a pave-fill precomputation with a cancellation
//! scope, the boolean operations on the filled pair, and the volume /
//! distance / bounding / validity queries. The in-tree [`RectKernel`]
//! implements the contract for rectilinear solids (axis-aligned, planar
//! faces); bindings to a full CAD kernel implement the same trait
//! downstream.

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

/// re-export the base crate
pub mod base {
    pub use clearcut_base::{
        assert_near, assert_near2, bounding_box::BoundingBox, cgmath64::*, geom_traits::*,
        obb::Obb, tolerance::*,
    };
}
pub use base::*;

/// concrete geometric elements
pub mod geometry;
pub use geometry::{Curve, Line, Plane, Surface};

/// the binding surface of the underlying CAD kernel
pub mod traits;
pub use traits::{
    Defect, Kernel, KernelError, OpReport, OpResult, Phase, ProgressScope, Validity,
};

/// rectilinear primitive builders
pub mod primitive;

/// geometric queries on topological shapes
pub mod queries;

/// the shipped kernel for rectilinear solids
pub mod rect;
pub use rect::RectKernel;

/// topological elements over the concrete geometry
pub mod topology {
    use crate::geometry::{Curve, Surface};
    use clearcut_base::cgmath64::Point3;
    /// vertex with point geometry
    pub type Vertex = clearcut_topology::Vertex<Point3>;
    /// edge with curve geometry
    pub type Edge = clearcut_topology::Edge<Point3, Curve>;
    /// wire of concrete edges
    pub type Wire = clearcut_topology::Wire<Point3, Curve>;
    /// face with surface geometry
    pub type Face = clearcut_topology::Face<Point3, Curve, Surface>;
    /// shell of concrete faces
    pub type Shell = clearcut_topology::Shell<Point3, Curve, Surface>;
    /// solid over the concrete geometry
    pub type Solid = clearcut_topology::Solid<Point3, Curve, Surface>;
    /// top-level shape over the concrete geometry
    pub type Shape = clearcut_topology::Shape<Point3, Curve, Surface>;
    /// compressed assembly over the concrete geometry
    pub type CompressedAssembly =
        clearcut_topology::CompressedAssembly<Point3, Curve, Surface>;
}
pub use topology::{Edge, Face, Shape, Shell, Solid, Vertex, Wire};
