use thiserror::Error;

/// Topological regularity errors.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Error)]
pub enum Error {
    /// Two end vertices of an edge coincide as entities.
    #[error("the front and back vertices of an edge must be distinct")]
    SameVertex,
    /// A face boundary is empty.
    #[error("a face boundary must contain at least one edge")]
    EmptyWire,
    /// A face boundary is not a closed continuous cycle.
    #[error("a face boundary must be closed")]
    NotClosedWire,
    /// A face boundary visits a vertex twice.
    #[error("a face boundary must be simple")]
    NotSimpleWire,
    /// Two boundaries of one face share a vertex.
    #[error("the boundaries of a face must be disjoint")]
    NotDisjointWires,
    /// A solid boundary has no face.
    #[error("a solid must be bounded by at least one non-empty shell")]
    EmptyShell,
    /// A solid boundary is not closed.
    #[error("the boundary shell of a solid must be closed")]
    NotClosedShell,
    /// A solid boundary is not connected.
    #[error("the boundary shell of a solid must be connected")]
    NotConnectedShell,
    /// A compressed container refers to an index out of its tables.
    #[error("a compressed shape index is out of range")]
    IndexOutOfRange,
}
