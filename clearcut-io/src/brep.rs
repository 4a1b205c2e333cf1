//! The BREP container: a JSON serialization of the compressed assembly.
//!
//! The top level is a compound (or compsolid) whose children are solids in
//! document order; the shape ordinal used by every pair list is the child's
//! position under the top-level iterator. Reading validates the structural
//! contract before expanding the topology.

use crate::IoError;
use clearcut_engine::Document;
use clearcut_kernel::topology::CompressedAssembly;
use clearcut_kernel::Shape;
use clearcut_topology::compress::{self, AssemblyKind};
use log::debug;
use std::io::{Read, Write};

fn validate(assembly: &CompressedAssembly) -> Result<(), IoError> {
    for (ordinal, shape) in assembly.shapes.iter().enumerate() {
        let solids = match shape {
            clearcut_topology::CompressedShape::Solid(solid) => std::slice::from_ref(solid),
            clearcut_topology::CompressedShape::Compound(solids) => solids.as_slice(),
        };
        if solids.iter().any(|solid| solid.shells.is_empty()) {
            return Err(IoError::Structure(format!(
                "child {ordinal} contains a solid without boundary shells",
            )));
        }
    }
    Ok(())
}

/// A document together with the container kind it was stored under.
#[derive(Debug)]
pub struct LoadedDocument {
    /// the top-level container kind
    pub kind: AssemblyKind,
    /// the shapes in document order
    pub document: Document<Shape>,
}

/// Reads a document from the BREP container carried by `reader`.
pub fn read_document(reader: impl Read) -> Result<LoadedDocument, IoError> {
    let assembly: CompressedAssembly = serde_json::from_reader(reader)?;
    validate(&assembly)?;
    let shapes = compress::expand(&assembly)?;
    debug!(
        "read {} shape(s), {} vertices, {} edges, {} faces",
        shapes.len(),
        assembly.vertices.len(),
        assembly.edges.len(),
        assembly.faces.len(),
    );
    Ok(LoadedDocument {
        kind: assembly.kind,
        document: Document::new(shapes),
    })
}

/// Writes the document as a BREP container onto `writer`. Shapes holding
/// shared sub-shapes serialize them once, so sharing survives the round
/// trip.
pub fn write_document(
    document: &Document<Shape>,
    kind: AssemblyKind,
    mut writer: impl Write,
) -> Result<(), IoError> {
    let assembly = compress::compress(kind, document.shapes());
    serde_json::to_writer(&mut writer, &assembly)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clearcut_base::cgmath64::Point3;
    use clearcut_kernel::primitive::cuboid;

    fn document() -> Document<Shape> {
        Document::new(vec![
            Shape::Solid(cuboid(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0))),
            Shape::Solid(cuboid(Point3::new(2.0, 0.0, 0.0), Point3::new(3.0, 1.0, 1.0))),
        ])
    }

    #[test]
    fn container_round_trip() {
        let mut buffer = Vec::new();
        write_document(&document(), AssemblyKind::Compound, &mut buffer).unwrap();
        let back = read_document(buffer.as_slice()).unwrap();
        assert_eq!(back.kind, AssemblyKind::Compound);
        assert_eq!(back.document.len(), 2);
        for (a, b) in document().shapes().iter().zip(back.document.shapes()) {
            assert_eq!(a.solid_count(), b.solid_count());
        }
    }

    #[test]
    fn garbage_is_a_container_error() {
        let err = read_document(&b"not json"[..]).unwrap_err();
        assert!(matches!(err, IoError::Container(_)));
    }

    #[test]
    fn shell_less_solid_is_a_structural_error() {
        let mut buffer = Vec::new();
        write_document(&document(), AssemblyKind::Compound, &mut buffer).unwrap();
        let mut assembly: CompressedAssembly = serde_json::from_slice(&buffer).unwrap();
        if let clearcut_topology::CompressedShape::Solid(solid) = &mut assembly.shapes[0] {
            solid.shells.clear();
        }
        let json = serde_json::to_vec(&assembly).unwrap();
        let err = read_document(json.as_slice()).unwrap_err();
        assert!(matches!(err, IoError::Structure(_)));
    }
}
