use crate::base::*;
use crate::geometry::{Curve, Line, Plane, Surface};
use crate::topology::{Edge, Face, Solid, Vertex, Wire};
use rustc_hash::FxHashMap as HashMap;

// quads in counter-clockwise order viewed from outside; corner index bits
// are (x, y, z) = (1, 2, 4)
const QUADS: [[usize; 4]; 6] = [
    [0, 2, 3, 1], // z min
    [4, 5, 7, 6], // z max
    [0, 1, 5, 4], // y min
    [2, 6, 7, 3], // y max
    [0, 4, 6, 2], // x min
    [1, 3, 7, 5], // x max
];

/// Builds the axis-aligned cuboid spanned by `min` and `max` as a closed
/// six-face solid with outward-oriented planes and shared edges.
///
/// # Panics
/// Panics if the cuboid is degenerate (`min[i] >= max[i]` for some axis).
pub fn cuboid(min: Point3, max: Point3) -> Solid {
    assert!(
        (0..3).all(|i| min[i] < max[i]),
        "degenerate cuboid: {min:?}..{max:?}",
    );
    let corner = |i: usize| {
        Point3::new(
            if i & 1 == 0 { min[0] } else { max[0] },
            if i & 2 == 0 { min[1] } else { max[1] },
            if i & 4 == 0 { min[2] } else { max[2] },
        )
    };
    let vertices: Vec<Vertex> = (0..8).map(|i| Vertex::new(corner(i))).collect();
    let mut edges: HashMap<(usize, usize), Edge> = HashMap::default();
    let mut oriented_edge = |i: usize, j: usize| {
        let key = (usize::min(i, j), usize::max(i, j));
        let edge = edges.entry(key).or_insert_with(|| {
            Edge::new(
                &vertices[key.0],
                &vertices[key.1],
                Curve::Line(Line(corner(key.0), corner(key.1))),
            )
        });
        match i < j {
            true => edge.clone(),
            false => edge.inverse(),
        }
    };
    let faces: Vec<Face> = QUADS
        .iter()
        .map(|&[a, b, c, d]| {
            let wire: Wire = [(a, b), (b, c), (c, d), (d, a)]
                .into_iter()
                .map(|(i, j)| oriented_edge(i, j))
                .collect();
            let plane = Plane::new(corner(a), corner(b), corner(d));
            Face::new(vec![wire], Surface::Plane(plane))
        })
        .collect();
    Solid::new(vec![faces.into_iter().collect()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::*;
    use clearcut_topology::ShellCondition;
    use rustc_hash::FxHashSet;

    #[test]
    fn cuboid_is_closed_and_shares_edges() {
        let solid = cuboid(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 2.0, 3.0));
        let shell = &solid.boundaries()[0];
        assert_eq!(shell.len(), 6);
        assert_eq!(shell.shell_condition(), ShellCondition::Closed);
        assert_eq!(solid.vertex_iter().count(), 8);
        let ids: FxHashSet<_> = solid.edge_iter().map(|edge| edge.id()).collect();
        assert_eq!(ids.len(), 12);
    }

    #[test]
    fn cuboid_faces_point_outward() {
        use crate::geometry::Surface;
        let solid = cuboid(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
        let center = Point3::new(0.5, 0.5, 0.5);
        for face in solid.face_iter() {
            let Surface::Plane(plane) = face.oriented_surface();
            let outward = plane.origin() + plane.normal(0.5, 0.5) * 0.1;
            assert!(outward.distance(center) > plane.origin().distance(center));
        }
    }
}
