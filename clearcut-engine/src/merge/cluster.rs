//! Stage M1: vertex clustering.
//!
//! Every vertex of the assembly is indexed by its position; a flood fill
//! groups vertices whose tolerance-expanded spheres mutually intersect.
//! Each cluster elects an average-point representative.

use super::origin::Origin;
use clearcut_base::cgmath64::*;
use clearcut_base::tolerance::TOLERANCE;
use clearcut_topology::{Shape, Vertex};
use rustc_hash::FxHashMap as HashMap;

/// spatial hash over cubic cells
struct VertexIndex {
    cell_size: f64,
    cells: HashMap<(i64, i64, i64), Vec<usize>>,
}

impl VertexIndex {
    fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: HashMap::default(),
        }
    }

    fn cell_of(&self, point: Point3) -> (i64, i64, i64) {
        let coord = |x: f64| (x / self.cell_size).floor() as i64;
        (coord(point[0]), coord(point[1]), coord(point[2]))
    }

    fn insert(&mut self, index: usize, point: Point3) {
        self.cells.entry(self.cell_of(point)).or_default().push(index);
    }

    /// candidate neighbours: everything in the 27 cells around `point`
    fn neighbours(&self, point: Point3) -> impl Iterator<Item = usize> + '_ {
        let (cx, cy, cz) = self.cell_of(point);
        (-1..=1).flat_map(move |dx| {
            (-1..=1).flat_map(move |dy| {
                (-1..=1).flat_map(move |dz| {
                    self.cells
                        .get(&(cx + dx, cy + dy, cz + dz))
                        .into_iter()
                        .flatten()
                        .copied()
                })
            })
        })
    }
}

/// Clusters the vertices of all shapes and binds every non-singleton
/// cluster in the mapping. Returns the number of clusters formed.
pub(super) fn cluster_vertices<C, S>(
    shapes: &[Shape<Point3, C, S>],
    tolerance: f64,
    origin: &mut Origin<C, S>,
) -> usize {
    let mut vertices: Vec<Vertex<Point3>> = Vec::new();
    for shape in shapes {
        vertices.extend(shape.vertex_iter().cloned());
    }
    // a vertex entity shared between shapes must be indexed once
    {
        let mut seen = rustc_hash::FxHashSet::default();
        vertices.retain(|vertex| seen.insert(vertex.id()));
    }
    let points: Vec<Point3> = vertices.iter().map(Vertex::point).collect();

    // two tolerance-spheres intersect when the centres are within twice the
    // tolerance
    let reach = 2.0 * tolerance + TOLERANCE;
    let mut index = VertexIndex::new(f64::max(reach, TOLERANCE));
    for (i, &point) in points.iter().enumerate() {
        index.insert(i, point);
    }

    let mut cluster_of = vec![usize::MAX; vertices.len()];
    let mut clusters = 0usize;
    for seed in 0..vertices.len() {
        if cluster_of[seed] != usize::MAX {
            continue;
        }
        let mut members = vec![seed];
        cluster_of[seed] = clusters;
        let mut cursor = 0;
        while cursor < members.len() {
            let current = members[cursor];
            cursor += 1;
            let candidates: Vec<usize> = index.neighbours(points[current]).collect();
            for other in candidates {
                if cluster_of[other] == usize::MAX
                    && points[current].distance(points[other]) <= reach
                {
                    cluster_of[other] = clusters;
                    members.push(other);
                }
            }
        }
        if members.len() > 1 {
            let sum = members
                .iter()
                .fold(Vector3::zero(), |sum, &i| sum + points[i].to_vec());
            let average = Point3::from_vec(sum / members.len() as f64);
            origin.bind_vertices(
                members.iter().map(|&i| vertices[i].id()),
                Vertex::new(average),
            );
        }
        clusters += 1;
    }
    origin.vertex_cluster_count()
}

#[cfg(test)]
mod tests {
    use super::*;

    type UnitShape = Shape<Point3, (), ()>;

    fn vertex_pair(a: [f64; 3], b: [f64; 3]) -> (Vertex<Point3>, Vertex<Point3>) {
        (Vertex::new(Point3::from(a)), Vertex::new(Point3::from(b)))
    }

    // build a degenerate shape that only carries vertices through one edge
    fn shape_of(v0: &Vertex<Point3>, v1: &Vertex<Point3>) -> UnitShape {
        use clearcut_topology::{Edge, Face, Solid, Wire};
        let e = Edge::new(v0, v1, ());
        let wire: Wire<_, _> = [e.clone(), e.inverse()].into_iter().collect();
        let face = Face::new_unchecked(vec![wire], ());
        Shape::Solid(Solid::new_unchecked(vec![[face].into_iter().collect()]))
    }

    #[test]
    fn near_vertices_cluster_with_average_representative() {
        let (a0, a1) = vertex_pair([0.0, 0.0, 0.0], [10.0, 0.0, 0.0]);
        let (b0, b1) = vertex_pair([0.001, 0.0, 0.0], [20.0, 0.0, 0.0]);
        let shapes = vec![shape_of(&a0, &a1), shape_of(&b0, &b1)];
        let mut origin = Origin::new();
        cluster_vertices(&shapes, 0.001, &mut origin);
        assert_eq!(origin.vertex_cluster_count(), 1);
        let rep = origin.vertex(&a0).unwrap();
        assert_eq!(origin.vertex(&b0).unwrap().id(), rep.id());
        clearcut_base::assert_near!(rep.point(), Point3::new(0.0005, 0.0, 0.0));
        assert!(origin.vertex(&a1).is_none());
        assert!(origin.vertex(&b1).is_none());
    }

    #[test]
    fn distant_vertices_stay_apart() {
        let (a0, a1) = vertex_pair([0.0, 0.0, 0.0], [10.0, 0.0, 0.0]);
        let (b0, b1) = vertex_pair([1.0, 0.0, 0.0], [20.0, 0.0, 0.0]);
        let shapes = vec![shape_of(&a0, &a1), shape_of(&b0, &b1)];
        let mut origin = Origin::new();
        cluster_vertices(&shapes, 0.001, &mut origin);
        assert_eq!(origin.vertex_cluster_count(), 0);
        assert!(origin.is_empty());
    }
}
