use crate::base::*;
use crate::topology::{Face, Shape, Solid};
use crate::traits::{Defect, Validity};
use clearcut_topology::ShellCondition;

/// The signed volume contribution of one face, by the divergence theorem.
/// Exact for planar faces bounded by straight edges.
fn face_contribution(face: &Face) -> f64 {
    face.boundaries()
        .iter()
        .map(|wire| {
            let polygon: Vec<Point3> = wire.vertex_iter().map(|vertex| vertex.point()).collect();
            polygon
                .windows(2)
                .skip(1)
                .map(|pair| {
                    polygon[0]
                        .to_vec()
                        .dot(pair[0].to_vec().cross(pair[1].to_vec()))
                        / 6.0
                })
                .sum::<f64>()
        })
        .sum()
}

/// The volume of a solid, computed from its boundary faces.
pub fn solid_volume(solid: &Solid) -> f64 { solid.face_iter().map(face_contribution).sum() }

/// The volume of a shape: the sum over its member solids.
pub fn shape_volume(shape: &Shape) -> f64 { shape.solid_iter().map(solid_volume).sum() }

/// All vertex points of a shape, each vertex entity once.
pub fn shape_points(shape: &Shape) -> Vec<Point3> {
    shape.vertex_iter().map(|vertex| vertex.point()).collect()
}

/// Checks the boundary shells of every member solid.
pub fn check_shape(shape: &Shape) -> Validity {
    let mut defects = Vec::new();
    if shape.solid_count() == 0 {
        defects.push(Defect::Empty);
    }
    for solid in shape.solid_iter() {
        for shell in solid.boundaries() {
            match shell.shell_condition() {
                ShellCondition::Closed => {}
                ShellCondition::Oriented => defects.push(Defect::OpenShell),
                _ => defects.push(Defect::MisorientedShell),
            }
        }
    }
    Validity { defects }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::*;
    use crate::primitive::cuboid;

    #[test]
    fn cuboid_volume_is_exact() {
        let solid = cuboid(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 3.0, 4.0));
        assert_near!(solid_volume(&solid), 24.0);
        // translation invariance of the divergence sum
        let moved = cuboid(Point3::new(-7.0, 5.0, 11.0), Point3::new(-5.0, 8.0, 15.0));
        assert_near!(solid_volume(&moved), 24.0);
    }

    #[test]
    fn compound_volume_sums_members() {
        let shape = Shape::Compound(vec![
            cuboid(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0)),
            cuboid(Point3::new(5.0, 0.0, 0.0), Point3::new(6.0, 2.0, 1.0)),
        ]);
        assert_near!(shape_volume(&shape), 3.0);
        assert!(check_shape(&shape).is_valid());
    }

    #[test]
    fn empty_compound_is_a_defect() {
        let shape = Shape::Compound(Vec::new());
        let validity = check_shape(&shape);
        assert!(!validity.is_valid());
        assert_eq!(validity.defects, vec![Defect::Empty]);
    }
}
