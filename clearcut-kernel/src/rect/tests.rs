use super::*;
use crate::queries::shape_volume;
use std::time::Duration;

fn shape(min: [f64; 3], max: [f64; 3]) -> Shape {
    Shape::Solid(cuboid(Point3::from(min), Point3::from(max)))
}

fn pave(a: &Shape, b: &Shape, fuzzy: f64) -> RectPave {
    RectKernel::new()
        .pave_fill(a, b, fuzzy, &ProgressScope::unbounded())
        .unwrap()
        .0
}

#[test]
fn nested_cubes_volumes() {
    let kernel = RectKernel::new();
    let big = shape([0.0; 3], [10.0; 3]);
    let small = shape([2.0; 3], [8.0; 3]);
    let pave = pave(&big, &small, 0.001);
    let (common, _) = kernel.common(&pave).unwrap();
    let (cut, _) = kernel.cut(&pave).unwrap();
    let (cut21, _) = kernel.cut21(&pave).unwrap();
    assert_near!(shape_volume(&common), 216.0);
    assert_near!(shape_volume(&cut), 784.0);
    assert!(!kernel.has_solids(&cut21));
    assert_near!(shape_volume(&cut21), 0.0);
}

#[test]
fn identical_cubes_collapse_to_common() {
    let kernel = RectKernel::new();
    let a = shape([0.0; 3], [10.0; 3]);
    let b = shape([0.0; 3], [10.0; 3]);
    let pave = pave(&a, &b, 0.5);
    assert_near!(shape_volume(&kernel.common(&pave).unwrap().0), 1000.0);
    assert!(!kernel.has_solids(&kernel.cut(&pave).unwrap().0));
    assert!(!kernel.has_solids(&kernel.cut21(&pave).unwrap().0));
}

#[test]
fn fuzzy_band_decides_common_and_section() {
    let kernel = RectKernel::new();
    let a = shape([0.0, 0.0, 0.0], [5.0, 5.0, 5.0]);
    for (z, common, contact) in [
        (4.4, true, true),  // real overlap of 0.6
        (4.6, false, true), // overlap thinner than the fuzzy value
        (5.4, false, true), // gap thinner than the fuzzy value
        (5.6, false, false),
    ] {
        let b = shape([0.0, 0.0, z], [5.0, 5.0, z + 5.0]);
        let pave = pave(&a, &b, 0.5);
        let got = kernel.has_solids(&kernel.common(&pave).unwrap().0);
        assert_eq!(got, common, "common at z = {z}");
        let (section, _) = kernel.section(&pave).unwrap();
        assert_eq!(kernel.section_has_vertices(&section), contact, "contact at z = {z}");
    }
}

#[test]
fn cut_decomposition_is_volume_exact() {
    let kernel = RectKernel::new();
    let a = shape([0.0; 3], [5.0; 3]);
    let b = shape([4.0; 3], [6.0; 3]);
    let pave = pave(&a, &b, 0.1);
    let (common, _) = kernel.common(&pave).unwrap();
    let (cut, _) = kernel.cut(&pave).unwrap();
    let (cut21, _) = kernel.cut21(&pave).unwrap();
    assert_near!(shape_volume(&common), 1.0);
    assert_near!(shape_volume(&cut), 124.0);
    assert_near!(shape_volume(&cut21), 7.0);
    // every piece of the decomposition must itself be a valid closed solid
    for solid in cut.solid_iter() {
        assert_eq!(
            solid.boundaries()[0].shell_condition(),
            clearcut_topology::ShellCondition::Closed,
        );
    }
}

#[test]
fn fuse_restores_the_original_volume() {
    let kernel = RectKernel::new();
    let a = shape([0.0; 3], [5.0; 3]);
    let b = shape([4.0; 3], [6.0; 3]);
    let pave = pave(&a, &b, 0.1);
    let (common, _) = kernel.common(&pave).unwrap();
    let (cut, _) = kernel.cut(&pave).unwrap();
    let scope = ProgressScope::unbounded();
    let (fused, _) = kernel.fuse(&cut, &common, 0.1, &scope).unwrap();
    assert_near!(shape_volume(&fused), 125.0);
}

#[test]
fn min_distance_between_unions() {
    let kernel = RectKernel::new();
    let a = shape([0.0; 3], [1.0; 3]);
    let b = shape([3.0, 0.0, 0.0], [4.0, 1.0, 1.0]);
    assert_near!(kernel.min_distance(&a, &b).unwrap(), 2.0);
    let c = shape([3.0, 4.0, 0.0], [4.0, 5.0, 1.0]);
    assert_near!(kernel.min_distance(&a, &c).unwrap(), (4.0f64 + 9.0).sqrt());
}

#[test]
fn non_rectilinear_solid_is_unsupported() {
    // a cuboid with one vertex pulled off its corner
    let solid = cuboid(Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 1.0, 1.0));
    for vertex in solid.vertex_iter() {
        if vertex.point() == Point3::new(1.0, 1.0, 1.0) {
            vertex.set_point(Point3::new(1.3, 1.1, 0.9));
        }
    }
    let shape = Shape::Solid(solid);
    let err = RectKernel::new()
        .pave_fill(&shape, &shape, 0.0, &ProgressScope::unbounded())
        .unwrap_err();
    assert!(matches!(err, KernelError::Unsupported(_)));
}

#[test]
fn expired_scope_cancels_pave_fill() {
    let scope = ProgressScope::with_timeout(Duration::ZERO);
    std::thread::sleep(Duration::from_millis(2));
    let a = shape([0.0; 3], [1.0; 3]);
    let err = RectKernel::new().pave_fill(&a, &a, 0.0, &scope).unwrap_err();
    assert_eq!(err, KernelError::Cancelled);
}
