//! End-to-end scenarios over the rectilinear kernel: classification,
//! imprinting and merging of axis-aligned assemblies.

use clearcut_base::assert_near;
use clearcut_base::cgmath64::Point3;
use clearcut_engine::{
    classify_intersection, imprint_document, merge_shapes, scan_overlaps, Document,
    ImprintConfig, ImprintStatus, IntersectStatus, MergeConfig, OverlapConfig, PairClass,
    WorkerPool,
};
use clearcut_kernel::primitive::cuboid;
use clearcut_kernel::queries::shape_volume;
use clearcut_kernel::{Kernel, RectKernel, Shape};
use std::sync::Arc;

fn cube(min: [f64; 3], max: [f64; 3]) -> Shape {
    Shape::Solid(cuboid(Point3::from(min), Point3::from(max)))
}

fn classify(a: &Shape, b: &Shape, ladder: &[f64]) -> IntersectStatus {
    classify_intersection(&RectKernel::new(), a, b, ladder, None).unwrap()
}

#[test]
fn identical_cubes_overlap_entirely() {
    let a = cube([0.0; 3], [10.0; 3]);
    let b = cube([0.0; 3], [10.0; 3]);
    match classify(&a, &b, &[0.5]) {
        IntersectStatus::Overlap {
            vol_common,
            vol_cut_i,
            vol_cut_j,
        } => {
            assert_near!(vol_common, 1000.0);
            assert_near!(vol_cut_i, 0.0);
            assert_near!(vol_cut_j, 0.0);
        }
        status => panic!("expected overlap, got {status:?}"),
    }

    // imprinting hands the whole volume to one side
    let kernel = RectKernel::new();
    let status = clearcut_engine::imprint::imprint_pair(
        &kernel,
        &a,
        &b,
        &ImprintConfig::default(),
    )
    .unwrap();
    match status {
        ImprintStatus::MergeIntoShape(shape, tool)
        | ImprintStatus::MergeIntoTool(tool, shape) => {
            assert_near!(shape_volume(&shape), 1000.0);
            assert_near!(shape_volume(&tool), 0.0);
        }
        status => panic!("expected a merge, got {status:?}"),
    }
}

#[test]
fn nested_cube_overlap_volumes() {
    let big = cube([0.0; 3], [10.0; 3]);
    let small = cube([2.0; 3], [8.0; 3]);
    match classify(&big, &small, &[0.001, 0.0]) {
        IntersectStatus::Overlap {
            vol_common,
            vol_cut_i,
            vol_cut_j,
        } => {
            assert_near!(vol_common, 216.0);
            assert_near!(vol_cut_i, 784.0);
            assert_near!(vol_cut_j, 0.0);
        }
        status => panic!("expected overlap, got {status:?}"),
    }
}

#[test]
fn contact_variants_touch() {
    let origin = cube([0.0; 3], [5.0; 3]);
    // face, edge and vertex contact
    for offset in [[5.0, 0.0, 0.0], [5.0, 5.0, 0.0], [5.0, 5.0, 5.0]] {
        let other = cube(
            offset,
            [offset[0] + 5.0, offset[1] + 5.0, offset[2] + 5.0],
        );
        assert_eq!(
            classify(&origin, &other, &[0.5]),
            IntersectStatus::Touching,
            "offset {offset:?}",
        );
    }
}

#[test]
fn fuzzy_band_sweep() {
    let a = cube([0.0; 3], [5.0; 3]);
    for (z, expected) in [
        (4.4, "overlap"),
        (4.6, "touch"),
        (5.4, "touch"),
        (5.6, "distinct"),
    ] {
        let b = cube([0.0, 0.0, z], [5.0, 5.0, z + 5.0]);
        let status = classify(&a, &b, &[0.5]);
        let got = match status {
            IntersectStatus::Overlap { .. } => "overlap",
            IntersectStatus::Touching => "touch",
            IntersectStatus::Distinct => "distinct",
            status => panic!("unexpected status {status:?} at z = {z}"),
        };
        assert_eq!(got, expected, "z = {z}");
        if got == "distinct" {
            // distinct pairs keep a positive surface distance
            let distance = RectKernel::new().min_distance(&a, &b).unwrap();
            assert!(distance > 0.0);
        }
    }
}

#[test]
fn corner_overlap_imprints_into_the_larger_solid() {
    let kernel = RectKernel::new();
    let mut document = Document::new(vec![
        cube([0.0; 3], [5.0; 3]),
        cube([4.0; 3], [6.0; 3]),
    ]);
    let config = ImprintConfig {
        tolerance: 0.1,
        ..Default::default()
    };
    let outcome = imprint_document(&kernel, &mut document, &[(0, 1)], &config).unwrap();
    assert_eq!(outcome.applied, 1);
    assert_eq!(outcome.failed, 0);
    assert_near!(shape_volume(&document.shapes()[0]), 125.0);
    assert_near!(shape_volume(&document.shapes()[1]), 7.0);
    // imprinting preserves the total volume
    let total: f64 = document.shapes().iter().map(shape_volume).sum();
    assert_near!(total, 132.0);
}

#[test]
fn scan_reports_rows_and_respects_the_prefilter() {
    let kernel = Arc::new(RectKernel::new());
    let document = Document::new(vec![
        cube([0.0; 3], [5.0; 3]),
        cube([4.0; 3], [6.0; 3]),     // corner overlap with 0
        cube([5.0, 0.0, 0.0], [10.0, 5.0, 5.0]), // face contact with 0
        cube([100.0; 3], [101.0; 3]), // far away, prefiltered out
    ]);
    let pool = WorkerPool::new(2);
    let config = OverlapConfig {
        threads: 2,
        max_common_volume_ratio: 0.5,
        ..Default::default()
    };
    let mut rows = Vec::new();
    let summary =
        scan_overlaps(&kernel, &document, &config, &pool, |row| rows.push(*row)).unwrap();
    assert_eq!(summary.pairs, 6);
    // the far cube never reaches classification
    assert_eq!(summary.candidates, 3);
    // both (0, 1) and (1, 2) share a corner of the middle cube
    assert_eq!(summary.overlap, 2);
    assert_eq!(summary.touch, 1);
    assert_eq!(summary.failed + summary.timeout, 0);

    rows.sort_by_key(|row| (row.i, row.j));
    let overlap_row = rows
        .iter()
        .find(|row| (row.i, row.j) == (0, 1))
        .unwrap();
    assert_eq!(overlap_row.class, PairClass::Overlap);
    let (vol_common, vol_i, vol_j) = overlap_row.volumes.unwrap();
    assert_near!(vol_common, 1.0);
    assert_near!(vol_i, 125.0);
    assert_near!(vol_j, 8.0);
}

#[test]
fn bad_overlap_ratio_flags_large_overlaps() {
    let kernel = Arc::new(RectKernel::new());
    let document = Document::new(vec![cube([0.0; 3], [5.0; 3]), cube([4.0; 3], [6.0; 3])]);
    let pool = WorkerPool::new(1);
    // overlap of 1 against a smaller solid of 8: 12.5 %, above 1 %
    let config = OverlapConfig::default();
    let mut rows = Vec::new();
    let summary =
        scan_overlaps(&kernel, &document, &config, &pool, |row| rows.push(*row)).unwrap();
    assert_eq!(summary.bad_overlap, 1);
    assert!(!summary.is_clean());
    assert_eq!(rows[0].class, PairClass::BadOverlap);
}

#[test]
fn schedule_independence_across_pool_sizes() {
    let shapes: Vec<Shape> = (0..6)
        .map(|i| {
            let x = i as f64 * 4.5; // each neighbour overlaps the next by 0.5
            cube([x, 0.0, 0.0], [x + 5.0, 5.0, 5.0])
        })
        .collect();
    let document = Document::new(shapes);
    let kernel = Arc::new(RectKernel::new());
    let config = OverlapConfig {
        max_common_volume_ratio: 0.5,
        ..Default::default()
    };

    let mut collected = Vec::new();
    for threads in [1, 4] {
        let pool = WorkerPool::new(threads);
        let mut rows = Vec::new();
        let summary =
            scan_overlaps(&kernel, &document, &config, &pool, |row| rows.push(*row)).unwrap();
        assert!(summary.is_clean());
        rows.sort_by(|a, b| (a.i, a.j).cmp(&(b.i, b.j)));
        collected.push(rows);
    }
    let printable: Vec<Vec<(usize, usize, PairClass)>> = collected
        .iter()
        .map(|rows| rows.iter().map(|row| (row.i, row.j, row.class)).collect())
        .collect();
    assert_eq!(printable[0], printable[1]);
    assert_eq!(printable[0].len(), 5);
}

#[test]
fn full_pipeline_scan_imprint_merge() {
    let kernel = Arc::new(RectKernel::new());
    let mut document = Document::new(vec![
        cube([0.0, 0.0, 0.0], [5.0, 5.0, 5.0]),
        cube([4.5, 0.0, 0.0], [10.0, 5.0, 5.0]),
    ]);
    let volume_before: f64 = document.shapes().iter().map(shape_volume).sum();

    // stage one: discover the overlapping pair
    let pool = WorkerPool::new(2);
    let config = OverlapConfig {
        max_common_volume_ratio: 0.5,
        ..Default::default()
    };
    let mut rows = Vec::new();
    scan_overlaps(&kernel, &document, &config, &pool, |row| rows.push(*row)).unwrap();
    let pairs: Vec<(usize, usize)> = rows
        .iter()
        .filter(|row| row.class.is_overlap())
        .map(|row| (row.i, row.j))
        .collect();
    assert_eq!(pairs, vec![(0, 1)]);

    // stage two: imprint, handing the overlap to the larger remainder
    let outcome =
        imprint_document(&*kernel, &mut document, &pairs, &ImprintConfig::default()).unwrap();
    assert_eq!(outcome.into_result().unwrap().applied, 1);
    let volume_after: f64 = document.shapes().iter().map(shape_volume).sum();
    assert_near!(volume_after, volume_before - 12.5); // the double-counted band

    // stage three: merge shares the imprinted interface
    let mut shapes = document.into_shapes();
    let merged = merge_shapes(&mut shapes, &MergeConfig::default()).unwrap();
    assert!(merged.vertex_clusters > 0);
    assert_eq!(shapes.len(), 2);
    let volume_merged: f64 = shapes.iter().map(shape_volume).sum();
    assert_near!(volume_merged, volume_after);
}
