//! Property checks of the classifier over randomly placed cuboids.

use clearcut_base::cgmath64::Point3;
use clearcut_engine::{classify_intersection, IntersectStatus};
use clearcut_kernel::primitive::cuboid;
use clearcut_kernel::{RectKernel, Shape};
use proptest::prelude::*;

fn cube(min: [f64; 3], size: [f64; 3]) -> Shape {
    Shape::Solid(cuboid(
        Point3::from(min),
        Point3::new(min[0] + size[0], min[1] + size[1], min[2] + size[2]),
    ))
}

fn coordinate() -> impl Strategy<Value = f64> { -10.0..10.0f64 }

fn extent() -> impl Strategy<Value = f64> { 0.5..6.0f64 }

prop_compose! {
    fn random_cube()(
        min in [coordinate(), coordinate(), coordinate()],
        size in [extent(), extent(), extent()],
    ) -> Shape {
        cube(min, size)
    }
}

fn rank(status: &IntersectStatus) -> u8 {
    match status {
        IntersectStatus::Distinct => 0,
        IntersectStatus::Touching => 1,
        IntersectStatus::Overlap { .. } => 2,
        _ => u8::MAX,
    }
}

proptest! {
    /// The classifier is a pure function of the pair and the ladder.
    #[test]
    fn classification_is_deterministic(a in random_cube(), b in random_cube()) {
        let kernel = RectKernel::new();
        let ladder = [0.001, 0.0];
        let first = classify_intersection(&kernel, &a, &b, &ladder, None).unwrap();
        let second = classify_intersection(&kernel, &a, &b, &ladder, None).unwrap();
        prop_assert_eq!(rank(&first), rank(&second));
    }

    /// Growing the fuzzy value never turns a distinct pair into an overlap.
    #[test]
    fn tolerance_is_monotonic(a in random_cube(), b in random_cube()) {
        let kernel = RectKernel::new();
        let fine = classify_intersection(&kernel, &a, &b, &[0.01], None).unwrap();
        let coarse = classify_intersection(&kernel, &a, &b, &[0.4], None).unwrap();
        if matches!(fine, IntersectStatus::Distinct) {
            prop_assert!(matches!(
                coarse,
                IntersectStatus::Distinct | IntersectStatus::Touching,
            ));
        }
    }

    /// Overlap volumes stay within the smaller solid.
    #[test]
    fn overlap_volume_is_bounded(a in random_cube(), b in random_cube()) {
        let kernel = RectKernel::new();
        if let IntersectStatus::Overlap { vol_common, vol_cut_i, vol_cut_j } =
            classify_intersection(&kernel, &a, &b, &[0.0], None).unwrap()
        {
            prop_assert!(vol_common >= 0.0);
            prop_assert!(vol_cut_i >= 0.0);
            prop_assert!(vol_cut_j >= 0.0);
            let vol_a = vol_cut_i + vol_common;
            let vol_b = vol_cut_j + vol_common;
            prop_assert!(vol_common <= f64::min(vol_a, vol_b) + 1.0e-6);
        }
    }
}
