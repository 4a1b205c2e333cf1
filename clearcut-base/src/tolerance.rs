use crate::cgmath64::*;
use cgmath::AbsDiffEq;
use std::fmt::Debug;

/// default geometric tolerance of the workspace, in model units
///
/// Stage-specific slack (fuzzy values, clustering tolerances, bounding-box
/// clearances) is always per invocation; this constant only absorbs
/// floating-point noise.
pub const TOLERANCE: f64 = 1.0e-6;

/// companion of [`TOLERANCE`] for squared distances and determinants
pub const TOLERANCE2: f64 = TOLERANCE * TOLERANCE;

/// Tolerance-aware closeness for everything carrying `f64` coordinates.
pub trait Tolerance: AbsDiffEq<Epsilon = f64> + Debug {
    /// Whether `other` lies within `tol` of `self`, per coordinate.
    #[inline(always)]
    fn within(&self, other: &Self, tol: f64) -> bool { self.abs_diff_eq(other, tol) }

    /// `within` at the workspace default.
    #[inline(always)]
    fn near(&self, other: &Self) -> bool { self.within(other, TOLERANCE) }

    /// `within` at squared order, for values that are themselves squared.
    #[inline(always)]
    fn near2(&self, other: &Self) -> bool { self.within(other, TOLERANCE2) }
}

impl<T: AbsDiffEq<Epsilon = f64> + Debug> Tolerance for T {}

/// Vanishing quantities: lengths, determinants and squared norms that the
/// geometry treats as zero.
pub trait NearZero: Tolerance + Zero {
    /// near zero at the workspace default
    #[inline(always)]
    fn so_small(&self) -> bool { self.near(&Self::zero()) }

    /// near zero at squared order
    #[inline(always)]
    fn so_small2(&self) -> bool { self.near2(&Self::zero()) }
}

impl<T: Tolerance + Zero> NearZero for T {}

/// Asserts that two values lie within the workspace tolerance of each
/// other.
#[macro_export]
macro_rules! assert_near {
    ($left: expr, $right: expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => assert!(
                $crate::tolerance::Tolerance::near(left, right),
                "not within tolerance\n left: {left:?}\nright: {right:?}",
            ),
        }
    };
    ($left: expr, $right: expr, $($arg: tt)+) => {
        match (&$left, &$right) {
            (left, right) => assert!(
                $crate::tolerance::Tolerance::near(left, right),
                "not within tolerance\n left: {left:?}\nright: {right:?}\n{}",
                format_args!($($arg)+),
            ),
        }
    };
}

/// Squared-order companion of [`assert_near!`].
#[macro_export]
macro_rules! assert_near2 {
    ($left: expr, $right: expr $(,)?) => {
        match (&$left, &$right) {
            (left, right) => assert!(
                $crate::tolerance::Tolerance::near2(left, right),
                "not within squared tolerance\n left: {left:?}\nright: {right:?}",
            ),
        }
    };
    ($left: expr, $right: expr, $($arg: tt)+) => {
        match (&$left, &$right) {
            (left, right) => assert!(
                $crate::tolerance::Tolerance::near2(left, right),
                "not within squared tolerance\n left: {left:?}\nright: {right:?}\n{}",
                format_args!($($arg)+),
            ),
        }
    };
}
