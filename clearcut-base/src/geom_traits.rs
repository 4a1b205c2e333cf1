use crate::cgmath64::*;

/// Parametric curves
pub trait ParametricCurve: Clone {
    /// The curve is in the space of `Self::Point`.
    type Point;
    /// The derivation vector of the curve.
    type Vector;
    /// Substitutes the parameter `t`.
    fn subs(&self, t: f64) -> Self::Point;
    /// Returns the derivation.
    fn der(&self, t: f64) -> Self::Vector;
    /// The range of the parameter of the curve.
    fn parameter_range(&self) -> (f64, f64);
    /// The front end point of the curve.
    fn front(&self) -> Self::Point {
        let (t, _) = self.parameter_range();
        self.subs(t)
    }
    /// The back end point of the curve.
    fn back(&self) -> Self::Point {
        let (_, t) = self.parameter_range();
        self.subs(t)
    }
}

/// Parametric surfaces
pub trait ParametricSurface: Clone {
    /// The surface is in the space of `Self::Point`.
    type Point;
    /// The derivation vector of the surface.
    type Vector;
    /// Substitutes the parameter `(u, v)`.
    fn subs(&self, u: f64, v: f64) -> Self::Point;
    /// Returns the normal vector at `(u, v)`.
    fn normal(&self, u: f64, v: f64) -> Self::Vector;
    /// The range of the parameters of the surface.
    fn parameter_range(&self) -> ((f64, f64), (f64, f64));
    /// The period of the `u`-parameter, `None` for non-periodic surfaces.
    #[inline(always)]
    fn u_period(&self) -> Option<f64> { None }
    /// The period of the `v`-parameter, `None` for non-periodic surfaces.
    #[inline(always)]
    fn v_period(&self) -> Option<f64> { None }
}

/// Oriented and reversible geometric elements
pub trait Invertible: Clone {
    /// Inverts `self`.
    fn invert(&mut self);
    /// Returns the inverse.
    fn inverse(&self) -> Self {
        let mut inv = self.clone();
        inv.invert();
        inv
    }
}

/// Searching the parameter that maps to a given point
pub trait SearchParameter {
    /// point
    type Point;
    /// parameter: `f64` for curves and `(f64, f64)` for surfaces
    type Parameter;
    /// Returns the parameter `t` such that `self.subs(t)` is near `point`,
    /// `None` if no such parameter exists within `trials` refinement steps.
    fn search_parameter(
        &self,
        point: Self::Point,
        hint: Option<Self::Parameter>,
        trials: usize,
    ) -> Option<Self::Parameter>;
}

/// Searching the parameter of the point nearest to a given point
pub trait SearchNearestParameter {
    /// point
    type Point;
    /// parameter: `f64` for curves and `(f64, f64)` for surfaces
    type Parameter;
    /// Returns the parameter of the projection of `point` onto `self`.
    fn search_nearest_parameter(
        &self,
        point: Self::Point,
        hint: Option<Self::Parameter>,
        trials: usize,
    ) -> Option<Self::Parameter>;
}

/// Curves in 3-space
pub trait ParametricCurve3D:
    ParametricCurve<Point = Point3, Vector = Vector3>
    + Invertible
    + SearchNearestParameter<Point = Point3, Parameter = f64>
{
}
impl<C> ParametricCurve3D for C where
    C: ParametricCurve<Point = Point3, Vector = Vector3>
        + Invertible
        + SearchNearestParameter<Point = Point3, Parameter = f64>
{
}

/// Surfaces in 3-space
pub trait ParametricSurface3D:
    ParametricSurface<Point = Point3, Vector = Vector3>
    + Invertible
    + SearchParameter<Point = Point3, Parameter = (f64, f64)>
{
}
impl<S> ParametricSurface3D for S where
    S: ParametricSurface<Point = Point3, Vector = Vector3>
        + Invertible
        + SearchParameter<Point = Point3, Parameter = (f64, f64)>
{
}
