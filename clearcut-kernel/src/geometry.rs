use crate::base::*;
use derive_more::From;
use serde::{Deserialize, Serialize};

/// line segment from the first point to the second, parametrised over `[0, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Line(pub Point3, pub Point3);

impl ParametricCurve for Line {
    type Point = Point3;
    type Vector = Vector3;
    #[inline(always)]
    fn subs(&self, t: f64) -> Point3 { self.0 + (self.1 - self.0) * t }
    #[inline(always)]
    fn der(&self, _t: f64) -> Vector3 { self.1 - self.0 }
    #[inline(always)]
    fn parameter_range(&self) -> (f64, f64) { (0.0, 1.0) }
}

impl Invertible for Line {
    #[inline(always)]
    fn invert(&mut self) { *self = Line(self.1, self.0); }
}

impl SearchNearestParameter for Line {
    type Point = Point3;
    type Parameter = f64;
    /// Closed form; the result is clamped onto the segment.
    fn search_nearest_parameter(
        &self,
        point: Point3,
        _hint: Option<f64>,
        _trials: usize,
    ) -> Option<f64> {
        let dir = self.1 - self.0;
        let len2 = dir.magnitude2();
        match len2.so_small2() {
            true => None,
            false => Some(((point - self.0).dot(dir) / len2).clamp(0.0, 1.0)),
        }
    }
}

impl SearchParameter for Line {
    type Point = Point3;
    type Parameter = f64;
    fn search_parameter(&self, point: Point3, hint: Option<f64>, trials: usize) -> Option<f64> {
        let t = self.search_nearest_parameter(point, hint, trials)?;
        match point.distance(self.subs(t)).so_small() {
            true => Some(t),
            false => None,
        }
    }
}

/// plane through `o`, with `u`-axis towards `p` and `v`-axis towards `q`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Plane {
    o: Point3,
    p: Point3,
    q: Point3,
}

impl Plane {
    /// Creates a plane from the origin and the points spanning the axes.
    #[inline(always)]
    pub const fn new(origin: Point3, one: Point3, another: Point3) -> Plane {
        Plane {
            o: origin,
            p: one,
            q: another,
        }
    }
    /// Returns the origin.
    #[inline(always)]
    pub const fn origin(&self) -> Point3 { self.o }
    /// Returns the u-axis.
    #[inline(always)]
    pub fn u_axis(&self) -> Vector3 { self.p - self.o }
    /// Returns the v-axis.
    #[inline(always)]
    pub fn v_axis(&self) -> Vector3 { self.q - self.o }
}

impl ParametricSurface for Plane {
    type Point = Point3;
    type Vector = Vector3;
    #[inline(always)]
    fn subs(&self, u: f64, v: f64) -> Point3 { self.o + self.u_axis() * u + self.v_axis() * v }
    #[inline(always)]
    fn normal(&self, _u: f64, _v: f64) -> Vector3 {
        self.u_axis().cross(self.v_axis()).normalize()
    }
    #[inline(always)]
    fn parameter_range(&self) -> ((f64, f64), (f64, f64)) { ((0.0, 1.0), (0.0, 1.0)) }
}

impl Invertible for Plane {
    /// Swapping the axes reverses the normal.
    #[inline(always)]
    fn invert(&mut self) { *self = Plane::new(self.o, self.q, self.p); }
}

impl SearchNearestParameter for Plane {
    type Point = Point3;
    type Parameter = (f64, f64);
    /// Projection of `point` onto the plane, by the normal equations of the
    /// two spanning axes.
    fn search_nearest_parameter(
        &self,
        point: Point3,
        _hint: Option<(f64, f64)>,
        _trials: usize,
    ) -> Option<(f64, f64)> {
        let (ua, va) = (self.u_axis(), self.v_axis());
        let d = point - self.o;
        let (uu, uv, vv) = (ua.magnitude2(), ua.dot(va), va.magnitude2());
        let det = uu * vv - uv * uv;
        if det.so_small2() {
            return None;
        }
        let (du, dv) = (d.dot(ua), d.dot(va));
        Some(((du * vv - dv * uv) / det, (dv * uu - du * uv) / det))
    }
}

impl SearchParameter for Plane {
    type Point = Point3;
    type Parameter = (f64, f64);
    fn search_parameter(
        &self,
        point: Point3,
        hint: Option<(f64, f64)>,
        trials: usize,
    ) -> Option<(f64, f64)> {
        let (u, v) = self.search_nearest_parameter(point, hint, trials)?;
        match point.distance(self.subs(u, v)).so_small() {
            true => Some((u, v)),
            false => None,
        }
    }
}

/// 3-dimensional curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, From)]
pub enum Curve {
    /// line segment
    Line(Line),
}

impl ParametricCurve for Curve {
    type Point = Point3;
    type Vector = Vector3;
    #[inline(always)]
    fn subs(&self, t: f64) -> Point3 {
        match self {
            Curve::Line(line) => line.subs(t),
        }
    }
    #[inline(always)]
    fn der(&self, t: f64) -> Vector3 {
        match self {
            Curve::Line(line) => line.der(t),
        }
    }
    #[inline(always)]
    fn parameter_range(&self) -> (f64, f64) {
        match self {
            Curve::Line(line) => line.parameter_range(),
        }
    }
}

impl Invertible for Curve {
    #[inline(always)]
    fn invert(&mut self) {
        match self {
            Curve::Line(line) => line.invert(),
        }
    }
}

impl SearchNearestParameter for Curve {
    type Point = Point3;
    type Parameter = f64;
    #[inline(always)]
    fn search_nearest_parameter(
        &self,
        point: Point3,
        hint: Option<f64>,
        trials: usize,
    ) -> Option<f64> {
        match self {
            Curve::Line(line) => line.search_nearest_parameter(point, hint, trials),
        }
    }
}

impl SearchParameter for Curve {
    type Point = Point3;
    type Parameter = f64;
    #[inline(always)]
    fn search_parameter(&self, point: Point3, hint: Option<f64>, trials: usize) -> Option<f64> {
        match self {
            Curve::Line(line) => line.search_parameter(point, hint, trials),
        }
    }
}

/// 3-dimensional surface
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, From)]
pub enum Surface {
    /// plane
    Plane(Plane),
}

impl ParametricSurface for Surface {
    type Point = Point3;
    type Vector = Vector3;
    #[inline(always)]
    fn subs(&self, u: f64, v: f64) -> Point3 {
        match self {
            Surface::Plane(plane) => plane.subs(u, v),
        }
    }
    #[inline(always)]
    fn normal(&self, u: f64, v: f64) -> Vector3 {
        match self {
            Surface::Plane(plane) => plane.normal(u, v),
        }
    }
    #[inline(always)]
    fn parameter_range(&self) -> ((f64, f64), (f64, f64)) {
        match self {
            Surface::Plane(plane) => plane.parameter_range(),
        }
    }
}

impl Invertible for Surface {
    #[inline(always)]
    fn invert(&mut self) {
        match self {
            Surface::Plane(plane) => plane.invert(),
        }
    }
}

impl SearchNearestParameter for Surface {
    type Point = Point3;
    type Parameter = (f64, f64);
    #[inline(always)]
    fn search_nearest_parameter(
        &self,
        point: Point3,
        hint: Option<(f64, f64)>,
        trials: usize,
    ) -> Option<(f64, f64)> {
        match self {
            Surface::Plane(plane) => plane.search_nearest_parameter(point, hint, trials),
        }
    }
}

impl SearchParameter for Surface {
    type Point = Point3;
    type Parameter = (f64, f64);
    #[inline(always)]
    fn search_parameter(
        &self,
        point: Point3,
        hint: Option<(f64, f64)>,
        trials: usize,
    ) -> Option<(f64, f64)> {
        match self {
            Surface::Plane(plane) => plane.search_parameter(point, hint, trials),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::*;

    #[test]
    fn line_projection() {
        let line = Line(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 0.0, 0.0));
        let t = line
            .search_nearest_parameter(Point3::new(0.5, 3.0, 0.0), None, 0)
            .unwrap();
        assert_near!(t, 0.25);
        // off the segment: the parameter clamps to the end
        let t = line
            .search_nearest_parameter(Point3::new(5.0, 0.0, 0.0), None, 0)
            .unwrap();
        assert_near!(t, 1.0);
        assert!(line.search_parameter(Point3::new(0.5, 3.0, 0.0), None, 0).is_none());
    }

    #[test]
    fn plane_projection() {
        let plane = Plane::new(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(0.0, 2.0, 1.0),
        );
        let (u, v) = plane
            .search_nearest_parameter(Point3::new(0.5, 1.0, 7.0), None, 0)
            .unwrap();
        assert_near!(u, 0.5);
        assert_near!(v, 0.5);
        assert_near!(plane.normal(0.0, 0.0), Vector3::unit_z());
        let mut flipped = plane;
        flipped.invert();
        assert_near!(flipped.normal(0.0, 0.0), -Vector3::unit_z());
    }
}
