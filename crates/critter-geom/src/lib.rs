#![warn(missing_docs)]

//! Path curves for the critter sweep mesher.
//!
//! Provides the [`Curve3d`] abstraction the tube sweeper is written against,
//! with a cubic Bezier (the shape every finger, toe and tail is authored
//! with) and a straight line.

use critter_math::{Point3, Tolerance, Vec3};

// =============================================================================
// Curve trait
// =============================================================================

/// A parametric 3D curve.
pub trait Curve3d: Send + Sync + std::fmt::Debug {
    /// Evaluate the curve at parameter `u` to get a 3D point.
    fn evaluate(&self, u: f64) -> Point3;

    /// First derivative at parameter `u` (not normalized).
    fn tangent(&self, u: f64) -> Vec3;

    /// Parameter domain `(u_min, u_max)`.
    fn domain(&self) -> (f64, f64);

    /// Clone into a boxed trait object.
    fn clone_box(&self) -> Box<dyn Curve3d>;
}

impl Clone for Box<dyn Curve3d> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

// =============================================================================
// CubicBezier
// =============================================================================

/// A cubic Bezier curve with four control points.
///
/// Parameterization:
/// `C(u) = (1-u)³P0 + 3(1-u)²u P1 + 3(1-u)u² P2 + u³P3`
///
/// Parameters outside `[0, 1]` extrapolate along the same polynomial; nothing
/// is clamped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// Control points `P0..P3`.
    pub points: [Point3; 4],
}

impl CubicBezier {
    /// Create a curve from its four control points.
    pub fn new(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self {
            points: [p0, p1, p2, p3],
        }
    }

    /// Create a curve from raw `[x, y, z]` control point triples.
    pub fn from_arrays(points: [[f64; 3]; 4]) -> Self {
        let p = points.map(|[x, y, z]| Point3::new(x, y, z));
        Self { points: p }
    }

    /// Position at `u`.
    pub fn point(&self, u: f64) -> Point3 {
        let [p0, p1, p2, p3] = &self.points;
        let inv = 1.0 - u;
        let b0 = inv * inv * inv;
        let b1 = 3.0 * inv * inv * u;
        let b2 = 3.0 * inv * u * u;
        let b3 = u * u * u;
        Point3::from(b0 * p0.coords + b1 * p1.coords + b2 * p2.coords + b3 * p3.coords)
    }

    /// Analytic derivative at `u`:
    /// `3(1-u)²(P1-P0) + 6(1-u)u(P2-P1) + 3u²(P3-P2)`.
    pub fn derivative(&self, u: f64) -> Vec3 {
        let [p0, p1, p2, p3] = &self.points;
        let inv = 1.0 - u;
        3.0 * inv * inv * (p1 - p0) + 6.0 * inv * u * (p2 - p1) + 3.0 * u * u * (p3 - p2)
    }

    /// Scale every control point componentwise.
    pub fn scaled(&self, scale: [f64; 3]) -> Self {
        let [sx, sy, sz] = scale;
        Self {
            points: self
                .points
                .map(|p| Point3::new(p.x * sx, p.y * sy, p.z * sz)),
        }
    }
}

impl Curve3d for CubicBezier {
    fn evaluate(&self, u: f64) -> Point3 {
        self.point(u)
    }

    fn tangent(&self, u: f64) -> Vec3 {
        self.derivative(u)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn clone_box(&self) -> Box<dyn Curve3d> {
        Box::new(*self)
    }
}

// =============================================================================
// Line3d
// =============================================================================

/// A straight 3D segment.
///
/// Parameterization: `P(u) = origin + u * direction`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3d {
    /// Starting point.
    pub origin: Point3,
    /// Direction (magnitude determines speed).
    pub direction: Vec3,
}

impl Line3d {
    /// Create a line so that `u=0` gives `start` and `u=1` gives `end`.
    pub fn from_points(start: Point3, end: Point3) -> Self {
        Self {
            origin: start,
            direction: end - start,
        }
    }
}

impl Curve3d for Line3d {
    fn evaluate(&self, u: f64) -> Point3 {
        self.origin + u * self.direction
    }

    fn tangent(&self, _u: f64) -> Vec3 {
        self.direction
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn clone_box(&self) -> Box<dyn Curve3d> {
        Box::new(*self)
    }
}

// =============================================================================
// Arc length
// =============================================================================

/// Cumulative chord-length table over a curve's domain.
///
/// `lengths[k]` is the polyline length from the domain start to sample `k`,
/// with samples evenly spaced in parameter.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    params: Vec<f64>,
    lengths: Vec<f64>,
}

impl ArcLengthTable {
    /// Sample `samples` chords along `curve` (at least one).
    pub fn new(curve: &dyn Curve3d, samples: usize) -> Self {
        let samples = samples.max(1);
        let (u_min, u_max) = curve.domain();
        let du = (u_max - u_min) / samples as f64;

        let mut params = Vec::with_capacity(samples + 1);
        let mut lengths = Vec::with_capacity(samples + 1);
        let mut prev = curve.evaluate(u_min);
        let mut total = 0.0;
        params.push(u_min);
        lengths.push(0.0);

        for k in 1..=samples {
            let u = u_min + k as f64 * du;
            let p = curve.evaluate(u);
            total += (p - prev).norm();
            params.push(u);
            lengths.push(total);
            prev = p;
        }

        Self { params, lengths }
    }

    /// Total approximate length of the curve.
    pub fn total_length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Parameter at which the curve has covered `fraction` of its length.
    ///
    /// `fraction` is clamped to `[0, 1]`. A zero-length curve maps the
    /// fraction linearly onto the domain.
    pub fn param_at_fraction(&self, fraction: f64) -> f64 {
        let fraction = fraction.clamp(0.0, 1.0);
        let total = self.total_length();
        let first = self.params[0];
        let last = self.params[self.params.len() - 1];
        if total < Tolerance::DEFAULT.degenerate {
            return first + fraction * (last - first);
        }

        let target = fraction * total;
        let k = self.lengths.partition_point(|&l| l < target);
        if k == 0 {
            return first;
        }
        if k >= self.lengths.len() {
            return last;
        }

        let (l0, l1) = (self.lengths[k - 1], self.lengths[k]);
        let (u0, u1) = (self.params[k - 1], self.params[k]);
        let span = l1 - l0;
        if span <= 0.0 {
            u0
        } else {
            u0 + (target - l0) / span * (u1 - u0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn finger() -> CubicBezier {
        CubicBezier::from_arrays([
            [0.0, -0.35, 0.0],
            [0.0, -0.5, 0.3],
            [0.0, -0.6, 0.6],
            [0.0, -0.55, 0.9],
        ])
    }

    #[test]
    fn test_endpoints_interpolated() {
        let c = finger();
        assert!((c.point(0.0) - c.points[0]).norm() < 1e-12);
        assert!((c.point(1.0) - c.points[3]).norm() < 1e-12);
    }

    #[test]
    fn test_tangent_at_start_follows_first_leg() {
        let c = finger();
        let t = c.derivative(0.0);
        let leg = c.points[1] - c.points[0];
        // Positive multiple: parallel and same direction.
        assert!(t.cross(&leg).norm() < 1e-12);
        assert!(t.dot(&leg) > 0.0);
        assert_relative_eq!(t.norm(), 3.0 * leg.norm(), epsilon = 1e-12);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let c = finger();
        let h = 1e-6;
        for u in [0.1, 0.4, 0.75] {
            let fd = (c.point(u + h) - c.point(u - h)) / (2.0 * h);
            assert!((fd - c.derivative(u)).norm() < 1e-6);
        }
    }

    #[test]
    fn test_extrapolates_outside_unit_interval() {
        let c = CubicBezier::from_arrays([
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [3.0, 0.0, 0.0],
        ]);
        assert_relative_eq!(c.point(2.0).x, 6.0, epsilon = 1e-12);
        assert_relative_eq!(c.point(-1.0).x, -3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scaled() {
        let c = finger().scaled([2.0, 1.0, 0.5]);
        assert_relative_eq!(c.points[3].y, -0.55, epsilon = 1e-12);
        assert_relative_eq!(c.points[3].z, 0.45, epsilon = 1e-12);
    }

    #[test]
    fn test_line_curve() {
        let line = Line3d::from_points(Point3::origin(), Point3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(line.evaluate(0.5).z, 5.0, epsilon = 1e-12);
        assert_relative_eq!(line.tangent(0.3).z, 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_arc_length_of_straight_bezier() {
        // Control points bunched toward the start: uneven parameter speed.
        let c = CubicBezier::from_arrays([
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 0.0],
            [4.0, 0.0, 0.0],
        ]);
        let table = ArcLengthTable::new(&c, 256);
        assert_relative_eq!(table.total_length(), 4.0, epsilon = 1e-9);

        let u_half = table.param_at_fraction(0.5);
        assert_relative_eq!(c.point(u_half).x, 2.0, epsilon = 1e-3);
        assert_eq!(table.param_at_fraction(0.0), 0.0);
        assert_eq!(table.param_at_fraction(1.0), 1.0);
    }

    #[test]
    fn test_arc_length_zero_length_curve() {
        let p = Point3::new(1.0, 1.0, 1.0);
        let c = CubicBezier::new(p, p, p, p);
        let table = ArcLengthTable::new(&c, 8);
        assert_eq!(table.total_length(), 0.0);
        assert_relative_eq!(table.param_at_fraction(0.25), 0.25, epsilon = 1e-12);
    }
}
