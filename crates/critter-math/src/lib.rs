#![warn(missing_docs)]

//! Math types for critter procedural meshes.
//!
//! Thin wrappers around nalgebra providing the point, vector and direction
//! types shared by the curve, sweep and subdivision crates, plus the small
//! set of tolerances every generator agrees on.

use nalgebra::{Unit, Vector3};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Lengths at or below this are not normalized (normal floor).
    pub normal_floor: f64,
    /// Lengths below this are treated as exactly zero.
    pub degenerate: f64,
}

impl Tolerance {
    /// Default tolerances (1e-5 normal floor, 1e-12 degenerate length).
    pub const DEFAULT: Self = Self {
        normal_floor: 1e-5,
        degenerate: 1e-12,
    };

    /// Check if a vector is too short to normalize (at or below the normal floor).
    pub fn below_normal_floor(&self, v: &Vec3) -> bool {
        v.norm() <= self.normal_floor
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Normalize `v`, or return `fallback` when `|v|` is at or below the normal floor.
pub fn normalize_or(v: &Vec3, fallback: Vec3) -> Vec3 {
    let len = v.norm();
    if len > Tolerance::DEFAULT.normal_floor {
        v / len
    } else {
        fallback
    }
}

/// A unit vector perpendicular to `t`.
///
/// Crosses `t` with the global Y axis, switching to X when `t` is nearly
/// vertical (`|t.y| >= 0.9`).
pub fn any_perpendicular(t: &Vec3) -> Vec3 {
    let reference = if t.y.abs() < 0.9 { Vec3::y() } else { Vec3::x() };
    normalize_or(&t.cross(&reference), Vec3::z())
}

/// Flatten points into an `f32` buffer `[x0, y0, z0, x1, ...]`.
pub fn to_f32_flat(points: &[Point3]) -> Vec<f32> {
    let mut out = Vec::with_capacity(points.len() * 3);
    for p in points {
        out.push(p.x as f32);
        out.push(p.y as f32);
        out.push(p.z as f32);
    }
    out
}

/// Flatten vectors into an `f32` buffer `[x0, y0, z0, x1, ...]`.
pub fn vecs_to_f32_flat(vectors: &[Vec3]) -> Vec<f32> {
    let mut out = Vec::with_capacity(vectors.len() * 3);
    for v in vectors {
        out.push(v.x as f32);
        out.push(v.y as f32);
        out.push(v.z as f32);
    }
    out
}

/// Read an `f32` buffer back into points. Trailing partial triples are ignored.
pub fn from_f32_flat(buffer: &[f32]) -> Vec<Point3> {
    buffer
        .chunks_exact(3)
        .map(|c| Point3::new(c[0] as f64, c[1] as f64, c[2] as f64))
        .collect()
}
