//! Tube mesh generation along a path curve.
//!
//! The mesh is a row-major `(S+1) × (R+1)` vertex grid: one ring of `R+1`
//! vertices per path sample, the last ring vertex duplicating the first so
//! the seam can carry its own texture coordinate. The tube is open (no end
//! caps) and nothing is welded.

use std::f64::consts::PI;

use critter_geom::{ArcLengthTable, Curve3d};
use critter_math::{normalize_or, Point3, Vec3};
use critter_mesh::{DegeneracyPolicy, TriangleMesh};

use crate::frenet::propagate_frames;
use crate::{Result, SweepError};

/// Number of chords used to build the arc-length lookup table.
const ARC_LENGTH_SAMPLES: usize = 256;

/// Tube radius as a function of the path parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadiusProfile {
    /// Same radius everywhere.
    Constant(f64),
    /// Linear interpolation from `start` at `u=0` to `end` at `u=1`.
    Linear {
        /// Radius at the start of the path.
        start: f64,
        /// Radius at the end of the path.
        end: f64,
    },
}

impl RadiusProfile {
    /// Radius at parameter `u`.
    pub fn at(&self, u: f64) -> f64 {
        match *self {
            RadiusProfile::Constant(r) => r,
            RadiusProfile::Linear { start, end } => start + (end - start) * u,
        }
    }

    /// Linear taper `base · (1 − fraction·u)`.
    pub fn taper(base: f64, fraction: f64) -> Self {
        RadiusProfile::Linear {
            start: base,
            end: base * (1.0 - fraction),
        }
    }
}

impl Default for RadiusProfile {
    /// Taper from 0.1 at the base to 0.07 at the tip.
    fn default() -> Self {
        RadiusProfile::taper(0.1, 0.3)
    }
}

/// How path samples are distributed along the curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SampleSpacing {
    /// Evenly spaced in curve parameter (`u = i / S`).
    #[default]
    Uniform,
    /// Evenly spaced in arc length, so rings stay evenly spaced on curves
    /// whose parameter speed varies.
    ArcLength,
}

/// Options for the tube sweep.
#[derive(Debug, Clone)]
pub struct TubeOptions {
    /// Number of segments along the path. Default: 16
    pub segments: u32,
    /// Number of segments around each ring. Default: 8
    pub radial_segments: u32,
    /// Radius along the path. Default: taper 0.1 → 0.07
    pub radius: RadiusProfile,
    /// Distribution of rings along the path. Default: uniform in parameter
    pub spacing: SampleSpacing,
    /// Reaction to a vanishing tangent. Default: fallback
    pub policy: DegeneracyPolicy,
}

impl Default for TubeOptions {
    fn default() -> Self {
        Self {
            segments: 16,
            radial_segments: 8,
            radius: RadiusProfile::default(),
            spacing: SampleSpacing::Uniform,
            policy: DegeneracyPolicy::Fallback,
        }
    }
}

impl TubeOptions {
    /// Options with the given grid resolution and default radius.
    pub fn new(segments: u32, radial_segments: u32) -> Self {
        Self {
            segments,
            radial_segments,
            ..Self::default()
        }
    }

    /// Set the radius profile.
    pub fn with_radius(mut self, radius: RadiusProfile) -> Self {
        self.radius = radius;
        self
    }

    /// Set the sample spacing.
    pub fn with_spacing(mut self, spacing: SampleSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the degeneracy policy.
    pub fn with_policy(mut self, policy: DegeneracyPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Sweep a tube along `curve` using the radius profile from `options`.
///
/// # Errors
///
/// Returns an error if the grid resolution is too small, the radius is
/// negative anywhere along the path, or a tangent vanishes under
/// [`DegeneracyPolicy::Reject`].
pub fn sweep_tube(curve: &dyn Curve3d, options: &TubeOptions) -> Result<TriangleMesh> {
    let profile = options.radius;
    sweep_tube_with(curve, options, |u| profile.at(u))
}

/// Sweep a tube along `curve` with an arbitrary radius function `r(u)`.
///
/// `options.radius` is ignored.
pub fn sweep_tube_with<F>(
    curve: &dyn Curve3d,
    options: &TubeOptions,
    radius: F,
) -> Result<TriangleMesh>
where
    F: Fn(f64) -> f64,
{
    if options.segments < 1 {
        return Err(SweepError::TooFewSegments(options.segments));
    }
    if options.radial_segments < 3 {
        return Err(SweepError::TooFewRadialSegments(options.radial_segments));
    }

    let n_segments = options.segments as usize;
    let n_radial = options.radial_segments as usize;
    let ring_len = n_radial + 1;

    let params = sample_params(curve, n_segments, options.spacing);
    let frames = propagate_frames(curve, params.iter().copied(), options.policy)?;

    let n_verts = (n_segments + 1) * ring_len;
    let mut positions: Vec<Point3> = Vec::with_capacity(n_verts);
    let mut normals: Vec<Vec3> = Vec::with_capacity(n_verts);

    for (i, frame) in frames.iter().enumerate() {
        // Radius is a function of the ring's position along the path, not of
        // the remapped curve parameter.
        let s = i as f64 / n_segments as f64;
        let r = radius(s);
        if !r.is_finite() || r < 0.0 {
            return Err(SweepError::InvalidRadius { u: s, radius: r });
        }

        for j in 0..=n_radial {
            let v = 2.0 * PI * j as f64 / n_radial as f64;
            let dir = frame.radial(v);
            positions.push(frame.position + r * dir);
            normals.push(normalize_or(&dir, Vec3::z()));
        }
    }

    let indices = grid_indices(n_segments, n_radial);

    log::debug!(
        "swept tube: {} rings x {} radial, {} vertices, {} triangles",
        n_segments + 1,
        ring_len,
        positions.len(),
        indices.len() / 3
    );

    Ok(TriangleMesh {
        positions: critter_math::to_f32_flat(&positions),
        normals: critter_math::vecs_to_f32_flat(&normals),
        indices,
        tex_coords: None,
    })
}

/// Curve parameters for `n_segments + 1` rings.
fn sample_params(curve: &dyn Curve3d, n_segments: usize, spacing: SampleSpacing) -> Vec<f64> {
    let (u_min, u_max) = curve.domain();
    match spacing {
        SampleSpacing::Uniform => (0..=n_segments)
            .map(|i| u_min + (u_max - u_min) * i as f64 / n_segments as f64)
            .collect(),
        SampleSpacing::ArcLength => {
            let table = ArcLengthTable::new(curve, ARC_LENGTH_SAMPLES);
            (0..=n_segments)
                .map(|i| table.param_at_fraction(i as f64 / n_segments as f64))
                .collect()
        }
    }
}

/// Two triangles per grid quad, connecting ring `i` to ring `i + 1`.
fn grid_indices(n_segments: usize, n_radial: usize) -> Vec<u32> {
    let ring_len = n_radial + 1;
    let mut indices = Vec::with_capacity(6 * n_segments * n_radial);
    for i in 0..n_segments {
        for j in 0..n_radial {
            let a = (i * ring_len + j) as u32;
            let b = a + ring_len as u32;
            indices.extend_from_slice(&[a, b, a + 1, b, b + 1, a + 1]);
        }
    }
    indices
}
