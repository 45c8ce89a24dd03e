#![warn(missing_docs)]

//! Tubular sweep meshing for critter limbs.
//!
//! A tube is swept along a [`Curve3d`](critter_geom::Curve3d) by sampling
//! the path, orienting a ring of vertices with a propagated Frenet frame and
//! stitching consecutive rings into triangles. Normals are analytic (taken
//! from the frame), so the sweep never runs the face-accumulation estimator.

pub mod frenet;
pub mod tube;

use thiserror::Error;

pub use frenet::{frame_step, propagate_frames, FrenetFrame};
pub use tube::{sweep_tube, sweep_tube_with, RadiusProfile, SampleSpacing, TubeOptions};

/// Errors from frame propagation and tube sweeping.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SweepError {
    /// The path derivative vanishes at `u` and the policy rejects fallbacks.
    #[error("degenerate tangent at u={u}")]
    DegenerateTangent {
        /// Curve parameter where the tangent vanished.
        u: f64,
    },

    /// Fewer than one segment along the path.
    #[error("tube needs at least 1 path segment, got {0}")]
    TooFewSegments(u32),

    /// Fewer than three segments around the ring.
    #[error("tube needs at least 3 radial segments, got {0}")]
    TooFewRadialSegments(u32),

    /// The radius function returned a negative or non-finite value.
    #[error("invalid radius {radius} at u={u}")]
    InvalidRadius {
        /// Curve parameter.
        u: f64,
        /// Returned radius.
        radius: f64,
    },
}

/// Result type for sweep operations.
pub type Result<T> = std::result::Result<T, SweepError>;
