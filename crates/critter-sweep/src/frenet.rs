//! Frenet frame propagation along a path curve.

use critter_geom::Curve3d;
use critter_math::{any_perpendicular, normalize_or, Dir3, Point3, Tolerance, Vec3};
use critter_mesh::DegeneracyPolicy;

use crate::{Result, SweepError};

/// A Frenet frame at a point on a curve.
///
/// The frame provides the orthonormal basis a tube ring is laid out in:
/// - **Tangent**: direction along the curve
/// - **Normal**: first ring axis, carried forward from the previous sample
/// - **Binormal**: tangent × normal
#[derive(Debug, Clone, Copy)]
pub struct FrenetFrame {
    /// Curve parameter this frame was evaluated at.
    pub u: f64,
    /// Position on the curve.
    pub position: Point3,
    /// Unit tangent vector.
    pub tangent: Dir3,
    /// Unit normal vector.
    pub normal: Dir3,
    /// Unit binormal vector (tangent × normal).
    pub binormal: Dir3,
}

impl FrenetFrame {
    /// Unit direction in the normal/binormal plane at angle `v`:
    /// `normal·cos v + binormal·sin v`.
    pub fn radial(&self, v: f64) -> Vec3 {
        let (sin_v, cos_v) = v.sin_cos();
        cos_v * self.normal.as_ref() + sin_v * self.binormal.as_ref()
    }
}

/// Advance the frame to parameter `u`.
///
/// With no previous normal the frame is seeded from an arbitrary reference
/// axis (global Y, or X when the tangent is nearly vertical). Otherwise the
/// previous normal is Gram-Schmidt projected onto the plane perpendicular to
/// the new tangent, which keeps successive rings from twisting or flipping
/// where the curvature vanishes.
///
/// A tangent no longer than the normal floor (1e-5) is an error under
/// [`DegeneracyPolicy::Reject`]; under [`DegeneracyPolicy::Fallback`] the
/// tangent becomes +Z and a warning is logged.
pub fn frame_step(
    curve: &dyn Curve3d,
    u: f64,
    prev_normal: Option<Dir3>,
    policy: DegeneracyPolicy,
) -> Result<FrenetFrame> {
    let raw = curve.tangent(u);
    let tangent = if Tolerance::DEFAULT.below_normal_floor(&raw) {
        match policy {
            DegeneracyPolicy::Reject => return Err(SweepError::DegenerateTangent { u }),
            DegeneracyPolicy::Fallback => {
                log::warn!("degenerate tangent at u={u}, substituting +Z");
                Vec3::z()
            }
        }
    } else {
        raw.normalize()
    };

    let normal = match prev_normal {
        Some(prev) => {
            let prev = prev.into_inner();
            let projected = prev - tangent * prev.dot(&tangent);
            if projected.norm() > Tolerance::DEFAULT.normal_floor {
                projected.normalize()
            } else {
                // Previous normal ran parallel to the new tangent.
                any_perpendicular(&tangent)
            }
        }
        None => any_perpendicular(&tangent),
    };

    let binormal = normalize_or(&tangent.cross(&normal), any_perpendicular(&normal));

    Ok(FrenetFrame {
        u,
        position: curve.evaluate(u),
        tangent: Dir3::new_unchecked(tangent),
        normal: Dir3::new_unchecked(normal),
        binormal: Dir3::new_unchecked(binormal),
    })
}

/// Propagate frames over a sequence of curve parameters.
///
/// This is a serial fold: each frame is computed from the previous frame's
/// normal, so the samples cannot be evaluated independently.
pub fn propagate_frames<I>(
    curve: &dyn Curve3d,
    params: I,
    policy: DegeneracyPolicy,
) -> Result<Vec<FrenetFrame>>
where
    I: IntoIterator<Item = f64>,
{
    let (frames, _) = params.into_iter().try_fold(
        (Vec::new(), None::<Dir3>),
        |(mut frames, prev_normal), u| {
            let frame = frame_step(curve, u, prev_normal, policy)?;
            frames.push(frame);
            Ok::<_, SweepError>((frames, Some(frame.normal)))
        },
    )?;
    Ok(frames)
}
