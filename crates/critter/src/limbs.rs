//! Three-digit claw limbs built from swept tubes.
//!
//! A limb is a short wrist (or ankle) tube with three digits hanging off its
//! end: a long center digit pointing forward and two shorter side digits
//! splaying left and right. Each tube is a Bezier sweep whose control points
//! are scaled per axis; tube radii scale with `max(sx, sz)`.

use critter_geom::CubicBezier;
use critter_ir::LimbKind;
use critter_mesh::{DegeneracyPolicy, TriangleMesh};
use critter_sweep::{sweep_tube, RadiusProfile, TubeOptions};

use crate::Result;

type Controls = [[f64; 3]; 4];

const WRIST: Controls = [
    [0.0, 0.0, 0.0],
    [0.0, -0.15, 0.0],
    [0.0, -0.25, 0.0],
    [0.0, -0.35, 0.0],
];

const HAND_CENTER: Controls = [
    [0.0, -0.35, 0.0],
    [0.0, -0.5, 0.3],
    [0.0, -0.6, 0.6],
    [0.0, -0.55, 0.9],
];

const HAND_LEFT: Controls = [
    [-0.08, -0.37, 0.0],
    [-0.25, -0.48, 0.25],
    [-0.4, -0.55, 0.5],
    [-0.5, -0.5, 0.7],
];

const LEG_CENTER: Controls = [
    [0.0, -0.35, 0.0],
    [0.0, -0.45, 0.4],
    [0.0, -0.5, 0.7],
    [0.0, -0.45, 1.0],
];

const LEG_LEFT: Controls = [
    [-0.08, -0.37, 0.0],
    [-0.3, -0.48, 0.3],
    [-0.45, -0.5, 0.6],
    [-0.55, -0.45, 0.85],
];

fn mirror_x(points: Controls) -> Controls {
    points.map(|[x, y, z]| [-x, y, z])
}

/// One of the three digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Digit {
    /// Long forward digit.
    Center,
    /// Digit splaying toward -X.
    Left,
    /// Digit splaying toward +X.
    Right,
}

impl Digit {
    /// All digits in build order.
    pub const ALL: [Digit; 3] = [Digit::Center, Digit::Left, Digit::Right];

    /// Lowercase name used for separate parts.
    pub fn name(self) -> &'static str {
        match self {
            Digit::Center => "center",
            Digit::Left => "left",
            Digit::Right => "right",
        }
    }

    fn segments(self) -> u32 {
        match self {
            Digit::Center => 20,
            Digit::Left | Digit::Right => 18,
        }
    }

    /// `(base, tip)` radius before scaling.
    fn radii(self) -> (f64, f64) {
        match self {
            Digit::Center => (0.12, 0.04),
            Digit::Left | Digit::Right => (0.11, 0.035),
        }
    }

    fn default_curve(self, kind: LimbKind) -> Controls {
        match (kind, self) {
            (LimbKind::Hand, Digit::Center) => HAND_CENTER,
            (LimbKind::Hand, Digit::Left) => HAND_LEFT,
            (LimbKind::Hand, Digit::Right) => mirror_x(HAND_LEFT),
            (LimbKind::Leg, Digit::Center) => LEG_CENTER,
            (LimbKind::Leg, Digit::Left) => LEG_LEFT,
            (LimbKind::Leg, Digit::Right) => mirror_x(LEG_LEFT),
        }
    }
}

/// Claw hand or leg description.
///
/// Legs may replace any toe curve; hands always use the built-in finger
/// curves.
#[derive(Debug, Clone)]
pub struct ClawLimb {
    /// Hand or leg.
    pub kind: LimbKind,
    /// Wrist (ankle) scale.
    pub wrist_scale: [f64; 3],
    /// Per-digit scale, indexed center, left, right.
    pub digit_scales: [[f64; 3]; 3],
    /// Per-digit control point overrides (legs only).
    pub toe_curves: [Option<Controls>; 3],
    /// Reaction to degenerate tangents.
    pub policy: DegeneracyPolicy,
}

impl ClawLimb {
    /// Limb of `kind` at unit scale.
    pub fn new(kind: LimbKind) -> Self {
        Self {
            kind,
            wrist_scale: [1.0; 3],
            digit_scales: [[1.0; 3]; 3],
            toe_curves: [None; 3],
            policy: DegeneracyPolicy::Fallback,
        }
    }

    /// Three-fingered hand at unit scale.
    pub fn hand() -> Self {
        Self::new(LimbKind::Hand)
    }

    /// Three-toed leg at unit scale.
    pub fn leg() -> Self {
        Self::new(LimbKind::Leg)
    }

    /// Set the wrist scale.
    pub fn with_wrist_scale(mut self, scale: [f64; 3]) -> Self {
        self.wrist_scale = scale;
        self
    }

    /// Set one digit's scale.
    pub fn with_digit_scale(mut self, digit: Digit, scale: [f64; 3]) -> Self {
        self.digit_scales[digit as usize] = scale;
        self
    }

    /// Replace one toe curve. Ignored for hands.
    pub fn with_toe_curve(mut self, digit: Digit, points: Controls) -> Self {
        self.toe_curves[digit as usize] = Some(points);
        self
    }

    /// Set the degeneracy policy used for every tube.
    pub fn with_policy(mut self, policy: DegeneracyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Wrist tube: 6 segments, 12 around, radius `0.18·(1 − 0.2u)·m`.
    pub fn wrist(&self) -> Result<TriangleMesh> {
        let scale = self.wrist_scale;
        let m = scale[0].max(scale[2]);
        let curve = CubicBezier::from_arrays(WRIST).scaled(scale);
        let options = TubeOptions::new(6, 12)
            .with_radius(RadiusProfile::taper(0.18 * m, 0.2))
            .with_policy(self.policy);
        Ok(sweep_tube(&curve, &options)?)
    }

    /// Control points of `digit` before scaling.
    pub fn digit_curve(&self, digit: Digit) -> Controls {
        match (self.kind, self.toe_curves[digit as usize]) {
            (LimbKind::Leg, Some(points)) => points,
            _ => digit.default_curve(self.kind),
        }
    }

    /// Tube for one digit.
    pub fn digit(&self, digit: Digit) -> Result<TriangleMesh> {
        let scale = self.digit_scales[digit as usize];
        let m = scale[0].max(scale[2]);
        let (base, tip) = digit.radii();
        let curve = CubicBezier::from_arrays(self.digit_curve(digit)).scaled(scale);
        let options = TubeOptions::new(digit.segments(), 8)
            .with_radius(RadiusProfile::Linear {
                start: base * m,
                end: tip * m,
            })
            .with_policy(self.policy);
        Ok(sweep_tube(&curve, &options)?)
    }

    /// Wrist and digits as separate meshes, named
    /// `wrist`, `center`, `left`, `right`.
    pub fn tubes(&self) -> Result<Vec<(&'static str, TriangleMesh)>> {
        let mut tubes = Vec::with_capacity(4);
        tubes.push(("wrist", self.wrist()?));
        for digit in Digit::ALL {
            tubes.push((digit.name(), self.digit(digit)?));
        }
        Ok(tubes)
    }

    /// All four tubes in one mesh with placeholder tex coords.
    pub fn merged(&self) -> Result<TriangleMesh> {
        let mut mesh = TriangleMesh::new();
        for (_, tube) in self.tubes()? {
            mesh.merge(&tube);
        }
        Ok(mesh.with_placeholder_tex_coords())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn grid_vertices(s: usize, r: usize) -> usize {
        (s + 1) * (r + 1)
    }

    #[test]
    fn test_hand_tube_sizes() {
        let tubes = ClawLimb::hand().tubes().unwrap();
        let names: Vec<_> = tubes.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, ["wrist", "center", "left", "right"]);

        assert_eq!(tubes[0].1.num_vertices(), grid_vertices(6, 12));
        assert_eq!(tubes[0].1.num_triangles(), 2 * 6 * 12);
        assert_eq!(tubes[1].1.num_vertices(), grid_vertices(20, 8));
        assert_eq!(tubes[2].1.num_vertices(), grid_vertices(18, 8));
        assert_eq!(tubes[3].1.num_vertices(), grid_vertices(18, 8));
    }

    #[test]
    fn test_merged_hand_offsets_indices() {
        let limb = ClawLimb::hand();
        let merged = limb.merged().unwrap();
        let expected_vertices =
            grid_vertices(6, 12) + grid_vertices(20, 8) + 2 * grid_vertices(18, 8);
        assert_eq!(merged.num_vertices(), expected_vertices);
        assert_eq!(merged.num_triangles(), 2 * (6 * 12 + 20 * 8 + 2 * 18 * 8));
        assert!(merged.validate().is_ok());

        let uv = merged.tex_coords.as_ref().unwrap();
        assert_eq!(uv.len(), expected_vertices * 2);

        // First index of the center finger starts after the wrist grid.
        let wrist_indices = 6 * 6 * 12;
        assert_eq!(merged.indices[wrist_indices], grid_vertices(6, 12) as u32);
    }

    #[test]
    fn test_right_digit_mirrors_left() {
        let limb = ClawLimb::hand();
        let left = limb.digit(Digit::Left).unwrap();
        let right = limb.digit(Digit::Right).unwrap();
        assert_eq!(left.num_vertices(), right.num_vertices());

        // Ring vertices average to the ring center.
        let ring_center = |m: &TriangleMesh, ring: usize| {
            let start = ring * 9;
            (start..start + 8)
                .map(|i| m.position(i))
                .fold([0.0f32; 3], |a, p| [a[0] + p[0], a[1] + p[1], a[2] + p[2]])
                .map(|c| c / 8.0)
        };
        for ring in [0, 9, 18] {
            let l = ring_center(&left, ring);
            let r = ring_center(&right, ring);
            assert_relative_eq!(l[0], -r[0], epsilon = 1e-5);
            assert_relative_eq!(l[1], r[1], epsilon = 1e-5);
            assert_relative_eq!(l[2], r[2], epsilon = 1e-5);
        }
        assert_relative_eq!(ring_center(&left, 0)[0], -0.08, epsilon = 1e-5);
    }

    #[test]
    fn test_wrist_radius_scales_with_max_xz() {
        let limb = ClawLimb::hand().with_wrist_scale([2.0, 1.0, 1.5]);
        let wrist = limb.wrist().unwrap();
        // First ring is centered on the origin with radius 0.18 · 2.
        for j in 0..12 {
            let [x, y, z] = wrist.position(j);
            assert_relative_eq!((x * x + y * y + z * z).sqrt(), 0.36, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_leg_uses_custom_toe_curve() {
        let custom = [
            [0.0, -0.35, 0.0],
            [0.0, -0.4, 0.2],
            [0.0, -0.45, 0.4],
            [0.0, -0.5, 0.6],
        ];
        let leg = ClawLimb::leg().with_toe_curve(Digit::Center, custom);
        assert_eq!(leg.digit_curve(Digit::Center), custom);
        assert_eq!(leg.digit_curve(Digit::Left), LEG_LEFT);

        // Hands ignore toe overrides.
        let hand = ClawLimb::hand().with_toe_curve(Digit::Center, custom);
        assert_eq!(hand.digit_curve(Digit::Center), HAND_CENTER);
    }

    #[test]
    fn test_digit_scale_moves_tip() {
        let leg = ClawLimb::leg().with_digit_scale(Digit::Center, [1.0, 1.0, 2.0]);
        let toe = leg.digit(Digit::Center).unwrap();
        // Last ring surrounds the scaled end point (0, -0.45, 2.0).
        let last = toe.num_vertices() - 9;
        let mean_z = (last..last + 8).map(|i| toe.position(i)[2]).sum::<f32>() / 8.0;
        assert_relative_eq!(mean_z, 2.0, epsilon = 1e-3);
    }
}
