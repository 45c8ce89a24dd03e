//! Named part presets.

use critter_ir::{CurveDef, Document, LimbKind, PartDef, RadiusDef, ShapeOp, SpacingDef, Vec3};

use crate::{ModelError, Result};

fn pyramid(level: u32, height: f64, width_x: f64, width_z: f64) -> ShapeOp {
    ShapeOp::RoundedPyramid {
        level,
        height,
        width_x,
        width_z,
    }
}

fn isosceles(level: u32, height: f64, base_width: f64, base_depth: f64) -> ShapeOp {
    ShapeOp::IsoscelesPyramid {
        level,
        height,
        base_width,
        base_depth,
    }
}

fn claw(kind: LimbKind) -> ShapeOp {
    ShapeOp::ClawLimb {
        kind,
        wrist_scale: [1.0; 3],
        center_scale: [1.0; 3],
        left_scale: [1.0; 3],
        right_scale: [1.0; 3],
        center_curve: None,
        left_curve: None,
        right_curve: None,
        merged: false,
    }
}

/// `(name, description, shape)` for every preset.
const PRESETS: &[(&str, &str, fn() -> ShapeOp)] = &[
    ("pyramid-smooth", "rounded pyramid, 4 passes", || pyramid(4, 2.0, 1.5, 1.5)),
    ("pyramid-very-smooth", "rounded pyramid, 5 passes", || pyramid(5, 2.0, 1.5, 1.5)),
    ("pyramid-low-poly", "rounded pyramid, 2 passes", || pyramid(2, 2.0, 1.5, 1.5)),
    ("pyramid-tall", "tall narrow rounded pyramid", || pyramid(4, 3.0, 1.2, 1.2)),
    ("pyramid-wide", "flat wide rounded pyramid", || pyramid(4, 1.5, 2.5, 2.5)),
    ("isosceles-smooth", "isosceles pyramid, 4 passes", || isosceles(4, 2.0, 1.5, 1.0)),
    ("isosceles-very-smooth", "isosceles pyramid, 5 passes", || isosceles(5, 2.0, 1.5, 1.0)),
    ("isosceles-low-poly", "isosceles pyramid, 2 passes", || isosceles(2, 2.0, 1.5, 1.0)),
    ("isosceles-tall", "tall isosceles pyramid", || isosceles(4, 3.0, 1.2, 0.8)),
    ("isosceles-wide", "wide isosceles pyramid", || isosceles(4, 1.5, 2.5, 1.2)),
    ("isosceles-elbow", "small rounded elbow joint", || isosceles(4, 0.4, 0.3, 0.25)),
    ("claw-hand", "wrist with three fingers", || claw(LimbKind::Hand)),
    ("claw-leg", "ankle with three toes", || claw(LimbKind::Leg)),
];

/// Names and one-line descriptions of all presets.
pub fn presets() -> impl Iterator<Item = (&'static str, &'static str)> {
    PRESETS.iter().map(|&(name, description, _)| (name, description))
}

/// Shape for a preset name.
pub fn preset_op(name: &str) -> Result<ShapeOp> {
    PRESETS
        .iter()
        .find(|(n, _, _)| *n == name)
        .map(|(_, _, op)| op())
        .ok_or_else(|| ModelError::UnknownPreset(name.to_string()))
}

/// One-part document for a preset name.
pub fn preset(name: &str) -> Result<Document> {
    let mut doc = Document::new();
    doc.push(PartDef::new(name, preset_op(name)?));
    Ok(doc)
}

/// Example arm: upper arm tube, elbow, forearm tube and a claw hand.
pub fn sample_document() -> Document {
    let skin = [0.95, 0.78, 0.25];
    let line = |start: [f64; 3], end: [f64; 3]| CurveDef::Line {
        start: Vec3::from(start),
        end: Vec3::from(end),
    };

    let mut doc = Document::new();
    doc.push(
        PartDef::new(
            "upper_arm",
            ShapeOp::Tube {
                curve: line([0.0, 1.2, 0.0], [0.0, 0.6, 0.0]),
                segments: 8,
                radial_segments: 12,
                radius: RadiusDef::Constant { radius: 0.1 },
                spacing: SpacingDef::Uniform,
            },
        )
        .with_color(skin),
    )
    .push(PartDef::new("elbow", isosceles(4, 0.4, 0.3, 0.25)).with_color(skin))
    .push(
        PartDef::new(
            "forearm",
            ShapeOp::Tube {
                curve: CurveDef::Bezier {
                    points: [
                        Vec3::new(0.0, 0.6, 0.0),
                        Vec3::new(0.0, 0.4, 0.1),
                        Vec3::new(0.0, 0.2, 0.1),
                        Vec3::new(0.0, 0.0, 0.0),
                    ],
                },
                segments: 16,
                radial_segments: 12,
                radius: RadiusDef::Linear {
                    start: 0.1,
                    end: 0.15,
                },
                spacing: SpacingDef::ArcLength,
            },
        )
        .with_color(skin),
    )
    .push(PartDef::new("hand", claw(LimbKind::Hand)).with_color([0.55, 0.45, 0.3]));
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_lookup() {
        match preset_op("isosceles-elbow").unwrap() {
            ShapeOp::IsoscelesPyramid {
                level,
                height,
                base_width,
                base_depth,
            } => {
                assert_eq!(level, 4);
                assert_eq!((height, base_width, base_depth), (0.4, 0.3, 0.25));
            }
            other => panic!("expected IsoscelesPyramid, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_preset() {
        let err = preset("pyramid-huge").unwrap_err();
        assert!(matches!(err, ModelError::UnknownPreset(ref n) if n == "pyramid-huge"));
    }

    #[test]
    fn test_preset_names_unique() {
        let mut names: Vec<_> = presets().map(|(n, _)| n).collect();
        let count = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), count);
        assert_eq!(count, 13);
    }

    #[test]
    fn test_sample_document_parts() {
        let doc = sample_document();
        let names: Vec<_> = doc.parts.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["upper_arm", "elbow", "forearm", "hand"]);
    }
}
