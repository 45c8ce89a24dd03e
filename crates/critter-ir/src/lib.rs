//! Declarative part documents for the critter generators.
//!
//! A [`Document`] lists named parts, each described by a [`ShapeOp`]: a tube
//! swept along a curve, a subdivided pyramid, or a whole claw limb. The
//! document carries parameters only, no mesh data; evaluation happens in the
//! `critter` crate.
//!
//! Documents are read and written as JSON or TOML.

use serde::{Deserialize, Serialize};

/// Current document format version.
pub const FORMAT_VERSION: &str = "0.1";

/// 3D vector with f64 components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// Create a new Vec3.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Components as an array.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self { x, y, z }
    }
}

/// Path curve of a tube.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CurveDef {
    /// Cubic Bezier through four control points.
    Bezier {
        /// Control points P0..P3.
        points: [Vec3; 4],
    },
    /// Straight segment.
    Line {
        /// Point at u = 0.
        start: Vec3,
        /// Point at u = 1.
        end: Vec3,
    },
}

/// Tube radius as a function of the curve fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RadiusDef {
    /// Same radius everywhere.
    Constant {
        /// Radius.
        radius: f64,
    },
    /// Linear blend from `start` at u = 0 to `end` at u = 1.
    Linear {
        /// Radius at the start.
        start: f64,
        /// Radius at the end.
        end: f64,
    },
}

impl Default for RadiusDef {
    fn default() -> Self {
        // 0.1 tapering by 30%.
        RadiusDef::Linear {
            start: 0.1,
            end: 0.07,
        }
    }
}

/// Placement of tube rings along the curve.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacingDef {
    /// Rings at equal parameter steps.
    #[default]
    Uniform,
    /// Rings at equal arc-length steps.
    ArcLength,
}

/// Which claw limb to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimbKind {
    /// Wrist plus three fingers.
    #[default]
    Hand,
    /// Ankle plus three toes.
    Leg,
}

fn default_segments() -> u32 {
    16
}

fn default_radial_segments() -> u32 {
    8
}

fn default_level() -> u32 {
    4
}

fn unit_scale() -> [f64; 3] {
    [1.0, 1.0, 1.0]
}

/// Shape operation: the generator a part is evaluated with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ShapeOp {
    /// Tube swept along a curve.
    Tube {
        /// Path curve.
        curve: CurveDef,
        /// Segments along the curve.
        #[serde(default = "default_segments")]
        segments: u32,
        /// Segments around the ring.
        #[serde(default = "default_radial_segments")]
        radial_segments: u32,
        /// Radius profile.
        #[serde(default)]
        radius: RadiusDef,
        /// Ring spacing.
        #[serde(default)]
        spacing: SpacingDef,
    },
    /// Loop-subdivided triangular pyramid.
    RoundedPyramid {
        /// Subdivision passes.
        #[serde(default = "default_level")]
        level: u32,
        /// Apex height.
        height: f64,
        /// Base extent along X.
        width_x: f64,
        /// Base extent along Z.
        width_z: f64,
    },
    /// Loop-subdivided isosceles pyramid.
    IsoscelesPyramid {
        /// Subdivision passes.
        #[serde(default = "default_level")]
        level: u32,
        /// Apex height.
        height: f64,
        /// Base width along X.
        base_width: f64,
        /// Base depth along Z.
        base_depth: f64,
    },
    /// Three-fingered hand or three-toed leg built from tubes.
    ClawLimb {
        /// Hand or leg.
        #[serde(default)]
        kind: LimbKind,
        /// Wrist (ankle) scale.
        #[serde(default = "unit_scale")]
        wrist_scale: [f64; 3],
        /// Center finger scale.
        #[serde(default = "unit_scale")]
        center_scale: [f64; 3],
        /// Left finger scale.
        #[serde(default = "unit_scale")]
        left_scale: [f64; 3],
        /// Right finger scale.
        #[serde(default = "unit_scale")]
        right_scale: [f64; 3],
        /// Replacement control points for the center toe (legs only).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        center_curve: Option<[Vec3; 4]>,
        /// Replacement control points for the left toe (legs only).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        left_curve: Option<[Vec3; 4]>,
        /// Replacement control points for the right toe (legs only).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        right_curve: Option<[Vec3; 4]>,
        /// Emit one merged mesh instead of one part per tube.
        #[serde(default)]
        merged: bool,
    },
}

impl ShapeOp {
    /// Variant name as written in the `type` tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ShapeOp::Tube { .. } => "Tube",
            ShapeOp::RoundedPyramid { .. } => "RoundedPyramid",
            ShapeOp::IsoscelesPyramid { .. } => "IsoscelesPyramid",
            ShapeOp::ClawLimb { .. } => "ClawLimb",
        }
    }
}

/// A named part of the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartDef {
    /// Part name.
    pub name: String,
    /// Display color as `[r, g, b]` in 0.0..1.0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<[f64; 3]>,
    /// Generator and parameters.
    pub op: ShapeOp,
}

impl PartDef {
    /// Part without a color.
    pub fn new(name: impl Into<String>, op: ShapeOp) -> Self {
        Self {
            name: name.into(),
            color: None,
            op,
        }
    }

    /// Set the display color.
    pub fn with_color(mut self, color: [f64; 3]) -> Self {
        self.color = Some(color);
        self
    }
}

/// A critter document: an ordered list of parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Format version string (e.g. "0.1").
    pub version: String,
    /// Parts in evaluation order.
    #[serde(default)]
    pub parts: Vec<PartDef>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            parts: Vec::new(),
        }
    }
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part.
    pub fn push(&mut self, part: PartDef) -> &mut Self {
        self.parts.push(part);
        self
    }

    /// Look up a part by name.
    pub fn part(&self, name: &str) -> Option<&PartDef> {
        self.parts.iter().find(|p| p.name == name)
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Deserialize from TOML string.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
