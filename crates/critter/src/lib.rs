#![warn(missing_docs)]

//! critter: procedural creature meshes.
//!
//! Builds render-ready triangle meshes from a handful of numbers: tubes swept
//! along cubic Bezier curves, Loop-subdivided pyramids for rounded blobs and
//! joints, and three-digit claw limbs assembled from tubes. Export to STL and
//! OBJ.
//!
//! # Example
//!
//! ```rust,no_run
//! use critter::{Model, Part};
//! use critter::limbs::ClawLimb;
//!
//! let elbow = Part::isosceles_pyramid("elbow", 4, 0.4, 0.3, 0.25).unwrap();
//! let hand = Part::new("hand", ClawLimb::hand().merged().unwrap());
//!
//! let mut model = Model::new("arm");
//! model.add(elbow);
//! model.add(hand);
//! model.write("arm.stl").unwrap();
//! ```

use std::fs;
use std::path::Path;

use thiserror::Error;

use critter_geom::{CubicBezier, Curve3d, Line3d};
use critter_ir::{CurveDef, Document, PartDef, RadiusDef, ShapeOp, SpacingDef};
use critter_math::Point3;
use critter_subdivide::{SeedMesh, SubdivideParams};
use critter_sweep::{RadiusProfile, SampleSpacing, TubeOptions};

pub mod export;
pub mod limbs;
pub mod presets;

pub use critter_ir as ir;
pub use critter_mesh::{DegeneracyPolicy, MeshError, TriangleMesh};
pub use critter_subdivide::{SubdivideError, SubdivisionReport};
pub use critter_sweep::SweepError;
pub use export::Format;

use limbs::{ClawLimb, Digit};

/// Errors returned by model building and export.
#[derive(Error, Debug)]
pub enum ModelError {
    /// Tube generation failed.
    #[error("sweep error: {0}")]
    Sweep(#[from] SweepError),
    /// Subdivision failed.
    #[error("subdivision error: {0}")]
    Subdivide(#[from] SubdivideError),
    /// A mesh record is inconsistent.
    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),
    /// An I/O error occurred while reading or writing files.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A JSON document could not be read or written.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A TOML document could not be parsed.
    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),
    /// A TOML document could not be written.
    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    /// No preset has this name.
    #[error("unknown preset: {0}")]
    UnknownPreset(String),
    /// The file extension names no supported format.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Result alias for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

// =============================================================================
// Documents
// =============================================================================

fn is_toml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"))
}

/// Read a document, as TOML when the extension is `.toml` and JSON otherwise.
pub fn read_document(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    if is_toml(path) {
        Ok(Document::from_toml(&text)?)
    } else {
        Ok(Document::from_json(&text)?)
    }
}

/// Write a document, as TOML when the extension is `.toml` and JSON otherwise.
pub fn write_document(doc: &Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let text = if is_toml(path) {
        doc.to_toml()?
    } else {
        doc.to_json()?
    };
    fs::write(path, text)?;
    Ok(())
}

// =============================================================================
// Parts
// =============================================================================

/// A named mesh with an optional display color.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// Part name (used for OBJ objects and STL headers).
    pub name: String,
    /// Display color as `[r, g, b]`.
    pub color: Option<[f64; 3]>,
    /// Generated geometry.
    pub mesh: TriangleMesh,
}

impl Part {
    /// Wrap an existing mesh.
    pub fn new(name: impl Into<String>, mesh: TriangleMesh) -> Self {
        Self {
            name: name.into(),
            color: None,
            mesh,
        }
    }

    /// Set the display color.
    pub fn with_color(mut self, color: [f64; 3]) -> Self {
        self.color = Some(color);
        self
    }

    /// Tube swept along `curve`.
    pub fn tube(
        name: impl Into<String>,
        curve: &dyn Curve3d,
        options: &TubeOptions,
    ) -> Result<Self> {
        let mesh = critter_sweep::sweep_tube(curve, options)?;
        Ok(Self::new(name, mesh))
    }

    /// Loop-subdivided seed.
    pub fn subdivided(
        name: impl Into<String>,
        seed: &SeedMesh,
        params: &SubdivideParams,
    ) -> Result<Self> {
        let (mesh, report) = critter_subdivide::generate_surface(seed, params)?;
        let name = name.into();
        log::debug!("{name}: {report}");
        Ok(Self::new(name, mesh))
    }

    /// Rounded triangular pyramid after `level` Loop passes.
    pub fn rounded_pyramid(
        name: impl Into<String>,
        level: u32,
        height: f64,
        width_x: f64,
        width_z: f64,
    ) -> Result<Self> {
        let seed = critter_subdivide::rounded_triangle_seed(height, width_x, width_z);
        Self::subdivided(name, &seed, &SubdivideParams::with_level(level))
    }

    /// Rounded isosceles pyramid after `level` Loop passes.
    pub fn isosceles_pyramid(
        name: impl Into<String>,
        level: u32,
        height: f64,
        base_width: f64,
        base_depth: f64,
    ) -> Result<Self> {
        let seed = critter_subdivide::isosceles_seed(height, base_width, base_depth);
        Self::subdivided(name, &seed, &SubdivideParams::with_level(level))
    }

    /// Evaluate a part definition.
    ///
    /// Every shape yields one part, except a claw limb with `merged = false`,
    /// which yields one part per tube named `<name>.wrist`, `<name>.center`,
    /// `<name>.left` and `<name>.right`.
    pub fn from_def(def: &PartDef) -> Result<Vec<Part>> {
        let parts = match &def.op {
            ShapeOp::Tube {
                curve,
                segments,
                radial_segments,
                radius,
                spacing,
            } => {
                let curve = curve_from_def(curve);
                let options = TubeOptions::new(*segments, *radial_segments)
                    .with_radius(radius_from_def(radius))
                    .with_spacing(spacing_from_def(*spacing));
                vec![Part::tube(&def.name, curve.as_ref(), &options)?]
            }
            ShapeOp::RoundedPyramid {
                level,
                height,
                width_x,
                width_z,
            } => vec![Part::rounded_pyramid(&def.name, *level, *height, *width_x, *width_z)?],
            ShapeOp::IsoscelesPyramid {
                level,
                height,
                base_width,
                base_depth,
            } => vec![Part::isosceles_pyramid(
                &def.name,
                *level,
                *height,
                *base_width,
                *base_depth,
            )?],
            ShapeOp::ClawLimb {
                kind,
                wrist_scale,
                center_scale,
                left_scale,
                right_scale,
                center_curve,
                left_curve,
                right_curve,
                merged,
            } => {
                let mut limb = ClawLimb::new(*kind)
                    .with_wrist_scale(*wrist_scale)
                    .with_digit_scale(Digit::Center, *center_scale)
                    .with_digit_scale(Digit::Left, *left_scale)
                    .with_digit_scale(Digit::Right, *right_scale);
                let curves = [center_curve, left_curve, right_curve];
                for (digit, curve) in Digit::ALL.into_iter().zip(curves) {
                    if let Some(points) = curve {
                        let points = points.map(critter_ir::Vec3::to_array);
                        limb = limb.with_toe_curve(digit, points);
                    }
                }

                if *merged {
                    vec![Part::new(&def.name, limb.merged()?)]
                } else {
                    limb.tubes()?
                        .into_iter()
                        .map(|(tube, mesh)| Part::new(format!("{}.{tube}", def.name), mesh))
                        .collect()
                }
            }
        };

        Ok(parts
            .into_iter()
            .map(|part| match def.color {
                Some(color) => part.with_color(color),
                None => part,
            })
            .collect())
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.mesh.num_triangles()
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.mesh.num_vertices()
    }

    /// Export to binary STL bytes.
    pub fn to_stl(&self) -> Result<Vec<u8>> {
        export::stl::to_stl_bytes(&self.name, &self.mesh)
    }

    /// Write STL to file.
    pub fn write_stl(&self, path: impl AsRef<Path>) -> Result<()> {
        export::stl::export_stl(&self.name, &self.mesh, path)
    }

    /// Export to OBJ text.
    pub fn to_obj(&self) -> Result<String> {
        export::obj::to_obj_string([(self.name.as_str(), &self.mesh)])
    }

    /// Write OBJ to file.
    pub fn write_obj(&self, path: impl AsRef<Path>) -> Result<()> {
        export::obj::export_obj([(self.name.as_str(), &self.mesh)], path)
    }
}

fn curve_from_def(def: &CurveDef) -> Box<dyn Curve3d> {
    let point = |v: &critter_ir::Vec3| Point3::new(v.x, v.y, v.z);
    match def {
        CurveDef::Bezier { points } => {
            let [p0, p1, p2, p3] = points.each_ref().map(point);
            Box::new(CubicBezier::new(p0, p1, p2, p3))
        }
        CurveDef::Line { start, end } => Box::new(Line3d::from_points(point(start), point(end))),
    }
}

fn radius_from_def(def: &RadiusDef) -> RadiusProfile {
    match *def {
        RadiusDef::Constant { radius } => RadiusProfile::Constant(radius),
        RadiusDef::Linear { start, end } => RadiusProfile::Linear { start, end },
    }
}

fn spacing_from_def(def: SpacingDef) -> SampleSpacing {
    match def {
        SpacingDef::Uniform => SampleSpacing::Uniform,
        SpacingDef::ArcLength => SampleSpacing::ArcLength,
    }
}

// =============================================================================
// Model (multi-part assembly)
// =============================================================================

/// An ordered collection of parts.
///
/// Parts stay separate for OBJ export; STL export and [`Model::merged`]
/// concatenate them with index offsets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    /// Model name.
    pub name: String,
    /// Parts in document order.
    pub parts: Vec<Part>,
}

impl Model {
    /// Create an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parts: Vec::new(),
        }
    }

    /// Evaluate every part of a document.
    pub fn from_document(doc: &Document) -> Result<Self> {
        let mut model = Self::new("critter");
        for def in &doc.parts {
            let parts = Part::from_def(def)?;
            log::debug!(
                "part {} ({}): {} mesh(es)",
                def.name,
                def.op.kind_name(),
                parts.len()
            );
            model.parts.extend(parts);
        }
        Ok(model)
    }

    /// Read and evaluate a JSON or TOML document.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let doc = read_document(path)?;
        let mut model = Self::from_document(&doc)?;
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            model.name = stem.to_string();
        }
        Ok(model)
    }

    /// Append a part.
    pub fn add(&mut self, part: Part) {
        self.parts.push(part);
    }

    /// Number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the model has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Total triangles across parts.
    pub fn num_triangles(&self) -> usize {
        self.parts.iter().map(Part::num_triangles).sum()
    }

    /// Total vertices across parts.
    pub fn num_vertices(&self) -> usize {
        self.parts.iter().map(Part::num_vertices).sum()
    }

    /// All parts in one mesh.
    pub fn merged(&self) -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        for part in &self.parts {
            mesh.merge(&part.mesh);
        }
        mesh
    }

    /// Export the merged mesh to binary STL bytes.
    pub fn to_stl(&self) -> Result<Vec<u8>> {
        export::stl::to_stl_bytes(&self.name, &self.merged())
    }

    /// Export every part to OBJ text.
    pub fn to_obj(&self) -> Result<String> {
        export::obj::to_obj_string(self.named_meshes())
    }

    /// Write to `path` in the format named by its extension.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        match Format::from_path(path) {
            Some(Format::Stl) => export::stl::export_stl(&self.name, &self.merged(), path),
            Some(Format::Obj) => export::obj::export_obj(self.named_meshes(), path),
            None => Err(ModelError::UnsupportedFormat(path.display().to_string())),
        }
    }

    fn named_meshes(&self) -> impl Iterator<Item = (&str, &TriangleMesh)> {
        self.parts.iter().map(|p| (p.name.as_str(), &p.mesh))
    }
}
