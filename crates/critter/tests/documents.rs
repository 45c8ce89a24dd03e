//! Documents evaluated end to end: parse, build, export.

use std::fs;
use std::path::PathBuf;

use critter::ir::{CurveDef, Document, PartDef, RadiusDef, ShapeOp, SpacingDef, Vec3};
use critter::presets::{preset, presets, sample_document};
use critter::{read_document, write_document, Model, ModelError};

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("critter-tests-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn straight_tube() -> Document {
    let mut doc = Document::new();
    doc.push(PartDef::new(
        "straight",
        ShapeOp::Tube {
            curve: CurveDef::Bezier {
                points: [
                    Vec3::new(0.0, 0.0, 0.0),
                    Vec3::new(0.0, -1.0, 0.0),
                    Vec3::new(0.0, -2.0, 0.0),
                    Vec3::new(0.0, -3.0, 0.0),
                ],
            },
            segments: 4,
            radial_segments: 4,
            radius: RadiusDef::Constant { radius: 0.1 },
            spacing: SpacingDef::Uniform,
        },
    ));
    doc
}

#[test]
fn straight_tube_rings_sit_on_radius() {
    let model = Model::from_document(&straight_tube()).unwrap();
    let mesh = &model.parts[0].mesh;
    assert_eq!(mesh.positions.len(), 75);

    for i in 0..5 {
        let center_y = -3.0 * i as f32 / 4.0;
        for j in 0..5 {
            let [x, y, z] = mesh.position(i * 5 + j);
            let dist = (x * x + (y - center_y) * (y - center_y) + z * z).sqrt();
            assert!((dist - 0.1).abs() < 1e-5, "ring {i} vertex {j} at {dist}");
        }
    }
}

#[test]
fn json_and_toml_documents_build_the_same_model() {
    let doc = sample_document();
    let json_path = scratch("sample.json");
    let toml_path = scratch("sample.toml");
    write_document(&doc, &json_path).unwrap();
    write_document(&doc, &toml_path).unwrap();

    assert_eq!(read_document(&json_path).unwrap(), doc);
    assert_eq!(read_document(&toml_path).unwrap(), doc);

    let from_json = Model::from_path(&json_path).unwrap();
    let from_toml = Model::from_path(&toml_path).unwrap();
    assert_eq!(from_json.parts, from_toml.parts);
    assert_eq!(from_json.name, "sample");
    // upper arm, elbow, forearm, and four hand tubes
    assert_eq!(from_json.len(), 7);
}

#[test]
fn stl_file_matches_merged_mesh() {
    let model = Model::from_document(&sample_document()).unwrap();
    let path = scratch("arm.stl");
    model.write(&path).unwrap();

    let bytes = fs::read(&path).unwrap();
    let triangles = u32::from_le_bytes([bytes[80], bytes[81], bytes[82], bytes[83]]) as usize;
    assert_eq!(triangles, model.num_triangles());
    assert_eq!(bytes.len(), 84 + 50 * triangles);
}

#[test]
fn obj_file_has_one_object_per_part() {
    let model = Model::from_document(&sample_document()).unwrap();
    let path = scratch("arm.obj");
    model.write(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let objects = text.lines().filter(|l| l.starts_with("o ")).count();
    let vertices = text.lines().filter(|l| l.starts_with("v ")).count();
    let faces = text.lines().filter(|l| l.starts_with("f ")).count();
    assert_eq!(objects, model.len());
    assert_eq!(vertices, model.num_vertices());
    assert_eq!(faces, model.num_triangles());
}

#[test]
fn every_preset_builds() {
    for (name, _) in presets() {
        let model = Model::from_document(&preset(name).unwrap()).unwrap();
        assert!(model.num_triangles() > 0, "{name}");
        assert!(model.merged().validate().is_ok(), "{name}");
    }
}

#[test]
fn very_smooth_preset_has_4096_triangles() {
    let model = Model::from_document(&preset("pyramid-very-smooth").unwrap()).unwrap();
    assert_eq!(model.num_triangles(), 4 * 4usize.pow(5));
}

#[test]
fn missing_file_is_io_error() {
    let err = read_document(scratch("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, ModelError::Io(_)));
}

#[test]
fn malformed_toml_is_parse_error() {
    let path = scratch("broken.toml");
    fs::write(&path, "version = [").unwrap();
    let err = read_document(&path).unwrap_err();
    assert!(matches!(err, ModelError::TomlDe(_)));
}
