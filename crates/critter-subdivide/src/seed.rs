//! Seed polyhedra for subdivision.
//!
//! A [`SeedMesh`] is an indexed triangle list whose faces share vertices by
//! index. Sharing is what lets the edge map see two faces per interior edge;
//! face-local input (every face owning three private vertices) has to be
//! welded first with [`SeedMesh::from_face_local`].

use std::collections::HashMap;

use critter_math::Point3;
use critter_mesh::TriangleMesh;

use crate::error::{Result, SubdivideError};

/// sin(60°), the offset of the back base corners of the triangular seed.
const SIN_60: f64 = 0.866;

/// A validated, shared-index triangle mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedMesh {
    positions: Vec<Point3>,
    faces: Vec<[u32; 3]>,
}

impl SeedMesh {
    /// Build a seed, checking that it is non-empty, that every index is in
    /// range and that no face repeats a vertex.
    pub fn new(positions: Vec<Point3>, faces: Vec<[u32; 3]>) -> Result<Self> {
        if positions.is_empty() || faces.is_empty() {
            return Err(SubdivideError::EmptyMesh {
                vertices: positions.len(),
                triangles: faces.len(),
            });
        }

        let vertex_count = positions.len();
        for (face, tri) in faces.iter().enumerate() {
            if let Some(&index) = tri.iter().find(|&&i| i as usize >= vertex_count) {
                return Err(SubdivideError::IndexOutOfRange {
                    face,
                    index,
                    vertex_count,
                });
            }
            if tri[0] == tri[1] || tri[0] == tri[2] {
                return Err(SubdivideError::DegenerateFace { face, index: tri[0] });
            }
            if tri[1] == tri[2] {
                return Err(SubdivideError::DegenerateFace { face, index: tri[1] });
            }
        }

        Ok(Self { positions, faces })
    }

    /// Build a seed from flat buffers (`[x, y, z, ...]`, `[i0, i1, i2, ...]`).
    pub fn from_flat(positions: &[f64], indices: &[u32]) -> Result<Self> {
        if indices.len() % 3 != 0 {
            return Err(SubdivideError::MalformedIndices(indices.len()));
        }
        let points = positions
            .chunks_exact(3)
            .map(|c| Point3::new(c[0], c[1], c[2]))
            .collect();
        let faces = indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect();
        Self::new(points, faces)
    }

    /// Build a seed from an existing mesh record.
    pub fn from_mesh(mesh: &TriangleMesh) -> Result<Self> {
        if mesh.indices.len() % 3 != 0 {
            return Err(SubdivideError::MalformedIndices(mesh.indices.len()));
        }
        Self::new(critter_math::from_f32_flat(&mesh.positions), mesh.triangles().collect())
    }

    /// Weld face-local triangles into a shared-index seed.
    ///
    /// Corners at exactly the same position (after quantizing to 1e-9)
    /// become one vertex, in first-seen order.
    pub fn from_face_local(triangles: &[[Point3; 3]]) -> Result<Self> {
        let quantize = |p: &Point3| -> [i64; 3] {
            [
                (p.x * 1e9).round() as i64,
                (p.y * 1e9).round() as i64,
                (p.z * 1e9).round() as i64,
            ]
        };

        let mut lookup: HashMap<[i64; 3], u32> = HashMap::new();
        let mut positions = Vec::new();
        let mut faces = Vec::with_capacity(triangles.len());

        for tri in triangles {
            let face = tri.map(|p| {
                *lookup.entry(quantize(&p)).or_insert_with(|| {
                    positions.push(p);
                    (positions.len() - 1) as u32
                })
            });
            faces.push(face);
        }

        Self::new(positions, faces)
    }

    /// Vertex positions.
    pub fn positions(&self) -> &[Point3] {
        &self.positions
    }

    /// Triangles as index triples.
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.faces.len()
    }

    /// Take the buffers apart.
    pub fn into_parts(self) -> (Vec<Point3>, Vec<[u32; 3]>) {
        (self.positions, self.faces)
    }

    /// Assemble a pass result. Callers guarantee the invariants `new` checks.
    pub(crate) fn from_parts_unchecked(positions: Vec<Point3>, faces: Vec<[u32; 3]>) -> Self {
        Self { positions, faces }
    }
}

/// Faces shared by both pyramid seeds: three sides around the apex, then the base.
const PYRAMID_FACES: [[u32; 3]; 4] = [[0, 1, 2], [0, 2, 3], [0, 3, 1], [1, 3, 2]];

/// Triangular pyramid with apex `(0, height, 0)` and a base spanning
/// `width_x` along X and `±0.866·width_z` along Z.
pub fn rounded_triangle_seed(height: f64, width_x: f64, width_z: f64) -> SeedMesh {
    SeedMesh::from_parts_unchecked(
        vec![
            Point3::new(0.0, height, 0.0),
            Point3::new(width_x, 0.0, 0.0),
            Point3::new(-width_x / 2.0, 0.0, width_z * SIN_60),
            Point3::new(-width_x / 2.0, 0.0, -width_z * SIN_60),
        ],
        PYRAMID_FACES.to_vec(),
    )
}

/// Isosceles pyramid: the base is `base_width` long in X and `base_depth`
/// deep in Z, with its single front corner on +X.
pub fn isosceles_seed(height: f64, base_width: f64, base_depth: f64) -> SeedMesh {
    SeedMesh::from_parts_unchecked(
        vec![
            Point3::new(0.0, height, 0.0),
            Point3::new(base_width / 2.0, 0.0, 0.0),
            Point3::new(-base_width / 2.0, 0.0, base_depth / 2.0),
            Point3::new(-base_width / 2.0, 0.0, -base_depth / 2.0),
        ],
        PYRAMID_FACES.to_vec(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pyramid_seed_shape() {
        let seed = rounded_triangle_seed(2.0, 1.5, 1.5);
        assert_eq!(seed.num_vertices(), 4);
        assert_eq!(seed.num_triangles(), 4);
        assert_eq!(seed.positions()[0], Point3::new(0.0, 2.0, 0.0));
        assert!(SeedMesh::new(seed.positions().to_vec(), seed.faces().to_vec()).is_ok());
    }

    #[test]
    fn test_isosceles_seed_shape() {
        let seed = isosceles_seed(0.4, 0.3, 0.25);
        assert_eq!(seed.positions()[1], Point3::new(0.15, 0.0, 0.0));
        assert_eq!(seed.positions()[2], Point3::new(-0.15, 0.0, 0.125));
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(
            SeedMesh::new(Vec::new(), Vec::new()),
            Err(SubdivideError::EmptyMesh {
                vertices: 0,
                triangles: 0
            })
        );
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = SeedMesh::from_flat(&[0.0; 9], &[0, 1, 3]).unwrap_err();
        assert_eq!(
            err,
            SubdivideError::IndexOutOfRange {
                face: 0,
                index: 3,
                vertex_count: 3
            }
        );
    }

    #[test]
    fn test_rejects_repeated_vertex() {
        let err = SeedMesh::from_flat(&[0.0; 9], &[0, 1, 1]).unwrap_err();
        assert_eq!(err, SubdivideError::DegenerateFace { face: 0, index: 1 });
    }

    #[test]
    fn test_rejects_malformed_indices() {
        let err = SeedMesh::from_flat(&[0.0; 9], &[0, 1]).unwrap_err();
        assert_eq!(err, SubdivideError::MalformedIndices(2));
    }

    #[test]
    fn test_weld_face_local_pyramid() {
        let shared = rounded_triangle_seed(2.0, 1.5, 1.5);
        let p = shared.positions();
        let face_local: Vec<[Point3; 3]> = shared
            .faces()
            .iter()
            .map(|f| f.map(|i| p[i as usize]))
            .collect();

        let welded = SeedMesh::from_face_local(&face_local).unwrap();
        assert_eq!(welded.num_vertices(), 4);
        assert_eq!(welded.faces(), shared.faces());
    }
}
