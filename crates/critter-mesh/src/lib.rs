#![warn(missing_docs)]

//! Triangle mesh record shared by every critter generator.
//!
//! Generators hand out a [`TriangleMesh`] once: flat `f32` position and
//! normal buffers, a flat `u32` index buffer and optional texture
//! coordinates, in the layout a renderer uploads directly.

mod normals;

use thiserror::Error;

pub use normals::estimate_vertex_normals;

/// Placeholder value written into every texture coordinate slot.
pub const PLACEHOLDER_TEX_COORD: f32 = 0.5;

/// How a generator reacts to degenerate input it can work around.
///
/// `Fallback` keeps generating with a substitute (an arbitrary axis for a
/// zero tangent, overwriting the extra face of a non-manifold edge) and logs
/// a warning. `Reject` reports the condition as an error instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DegeneracyPolicy {
    /// Substitute and continue.
    #[default]
    Fallback,
    /// Fail fast with a typed error.
    Reject,
}

/// Errors found when validating a mesh record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A flat buffer's length is not a multiple of its element stride.
    #[error("{buffer} buffer has {len} floats, not a multiple of {stride}")]
    MisalignedBuffer {
        /// Which buffer (`positions`, `normals`, `indices`, `tex_coords`).
        buffer: &'static str,
        /// Buffer length.
        len: usize,
        /// Required stride.
        stride: usize,
    },

    /// A per-vertex buffer has a different vertex count than `positions`.
    #[error("{buffer} describes {found} vertices, positions describe {expected}")]
    VertexCountMismatch {
        /// Which buffer.
        buffer: &'static str,
        /// Vertex count from `positions`.
        expected: usize,
        /// Vertex count from the buffer.
        found: usize,
    },

    /// A triangle refers to a vertex that does not exist.
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index value.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

/// Output triangle mesh for rendering and export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]`.
    pub positions: Vec<f32>,
    /// Flat array of vertex normals: `[nx0, ny0, nz0, ...]`. Same length as
    /// positions, or empty when normals were never computed.
    pub normals: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]`.
    pub indices: Vec<u32>,
    /// Optional texture coordinates: `[s0, t0, s1, t1, ...]`.
    pub tex_coords: Option<Vec<f32>>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len() / 3
    }

    /// Whether the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of vertex `i` as `[x, y, z]`.
    pub fn position(&self, i: usize) -> [f32; 3] {
        [
            self.positions[i * 3],
            self.positions[i * 3 + 1],
            self.positions[i * 3 + 2],
        ]
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Check buffer strides, per-vertex buffer lengths and index ranges.
    pub fn validate(&self) -> Result<(), MeshError> {
        check_stride("positions", self.positions.len(), 3)?;
        check_stride("indices", self.indices.len(), 3)?;
        let vertex_count = self.num_vertices();

        if !self.normals.is_empty() {
            check_stride("normals", self.normals.len(), 3)?;
            check_count("normals", vertex_count, self.normals.len() / 3)?;
        }
        if let Some(tex) = &self.tex_coords {
            check_stride("tex_coords", tex.len(), 2)?;
            check_count("tex_coords", vertex_count, tex.len() / 2)?;
        }

        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        Ok(())
    }

    /// Replace the normals with smooth face-accumulated normals.
    pub fn recompute_normals(&mut self) {
        self.normals = estimate_vertex_normals(&self.positions, &self.indices);
    }

    /// Fill texture coordinates with the constant placeholder `(0.5, 0.5)`.
    pub fn fill_placeholder_tex_coords(&mut self) {
        self.tex_coords = Some(vec![PLACEHOLDER_TEX_COORD; self.num_vertices() * 2]);
    }

    /// Builder form of [`fill_placeholder_tex_coords`](Self::fill_placeholder_tex_coords).
    pub fn with_placeholder_tex_coords(mut self) -> Self {
        self.fill_placeholder_tex_coords();
        self
    }

    /// Append another mesh, offsetting its indices past this mesh's vertices.
    ///
    /// Texture coordinates survive only if both meshes carry them. When only
    /// one side carries normals, the other side's normals are estimated so
    /// the normal buffer stays aligned with the positions.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.num_vertices() as u32;
        let had_vertices = self.num_vertices() > 0;

        self.tex_coords = match (self.tex_coords.take(), &other.tex_coords) {
            (Some(mut mine), Some(theirs)) => {
                mine.extend_from_slice(theirs);
                Some(mine)
            }
            (None, Some(theirs)) if !had_vertices => Some(theirs.clone()),
            _ => None,
        };

        let mine_missing = had_vertices && self.normals.is_empty();
        let theirs_missing = other.num_vertices() > 0 && other.normals.is_empty();
        if mine_missing && !other.normals.is_empty() {
            self.recompute_normals();
        }
        if theirs_missing && !self.normals.is_empty() {
            let estimated = estimate_vertex_normals(&other.positions, &other.indices);
            self.normals.extend_from_slice(&estimated);
        } else {
            self.normals.extend_from_slice(&other.normals);
        }

        self.positions.extend_from_slice(&other.positions);
        self.indices
            .extend(other.indices.iter().map(|&i| i + offset));
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<([f32; 3], [f32; 3])> {
        if self.positions.len() < 3 {
            return None;
        }
        let mut min = [f32::MAX; 3];
        let mut max = [f32::MIN; 3];
        for p in self.positions.chunks_exact(3) {
            for k in 0..3 {
                min[k] = min[k].min(p[k]);
                max[k] = max[k].max(p[k]);
            }
        }
        Some((min, max))
    }
}

fn check_stride(buffer: &'static str, len: usize, stride: usize) -> Result<(), MeshError> {
    if len % stride == 0 {
        Ok(())
    } else {
        Err(MeshError::MisalignedBuffer {
            buffer,
            len,
            stride,
        })
    }
}

fn check_count(buffer: &'static str, expected: usize, found: usize) -> Result<(), MeshError> {
    if expected == found {
        Ok(())
    } else {
        Err(MeshError::VertexCountMismatch {
            buffer,
            expected,
            found,
        })
    }
}
