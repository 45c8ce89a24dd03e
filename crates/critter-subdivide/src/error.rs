//! Error types for seed validation and subdivision.

use thiserror::Error;

/// Errors that can occur while building seeds or subdividing them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SubdivideError {
    /// Seed has no vertices or no triangles.
    #[error("seed mesh is empty ({vertices} vertices, {triangles} triangles)")]
    EmptyMesh {
        /// Vertex count.
        vertices: usize,
        /// Triangle count.
        triangles: usize,
    },

    /// Flat index buffer length is not a multiple of 3.
    #[error("index buffer length {0} is not a multiple of 3")]
    MalformedIndices(usize),

    /// A face refers to a vertex that does not exist.
    #[error("face {face} refers to vertex {index}, mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Face number.
        face: usize,
        /// Offending index.
        index: u32,
        /// Number of vertices.
        vertex_count: usize,
    },

    /// A face uses the same vertex twice.
    #[error("face {face} repeats vertex {index}")]
    DegenerateFace {
        /// Face number.
        face: usize,
        /// Repeated vertex.
        index: u32,
    },

    /// More than two faces share the edge `(a, b)`.
    #[error("edge ({a}, {b}) is shared by more than two faces")]
    NonManifoldEdge {
        /// Smaller endpoint.
        a: u32,
        /// Larger endpoint.
        b: u32,
    },

    /// Subdivision would exceed the configured triangle budget.
    #[error("subdivision would exceed maximum mesh size ({current} -> {projected} triangles, max {max})")]
    MeshTooLarge {
        /// Current triangle count.
        current: usize,
        /// Projected triangle count after all passes.
        projected: usize,
        /// Maximum allowed triangle count.
        max: usize,
    },

    /// A pass would create more vertices than `u32` indices can address.
    #[error("subdivision pass would create {projected} vertices, index limit is {max}")]
    TooManyVertices {
        /// Vertex count after the pass.
        projected: usize,
        /// Largest addressable vertex count.
        max: usize,
    },
}

/// Result type for subdivision operations.
pub type Result<T> = std::result::Result<T, SubdivideError>;
