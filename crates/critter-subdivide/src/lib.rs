#![warn(missing_docs)]

//! Loop subdivision of small triangular seeds.
//!
//! A shared-index [`SeedMesh`] (usually one of the pyramid seeds) is refined
//! `level` times. Each pass smooths the existing vertices, inserts one vertex
//! per edge and splits every triangle into four:
//!
//! ```text
//!         v0                    v0
//!        /  \                  /  \
//!       /    \               e01--e20
//!      /      \     ==>      / \  / \
//!     /        \            /   \/   \
//!   v1 -------- v2        v1----e12---v2
//! ```
//!
//! Triangle count grows by exactly 4× per pass, and vertex count grows by
//! the number of distinct edges of the input.
//!
//! # Example
//!
//! ```
//! use critter_subdivide::{generate_surface, rounded_triangle_seed, SubdivideParams};
//!
//! let seed = rounded_triangle_seed(2.0, 1.5, 1.5);
//! let (mesh, report) = generate_surface(&seed, &SubdivideParams::with_level(2)).unwrap();
//! assert_eq!(mesh.num_triangles(), 64);
//! assert_eq!(report.level(), 2);
//! ```

pub mod adjacency;
mod error;
mod params;
mod result;
pub mod seed;
mod subdivide;

pub use adjacency::{Adjacency, EdgeKey, EdgeRecord};
pub use error::{Result, SubdivideError};
pub use params::SubdivideParams;
pub use result::{PassStats, SubdivisionReport};
pub use seed::{isosceles_seed, rounded_triangle_seed, SeedMesh};
pub use subdivide::{generate_surface, loop_subdivide, loop_weights, subdivide_once};
