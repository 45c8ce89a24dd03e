//! Loop subdivision passes.

use std::f64::consts::TAU;

use critter_math::{to_f32_flat, Point3, Vec3};
use critter_mesh::{estimate_vertex_normals, DegeneracyPolicy, TriangleMesh};
use log::{debug, warn};

use crate::adjacency::{Adjacency, EdgeRecord};
use crate::error::{Result, SubdivideError};
use crate::params::SubdivideParams;
use crate::result::{PassStats, SubdivisionReport};
use crate::seed::SeedMesh;

/// Loop weights `(α, β)` for a vertex with `valence` neighbours.
///
/// `β = (1/n)(5/8 − (3/8 + cos(2π/n)/4)²)` and `α = 1 − nβ`, so the weights
/// always sum to one. A vertex with no neighbours keeps its position.
pub fn loop_weights(valence: usize) -> (f64, f64) {
    if valence == 0 {
        return (1.0, 0.0);
    }
    let n = valence as f64;
    let c = 3.0 / 8.0 + (TAU / n).cos() / 4.0;
    let beta = (5.0 / 8.0 - c * c) / n;
    (1.0 - n * beta, beta)
}

/// Largest vertex count a `u32` index buffer can address.
const MAX_VERTICES: usize = u32::MAX as usize;

/// Fail when a pass would produce more vertices than `u32` can index.
fn check_vertex_budget(projected: usize) -> Result<()> {
    if projected > MAX_VERTICES {
        return Err(SubdivideError::TooManyVertices {
            projected,
            max: MAX_VERTICES,
        });
    }
    Ok(())
}

/// Position of the new vertex on `edge`.
fn edge_point(positions: &[Point3], edge: &EdgeRecord) -> Point3 {
    let p1 = positions[edge.v1 as usize].coords;
    let p2 = positions[edge.v2 as usize].coords;
    match edge.opposite {
        [Some(o1), Some(o2)] => {
            let q1 = positions[o1 as usize].coords;
            let q2 = positions[o2 as usize].coords;
            Point3::from((p1 + p2) * (3.0 / 8.0) + (q1 + q2) * (1.0 / 8.0))
        }
        _ => Point3::from((p1 + p2) * 0.5),
    }
}

/// Run one Loop pass over `seed`.
///
/// Old vertices keep their indices and are smoothed with [`loop_weights`].
/// One new vertex per distinct edge follows, numbered by the edge's
/// first-seen order. Each triangle becomes four with the same winding.
pub fn subdivide_once(seed: &SeedMesh, policy: DegeneracyPolicy) -> Result<(SeedMesh, PassStats)> {
    let positions = seed.positions();
    let faces = seed.faces();
    let adj = Adjacency::build(positions.len(), faces, policy)?;
    check_vertex_budget(positions.len() + adj.num_edges())?;

    let isolated = adj.isolated_vertices().count();
    if isolated > 0 {
        warn!("{isolated} isolated vertices carried through unchanged");
    }

    let mut out = Vec::with_capacity(positions.len() + adj.num_edges());

    // Even vertices.
    out.extend(positions.iter().enumerate().map(|(v, p)| {
        let ring = adj.neighbors(v as u32);
        let (alpha, beta) = loop_weights(ring.len());
        let sum = ring
            .iter()
            .fold(Vec3::zeros(), |acc, &n| acc + positions[n as usize].coords);
        Point3::from(p.coords * alpha + sum * beta)
    }));

    // Odd vertices.
    out.extend(adj.edges().iter().map(|e| edge_point(positions, e)));

    let base = positions.len() as u32;
    let mut new_faces = Vec::with_capacity(faces.len() * 4);
    for &[v0, v1, v2] in faces {
        let e01 = base + adj.ordinal(v0, v1);
        let e12 = base + adj.ordinal(v1, v2);
        let e20 = base + adj.ordinal(v2, v0);
        new_faces.extend_from_slice(&[
            [v0, e01, e20],
            [v1, e12, e01],
            [v2, e20, e12],
            [e01, e12, e20],
        ]);
    }

    let stats = PassStats {
        vertices_in: positions.len(),
        triangles_in: faces.len(),
        edges: adj.num_edges(),
        boundary_edges: adj.num_boundary_edges(),
        isolated_vertices: isolated,
        non_manifold_edges: adj.non_manifold_edges().len(),
    };

    Ok((SeedMesh::from_parts_unchecked(out, new_faces), stats))
}

/// Apply `params.level` Loop passes to `seed`.
///
/// Fails up front with [`SubdivideError::MeshTooLarge`] when the result
/// would exceed `params.max_triangles`.
pub fn loop_subdivide(
    seed: &SeedMesh,
    params: &SubdivideParams,
) -> Result<(SeedMesh, SubdivisionReport)> {
    let projected = params.expected_triangles(seed.num_triangles());
    if projected > params.max_triangles {
        return Err(SubdivideError::MeshTooLarge {
            current: seed.num_triangles(),
            projected,
            max: params.max_triangles,
        });
    }

    let mut report = SubdivisionReport::new(seed.num_vertices(), seed.num_triangles());
    let mut mesh = seed.clone();

    for pass in 1..=params.level {
        let (next, stats) = subdivide_once(&mesh, params.policy)?;
        debug!(
            "loop pass {pass}/{}: {} -> {} triangles, {} edges ({} boundary)",
            params.level,
            stats.triangles_in,
            stats.triangles_out(),
            stats.edges,
            stats.boundary_edges
        );
        report.push(stats);
        mesh = next;
    }

    Ok((mesh, report))
}

/// Subdivide `seed` and package it as a render-ready mesh.
///
/// Normals come from the face-area-weighted estimator; tex coords are the
/// 0.5 placeholder.
pub fn generate_surface(
    seed: &SeedMesh,
    params: &SubdivideParams,
) -> Result<(TriangleMesh, SubdivisionReport)> {
    let (mesh, report) = loop_subdivide(seed, params)?;
    let (positions, faces) = mesh.into_parts();

    let positions = to_f32_flat(&positions);
    let indices: Vec<u32> = faces.into_iter().flatten().collect();
    let normals = estimate_vertex_normals(&positions, &indices);

    let mesh = TriangleMesh {
        positions,
        normals,
        indices,
        tex_coords: None,
    }
    .with_placeholder_tex_coords();

    debug!("{report}");
    Ok((mesh, report))
}
