//! Smooth per-vertex normals by face-normal accumulation.

use critter_math::{Tolerance, Vec3};

/// Estimate smooth vertex normals for a flat mesh.
///
/// Every triangle adds its unnormalized face normal `(v1 - v0) × (v2 - v0)`
/// to each of its three vertices, so larger faces weigh more. Each sum is
/// then normalized; sums whose length is at or below the normal floor are
/// left as accumulated (zero for unreferenced vertices).
///
/// Triangles with an out-of-range index are skipped.
pub fn estimate_vertex_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let vertex_count = positions.len() / 3;
    let mut sums = vec![Vec3::zeros(); vertex_count];

    let at = |i: usize| {
        Vec3::new(
            positions[i * 3] as f64,
            positions[i * 3 + 1] as f64,
            positions[i * 3 + 2] as f64,
        )
    };

    for tri in indices.chunks_exact(3) {
        let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if i0 >= vertex_count || i1 >= vertex_count || i2 >= vertex_count {
            continue;
        }
        let v0 = at(i0);
        let face = (at(i1) - v0).cross(&(at(i2) - v0));
        sums[i0] += face;
        sums[i1] += face;
        sums[i2] += face;
    }

    let floor = Tolerance::DEFAULT.normal_floor;
    let mut out = Vec::with_capacity(vertex_count * 3);
    for n in &sums {
        let len = n.norm();
        let n = if len > floor { n / len } else { *n };
        out.push(n.x as f32);
        out.push(n.y as f32);
        out.push(n.z as f32);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_triangle_shares_face_normal() {
        let positions = [0.0, 0.0, 0.0, 2.0, 0.0, 0.0, 0.0, 0.0, -3.0];
        let normals = estimate_vertex_normals(&positions, &[0, 1, 2]);

        // (2,0,0) × (0,0,-3) = (0, 6, 0)
        for v in normals.chunks_exact(3) {
            assert_relative_eq!(v[0], 0.0);
            assert_relative_eq!(v[1], 1.0);
            assert_relative_eq!(v[2], 0.0);
        }
    }

    #[test]
    fn test_tilted_triangle_matches_normalized_cross() {
        let p = [[0.3_f32, -0.2, 1.0], [1.1, 0.4, 0.2], [-0.5, 0.9, 0.7]];
        let positions: Vec<f32> = p.iter().flatten().copied().collect();
        let normals = estimate_vertex_normals(&positions, &[0, 1, 2]);

        let v = |k: usize| Vec3::new(p[k][0] as f64, p[k][1] as f64, p[k][2] as f64);
        let expected = (v(1) - v(0)).cross(&(v(2) - v(0))).normalize();
        for n in normals.chunks_exact(3) {
            assert_relative_eq!(n[0] as f64, expected.x, epsilon = 1e-6);
            assert_relative_eq!(n[1] as f64, expected.y, epsilon = 1e-6);
            assert_relative_eq!(n[2] as f64, expected.z, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_shared_vertex_averages_faces() {
        // Two faces folded along the x axis: +Y face and +Z face.
        let positions = [
            0.0, 0.0, 0.0, // 0
            1.0, 0.0, 0.0, // 1
            0.0, 0.0, -1.0, // 2
            0.0, 1.0, 0.0, // 3
        ];
        let normals = estimate_vertex_normals(&positions, &[0, 1, 2, 0, 1, 3]);
        let n0 = &normals[0..3];
        let s = std::f32::consts::FRAC_1_SQRT_2;
        assert_relative_eq!(n0[0], 0.0);
        assert_relative_eq!(n0[1], s, epsilon = 1e-6);
        assert_relative_eq!(n0[2], s, epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_and_unreferenced_vertices_left_zero() {
        // Collinear triangle plus an unused vertex.
        let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 2.0, 0.0, 0.0, 5.0, 5.0, 5.0];
        let normals = estimate_vertex_normals(&positions, &[0, 1, 2]);
        assert_eq!(normals.len(), 12);
        assert!(normals.iter().all(|&c| c == 0.0));
    }
}
