//! Subdivision statistics.

use std::fmt;

/// Counts gathered during one subdivision pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Vertices before the pass.
    pub vertices_in: usize,
    /// Triangles before the pass.
    pub triangles_in: usize,
    /// Distinct edges (one new vertex each).
    pub edges: usize,
    /// Edges with a single incident face.
    pub boundary_edges: usize,
    /// Vertices not referenced by any face; carried through unchanged.
    pub isolated_vertices: usize,
    /// Edges that had more than two incident faces.
    pub non_manifold_edges: usize,
}

impl PassStats {
    /// Vertices after the pass: `V + E`.
    pub fn vertices_out(&self) -> usize {
        self.vertices_in + self.edges
    }

    /// Triangles after the pass: `4F`.
    pub fn triangles_out(&self) -> usize {
        self.triangles_in * 4
    }
}

/// Summary of a multi-pass subdivision.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubdivisionReport {
    /// Vertices in the seed.
    pub original_vertices: usize,
    /// Triangles in the seed.
    pub original_triangles: usize,
    /// Vertices in the result.
    pub final_vertices: usize,
    /// Triangles in the result.
    pub final_triangles: usize,
    /// Per-pass statistics, in order.
    pub passes: Vec<PassStats>,
}

impl SubdivisionReport {
    pub(crate) fn new(vertices: usize, triangles: usize) -> Self {
        Self {
            original_vertices: vertices,
            original_triangles: triangles,
            final_vertices: vertices,
            final_triangles: triangles,
            passes: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, stats: PassStats) {
        self.final_vertices = stats.vertices_out();
        self.final_triangles = stats.triangles_out();
        self.passes.push(stats);
    }

    /// Number of passes performed.
    pub fn level(&self) -> usize {
        self.passes.len()
    }

    /// Whether any pass saw a non-manifold edge.
    pub fn had_non_manifold(&self) -> bool {
        self.passes.iter().any(|p| p.non_manifold_edges > 0)
    }

    /// Ratio of final to original triangle count.
    pub fn triangle_ratio(&self) -> f64 {
        if self.original_triangles == 0 {
            0.0
        } else {
            self.final_triangles as f64 / self.original_triangles as f64
        }
    }
}

impl fmt::Display for SubdivisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Subdivided {} -> {} triangles, {} -> {} vertices ({} passes)",
            self.original_triangles,
            self.final_triangles,
            self.original_vertices,
            self.final_vertices,
            self.level()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_tracks_last_pass() {
        let mut report = SubdivisionReport::new(4, 4);
        report.push(PassStats {
            vertices_in: 4,
            triangles_in: 4,
            edges: 6,
            ..PassStats::default()
        });
        assert_eq!(report.final_vertices, 10);
        assert_eq!(report.final_triangles, 16);
        assert_eq!(report.level(), 1);
        assert!((report.triangle_ratio() - 4.0).abs() < 1e-12);
        assert!(!report.had_non_manifold());
    }

    #[test]
    fn test_report_display() {
        let report = SubdivisionReport::new(4, 4);
        assert_eq!(
            format!("{report}"),
            "Subdivided 4 -> 4 triangles, 4 -> 4 vertices (0 passes)"
        );
    }
}
