//! Subdivision parameters.

use critter_mesh::DegeneracyPolicy;

/// Parameters for Loop subdivision.
#[derive(Debug, Clone)]
pub struct SubdivideParams {
    /// Number of subdivision passes. 0 returns the seed unchanged.
    pub level: u32,

    /// Maximum triangles allowed in the result.
    pub max_triangles: usize,

    /// Reaction to non-manifold edges.
    pub policy: DegeneracyPolicy,
}

impl Default for SubdivideParams {
    fn default() -> Self {
        Self {
            level: 4,
            max_triangles: 4_000_000,
            policy: DegeneracyPolicy::Fallback,
        }
    }
}

impl SubdivideParams {
    /// Parameters for `level` passes with default limits.
    #[must_use]
    pub fn with_level(level: u32) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Set the triangle budget.
    #[must_use]
    pub const fn with_max_triangles(mut self, max_triangles: usize) -> Self {
        self.max_triangles = max_triangles;
        self
    }

    /// Set the degeneracy policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: DegeneracyPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Triangle count after all passes: `triangles · 4^level`, saturating.
    #[must_use]
    pub fn expected_triangles(&self, triangles: usize) -> usize {
        (0..self.level).fold(triangles, |t, _| t.saturating_mul(4))
    }
}
