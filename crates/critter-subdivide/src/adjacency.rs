//! Edge and vertex adjacency for a shared-index triangle mesh.

use std::collections::HashMap;

use critter_mesh::DegeneracyPolicy;

use crate::error::{Result, SubdivideError};

/// Undirected edge key: both endpoints packed into one `u64`, smaller first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(u64);

impl EdgeKey {
    /// Key for the edge between `a` and `b`, in either order.
    #[inline]
    pub fn new(a: u32, b: u32) -> Self {
        let (lo, hi) = if a < b { (a, b) } else { (b, a) };
        Self((u64::from(lo) << 32) | u64::from(hi))
    }

    /// `(smaller, larger)` endpoint pair.
    #[inline]
    pub fn endpoints(self) -> (u32, u32) {
        ((self.0 >> 32) as u32, self.0 as u32)
    }
}

/// One undirected edge and the vertices opposite it in its faces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeRecord {
    /// Smaller endpoint.
    pub v1: u32,
    /// Larger endpoint.
    pub v2: u32,
    /// Third vertex of the first and second incident faces.
    pub opposite: [Option<u32>; 2],
    /// How many faces reference this edge.
    pub face_count: u32,
}

impl EdgeRecord {
    /// An edge seen by exactly one face.
    pub fn is_boundary(&self) -> bool {
        self.opposite[1].is_none()
    }
}

/// Edge list, edge lookup and per-vertex neighbour lists.
///
/// Edges are numbered in order of first appearance while walking the faces;
/// that ordinal is what the subdivision pass uses to index new vertices.
#[derive(Debug, Clone)]
pub struct Adjacency {
    edges: Vec<EdgeRecord>,
    lookup: HashMap<EdgeKey, u32>,
    neighbors: Vec<Vec<u32>>,
    non_manifold: Vec<EdgeKey>,
}

impl Adjacency {
    /// Build adjacency for `faces` over `num_vertices` vertices.
    ///
    /// Faces must already be validated (indices in range, no repeats).
    /// An edge with a third incident face is an error under
    /// [`DegeneracyPolicy::Reject`]; under [`DegeneracyPolicy::Fallback`] the
    /// newest opposite vertex overwrites the second slot and a warning is
    /// logged.
    pub fn build(
        num_vertices: usize,
        faces: &[[u32; 3]],
        policy: DegeneracyPolicy,
    ) -> Result<Self> {
        let mut adj = Self {
            edges: Vec::with_capacity(faces.len() * 3 / 2 + 1),
            lookup: HashMap::with_capacity(faces.len() * 3 / 2 + 1),
            neighbors: vec![Vec::new(); num_vertices],
            non_manifold: Vec::new(),
        };

        for &[a, b, c] in faces {
            for (v1, v2, opp) in [(a, b, c), (b, c, a), (c, a, b)] {
                adj.record_edge(v1, v2, opp, policy)?;
                adj.link(v1, v2);
            }
        }

        Ok(adj)
    }

    fn record_edge(&mut self, a: u32, b: u32, opp: u32, policy: DegeneracyPolicy) -> Result<()> {
        let key = EdgeKey::new(a, b);
        match self.lookup.get(&key) {
            None => {
                let (v1, v2) = key.endpoints();
                self.lookup.insert(key, self.edges.len() as u32);
                self.edges.push(EdgeRecord {
                    v1,
                    v2,
                    opposite: [Some(opp), None],
                    face_count: 1,
                });
            }
            Some(&ordinal) => {
                let edge = &mut self.edges[ordinal as usize];
                if edge.face_count >= 2 {
                    match policy {
                        DegeneracyPolicy::Reject => {
                            return Err(SubdivideError::NonManifoldEdge {
                                a: edge.v1,
                                b: edge.v2,
                            })
                        }
                        DegeneracyPolicy::Fallback => {
                            log::warn!(
                                "edge ({}, {}) has {} faces, keeping the latest opposite vertex",
                                edge.v1,
                                edge.v2,
                                edge.face_count + 1
                            );
                            if edge.face_count == 2 {
                                self.non_manifold.push(key);
                            }
                        }
                    }
                }
                edge.opposite[1] = Some(opp);
                edge.face_count += 1;
            }
        }
        Ok(())
    }

    fn link(&mut self, a: u32, b: u32) {
        // Small lists: a linear scan keeps first-seen order without a set.
        if !self.neighbors[a as usize].contains(&b) {
            self.neighbors[a as usize].push(b);
        }
        if !self.neighbors[b as usize].contains(&a) {
            self.neighbors[b as usize].push(a);
        }
    }

    /// All edges in first-seen order.
    pub fn edges(&self) -> &[EdgeRecord] {
        &self.edges
    }

    /// Number of distinct edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Number of edges with a single incident face.
    pub fn num_boundary_edges(&self) -> usize {
        self.edges.iter().filter(|e| e.is_boundary()).count()
    }

    /// First-seen ordinal of the edge between `a` and `b`.
    pub fn edge_ordinal(&self, a: u32, b: u32) -> Option<u32> {
        self.lookup.get(&EdgeKey::new(a, b)).copied()
    }

    /// Ordinal of an edge known to belong to one of the built faces.
    pub(crate) fn ordinal(&self, a: u32, b: u32) -> u32 {
        self.lookup[&EdgeKey::new(a, b)]
    }

    /// Distinct neighbours of vertex `v`, in first-seen order.
    pub fn neighbors(&self, v: u32) -> &[u32] {
        self.neighbors
            .get(v as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Vertices not referenced by any face.
    pub fn isolated_vertices(&self) -> impl Iterator<Item = u32> + '_ {
        self.neighbors
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_empty())
            .map(|(i, _)| i as u32)
    }

    /// Edges that had more than two incident faces.
    pub fn non_manifold_edges(&self) -> &[EdgeKey] {
        &self.non_manifold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PYRAMID: [[u32; 3]; 4] = [[0, 1, 2], [0, 2, 3], [0, 3, 1], [1, 3, 2]];

    #[test]
    fn test_edge_key_is_order_independent() {
        assert_eq!(EdgeKey::new(3, 9), EdgeKey::new(9, 3));
        assert_eq!(EdgeKey::new(9, 3).endpoints(), (3, 9));
        assert_ne!(EdgeKey::new(1, 2), EdgeKey::new(2, 1 << 16));
    }

    #[test]
    fn test_pyramid_adjacency() {
        let adj = Adjacency::build(4, &PYRAMID, DegeneracyPolicy::Reject).unwrap();
        assert_eq!(adj.num_edges(), 6);
        assert_eq!(adj.num_boundary_edges(), 0);
        assert!(adj.edges().iter().all(|e| e.face_count == 2));

        // First-seen order follows the face walk.
        assert_eq!(adj.edge_ordinal(0, 1), Some(0));
        assert_eq!(adj.edge_ordinal(2, 1), Some(1));
        assert_eq!(adj.edge_ordinal(2, 0), Some(2));
        assert_eq!(adj.edge_ordinal(3, 0), Some(4));

        assert_eq!(adj.neighbors(0), &[1, 2, 3]);
        assert_eq!(adj.neighbors(1), &[0, 2, 3]);
    }

    #[test]
    fn test_opposite_vertices() {
        let adj = Adjacency::build(4, &PYRAMID, DegeneracyPolicy::Reject).unwrap();
        let e01 = &adj.edges()[adj.edge_ordinal(0, 1).unwrap() as usize];
        assert_eq!(e01.opposite, [Some(2), Some(3)]);
    }

    #[test]
    fn test_boundary_edges_of_single_triangle() {
        let adj = Adjacency::build(3, &[[0, 1, 2]], DegeneracyPolicy::Reject).unwrap();
        assert_eq!(adj.num_edges(), 3);
        assert_eq!(adj.num_boundary_edges(), 3);
    }

    #[test]
    fn test_isolated_vertex() {
        let adj = Adjacency::build(4, &[[0, 1, 2]], DegeneracyPolicy::Reject).unwrap();
        assert_eq!(adj.isolated_vertices().collect::<Vec<_>>(), vec![3]);
        assert!(adj.neighbors(3).is_empty());
    }

    #[test]
    fn test_non_manifold_policy() {
        // Three fins sharing edge (0, 1).
        let fins = [[0, 1, 2], [1, 0, 3], [0, 1, 4]];
        assert_eq!(
            Adjacency::build(5, &fins, DegeneracyPolicy::Reject).unwrap_err(),
            SubdivideError::NonManifoldEdge { a: 0, b: 1 }
        );

        let adj = Adjacency::build(5, &fins, DegeneracyPolicy::Fallback).unwrap();
        let edge = &adj.edges()[0];
        assert_eq!(edge.face_count, 3);
        assert_eq!(edge.opposite, [Some(2), Some(4)]);
        assert_eq!(adj.non_manifold_edges(), &[EdgeKey::new(0, 1)]);
    }
}
