//! All-pairs shortest paths via Floyd-Warshall.
//!
//! Produces a dense distance matrix and a next-hop matrix for one [`Graph`].
//! The only way to obtain a [`ShortestPaths`] is [`ShortestPaths::compute`],
//! so there is no observable "not yet computed" state.
//!
//! # Complexity
//!
//! O(n³) time and O(n²) memory on a single thread. Rows whose distance to the
//! intermediate node is infinite are skipped, which keeps sparse graphs fast.
//!
//! Negative weights are accepted as-is; a negative cycle yields meaningless
//! (arbitrarily decreasing) distances. There is no cycle detection.

use crate::graph::Graph;

/// Distance and next-hop matrices for every ordered pair of dense indices.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPaths {
    n: usize,
    /// Row-major `n * n` distances; `f64::INFINITY` when unreachable.
    dist: Vec<f64>,
    /// Row-major `n * n` first hops; `None` on the diagonal or when unreachable.
    next: Vec<Option<usize>>,
}

impl ShortestPaths {
    /// Run Floyd-Warshall over the graph's resolvable edges.
    pub fn compute(graph: &Graph) -> Self {
        let n = graph.node_count();
        let mut dist = vec![f64::INFINITY; n * n];
        let mut next = vec![None; n * n];

        for i in 0..n {
            dist[i * n + i] = 0.0;
        }

        // Parallel edges collapse to the cheapest one here.
        for (u, v, w) in graph.resolved_edges() {
            if w < dist[u * n + v] {
                dist[u * n + v] = w;
                next[u * n + v] = Some(v);
            }
        }

        for k in 0..n {
            for i in 0..n {
                let d_ik = dist[i * n + k];
                if d_ik.is_infinite() {
                    continue;
                }
                for j in 0..n {
                    let alt = d_ik + dist[k * n + j];
                    if alt < dist[i * n + j] {
                        dist[i * n + j] = alt;
                        // First hop of the i->k leg, not k itself.
                        next[i * n + j] = next[i * n + k];
                    }
                }
            }
        }

        Self { n, dist, next }
    }

    /// Number of nodes (matrix dimension).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Shortest distance from `from` to `to`. Panics if either index is out of range.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.dist[self.offset(from, to)]
    }

    /// First hop on a shortest `from -> to` path.
    pub fn next_hop(&self, from: usize, to: usize) -> Option<usize> {
        self.next[self.offset(from, to)]
    }

    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.distance(from, to).is_finite()
    }

    /// Copy of the distance matrix as rows.
    pub fn distance_matrix(&self) -> Vec<Vec<f64>> {
        if self.n == 0 {
            return Vec::new();
        }
        self.dist.chunks(self.n).map(|row| row.to_vec()).collect()
    }

    /// Dense indices along a shortest path, start and end inclusive.
    ///
    /// Returns an empty vector when there is no first hop (unreachable, or
    /// `start == end` without a cycle back to itself). Reconstruction is
    /// all-or-nothing: a broken chain also yields an empty vector.
    pub fn reconstruct_path(&self, start: usize, end: usize) -> Vec<usize> {
        if self.next_hop(start, end).is_none() {
            return Vec::new();
        }

        let mut path = vec![start];
        let mut at = start;
        // A simple path visits each node at most once, plus the closing hop of a cycle.
        for _ in 0..=self.n {
            match self.next_hop(at, end) {
                Some(hop) => {
                    at = hop;
                    path.push(at);
                    if at == end {
                        return path;
                    }
                }
                None => return Vec::new(),
            }
        }

        tracing::warn!(
            "Next-hop chain from {} to {} did not terminate, dropping path",
            start,
            end
        );
        Vec::new()
    }

    fn offset(&self, from: usize, to: usize) -> usize {
        assert!(
            from < self.n && to < self.n,
            "index out of range: ({}, {}) for {} nodes",
            from,
            to,
            self.n
        );
        from * self.n + to
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Edge, Node};

    fn graph(names: &[&str], edges: &[(i64, i64, f64)]) -> Graph {
        let nodes = names
            .iter()
            .enumerate()
            .map(|(i, name)| Node::new(i as i64 + 1, *name, 0.0, 0.0))
            .collect();
        let edges = edges.iter().map(|&(u, v, w)| Edge::new(u, v, w)).collect();
        Graph::new(nodes, edges).unwrap()
    }

    #[test]
    fn test_chain_distances_and_path() {
        // A -> B (1), B -> C (2)
        let g = graph(&["A", "B", "C"], &[(1, 2, 1.0), (2, 3, 2.0)]);
        let sp = ShortestPaths::compute(&g);

        assert_eq!(sp.distance(0, 2), 3.0);
        assert_eq!(sp.reconstruct_path(0, 2), vec![0, 1, 2]);
        assert_eq!(sp.next_hop(0, 2), Some(1));
    }

    #[test]
    fn test_diagonal_is_zero_and_directed_is_asymmetric() {
        let g = graph(&["A", "B", "C"], &[(1, 2, 1.0), (2, 3, 2.0)]);
        let sp = ShortestPaths::compute(&g);

        for i in 0..sp.len() {
            assert_eq!(sp.distance(i, i), 0.0);
        }
        assert_eq!(sp.distance(0, 1), 1.0);
        assert!(sp.distance(1, 0).is_infinite());
    }

    #[test]
    fn test_parallel_edges_collapse_to_minimum() {
        let g = graph(&["A", "B"], &[(1, 2, 5.0), (1, 2, 2.0)]);
        let sp = ShortestPaths::compute(&g);
        assert_eq!(sp.distance(0, 1), 2.0);
    }

    #[test]
    fn test_dangling_edge_is_ignored() {
        let with_dangling = graph(&["A", "B"], &[(1, 2, 3.0), (2, 42, 1.0), (42, 1, 1.0)]);
        let without = graph(&["A", "B"], &[(1, 2, 3.0)]);
        assert_eq!(
            ShortestPaths::compute(&with_dangling),
            ShortestPaths::compute(&without)
        );
    }

    #[test]
    fn test_unreachable_has_no_path() {
        let g = graph(&["A", "B"], &[]);
        let sp = ShortestPaths::compute(&g);
        assert!(!sp.is_reachable(0, 1));
        assert!(sp.reconstruct_path(0, 1).is_empty());
    }

    #[test]
    fn test_same_node_without_cycle_is_empty() {
        let g = graph(&["A", "B"], &[(1, 2, 1.0)]);
        let sp = ShortestPaths::compute(&g);
        assert_eq!(sp.distance(0, 0), 0.0);
        assert!(sp.reconstruct_path(0, 0).is_empty());
    }

    #[test]
    fn test_next_hop_propagates_first_leg() {
        // A -> B -> C -> D with a costly shortcut A -> D.
        let g = graph(
            &["A", "B", "C", "D"],
            &[(1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0), (1, 4, 10.0)],
        );
        let sp = ShortestPaths::compute(&g);
        assert_eq!(sp.distance(0, 3), 3.0);
        assert_eq!(sp.next_hop(0, 3), Some(1));
        assert_eq!(sp.reconstruct_path(0, 3), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_cheaper_detour_beats_direct_edge() {
        let g = graph(&["A", "B", "C"], &[(1, 3, 10.0), (1, 2, 2.0), (2, 3, 3.0)]);
        let sp = ShortestPaths::compute(&g);
        assert_eq!(sp.distance(0, 2), 5.0);
        assert_eq!(sp.reconstruct_path(0, 2), vec![0, 1, 2]);
    }

    #[test]
    fn test_compute_is_idempotent() {
        let g = graph(&["A", "B", "C"], &[(1, 2, 1.5), (2, 3, 0.5), (3, 1, 4.0)]);
        assert_eq!(ShortestPaths::compute(&g), ShortestPaths::compute(&g));
    }

    #[test]
    fn test_distance_matrix_shape() {
        let g = graph(&["A", "B", "C"], &[(1, 2, 1.0)]);
        let matrix = ShortestPaths::compute(&g).distance_matrix();
        assert_eq!(matrix.len(), 3);
        assert!(matrix.iter().all(|row| row.len() == 3));
        assert_eq!(matrix[0][1], 1.0);

        let empty = ShortestPaths::compute(&graph(&[], &[]));
        assert!(empty.is_empty());
        assert!(empty.distance_matrix().is_empty());
    }

    #[test]
    fn test_broken_chain_is_all_or_nothing() {
        let g = graph(&["A", "B", "C"], &[(1, 2, 1.0), (2, 3, 1.0)]);
        let mut sp = ShortestPaths::compute(&g);
        // Sever B's hop toward C while A still points through B.
        sp.next[3 + 2] = None;
        assert!(sp.reconstruct_path(0, 2).is_empty());
    }

    #[test]
    fn test_corrupt_cycle_terminates() {
        let g = graph(&["A", "B", "C"], &[(1, 2, 1.0), (2, 3, 1.0)]);
        let mut sp = ShortestPaths::compute(&g);
        // Make B point back to A for destination C.
        sp.next[3 + 2] = Some(0);
        assert!(sp.reconstruct_path(0, 2).is_empty());
    }

    #[test]
    #[should_panic(expected = "index out of range")]
    fn test_out_of_range_index_panics() {
        let g = graph(&["A"], &[]);
        ShortestPaths::compute(&g).distance(0, 1);
    }
}
