//! In-memory graph model.
//!
//! Nodes arrive from storage ordered by ascending id and are assigned dense
//! indices in that order. The dense index is what the shortest-path matrices
//! are addressed by; it is only meaningful within one loaded generation.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{NavError, Result};
use crate::types::{Edge, Node};

/// Canonical form used for every name lookup: trimmed and lowercased.
pub fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Immutable indexed graph: node/edge sequences plus id and name indices.
#[derive(Debug, Clone)]
pub struct Graph {
    nodes: Arc<[Node]>,
    edges: Arc<[Edge]>,
    id_index: HashMap<i64, usize>,
    name_index: HashMap<String, usize>,
}

impl Graph {
    /// Build a graph from raw rows.
    ///
    /// Fails only when two nodes share an id. Duplicate names are accepted;
    /// the first node carrying a name owns it in the lookup index.
    pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        let mut id_index = HashMap::with_capacity(nodes.len());
        let mut name_index = HashMap::with_capacity(nodes.len());

        for (i, node) in nodes.iter().enumerate() {
            if id_index.insert(node.id, i).is_some() {
                return Err(NavError::MalformedGraph { id: node.id });
            }

            match name_index.entry(fold_name(&node.name)) {
                Entry::Vacant(slot) => {
                    slot.insert(i);
                }
                Entry::Occupied(slot) => {
                    tracing::warn!(
                        "Duplicate node name '{}' (id {}), lookups resolve to id {}",
                        node.name,
                        node.id,
                        nodes[*slot.get()].id
                    );
                }
            }
        }

        Ok(Self {
            nodes: nodes.into(),
            edges: edges.into(),
            id_index,
            name_index,
        })
    }

    /// Dense index of a node id.
    pub fn index_of(&self, node_id: i64) -> Option<usize> {
        self.id_index.get(&node_id).copied()
    }

    /// Look up a node by name (case-insensitive, surrounding whitespace ignored).
    pub fn node_by_name(&self, name: &str) -> Option<&Node> {
        self.index_by_name(name).map(|i| &self.nodes[i])
    }

    /// Dense index of a node by name, using the same rule as `node_by_name`.
    pub fn index_by_name(&self, name: &str) -> Option<usize> {
        self.name_index.get(&fold_name(name)).copied()
    }

    /// Node at a dense index.
    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Shared read-only handle to the node sequence.
    pub fn nodes_shared(&self) -> Arc<[Node]> {
        Arc::clone(&self.nodes)
    }

    /// Shared read-only handle to the edge sequence.
    pub fn edges_shared(&self) -> Arc<[Edge]> {
        Arc::clone(&self.edges)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges whose endpoints both resolve, as dense index triples.
    ///
    /// Edges naming an unknown id are skipped here; this is the only view the
    /// shortest-path engine sees.
    pub fn resolved_edges(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.edges.iter().filter_map(|e| {
            let u = self.index_of(e.from_id)?;
            let v = self.index_of(e.to_id)?;
            Some((u, v, e.weight))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_graph() -> Graph {
        let nodes = vec![
            Node::new(10, "Alpha", 0.0, 0.0),
            Node::new(20, "Beta", 1.0, 0.0),
            Node::new(30, "Gamma", 2.0, 0.0),
        ];
        let edges = vec![
            Edge::new(10, 20, 1.0),
            Edge::new(20, 30, 2.0),
            Edge::new(30, 99, 5.0), // dangling
        ];
        Graph::new(nodes, edges).unwrap()
    }

    #[test]
    fn test_dense_indices_follow_load_order() {
        let graph = create_test_graph();
        assert_eq!(graph.index_of(10), Some(0));
        assert_eq!(graph.index_of(20), Some(1));
        assert_eq!(graph.index_of(30), Some(2));
        assert_eq!(graph.index_of(99), None);
    }

    #[test]
    fn test_duplicate_id_is_malformed() {
        let nodes = vec![Node::new(1, "A", 0.0, 0.0), Node::new(1, "B", 0.0, 0.0)];
        let err = Graph::new(nodes, vec![]).unwrap_err();
        assert!(matches!(err, NavError::MalformedGraph { id: 1 }));
    }

    #[test]
    fn test_name_lookup_is_case_insensitive() {
        let graph = create_test_graph();
        assert_eq!(graph.node_by_name("beta").map(|n| n.id), Some(20));
        assert_eq!(graph.node_by_name("BETA").map(|n| n.id), Some(20));
        assert_eq!(graph.node_by_name("  Gamma ").map(|n| n.id), Some(30));
        assert!(graph.node_by_name("Delta").is_none());
    }

    #[test]
    fn test_duplicate_name_is_accepted() {
        let nodes = vec![Node::new(1, "Dock", 0.0, 0.0), Node::new(2, "dock", 0.0, 0.0)];
        let graph = Graph::new(nodes, vec![]).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.node_by_name("DOCK").map(|n| n.id), Some(1));
    }

    #[test]
    fn test_resolved_edges_skip_dangling() {
        let graph = create_test_graph();
        assert_eq!(graph.edge_count(), 3);

        let resolved: Vec<_> = graph.resolved_edges().collect();
        assert_eq!(resolved, vec![(0, 1, 1.0), (1, 2, 2.0)]);
    }

    #[test]
    fn test_shared_views_point_at_same_data() {
        let graph = create_test_graph();
        let nodes = graph.nodes_shared();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0].name, "Alpha");
        assert!(Arc::ptr_eq(&nodes, &graph.nodes_shared()));
    }

    #[test]
    fn test_empty_graph() {
        let graph = Graph::new(vec![], vec![]).unwrap();
        assert_eq!(graph.node_count(), 0);
        assert!(graph.node(0).is_none());
    }
}
