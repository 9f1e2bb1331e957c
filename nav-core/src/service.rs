//! Navigator service: owns the loaded generation and answers named queries.
//!
//! A generation is one `(Graph, ShortestPaths)` pair built entirely off to
//! the side and then installed by swapping a single `Arc`. Readers clone the
//! `Arc` under a brief read lock and never observe a half-built state.
//!
//! Reloads are serialized by a dedicated mutex; the first query on an empty
//! navigator loads under that same mutex, so concurrent first queries
//! collapse into one fetch from the source.

use std::sync::Arc;
use std::time::{Duration, Instant, SystemTime};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, error, info};

use crate::error::{EndpointSide, NavError, Result};
use crate::floyd_warshall::ShortestPaths;
use crate::graph::Graph;
use crate::source::GraphSource;
use crate::types::{Edge, Node, PathResult};

/// One immutable loaded graph with its computed matrices.
#[derive(Debug)]
pub struct Generation {
    number: u64,
    graph: Graph,
    paths: ShortestPaths,
    loaded_at: SystemTime,
    compute_time: Duration,
}

impl Generation {
    /// Build a generation from an already-constructed graph.
    pub fn build(number: u64, graph: Graph) -> Self {
        let started = Instant::now();
        let paths = ShortestPaths::compute(&graph);
        Self {
            number,
            graph,
            paths,
            loaded_at: SystemTime::now(),
            compute_time: started.elapsed(),
        }
    }

    /// Monotonically increasing per navigator, starting at 1.
    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn paths(&self) -> &ShortestPaths {
        &self.paths
    }

    pub fn loaded_at(&self) -> SystemTime {
        self.loaded_at
    }

    /// Time spent in Floyd-Warshall for this generation.
    pub fn compute_time(&self) -> Duration {
        self.compute_time
    }

    /// Shortest route between two named nodes within this generation.
    ///
    /// The start name is resolved first, so a query with two unknown names
    /// reports the start side. A query from a node to itself is a zero-length
    /// route containing just that node.
    pub fn shortest_path(&self, start: &str, end: &str) -> Result<PathResult> {
        let from = self
            .graph
            .index_by_name(start)
            .ok_or_else(|| NavError::NodeNotFound {
                side: EndpointSide::Start,
                name: start.to_string(),
            })?;
        let to = self
            .graph
            .index_by_name(end)
            .ok_or_else(|| NavError::NodeNotFound {
                side: EndpointSide::End,
                name: end.to_string(),
            })?;

        let no_path = || NavError::NoPath {
            start: start.to_string(),
            end: end.to_string(),
        };

        let distance = self.paths.distance(from, to);
        if distance.is_infinite() {
            return Err(no_path());
        }

        let indices = if from == to {
            vec![from]
        } else {
            self.paths.reconstruct_path(from, to)
        };
        if indices.is_empty() {
            return Err(no_path());
        }

        let path = indices
            .into_iter()
            .filter_map(|i| self.graph.node(i).map(|n| n.name.clone()))
            .collect();

        Ok(PathResult {
            total_distance: distance,
            path,
        })
    }
}

/// Shortest-path service over a [`GraphSource`].
///
/// `Send + Sync` whenever the source is; share it behind an `Arc`.
pub struct Navigator<S> {
    source: S,
    current: RwLock<Option<Arc<Generation>>>,
    reload_guard: Mutex<()>,
}

impl<S: GraphSource> Navigator<S> {
    /// Create a navigator. Nothing is fetched until the first query or reload.
    pub fn new(source: S) -> Self {
        Self {
            source,
            current: RwLock::new(None),
            reload_guard: Mutex::new(()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the graph again, recompute, and install the result.
    ///
    /// On failure the previously installed generation keeps serving queries.
    pub fn reload(&self) -> Result<Arc<Generation>> {
        let _guard = self.reload_guard.lock();
        self.reload_locked()
    }

    /// Shortest route between two named nodes, loading the graph if needed.
    pub fn shortest_path(&self, start: &str, end: &str) -> Result<PathResult> {
        let generation = self.ensure_loaded()?;
        let result = generation.shortest_path(start, end);
        match &result {
            Ok(route) => debug!(
                "Route {} -> {}: distance={}, hops={}",
                start,
                end,
                route.total_distance,
                route.hops()
            ),
            Err(e) => debug!("Route {} -> {} failed: {}", start, end, e),
        }
        result
    }

    /// Nodes of the current generation in load order.
    pub fn nodes(&self) -> Result<Arc<[Node]>> {
        Ok(self.ensure_loaded()?.graph().nodes_shared())
    }

    /// Edges of the current generation as stored, dangling ones included.
    pub fn edges(&self) -> Result<Arc<[Edge]>> {
        Ok(self.ensure_loaded()?.graph().edges_shared())
    }

    /// The current generation, for callers that need several consistent reads.
    pub fn snapshot(&self) -> Result<Arc<Generation>> {
        self.ensure_loaded()
    }

    /// Installed generation number, without triggering a load.
    pub fn current_generation(&self) -> Option<u64> {
        self.current.read().as_ref().map(|g| g.number())
    }

    /// Storage writes are not exposed through the navigator; always `Unsupported`.
    pub fn add_node(&self, _name: &str, _x: f64, _y: f64) -> Result<()> {
        Err(NavError::Unsupported {
            operation: "add_node",
        })
    }

    pub fn add_edge(&self, _from: &str, _to: &str, _weight: f64) -> Result<()> {
        Err(NavError::Unsupported {
            operation: "add_edge",
        })
    }

    pub fn remove_node(&self, _name: &str) -> Result<()> {
        Err(NavError::Unsupported {
            operation: "remove_node",
        })
    }

    pub fn remove_edge(&self, _from: &str, _to: &str) -> Result<()> {
        Err(NavError::Unsupported {
            operation: "remove_edge",
        })
    }

    fn ensure_loaded(&self) -> Result<Arc<Generation>> {
        if let Some(generation) = self.installed() {
            return Ok(generation);
        }

        let _guard = self.reload_guard.lock();
        // Another thread may have finished loading while we waited.
        if let Some(generation) = self.installed() {
            return Ok(generation);
        }
        self.reload_locked()
    }

    fn installed(&self) -> Option<Arc<Generation>> {
        self.current.read().clone()
    }

    /// Caller must hold `reload_guard`.
    fn reload_locked(&self) -> Result<Arc<Generation>> {
        let number = self.current_generation().map_or(1, |n| n + 1);
        let started = Instant::now();
        info!("Reloading graph (generation {})", number);

        let nodes = self.source.fetch_nodes().map_err(|e| {
            error!("Failed to fetch nodes: {}", e);
            NavError::Reload(e)
        })?;
        let edges = self.source.fetch_edges().map_err(|e| {
            error!("Failed to fetch edges: {}", e);
            NavError::Reload(e)
        })?;
        debug!("Fetched {} nodes and {} edges", nodes.len(), edges.len());

        let graph = Graph::new(nodes, edges).map_err(|e| {
            error!("Rejected graph: {}", e);
            e
        })?;

        let generation = Arc::new(Generation::build(number, graph));
        *self.current.write() = Some(Arc::clone(&generation));

        info!(
            "Loaded generation {}: {} nodes, {} edges (compute {:?}, total {:?})",
            number,
            generation.graph().node_count(),
            generation.graph().edge_count(),
            generation.compute_time(),
            started.elapsed()
        );
        Ok(generation)
    }
}

impl<S> std::fmt::Debug for Navigator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field(
                "generation",
                &self.current.read().as_ref().map(|g| g.number()),
            )
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::MemorySource;

    fn create_test_navigator() -> Navigator<MemorySource> {
        let nodes = vec![
            Node::new(1, "A", 0.0, 0.0),
            Node::new(2, "B", 1.0, 0.0),
            Node::new(3, "C", 2.0, 0.0),
        ];
        let edges = vec![Edge::new(1, 2, 1.0), Edge::new(2, 3, 2.0)];
        Navigator::new(MemorySource::new(nodes, edges))
    }

    #[test]
    fn test_lazy_load_on_first_query() {
        let nav = create_test_navigator();
        assert_eq!(nav.current_generation(), None);
        assert_eq!(nav.source().fetch_count(), 0);

        nav.shortest_path("A", "C").unwrap();
        assert_eq!(nav.current_generation(), Some(1));

        nav.shortest_path("A", "B").unwrap();
        assert_eq!(nav.source().fetch_count(), 1);
    }

    #[test]
    fn test_shortest_path_names_come_from_graph() {
        let nav = create_test_navigator();
        let route = nav.shortest_path(" a ", "c").unwrap();
        assert_eq!(route.total_distance, 3.0);
        assert_eq!(route.path, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_start_checked_before_end() {
        let nav = create_test_navigator();
        match nav.shortest_path("X", "Y").unwrap_err() {
            NavError::NodeNotFound { side, name } => {
                assert_eq!(side, EndpointSide::Start);
                assert_eq!(name, "X");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_same_start_and_end() {
        let nav = create_test_navigator();
        let route = nav.shortest_path("B", "b").unwrap();
        assert_eq!(route.total_distance, 0.0);
        assert_eq!(route.path, vec!["B"]);
        assert_eq!(route.hops(), 0);
    }

    #[test]
    fn test_reload_bumps_generation() {
        let nav = create_test_navigator();
        assert_eq!(nav.reload().unwrap().number(), 1);
        assert_eq!(nav.reload().unwrap().number(), 2);
        assert_eq!(nav.current_generation(), Some(2));
    }

    #[test]
    fn test_failed_reload_does_not_consume_number() {
        let nav = create_test_navigator();
        nav.reload().unwrap();
        nav.source().fail_next("offline");
        assert!(matches!(nav.reload(), Err(NavError::Reload(_))));
        assert_eq!(nav.reload().unwrap().number(), 2);
    }

    #[test]
    fn test_malformed_graph_is_not_installed() {
        let nav = create_test_navigator();
        nav.reload().unwrap();
        nav.source().replace(
            vec![Node::new(1, "A", 0.0, 0.0), Node::new(1, "A2", 0.0, 0.0)],
            vec![],
        );
        assert!(matches!(
            nav.reload(),
            Err(NavError::MalformedGraph { id: 1 })
        ));
        assert_eq!(nav.current_generation(), Some(1));
        assert_eq!(nav.nodes().unwrap().len(), 3);
    }

    #[test]
    fn test_views_share_snapshot_data() {
        let nav = create_test_navigator();
        let snapshot = nav.snapshot().unwrap();
        let nodes = nav.nodes().unwrap();
        assert!(Arc::ptr_eq(&nodes, &snapshot.graph().nodes_shared()));
        assert_eq!(nav.edges().unwrap().len(), 2);
    }

    #[test]
    fn test_write_surface_is_unsupported() {
        let nav = create_test_navigator();
        let results = [
            nav.add_node("Z", 0.0, 0.0),
            nav.add_edge("A", "C", 1.0),
            nav.remove_node("A"),
            nav.remove_edge("A", "B"),
        ];
        for result in results {
            assert!(matches!(result, Err(NavError::Unsupported { .. })));
        }
        // Rejected writes never trigger a load.
        assert_eq!(nav.current_generation(), None);
    }

    #[test]
    fn test_navigator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Navigator<MemorySource>>();
    }
}
