//! Boundary between the navigator and whatever stores the graph.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::SourceError;
use crate::types::{Edge, Node};

/// Supplies raw graph rows on every reload.
///
/// Implementations must return nodes in ascending id order; edges may come
/// in any order. Failures are opaque to the navigator and surface as
/// [`NavError::Reload`](crate::NavError::Reload).
pub trait GraphSource: Send + Sync {
    fn fetch_nodes(&self) -> Result<Vec<Node>, SourceError>;
    fn fetch_edges(&self) -> Result<Vec<Edge>, SourceError>;
}

impl<S: GraphSource + ?Sized> GraphSource for Arc<S> {
    fn fetch_nodes(&self) -> Result<Vec<Node>, SourceError> {
        (**self).fetch_nodes()
    }

    fn fetch_edges(&self) -> Result<Vec<Edge>, SourceError> {
        (**self).fetch_edges()
    }
}

impl<S: GraphSource + ?Sized> GraphSource for &S {
    fn fetch_nodes(&self) -> Result<Vec<Node>, SourceError> {
        (**self).fetch_nodes()
    }

    fn fetch_edges(&self) -> Result<Vec<Edge>, SourceError> {
        (**self).fetch_edges()
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// Message for the next `fetch_nodes` call to fail with.
    fail_next: Option<String>,
}

/// In-memory graph source.
///
/// Contents can be replaced between reloads, and a single failure can be
/// armed, which makes it convenient for exercising reload behaviour.
#[derive(Debug, Default)]
pub struct MemorySource {
    state: Mutex<MemoryState>,
    fetches: AtomicUsize,
}

impl MemorySource {
    pub fn new(mut nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        nodes.sort_by_key(|n| n.id);
        Self {
            state: Mutex::new(MemoryState {
                nodes,
                edges,
                fail_next: None,
            }),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Replace the stored graph; takes effect on the next reload.
    pub fn replace(&self, mut nodes: Vec<Node>, edges: Vec<Edge>) {
        nodes.sort_by_key(|n| n.id);
        let mut state = self.state.lock();
        state.nodes = nodes;
        state.edges = edges;
    }

    /// Make the next node fetch fail with a backend error.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.state.lock().fail_next = Some(message.into());
    }

    /// Number of node fetches served so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl GraphSource for MemorySource {
    fn fetch_nodes(&self) -> Result<Vec<Node>, SourceError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let mut state = self.state.lock();
        if let Some(message) = state.fail_next.take() {
            return Err(SourceError::backend(std::io::Error::new(
                std::io::ErrorKind::Other,
                message,
            )));
        }
        Ok(state.nodes.clone())
    }

    fn fetch_edges(&self) -> Result<Vec<Edge>, SourceError> {
        Ok(self.state.lock().edges.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_are_sorted_by_id() {
        let source = MemorySource::new(
            vec![Node::new(3, "C", 0.0, 0.0), Node::new(1, "A", 0.0, 0.0)],
            vec![],
        );
        let ids: Vec<i64> = source.fetch_nodes().unwrap().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_fail_next_is_one_shot() {
        let source = MemorySource::new(vec![Node::new(1, "A", 0.0, 0.0)], vec![]);
        source.fail_next("disk gone");

        let err = source.fetch_nodes().unwrap_err();
        assert!(err.to_string().contains("disk gone"));
        assert!(!err.is_retryable());

        assert_eq!(source.fetch_nodes().unwrap().len(), 1);
        assert_eq!(source.fetch_count(), 2);
    }

    #[test]
    fn test_replace_and_shared_source() {
        let source = Arc::new(MemorySource::default());
        assert!(source.fetch_nodes().unwrap().is_empty());

        source.replace(vec![Node::new(1, "A", 0.0, 0.0)], vec![Edge::new(1, 1, 0.5)]);
        let shared: &dyn GraphSource = &source;
        assert_eq!(shared.fetch_nodes().unwrap().len(), 1);
        assert_eq!(shared.fetch_edges().unwrap(), vec![Edge::new(1, 1, 0.5)]);
    }
}
