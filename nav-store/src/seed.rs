//! Demo map loaded by `nav init --seed`.
//!
//! Six nodes `A`..`F` laid out on a 3x2 grid. The cheapest `A -> C` route is
//! `A -> B -> C` (4.0); `D -> E -> C` gives the southern row a way back up,
//! and `F -> A` closes one long cycle.

use nav_core::{Edge, Node};

use crate::error::Result;
use crate::store::{NavStore, StoreStats};

pub fn demo_nodes() -> Vec<Node> {
    vec![
        Node::new(1, "A", 0.0, 0.0),
        Node::new(2, "B", 2.0, 0.0),
        Node::new(3, "C", 4.0, 0.0),
        Node::new(4, "D", 0.0, 3.0),
        Node::new(5, "E", 2.0, 3.0),
        Node::new(6, "F", 4.0, 3.0),
    ]
}

pub fn demo_edges() -> Vec<Edge> {
    vec![
        Edge::new(1, 2, 2.0),
        Edge::new(2, 3, 2.0),
        Edge::new(1, 4, 3.0),
        Edge::new(4, 5, 1.5),
        Edge::new(5, 3, 1.0),
        Edge::new(2, 5, 2.5),
        Edge::new(5, 6, 2.0),
        Edge::new(3, 6, 3.0),
        Edge::new(6, 1, 6.0),
    ]
}

/// Replace the store's contents with the demo map.
pub fn load_demo(store: &NavStore) -> Result<StoreStats> {
    store.clear()?;
    store.insert_nodes(&demo_nodes())?;
    store.insert_edges(&demo_edges())?;
    store.stats()
}
