//! Node, edge and route types shared by every layer.

use serde::{Deserialize, Serialize};

/// A named location in the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Persistent identifier (primary key in storage)
    pub id: i64,
    /// Display name, matched case-insensitively on lookup
    pub name: String,
    /// X coordinate (informational only)
    pub x: f64,
    /// Y coordinate (informational only)
    pub y: f64,
}

impl Node {
    pub fn new(id: i64, name: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id,
            name: name.into(),
            x,
            y,
        }
    }
}

/// A directed, weighted connection between two node ids.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    /// Source node id
    pub from_id: i64,
    /// Target node id
    pub to_id: i64,
    /// Travel cost, expected to be non-negative
    pub weight: f64,
}

impl Edge {
    pub fn new(from_id: i64, to_id: i64, weight: f64) -> Self {
        Self {
            from_id,
            to_id,
            weight,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from_id == self.to_id
    }
}

/// Answer to a point-to-point query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResult {
    /// Sum of edge weights along `path`
    pub total_distance: f64,
    /// Node names from start to end, inclusive
    pub path: Vec<String>,
}

impl PathResult {
    /// Number of edges traversed.
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }

    /// Path rendered as `A -> B -> C`.
    pub fn arrow_path(&self) -> String {
        self.path.join(" -> ")
    }
}
