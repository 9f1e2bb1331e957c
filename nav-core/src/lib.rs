//! Navigator core - shortest routes over a small weighted directed graph.
//!
//! This crate provides:
//! - Graph model (dense indexing of nodes loaded from storage)
//! - All-pairs shortest paths (Floyd-Warshall distance + next-hop matrices)
//! - Navigator service (generation lifecycle, reload discipline, named queries)
//! - The `GraphSource` boundary the storage layer implements
//!
//! # Architecture
//!
//! ```text
//! GraphSource (storage) -> Graph -> ShortestPaths -> Generation -> Navigator queries
//! ```
//!
//! # Usage
//!
//! ```rust
//! use nav_core::{Edge, MemorySource, Navigator, Node};
//!
//! let source = MemorySource::new(
//!     vec![Node::new(1, "A", 0.0, 0.0), Node::new(2, "B", 1.0, 0.0)],
//!     vec![Edge::new(1, 2, 4.0)],
//! );
//! let navigator = Navigator::new(source);
//! let route = navigator.shortest_path("a", "B")?;
//! assert_eq!(route.total_distance, 4.0);
//! assert_eq!(route.path, vec!["A", "B"]);
//! # Ok::<(), nav_core::NavError>(())
//! ```

pub mod error;
pub mod floyd_warshall;
pub mod graph;
pub mod service;
pub mod source;
pub mod types;


pub use error::{EndpointSide, NavError, Result, SourceError};
pub use floyd_warshall::ShortestPaths;
pub use graph::{fold_name, Graph};
pub use service::{Generation, Navigator};
pub use source::{GraphSource, MemorySource};
pub use types::{Edge, Node, PathResult};
