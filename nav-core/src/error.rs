//! Error types for nav-core.

use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for nav-core operations.
pub type Result<T> = std::result::Result<T, NavError>;

/// Which endpoint of a route query failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointSide {
    Start,
    End,
}

impl EndpointSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndpointSide::Start => "start",
            EndpointSide::End => "end",
        }
    }
}

impl fmt::Display for EndpointSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors surfaced by the graph model and the navigator service.
#[derive(Error, Debug)]
pub enum NavError {
    /// Two nodes share the same id.
    #[error("Malformed graph: duplicate node id {id}")]
    MalformedGraph {
        /// The repeated id.
        id: i64,
    },

    /// The graph source failed; the previously loaded generation stays in effect.
    #[error("Failed to reload graph: {0}")]
    Reload(#[source] SourceError),

    /// A named endpoint is absent from the current graph.
    #[error("Node not found: {name} ({side})")]
    NodeNotFound {
        /// Which side of the query was missing.
        side: EndpointSide,
        /// The name as given by the caller.
        name: String,
    },

    /// Both endpoints exist but no route connects them.
    #[error("No path exists from {start} to {end}")]
    NoPath {
        /// Start name as given by the caller.
        start: String,
        /// End name as given by the caller.
        end: String,
    },

    /// The operation is declared but not backed by storage.
    #[error("Operation not supported: {operation}")]
    Unsupported {
        /// Name of the rejected operation.
        operation: &'static str,
    },
}

impl NavError {
    /// True for errors that describe the query rather than the service state.
    pub fn is_query_error(&self) -> bool {
        matches!(self, NavError::NodeNotFound { .. } | NavError::NoPath { .. })
    }
}

/// Errors reported by a [`GraphSource`](crate::GraphSource) implementation.
#[derive(Error, Debug)]
pub enum SourceError {
    /// No pooled connection became available within the bounded wait.
    #[error("Timed out after {waited:?} waiting for a storage connection")]
    ConnectionTimeout {
        /// How long the caller waited.
        waited: Duration,
    },

    /// Any other backend failure, kept opaque to the core.
    #[error("Storage error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SourceError {
    /// Wrap an arbitrary backend error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        SourceError::Backend(Box::new(err))
    }

    /// Whether retrying the same call later may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SourceError::ConnectionTimeout { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NavError::NodeNotFound {
            side: EndpointSide::End,
            name: "Z".to_string(),
        };
        assert!(err.to_string().contains("Z"));
        assert!(err.to_string().contains("end"));

        let err = NavError::NoPath {
            start: "A".to_string(),
            end: "B".to_string(),
        };
        assert!(err.to_string().contains("No path"));
    }

    #[test]
    fn test_not_found_and_no_path_are_distinct() {
        let missing = NavError::NodeNotFound {
            side: EndpointSide::Start,
            name: "A".to_string(),
        };
        let unreachable = NavError::NoPath {
            start: "A".to_string(),
            end: "B".to_string(),
        };
        assert_ne!(missing.to_string(), unreachable.to_string());
        assert!(missing.is_query_error());
        assert!(unreachable.is_query_error());
    }

    #[test]
    fn test_reload_keeps_source_chain() {
        let err = NavError::Reload(SourceError::ConnectionTimeout {
            waited: Duration::from_millis(250),
        });
        let source = std::error::Error::source(&err).expect("reload error has a source");
        assert!(source.to_string().contains("250ms"));
        assert!(!err.is_query_error());
    }

    #[test]
    fn test_retryable() {
        let timeout = SourceError::ConnectionTimeout {
            waited: Duration::from_secs(6),
        };
        assert!(timeout.is_retryable());

        let io = SourceError::backend(std::io::Error::new(std::io::ErrorKind::Other, "disk"));
        assert!(!io.is_retryable());
    }
}
