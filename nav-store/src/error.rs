//! Error types for nav-store.

use std::time::Duration;

use nav_core::SourceError;
use thiserror::Error;

/// Result type alias for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("DuckDB error: {0}")]
    Duckdb(#[from] duckdb::Error),

    /// Every pooled connection stayed checked out for the whole wait.
    #[error("No database connection available after {waited:?}")]
    PoolTimeout { waited: Duration },

    #[error("Connection pool size must be at least 1")]
    EmptyPool,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StoreError> for SourceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PoolTimeout { waited } => SourceError::ConnectionTimeout { waited },
            other => SourceError::backend(other),
        }
    }
}
