//! DuckDB storage for the navigator.
//!
//! - `schema`: table definitions and the queries the loader runs
//! - `pool`: bounded connection pool with timed checkout
//! - `store`: [`NavStore`], the [`nav_core::GraphSource`] used in production
//! - `seed`: a small demo map

pub mod error;
pub mod pool;
pub mod schema;
pub mod seed;
pub mod store;

pub use error::{Result, StoreError};
pub use pool::{ConnectionPool, PoolConfig, PooledConnection};
pub use store::{NavStore, StoreStats};
