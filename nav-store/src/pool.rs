//! Bounded pool of DuckDB connections.
//!
//! Every handle is cloned from one opened database, so they all see the same
//! data. Checkout blocks for at most `acquire_timeout` and then fails with
//! [`StoreError::PoolTimeout`]; a checked-out handle goes back to the pool
//! when its [`PooledConnection`] guard is dropped, whatever the exit path.

use std::ops::{Deref, DerefMut};
use std::time::{Duration, Instant};

use duckdb::Connection;
use parking_lot::{Condvar, Mutex};

use crate::error::{Result, StoreError};

/// Default number of pooled connections.
pub const DEFAULT_POOL_SIZE: usize = 10;

/// Default bounded wait for a free connection.
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of connections opened up front
    pub size: usize,
    /// Longest a caller waits in `get()` before giving up
    pub acquire_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_POOL_SIZE,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

pub struct ConnectionPool {
    idle: Mutex<Vec<Connection>>,
    returned: Condvar,
    config: PoolConfig,
}

impl ConnectionPool {
    /// Build a pool of `config.size` handles sharing `root`'s database.
    pub fn new(root: Connection, config: PoolConfig) -> Result<Self> {
        if config.size == 0 {
            return Err(StoreError::EmptyPool);
        }

        let mut idle = Vec::with_capacity(config.size);
        for _ in 1..config.size {
            idle.push(root.try_clone()?);
        }
        idle.push(root);

        tracing::debug!(
            "Connection pool ready: {} connections, acquire timeout {:?}",
            config.size,
            config.acquire_timeout
        );

        Ok(Self {
            idle: Mutex::new(idle),
            returned: Condvar::new(),
            config,
        })
    }

    /// Check out a connection, waiting up to the configured timeout.
    pub fn get(&self) -> Result<PooledConnection<'_>> {
        let started = Instant::now();
        let mut idle = self.idle.lock();

        loop {
            if let Some(conn) = idle.pop() {
                tracing::debug!("Checked out connection ({} idle)", idle.len());
                return Ok(PooledConnection {
                    pool: self,
                    conn: Some(conn),
                });
            }

            let remaining = self.config.acquire_timeout.saturating_sub(started.elapsed());
            if remaining.is_zero() {
                break;
            }
            // Spurious and stolen wakeups simply loop with less time left.
            self.returned.wait_for(&mut idle, remaining);
        }

        let waited = started.elapsed();
        tracing::warn!(
            "Timed out after {:?} waiting for a pooled connection (size {})",
            waited,
            self.config.size
        );
        Err(StoreError::PoolTimeout { waited })
    }

    /// Connections currently idle.
    pub fn available(&self) -> usize {
        self.idle.lock().len()
    }

    /// Total connections owned by the pool.
    pub fn size(&self) -> usize {
        self.config.size
    }

    pub fn config(&self) -> PoolConfig {
        self.config
    }

    fn put_back(&self, conn: Connection) {
        self.idle.lock().push(conn);
        self.returned.notify_one();
    }
}

impl std::fmt::Debug for ConnectionPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionPool")
            .field("size", &self.config.size)
            .field("available", &self.available())
            .field("acquire_timeout", &self.config.acquire_timeout)
            .finish()
    }
}

/// A checked-out connection; returns itself to the pool on drop.
pub struct PooledConnection<'a> {
    pool: &'a ConnectionPool,
    conn: Option<Connection>,
}

impl Deref for PooledConnection<'_> {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        self.conn.as_ref().expect("connection present until drop")
    }
}

impl DerefMut for PooledConnection<'_> {
    fn deref_mut(&mut self) -> &mut Connection {
        self.conn.as_mut().expect("connection present until drop")
    }
}

impl Drop for PooledConnection<'_> {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            self.pool.put_back(conn);
        }
    }
}
